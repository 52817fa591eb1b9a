pub mod calculate;
pub mod delete;
pub mod history;
pub mod interactive;
pub mod session;
pub mod share;
pub mod show;
