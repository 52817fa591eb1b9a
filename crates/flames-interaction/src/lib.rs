//! Adapters to the outside world: the HTTP gateway to the FLAMES service
//! and the terminal share platform.

pub mod http_gateway;
pub mod terminal_share;

pub use http_gateway::HttpFlamesGateway;
pub use terminal_share::TerminalSharePlatform;
