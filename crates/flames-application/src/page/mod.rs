mod celebration;
mod requests;
mod state;

pub(crate) use celebration::Celebration;
pub use requests::{RequestSlot, RequestTicket, RequestToken};
pub use state::{PageState, PageView};
