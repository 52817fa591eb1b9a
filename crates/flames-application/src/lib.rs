//! Application layer for the FLAMES client.
//!
//! `FlamesPage` is the view-state behind any front end: it coordinates
//! validation, the remote client, history and sharing, and exposes a
//! snapshot for rendering.

pub mod flames_page;
pub mod page;

pub use flames_page::{CalculateOutcome, FlamesPage};
pub use page::{PageState, PageView};
