//! UI module: command handling and text rendering of the screens.
//!
//! Handlers run on the single command thread; the only suspending calls are
//! the generation request and image downloads, both awaited in place.

pub mod handlers;
pub mod render;

pub use handlers::{dispatch, handle_command};
