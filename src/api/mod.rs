//! API Lambda handler and request processing

pub mod handler;
pub mod helpers;
pub mod parsing;

pub use handler::{AppState, function_handler as handler, handle_request};
