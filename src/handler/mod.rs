//! Request handler module
//!
//! Responsible for request routing dispatch and the echo handlers behind
//! the registered routes.

pub mod echo;
pub mod router;

// Re-export main entry point
pub use router::handle_request;
