//! HTTP protocol layer module
//!
//! Provides HTTP protocol-related base functionality, decoupled from the
//! echo business logic.

pub mod response;

// Re-export commonly used builders
pub use response::{build_404_response, build_text_response};
