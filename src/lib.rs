//! OpenSound Analytics Server Library
//!
//! This library exposes the internal modules for testing and potential reuse.

pub mod analytics;
pub mod dataset;
pub mod deezer;
pub mod server;

// Re-export commonly used types for convenience
pub use server::{make_app, run_server, RequestsLoggingLevel, ServerConfig};
