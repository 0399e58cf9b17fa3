//! Infrastructure adapters for waba.
//!
//! This crate implements the ports defined in `waba-core::application::ports`.
//! It contains all external dependencies and I/O operations.

pub mod error;
pub mod http;
pub mod logging;

// Re-export commonly used adapters
pub use error::AdapterError;
pub use http::{HttpApiClient, HttpClientConfig, RetryPolicy};
pub use logging::TracingLogger;
