//! Errors raised while building adapters.
//!
//! Failures of individual API calls are reported through the port as
//! `waba_core::application::ClientError`; this type only covers setup.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AdapterError {
    #[error("Access token is empty")]
    MissingAccessToken,

    #[error("Invalid base URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    #[error("Failed to build HTTP client: {0}")]
    HttpClient(#[from] reqwest::Error),
}
