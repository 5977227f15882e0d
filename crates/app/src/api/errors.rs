//! Remote API errors.

use reqwest::StatusCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    /// Transport, timeout or body decoding failure.
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("request failed with status {status}: {body}")]
    UnexpectedStatus { status: StatusCode, body: String },

    /// A 2xx response whose body does not have the expected shape.
    #[error("invalid response: {0}")]
    InvalidResponse(String),
}
