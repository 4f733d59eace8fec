//! API error handling
//!
//! One variant per failure class, so callers can tell a dead network from a
//! server that said no from a server that answered garbage.

use thiserror::Error;

/// Errors that can occur talking to the backend
#[derive(Error, Debug)]
pub enum ApiError {
    /// The backend could not be reached at all
    #[error("network error: {0}")]
    Transport(String),

    /// The backend answered with a non-success status
    #[error("{message}")]
    Server { status: u16, message: String },

    /// Success status, but the body did not decode
    #[error("invalid response format")]
    InvalidResponse,

    /// A response body was read a second time
    #[error("response body already consumed")]
    BodyConsumed,
}

impl From<reqwest::Error> for ApiError {
    fn from(error: reqwest::Error) -> Self {
        ApiError::Transport(error.to_string())
    }
}
