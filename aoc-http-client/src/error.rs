//! Error types for the input download client

use thiserror::Error;

/// Errors raised while talking to adventofcode.com
#[derive(Error, Debug)]
pub enum AocError {
    /// Transport-level failure
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The server answered with a status other than 2xx
    #[error("Unexpected HTTP status {status} for {url}")]
    InvalidStatus {
        status: reqwest::StatusCode,
        url: reqwest::Url,
    },

    /// Response body was not valid UTF-8
    #[error("Response body is not valid UTF-8")]
    Encoding,

    /// The client could not be configured
    #[error("Client initialization failed: {0}")]
    ClientInit(String),
}
