//! Error types for API calls and input validation.

use thiserror::Error;

/// Errors produced by the HTTP client
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ApiError {
    /// Non-2xx response, with the message extracted from the body
    #[error("{message}")]
    Http { status: u16, message: String },

    /// Connection, timeout or other transport failure
    #[error("{0}")]
    Transport(String),

    /// The response body did not match the expected shape
    #[error("Invalid response: {0}")]
    Decode(String),
}

impl ApiError {
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            ApiError::Transport("Request timed out".to_string())
        } else if e.is_connect() {
            ApiError::Transport(format!("Connection failed: {}", e))
        } else if e.is_decode() {
            ApiError::Decode(e.to_string())
        } else {
            ApiError::Transport(format!("Request failed: {}", e))
        }
    }
}

/// Errors from the simulated governance service
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum GovernanceError {
    #[error("Proposal #{0} not found")]
    NotFound(u64),

    #[error("Voting has ended for proposal #{0}")]
    VotingClosed(u64),
}

/// Input rejected before any network call is made
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Please fill in all fields")]
    MissingFields,

    #[error("Please enter an address")]
    MissingAddress,

    #[error("Please enter a valid address")]
    InvalidAddress,

    #[error("Please enter a valid amount")]
    InvalidAmount,
}
