//! Payment error types.

use thiserror::Error;

/// Payment operation errors.
#[derive(Debug, Error)]
pub enum PaymentError {
    /// Order amount must be positive.
    #[error("order amount must be greater than zero")]
    InvalidAmount,

    /// The gateway rejected the request.
    #[error("payment gateway rejected the request: {0}")]
    Rejected(String),

    /// Transport-level failure talking to the gateway.
    #[error("payment gateway request failed: {0}")]
    Transport(String),

    /// The gateway response could not be decoded.
    #[error("unexpected payment gateway response: {0}")]
    InvalidResponse(String),
}

impl From<reqwest::Error> for PaymentError {
    fn from(err: reqwest::Error) -> Self {
        Self::Transport(err.to_string())
    }
}
