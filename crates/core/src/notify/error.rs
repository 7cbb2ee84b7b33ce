//! Notification delivery errors.

use thiserror::Error;

/// Notification delivery errors.
#[derive(Debug, Error)]
pub enum NotifyError {
    /// The provider rejected the message.
    #[error("message provider rejected the request: {0}")]
    Rejected(String),

    /// Transport-level failure talking to the provider.
    #[error("message provider request failed: {0}")]
    Transport(String),
}

impl From<reqwest::Error> for NotifyError {
    fn from(err: reqwest::Error) -> Self {
        Self::Transport(err.to_string())
    }
}
