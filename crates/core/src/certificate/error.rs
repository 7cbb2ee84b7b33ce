//! Certificate renderer errors.

use thiserror::Error;

/// Certificate renderer errors.
#[derive(Debug, Error)]
pub enum CertificateError {
    /// Filename contains a path traversal sequence or is empty.
    #[error("invalid certificate filename")]
    InvalidFilename,

    /// The requested certificate does not exist on the renderer.
    #[error("certificate not found: {0}")]
    NotFound(String),

    /// The renderer rejected the generation request.
    #[error("certificate renderer rejected the request: {0}")]
    Rejected(String),

    /// Transport-level failure talking to the renderer.
    #[error("certificate renderer request failed: {0}")]
    Transport(String),
}

impl From<reqwest::Error> for CertificateError {
    fn from(err: reqwest::Error) -> Self {
        Self::Transport(err.to_string())
    }
}
