//! Enumerates errors for signing providers.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SigningError {
    #[error("Invalid argument: `{0}`")]
    InvalidArgument(String),
    #[error("Remote signing failed with status {status}: `{body}`")]
    RemoteSigning { status: u16, body: String },
    #[error("Retries exhausted after {attempts} attempts, last status {status}: `{body}`")]
    RetryExhausted {
        attempts: usize,
        status: u16,
        body: String,
    },
    #[error("Transport error: `{0}`")]
    Transport(String),
    #[error("Request timed out after {0} ms")]
    Timeout(u64),
    #[error("Cancelled")]
    Cancelled,
    #[error("Mapping error: `{0}`")]
    Mapping(String),
}

impl SigningError {
    /// Failures below HTTP, i.e. no status code was received.
    pub fn is_transport(&self) -> bool {
        matches!(self, SigningError::Transport(_) | SigningError::Timeout(_))
    }
}
