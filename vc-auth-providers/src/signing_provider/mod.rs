//! Signing providers turn a byte payload into a signature without exposing
//! key material to the caller.
//!
//! Each implementation declares the [`model::ProviderOptions`] fields it needs
//! through [`SigningProvider::get_capabilities`] and fails with
//! [`error::SigningError::InvalidArgument`] when one is absent.

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

pub mod error;
pub mod imp;
pub mod model;

#[cfg_attr(any(test, feature = "mock"), mockall::automock)]
#[async_trait]
pub trait SigningProvider: Send + Sync {
    /// Signs `payload`.
    ///
    /// Returns [`error::SigningError::Cancelled`] as soon as `cancellation`
    /// fires, including while waiting on the network or between retries.
    async fn sign(
        &self,
        payload: &[u8],
        options: &model::ProviderOptions,
        cancellation: &CancellationToken,
    ) -> Result<Vec<u8>, error::SigningError>;

    fn get_capabilities(&self) -> model::SigningProviderCapabilities;
}
