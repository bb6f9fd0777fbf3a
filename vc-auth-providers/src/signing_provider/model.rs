//! `struct`s for signing providers.

use std::collections::HashMap;

use super::error::SigningError;

pub const SIGNER_ADDRESS_OPTION: &str = "signerAddress";

/// Signer-selection parameters for a single signing call.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ProviderOptions {
    pub signer_address: Option<String>,
    /// Provider-specific settings not covered by the typed fields.
    pub params: HashMap<String, String>,
}

impl ProviderOptions {
    pub fn with_signer_address(signer_address: impl Into<String>) -> Self {
        Self {
            signer_address: Some(signer_address.into()),
            params: HashMap::new(),
        }
    }

    pub fn required_signer_address(&self) -> Result<&str, SigningError> {
        self.signer_address
            .as_deref()
            .filter(|address| !address.is_empty())
            .ok_or_else(|| SigningError::InvalidArgument("signer address is required".to_string()))
    }
}

#[derive(Clone, Debug, Default)]
pub struct SigningProviderCapabilities {
    pub algorithms: Vec<String>,
    pub required_options: Vec<String>,
}
