//! **VC Auth Core** issues and verifies presentation tokens: holder-signed
//! bundles of verifiable credentials.
//!
//! ## Repository structure
//!
//! The library consists of three crates:
//!
//! * **Crypto**: hashing and secp256k1 signatures, kept free of I/O
//! * **Providers**
//!   * Signing providers, including a remote signer backed by a key-custody
//!     HTTP service
//!   * Presentation codec (JWT credentials and presentations)
//!   * HTTP transport
//! * **Core**
//!   * Token service
//!
//! ## Getting started
//!
//! ```ignore rust
//! let core = VcAuthCore::new(config, Arc::new(ReqwestClient::default()))?;
//!
//! let token = core
//!     .token_service
//!     .create_token(&credentials, &holder, ProviderOptions::default(), &cancellation)
//!     .await?;
//!
//! let claims = core.token_service.verify_token(&token).await?;
//! ```
//!
//! Signing accounts are provisioned separately through
//! [`VaultSigningProvider::store_private_key`]; token creation never does it.

use std::sync::Arc;

use config::{ConfigError, VcAuthConfig};
use service::token_service::TokenService;
use vc_auth_crypto::{imp::CryptoProviderImpl, CryptoProvider};
use vc_auth_providers::{
    http_client::HttpClient,
    presentation_codec::{imp::jwt_codec::JwtCodec, PresentationCodec},
    signing_provider::{imp::vault::VaultSigningProvider, SigningProvider},
    util::address_verification::AddressVerification,
};

pub mod config;
pub mod model;
pub mod service;

pub struct VcAuthCore {
    pub token_service: TokenService,
    /// Present when the core was assembled with the remote signer.
    pub vault: Option<Arc<VaultSigningProvider>>,
}

impl VcAuthCore {
    /// Assembles the core around the remote signer from `config.vault`.
    pub fn new(config: VcAuthConfig, client: Arc<dyn HttpClient>) -> Result<Self, ConfigError> {
        let vault_params = config
            .vault
            .clone()
            .ok_or(ConfigError::Missing("vault".to_string()))?;

        let vault = Arc::new(VaultSigningProvider::new(vault_params, client));

        Ok(Self {
            vault: Some(vault.clone()),
            ..Self::with_signing_provider(config, vault)
        })
    }

    /// Assembles the core around any signing provider. `config.vault` is ignored.
    pub fn with_signing_provider(
        config: VcAuthConfig,
        signing_provider: Arc<dyn SigningProvider>,
    ) -> Self {
        let crypto: Arc<dyn CryptoProvider> = Arc::new(CryptoProviderImpl::default());

        let codec: Arc<dyn PresentationCodec> = Arc::new(JwtCodec::new(
            config.codec,
            Arc::new(AddressVerification {
                crypto: crypto.clone(),
            }),
        ));

        Self {
            token_service: TokenService::new(signing_provider, codec, crypto),
            vault: None,
        }
    }
}
