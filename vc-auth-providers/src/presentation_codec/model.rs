//! Codec data model and the signature verification hook.

use async_trait::async_trait;

use vc_auth_crypto::SignerError;

use super::Credential;
use crate::common_models::did::DidValue;

pub const VERIFIABLE_PRESENTATION_TYPE: &str = "VerifiablePresentation";
pub const CREDENTIALS_V2_CONTEXT: &str = "https://www.w3.org/ns/credentials/v2";
pub const CREDENTIALS_EXAMPLES_V2_CONTEXT: &str = "https://www.w3.org/ns/credentials/examples/v2";

/// Verifies a signature made by the entity named by `issuer_did_value`.
#[cfg_attr(any(test, feature = "mock"), mockall::automock)]
#[async_trait]
pub trait TokenVerifier: Send + Sync {
    async fn verify<'a>(
        &self,
        issuer_did_value: Option<DidValue>,
        issuer_key_id: Option<&'a str>,
        algorithm: &'a str,
        token: &'a [u8],
        signature: &'a [u8],
    ) -> Result<(), SignerError>;
}

/// Input of [`super::PresentationCodec::new_presentation`].
pub struct PresentationContents {
    pub holder: DidValue,
    pub types: Vec<String>,
    pub context: Vec<String>,
    /// In presentation order; may be empty and may contain duplicates.
    pub credentials: Vec<Box<dyn Credential>>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Proof {
    pub signature: Vec<u8>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ParseOptions {
    pub verify_proof: bool,
    pub validate_credentials: bool,
}

impl ParseOptions {
    /// Proof verification and credential validation both enabled.
    pub fn strict() -> Self {
        Self {
            verify_proof: true,
            validate_credentials: true,
        }
    }
}
