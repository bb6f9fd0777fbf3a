//! Presentation token creation and verification.
//!
//! A token is a holder-signed presentation bundling credential wire forms.
//! The wire encoding is owned by the [`PresentationCodec`]; the signature is
//! produced by a [`SigningProvider`] over the SHA-256 digest of the
//! presentation's signing input.

use std::sync::Arc;

use serde_json::Value;
use tokio_util::sync::CancellationToken;
use vc_auth_crypto::{CryptoProvider, HasherError};
use vc_auth_providers::{
    common_models::did::DidValue,
    presentation_codec::{
        error::CodecError,
        model::{
            ParseOptions, PresentationContents, Proof, CREDENTIALS_EXAMPLES_V2_CONTEXT,
            CREDENTIALS_V2_CONTEXT, VERIFIABLE_PRESENTATION_TYPE,
        },
        Credential, PresentationCodec,
    },
    signing_provider::{model::ProviderOptions, SigningProvider},
};

use super::error::TokenServiceError;
use crate::model::VcClaims;


const DIGEST_ALGORITHM: &str = "sha-256";
const CREDENTIALS_FIELD: &str = "verifiableCredential";
const ISSUER_FIELD: &str = "issuer";
const SUBJECT_FIELD: &str = "credentialSubject";

#[derive(Clone)]
pub struct TokenService {
    signing_provider: Arc<dyn SigningProvider>,
    codec: Arc<dyn PresentationCodec>,
    crypto: Arc<dyn CryptoProvider>,
}

impl TokenService {
    pub fn new(
        signing_provider: Arc<dyn SigningProvider>,
        codec: Arc<dyn PresentationCodec>,
        crypto: Arc<dyn CryptoProvider>,
    ) -> Self {
        Self {
            signing_provider,
            codec,
            crypto,
        }
    }

    /// Bundles `credentials` into a presentation signed on behalf of `holder`.
    ///
    /// The signer address is taken from `holder` and overrides any address in
    /// `options`. An empty credential list yields a presentation without
    /// credentials.
    ///
    /// Fails after the remote signature has been made if the proof cannot be
    /// attached or the presentation cannot be serialized; calling again asks
    /// for a new signature.
    pub async fn create_token(
        &self,
        credentials: &[String],
        holder: &DidValue,
        options: ProviderOptions,
        cancellation: &CancellationToken,
    ) -> Result<String, TokenServiceError> {
        if holder.as_str().is_empty() {
            return Err(TokenServiceError::InvalidArgument(
                "holder identity is empty".to_string(),
            ));
        }

        tracing::debug!(holder = %holder, credentials = credentials.len(), "creating token");

        let credentials = credentials
            .iter()
            .enumerate()
            .map(|(index, token)| {
                self.codec
                    .parse_credential(token)
                    .map_err(|source| TokenServiceError::CredentialParse { index, source })
            })
            .collect::<Result<Vec<Box<dyn Credential>>, _>>()?;

        let mut presentation = self
            .codec
            .new_presentation(PresentationContents {
                holder: holder.clone(),
                types: vec![VERIFIABLE_PRESENTATION_TYPE.to_string()],
                context: vec![
                    CREDENTIALS_V2_CONTEXT.to_string(),
                    CREDENTIALS_EXAMPLES_V2_CONTEXT.to_string(),
                ],
                credentials,
            })
            .map_err(TokenServiceError::PresentationBuild)?;

        let signing_input = presentation
            .signing_input()
            .map_err(TokenServiceError::SigningInput)?;

        let digest = self
            .crypto
            .get_hasher(DIGEST_ALGORITHM)
            .map_err(HasherError::from)?
            .hash(&signing_input)?;

        let options = ProviderOptions {
            signer_address: Some(holder.signer_address().to_string()),
            ..options
        };
        let signature = self
            .signing_provider
            .sign(&digest, &options, cancellation)
            .await?;

        presentation
            .add_proof(Proof { signature })
            .map_err(TokenServiceError::ProofAttach)?;

        let document = presentation
            .serialize()
            .map_err(TokenServiceError::Serialization)?;

        let token = serde_json::to_string(&document).map_err(|e| {
            TokenServiceError::Serialization(CodecError::JsonMapping(e.to_string()))
        })?;

        tracing::debug!(holder = %holder, "token created");

        Ok(token)
    }

    /// Verifies the token's proof and every embedded credential, then returns
    /// the claims of each credential in presentation order.
    pub async fn verify_token(&self, token: &str) -> Result<Vec<VcClaims>, TokenServiceError> {
        let presentation = self
            .codec
            .parse_presentation(token, ParseOptions::strict())
            .await
            .map_err(|e| {
                tracing::warn!(error = %e, "token verification failed");
                TokenServiceError::TokenVerification(e)
            })?;

        let contents: Value = presentation
            .contents()
            .map_err(|e| TokenServiceError::MalformedPresentation(e.to_string()))
            .and_then(|bytes| {
                serde_json::from_slice(&bytes)
                    .map_err(|e| TokenServiceError::MalformedPresentation(e.to_string()))
            })?;

        let credentials = contents
            .get(CREDENTIALS_FIELD)
            .and_then(Value::as_array)
            .ok_or_else(|| {
                TokenServiceError::MalformedPresentation(format!(
                    "`{CREDENTIALS_FIELD}` is missing or not a list"
                ))
            })?;

        tracing::debug!(credentials = credentials.len(), "token verified");

        credentials
            .iter()
            .enumerate()
            .map(|(index, credential)| self.extract_claims(index, credential))
            .collect()
    }

    fn extract_claims(&self, index: usize, credential: &Value) -> Result<VcClaims, TokenServiceError> {
        let token = credential
            .as_str()
            .ok_or_else(|| TokenServiceError::CredentialParse {
                index,
                source: CodecError::CouldNotParse("credential is not a string".to_string()),
            })?;

        let credential = self
            .codec
            .parse_credential(token)
            .map_err(|source| TokenServiceError::CredentialParse { index, source })?;

        let claim_error = |reason: String| TokenServiceError::ClaimExtraction { index, reason };

        let contents: Value = credential
            .contents()
            .map_err(|e| claim_error(e.to_string()))
            .and_then(|bytes| serde_json::from_slice(&bytes).map_err(|e| claim_error(e.to_string())))?;

        let issuer = contents
            .get(ISSUER_FIELD)
            .and_then(Value::as_str)
            .ok_or_else(|| claim_error(format!("`{ISSUER_FIELD}` is missing or not a string")))?;

        let subject = contents
            .get(SUBJECT_FIELD)
            .and_then(Value::as_object)
            .ok_or_else(|| claim_error(format!("`{SUBJECT_FIELD}` is missing or not an object")))?;

        Ok(VcClaims {
            issuer: issuer.to_string(),
            subject: subject.clone(),
        })
    }
}
