use thiserror::Error;
use vc_auth_crypto::HasherError;
use vc_auth_providers::{
    presentation_codec::error::CodecError, signing_provider::error::SigningError,
};

#[derive(Debug, Error)]
pub enum TokenServiceError {
    #[error("Invalid argument: `{0}`")]
    InvalidArgument(String),
    #[error("Could not parse credential {index}: `{source}`")]
    CredentialParse {
        index: usize,
        #[source]
        source: CodecError,
    },
    #[error("Could not build presentation: `{0}`")]
    PresentationBuild(#[source] CodecError),
    #[error("Could not get signing input: `{0}`")]
    SigningInput(#[source] CodecError),
    #[error("Signing error: `{0}`")]
    Signing(#[from] SigningError),
    #[error("Could not attach proof: `{0}`")]
    ProofAttach(#[source] CodecError),
    #[error("Could not serialize presentation: `{0}`")]
    Serialization(#[source] CodecError),
    #[error("Could not verify token: `{0}`")]
    TokenVerification(#[source] CodecError),
    #[error("Malformed presentation: `{0}`")]
    MalformedPresentation(String),
    #[error("Could not extract claims of credential {index}: `{reason}`")]
    ClaimExtraction { index: usize, reason: String },
    #[error("Crypto error: `{0}`")]
    Crypto(#[from] HasherError),
}
