//! Enumerates errors for the presentation codec.

use thiserror::Error;

#[derive(Debug, PartialEq, Eq, Error)]
pub enum CodecError {
    #[error("Could not parse: `{0}`")]
    CouldNotParse(String),
    #[error("Could not build presentation: `{0}`")]
    CouldNotBuild(String),
    #[error("Could not format: `{0}`")]
    CouldNotFormat(String),
    #[error("Could not verify: `{0}`")]
    CouldNotVerify(String),
    #[error("Invalid proof: `{0}`")]
    InvalidProof(String),
    #[error("Proof already present")]
    ProofAlreadyPresent,
    #[error("Missing proof")]
    MissingProof,
    #[error("JSON mapping error: `{0}`")]
    JsonMapping(String),
}
