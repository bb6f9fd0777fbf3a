//! Credential and presentation codec.
//!
//! The token service never looks inside credential or presentation wire
//! forms itself. It goes through the operations below: parse a credential,
//! build a presentation, get its signing input, attach a proof, serialize it,
//! and parse/verify a presentation token.

use async_trait::async_trait;

use error::CodecError;
use model::{ParseOptions, PresentationContents, Proof};

pub mod error;
pub mod imp;
pub mod model;

/// Entry point of a codec. Construct one explicitly with whatever verifier
/// and settings it needs and share it; codecs keep no global state.
#[cfg_attr(any(test, feature = "mock"), mockall::automock)]
#[async_trait]
pub trait PresentationCodec: Send + Sync {
    /// Parses a credential from its wire form. Does not verify it.
    fn parse_credential(&self, token: &str) -> Result<Box<dyn Credential>, CodecError>;

    /// Builds an unsigned presentation.
    fn new_presentation(
        &self,
        contents: PresentationContents,
    ) -> Result<Box<dyn Presentation>, CodecError>;

    /// Parses a presentation token, optionally verifying its proof and
    /// validating every embedded credential.
    async fn parse_presentation(
        &self,
        token: &str,
        options: ParseOptions,
    ) -> Result<Box<dyn Presentation>, CodecError>;
}

#[cfg_attr(any(test, feature = "mock"), mockall::automock)]
pub trait Credential: Send + Sync {
    /// Wire form the credential was parsed from.
    fn token(&self) -> &str;

    /// Credential contents as JSON.
    fn contents(&self) -> Result<Vec<u8>, CodecError>;
}

#[cfg_attr(any(test, feature = "mock"), mockall::automock)]
pub trait Presentation: Send + Sync {
    /// Bytes the holder signs. Stable for the lifetime of the presentation.
    fn signing_input(&self) -> Result<Vec<u8>, CodecError>;

    /// Attaches the one and only proof.
    fn add_proof(&mut self, proof: Proof) -> Result<(), CodecError>;

    /// Wire document of a proved presentation.
    fn serialize(&self) -> Result<serde_json::Value, CodecError>;

    /// Presentation contents as JSON, including the `verifiableCredential` list.
    fn contents(&self) -> Result<Vec<u8>, CodecError>;
}
