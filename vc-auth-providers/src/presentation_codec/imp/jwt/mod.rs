//! Compact JWT framing: `b64url(header).b64url(payload).b64url(signature)`.

use std::fmt::Debug;

use serde::{de::DeserializeOwned, Serialize};

use self::{
    mapper::{b64url_to_bin, bin_to_b64url_string, string_to_b64url_string},
    model::{DecomposedToken, JWTHeader, JWTPayload},
};
use crate::presentation_codec::error::CodecError;

#[cfg(test)]
mod test;

pub mod mapper;
pub mod model;

#[derive(Debug)]
pub struct Jwt<Payload: Serialize + DeserializeOwned + Debug> {
    pub header: JWTHeader,
    pub payload: JWTPayload<Payload>,
}

impl<Payload: Serialize + DeserializeOwned + Debug> Jwt<Payload> {
    pub fn new(
        signature_type: String,
        algorithm: String,
        key_id: Option<String>,
        payload: JWTPayload<Payload>,
    ) -> Jwt<Payload> {
        let header = JWTHeader {
            signature_type: Some(signature_type),
            algorithm,
            key_id,
        };

        Jwt { header, payload }
    }

    /// `b64url(header).b64url(payload)` of the current header and payload.
    pub fn signing_input(&self) -> Result<String, CodecError> {
        let header_json = serde_json::to_string(&self.header)
            .map_err(|e| CodecError::CouldNotFormat(e.to_string()))?;
        let payload_json = serde_json::to_string(&self.payload)
            .map_err(|e| CodecError::CouldNotFormat(e.to_string()))?;

        Ok(format!(
            "{}.{}",
            string_to_b64url_string(&header_json)?,
            string_to_b64url_string(&payload_json)?,
        ))
    }

    pub fn decompose_token(token: &str) -> Result<DecomposedToken<Payload>, CodecError> {
        let token = token.trim();

        let Some((signing_input, signature)) = token.rsplit_once('.') else {
            return Err(CodecError::CouldNotParse("Missing token part".to_owned()));
        };
        let Some((header, payload)) = signing_input.split_once('.') else {
            return Err(CodecError::CouldNotParse("Missing token part".to_owned()));
        };
        if payload.contains('.') {
            return Err(CodecError::CouldNotParse("Too many token parts".to_owned()));
        }

        let header: JWTHeader = serde_json::from_slice(&b64url_to_bin(header)?)
            .map_err(|e| CodecError::CouldNotParse(format!("header: {e}")))?;

        let payload: JWTPayload<Payload> = serde_json::from_slice(&b64url_to_bin(payload)?)
            .map_err(|e| CodecError::CouldNotParse(format!("payload: {e}")))?;

        let signature = b64url_to_bin(signature)?;

        Ok(DecomposedToken {
            header,
            payload,
            signing_input: signing_input.to_owned(),
            signature,
        })
    }
}

/// Appends the encoded signature to a signing input.
pub fn compact_token(signing_input: &str, signature: &[u8]) -> Result<String, CodecError> {
    Ok(format!("{signing_input}.{}", bin_to_b64url_string(signature)?))
}
