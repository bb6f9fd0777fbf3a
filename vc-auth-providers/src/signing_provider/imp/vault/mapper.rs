use anyhow::anyhow;
use zeroize::Zeroizing;

use crate::signing_provider::error::SigningError;

use super::dto::{
    SignRawRequest, SignRawResponse, StorePrivateKeyRequest, StorePrivateKeyResponse,
};

pub(super) const DIGEST_LENGTH: usize = 32;
pub(super) const SIGNATURE_LENGTH: usize = 64;
const ADDRESS_LENGTH: usize = 42;

pub(super) fn create_sign_request(payload: &[u8]) -> SignRawRequest {
    SignRawRequest {
        payload: format!("0x{}", hex::encode(payload)),
    }
}

pub(super) fn create_store_key_request(private_key: Zeroizing<String>) -> StorePrivateKeyRequest {
    StorePrivateKeyRequest { private_key }
}

pub(super) fn validate_payload(payload: &[u8]) -> Result<(), SigningError> {
    if payload.len() != DIGEST_LENGTH {
        return Err(SigningError::InvalidArgument(format!(
            "payload must be {DIGEST_LENGTH} bytes, got {}",
            payload.len()
        )));
    }
    Ok(())
}

pub(super) fn validate_address(address: &str) -> Result<(), SigningError> {
    let valid = address.len() == ADDRESS_LENGTH
        && address
            .strip_prefix("0x")
            .is_some_and(|digits| digits.chars().all(|c| c.is_ascii_hexdigit()));

    if !valid {
        return Err(SigningError::InvalidArgument(format!(
            "signer address must be a 0x-prefixed {ADDRESS_LENGTH} character hex string, got `{address}`"
        )));
    }
    Ok(())
}

/// Address of a freshly stored key; it must be usable as a signer address.
pub(super) fn address_from_response(
    response: StorePrivateKeyResponse,
) -> Result<String, SigningError> {
    validate_address(&response.data.address).map_err(|e| {
        SigningError::Mapping(format!("service returned an unusable address: {e}"))
    })?;

    Ok(response.data.address)
}

/// The service may append a recovery byte; only `r || s` is kept.
pub(super) fn signature_from_response(response: &SignRawResponse) -> Result<Vec<u8>, SigningError> {
    let encoded = response.data.signature.as_str();
    let encoded = encoded.strip_prefix("0x").unwrap_or(encoded);

    let mut signature = hex::decode(encoded).map_err(|e| {
        SigningError::Mapping(format!(
            "{:#}",
            anyhow!(e).context("could not decode signature")
        ))
    })?;

    if signature.len() < SIGNATURE_LENGTH {
        return Err(SigningError::Mapping(format!(
            "signature too short: {} bytes",
            signature.len()
        )));
    }

    signature.truncate(SIGNATURE_LENGTH);
    Ok(signature)
}
