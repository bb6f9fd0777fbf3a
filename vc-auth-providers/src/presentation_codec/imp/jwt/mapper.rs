use ct_codecs::{Base64UrlSafeNoPadding, Decoder, Encoder};

use crate::presentation_codec::error::CodecError;

pub fn bin_to_b64url_string(bin: &[u8]) -> Result<String, CodecError> {
    Base64UrlSafeNoPadding::encode_to_string(bin)
        .map_err(|e| CodecError::CouldNotFormat(e.to_string()))
}

pub fn string_to_b64url_string(string: &str) -> Result<String, CodecError> {
    Base64UrlSafeNoPadding::encode_to_string(string)
        .map_err(|e| CodecError::CouldNotFormat(e.to_string()))
}

pub fn b64url_to_bin(encoded: &str) -> Result<Vec<u8>, CodecError> {
    Base64UrlSafeNoPadding::decode_to_vec(encoded, None)
        .map_err(|e| CodecError::CouldNotParse(e.to_string()))
}
