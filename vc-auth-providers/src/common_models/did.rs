use std::fmt;

use serde::{Deserialize, Serialize};

/// A decentralized identifier, e.g. `did:nda:testnet:0x2af7…3fa4`.
#[derive(Debug, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
#[repr(transparent)]
pub struct DidValue(String);

impl DidValue {
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// Account address the DID is anchored to: everything after the last `:`.
    ///
    /// A value without any `:` is returned unchanged.
    pub fn signer_address(&self) -> &str {
        extract_address(&self.0)
    }
}

pub fn extract_address(did: &str) -> &str {
    match did.rfind(':') {
        Some(index) => &did[index + 1..],
        None => did,
    }
}

impl fmt::Display for DidValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl From<String> for DidValue {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for DidValue {
    fn from(value: &str) -> Self {
        Self(value.to_owned())
    }
}

impl From<DidValue> for String {
    fn from(value: DidValue) -> Self {
        value.0
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_extract_address_takes_last_segment() {
        assert_eq!(
            extract_address("did:nda:testnet:0x8b3b1dee8e00cb95f8b2a1d1a9a7cb8fe7d490ce"),
            "0x8b3b1dee8e00cb95f8b2a1d1a9a7cb8fe7d490ce"
        );
    }

    #[test]
    fn test_extract_address_without_separator() {
        assert_eq!(extract_address("noColonHere"), "noColonHere");
    }

    #[test]
    fn test_extract_address_trailing_separator() {
        assert_eq!(extract_address("did:nda:"), "");
    }

    #[test]
    fn test_did_value_signer_address() {
        let did = DidValue::from("did:nda:testnet:0xABC");

        assert_eq!(did.signer_address(), "0xABC");
        assert_eq!(did.to_string(), "did:nda:testnet:0xABC");
    }
}
