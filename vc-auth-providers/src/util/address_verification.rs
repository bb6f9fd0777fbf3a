//! ES256K signature verification against a DID's account address.

use std::sync::Arc;

use async_trait::async_trait;

use vc_auth_crypto::{imp::signer::es256k::ES256KSigner, CryptoProvider, SignerError};

use crate::{common_models::did::DidValue, presentation_codec::model::TokenVerifier};

/// Recovers the signer address from an ES256K signature over
/// `sha256(token)` and compares it with the address suffix of the DID.
///
/// No DID document is resolved; the DID's last segment is the account.
#[derive(Clone)]
pub struct AddressVerification {
    pub crypto: Arc<dyn CryptoProvider>,
}

#[async_trait]
impl TokenVerifier for AddressVerification {
    async fn verify<'a>(
        &self,
        issuer_did_value: Option<DidValue>,
        _issuer_key_id: Option<&'a str>,
        algorithm: &'a str,
        token: &'a [u8],
        signature: &'a [u8],
    ) -> Result<(), SignerError> {
        if algorithm != "ES256K" {
            return Err(SignerError::MissingAlgorithm(algorithm.to_owned()));
        }

        let issuer =
            issuer_did_value.ok_or(SignerError::CouldNotVerify("Missing issuer".to_string()))?;
        let expected = issuer.signer_address();

        let digest = self
            .crypto
            .get_hasher("sha-256")?
            .hash(token)
            .map_err(|e| SignerError::CouldNotVerify(e.to_string()))?;

        let candidates = ES256KSigner::recover_addresses(&digest, signature)?;

        if candidates
            .iter()
            .any(|candidate| candidate.eq_ignore_ascii_case(expected))
        {
            Ok(())
        } else {
            tracing::debug!(issuer = %issuer, "recovered signer does not match issuer address");
            Err(SignerError::InvalidSignature)
        }
    }
}

#[cfg(test)]
mod test {
    use std::sync::Arc;

    use vc_auth_crypto::{
        imp::{hasher::sha256::SHA256, signer::es256k::ES256KSigner, CryptoProviderImpl},
        MockCryptoProvider, SignerError,
    };

    use super::AddressVerification;
    use crate::{common_models::did::DidValue, presentation_codec::model::TokenVerifier};

    fn verification() -> AddressVerification {
        AddressVerification {
            crypto: Arc::new(CryptoProviderImpl::default()),
        }
    }

    fn signed(token: &[u8]) -> (DidValue, Vec<u8>) {
        let (private_key, public_key) = ES256KSigner::random();
        let address = ES256KSigner::address_from_public_key(&public_key).unwrap();
        let signature = ES256KSigner::sign(&SHA256::digest(token), &private_key).unwrap();

        (
            DidValue::from(format!("did:nda:testnet:{address}")),
            signature,
        )
    }

    #[tokio::test]
    async fn test_verify_matching_address() {
        let (did, signature) = signed(b"header.payload");

        verification()
            .verify(Some(did), None, "ES256K", b"header.payload", &signature)
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_verify_address_is_case_insensitive() {
        let (did, signature) = signed(b"header.payload");
        let address = did.signer_address().to_uppercase().replacen("0X", "0x", 1);

        verification()
            .verify(
                Some(DidValue::from(format!("did:nda:testnet:{address}"))),
                None,
                "ES256K",
                b"header.payload",
                &signature,
            )
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_verify_other_token_fails() {
        let (did, signature) = signed(b"header.payload");

        let result = verification()
            .verify(Some(did), None, "ES256K", b"header.other", &signature)
            .await;

        assert_eq!(result, Err(SignerError::InvalidSignature));
    }

    #[tokio::test]
    async fn test_verify_other_signer_fails() {
        let (did, _) = signed(b"header.payload");
        let (_, foreign_signature) = signed(b"header.payload");

        let result = verification()
            .verify(Some(did), None, "ES256K", b"header.payload", &foreign_signature)
            .await;

        assert_eq!(result, Err(SignerError::InvalidSignature));
    }

    #[tokio::test]
    async fn test_verify_requires_issuer() {
        let (_, signature) = signed(b"header.payload");

        let result = verification()
            .verify(None, None, "ES256K", b"header.payload", &signature)
            .await;

        assert!(matches!(result, Err(SignerError::CouldNotVerify(_))));
    }

    #[tokio::test]
    async fn test_verify_rejects_other_algorithm() {
        let mut crypto = MockCryptoProvider::new();
        crypto.expect_get_hasher().never();

        let result = AddressVerification {
            crypto: Arc::new(crypto),
        }
        .verify(
            Some(DidValue::from("did:nda:testnet:0x00")),
            None,
            "EDDSA",
            b"header.payload",
            &[0u8; 64],
        )
        .await;

        assert_eq!(result, Err(SignerError::MissingAlgorithm("EDDSA".to_string())));
    }
}
