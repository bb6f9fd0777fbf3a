use k256::ecdsa::{RecoveryId, Signature, VerifyingKey};
use sha3::{Digest, Keccak256};

use crate::SignerError;

/// secp256k1 ECDSA over a 32-byte prehash.
///
/// Signatures are the 64-byte compact `r || s` form, without a recovery id.
/// Signing itself happens in a remote key custody service; this side only
/// recovers signer addresses.
pub struct ES256KSigner {}

impl ES256KSigner {
    fn signature_from_bytes(signature: &[u8]) -> Result<Signature, SignerError> {
        let signature =
            Signature::from_slice(signature).map_err(|_| SignerError::InvalidSignature)?;
        Ok(signature.normalize_s().unwrap_or(signature))
    }

    /// Candidate signer addresses for a compact signature, one per recovery id.
    pub fn recover_addresses(digest: &[u8], signature: &[u8]) -> Result<Vec<String>, SignerError> {
        let signature = Self::signature_from_bytes(signature)?;

        let addresses: Vec<String> = [0u8, 1]
            .into_iter()
            .filter_map(RecoveryId::from_byte)
            .filter_map(|recovery_id| {
                VerifyingKey::recover_from_prehash(digest, &signature, recovery_id).ok()
            })
            .map(|vk| address_of(&vk))
            .collect();

        if addresses.is_empty() {
            return Err(SignerError::CouldNotVerify(
                "no public key recoverable from signature".to_string(),
            ));
        }

        Ok(addresses)
    }
}

/// Local key handling for tests of code that normally talks to a remote signer.
#[cfg(any(test, feature = "test-utils"))]
impl ES256KSigner {
    /// Returns `(private_key, uncompressed_public_key)`.
    pub fn random() -> (Vec<u8>, Vec<u8>) {
        let sk = k256::ecdsa::SigningKey::random(&mut rand::thread_rng());
        let pk = VerifyingKey::from(&sk);
        (
            sk.to_bytes().to_vec(),
            pk.to_encoded_point(false).as_bytes().to_vec(),
        )
    }

    /// `0x`-prefixed lowercase hex of the last 20 bytes of the keccak-256
    /// digest of the uncompressed public key (without its `0x04` tag).
    pub fn address_from_public_key(public_key: &[u8]) -> Result<String, SignerError> {
        let vk = VerifyingKey::from_sec1_bytes(public_key).map_err(|err| {
            SignerError::CouldNotExtractPublicKey(format!(
                "couldn't initialize verifying key: {err}"
            ))
        })?;
        Ok(address_of(&vk))
    }

    /// Signs a 32-byte digest the way the remote signer's `signRaw` does.
    pub fn sign(digest: &[u8], private_key: &[u8]) -> Result<Vec<u8>, SignerError> {
        use k256::ecdsa::signature::hazmat::PrehashSigner;

        let sk = k256::ecdsa::SigningKey::from_slice(private_key).map_err(|err| {
            SignerError::CouldNotSign(format!("couldn't initialize secret key: {err}"))
        })?;

        let signature: Signature = sk
            .sign_prehash(digest)
            .map_err(|err| SignerError::CouldNotSign(err.to_string()))?;
        Ok(signature.to_bytes().to_vec())
    }
}

fn address_of(vk: &VerifyingKey) -> String {
    let point = vk.to_encoded_point(false);
    let hash = Keccak256::digest(&point.as_bytes()[1..]);
    format!("0x{}", hex::encode(&hash[12..]))
}
