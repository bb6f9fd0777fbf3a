use super::{hasher::sha256::SHA256, signer::es256k::ES256KSigner, CryptoProviderImpl};
use crate::{CryptoProvider, CryptoProviderError, Hasher, SignerError};

// secp256k1 private key 1, whose address is well known
const PRIVATE_KEY_ONE: [u8; 32] = {
    let mut key = [0u8; 32];
    key[31] = 1;
    key
};

const ADDRESS_ONE: &str = "0x7e5f4552091a69125d5dfcb7b8c2659029395bdf";

fn public_key_one() -> Vec<u8> {
    let sk = k256::ecdsa::SigningKey::from_slice(&PRIVATE_KEY_ONE).unwrap();
    sk.verifying_key()
        .to_encoded_point(false)
        .as_bytes()
        .to_vec()
}

#[test]
fn test_sha256_hash() {
    let result = SHA256 {}.hash(b"abc").unwrap();

    assert_eq!(
        hex::encode(result),
        "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
    );
}

#[test]
fn test_address_from_public_key() {
    let address = ES256KSigner::address_from_public_key(&public_key_one()).unwrap();

    assert_eq!(address, ADDRESS_ONE);
}

#[test]
fn test_recover_addresses_contains_signer() {
    let digest = SHA256::digest(b"message");
    let signature = ES256KSigner::sign(&digest, &PRIVATE_KEY_ONE).unwrap();
    assert_eq!(signature.len(), 64);

    let candidates = ES256KSigner::recover_addresses(&digest, &signature).unwrap();

    assert!(candidates.iter().any(|address| address == ADDRESS_ONE));
}

#[test]
fn test_recover_addresses_for_other_message_misses_signer() {
    let signature = ES256KSigner::sign(&SHA256::digest(b"message"), &PRIVATE_KEY_ONE).unwrap();

    let candidates =
        ES256KSigner::recover_addresses(&SHA256::digest(b"other"), &signature).unwrap();

    assert!(!candidates.iter().any(|address| address == ADDRESS_ONE));
}

#[test]
fn test_recover_addresses_random_key() {
    let (private_key, public_key) = ES256KSigner::random();
    let digest = SHA256::digest(b"payload");
    let signature = ES256KSigner::sign(&digest, &private_key).unwrap();

    let expected = ES256KSigner::address_from_public_key(&public_key).unwrap();
    let candidates = ES256KSigner::recover_addresses(&digest, &signature).unwrap();

    assert!(candidates.contains(&expected));
}

#[test]
fn test_recover_addresses_invalid_signature_length() {
    let result = ES256KSigner::recover_addresses(&[0u8; 32], &[1, 2, 3]);

    assert_eq!(result, Err(SignerError::InvalidSignature));
}

#[test]
fn test_provider_lookup() {
    let provider = CryptoProviderImpl::default();

    assert!(provider.get_hasher("sha-256").is_ok());
    assert!(matches!(
        provider.get_hasher("md5"),
        Err(CryptoProviderError::MissingHasher(name)) if name == "md5"
    ));
}
