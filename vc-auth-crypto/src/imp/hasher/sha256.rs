use sha2::{Digest, Sha256};

use crate::{Hasher, HasherError};

pub struct SHA256 {}

impl SHA256 {
    pub fn digest(input: &[u8]) -> [u8; 32] {
        let mut digest = [0u8; 32];
        digest.copy_from_slice(&Sha256::digest(input));
        digest
    }
}

impl Hasher for SHA256 {
    fn hash(&self, input: &[u8]) -> Result<Vec<u8>, HasherError> {
        Ok(Self::digest(input).to_vec())
    }
}
