use std::{collections::HashMap, sync::Arc};

use hasher::sha256::SHA256;

use super::{CryptoProvider, CryptoProviderError, Hasher};

pub mod hasher;
pub mod signer;

#[cfg(test)]
mod test;

#[derive(Clone)]
pub struct CryptoProviderImpl {
    hashers: HashMap<String, Arc<dyn Hasher>>,
}

impl CryptoProviderImpl {
    pub fn new(hashers: HashMap<String, Arc<dyn Hasher>>) -> Self {
        Self { hashers }
    }
}

impl Default for CryptoProviderImpl {
    /// `sha-256` only.
    fn default() -> Self {
        Self::new(HashMap::from_iter(vec![(
            "sha-256".to_string(),
            Arc::new(SHA256 {}) as _,
        )]))
    }
}

impl CryptoProvider for CryptoProviderImpl {
    fn get_hasher(&self, hasher: &str) -> Result<Arc<dyn Hasher>, CryptoProviderError> {
        Ok(self
            .hashers
            .get(hasher)
            .ok_or(CryptoProviderError::MissingHasher(hasher.to_owned()))?
            .clone())
    }
}
