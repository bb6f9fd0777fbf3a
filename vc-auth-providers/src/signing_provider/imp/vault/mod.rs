//! Remote signer backed by a key-custody HTTP service.
//!
//! The service holds secp256k1 accounts and signs raw 32-byte digests on
//! their behalf:
//!
//! - `POST {vault_url}/v1/secp/accounts` stores a private key and returns its address
//! - `POST {vault_url}/v1/secp/accounts/{address}/signRaw` signs a digest
//!
//! Responses with status 429 or 503 are retried up to `max_retries` times,
//! waiting `(attempt + 1) * backoff_unit` before each retry.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio_util::sync::CancellationToken;
use url::Url;
use zeroize::Zeroizing;

use crate::{
    http_client::{HttpClient, Response, StatusCode},
    signing_provider::{
        error::SigningError,
        model::{ProviderOptions, SigningProviderCapabilities, SIGNER_ADDRESS_OPTION},
        SigningProvider,
    },
};

use dto::{SignRawResponse, StorePrivateKeyResponse};
use mapper::{
    address_from_response, create_sign_request, create_store_key_request,
    signature_from_response, validate_address, validate_payload,
};

mod dto;
mod mapper;


const VAULT_TOKEN_HEADER: &str = "X-Vault-Token";

#[derive(Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Params {
    pub vault_url: Url,
    pub token: Zeroizing<String>,
    #[serde(default = "default_max_retries")]
    pub max_retries: usize,
    #[serde(default = "default_request_timeout_ms")]
    pub request_timeout_ms: u64,
    #[serde(default = "default_backoff_unit_ms")]
    pub backoff_unit_ms: u64,
    /// Also retry connection failures and per-request timeouts.
    #[serde(default)]
    pub retry_on_transport_error: bool,
}

fn default_max_retries() -> usize {
    3
}

fn default_request_timeout_ms() -> u64 {
    10_000
}

fn default_backoff_unit_ms() -> u64 {
    1_000
}

impl Params {
    pub fn new(vault_url: Url, token: impl Into<String>) -> Self {
        Self {
            vault_url,
            token: Zeroizing::new(token.into()),
            max_retries: default_max_retries(),
            request_timeout_ms: default_request_timeout_ms(),
            backoff_unit_ms: default_backoff_unit_ms(),
            retry_on_transport_error: false,
        }
    }
}

pub struct VaultSigningProvider {
    client: Arc<dyn HttpClient>,
    params: Params,
}

#[async_trait]
impl SigningProvider for VaultSigningProvider {
    async fn sign(
        &self,
        payload: &[u8],
        options: &ProviderOptions,
        cancellation: &CancellationToken,
    ) -> Result<Vec<u8>, SigningError> {
        validate_payload(payload)?;
        let address = options.required_signer_address()?;
        validate_address(address)?;

        let url = self.endpoint(&format!("v1/secp/accounts/{address}/signRaw"));
        let response = self
            .post_with_retry(&url, &create_sign_request(payload), cancellation)
            .await?;

        let parsed: SignRawResponse = response.json().map_err(|e| {
            SigningError::Mapping(format!(
                "failed to decode response: {e}, response body: {}",
                response.body_text()
            ))
        })?;

        signature_from_response(&parsed)
    }

    fn get_capabilities(&self) -> SigningProviderCapabilities {
        SigningProviderCapabilities {
            algorithms: vec!["ES256K".to_string()],
            required_options: vec![SIGNER_ADDRESS_OPTION.to_string()],
        }
    }
}

impl VaultSigningProvider {
    pub fn new(params: Params, client: Arc<dyn HttpClient>) -> Self {
        Self { client, params }
    }

    /// Provisions a signer account for `private_key` and returns its address.
    ///
    /// Never called implicitly; the returned address is what callers pass as
    /// [`ProviderOptions::signer_address`].
    pub async fn store_private_key(
        &self,
        private_key: Zeroizing<String>,
        cancellation: &CancellationToken,
    ) -> Result<String, SigningError> {
        if private_key.is_empty() {
            return Err(SigningError::InvalidArgument(
                "private key is required".to_string(),
            ));
        }

        let url = self.endpoint("v1/secp/accounts");
        let response = self
            .post_with_retry(&url, &create_store_key_request(private_key), cancellation)
            .await?;

        let parsed: StorePrivateKeyResponse = response.json().map_err(|e| {
            SigningError::Mapping(format!(
                "failed to decode response: {e}, response body: {}",
                response.body_text()
            ))
        })?;

        address_from_response(parsed)
    }

    fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{path}",
            self.params.vault_url.as_str().trim_end_matches('/')
        )
    }

    async fn post_with_retry<T: Serialize + Sync>(
        &self,
        url: &str,
        request: &T,
        cancellation: &CancellationToken,
    ) -> Result<Response, SigningError> {
        let body = serde_json::to_vec(request)
            .map_err(|e| SigningError::Mapping(format!("failed to marshal request: {e}")))?;

        let mut attempt = 0;
        loop {
            tracing::debug!(attempt, url, "sending remote signer request");

            let response = match self.send_once(url, body.clone(), cancellation).await {
                Ok(response) => response,
                Err(error)
                    if error.is_transport()
                        && self.params.retry_on_transport_error
                        && attempt < self.params.max_retries =>
                {
                    tracing::warn!(attempt, %error, "remote signer unreachable, retrying");
                    self.backoff(attempt, cancellation).await?;
                    attempt += 1;
                    continue;
                }
                Err(error) => {
                    tracing::warn!(attempt, %error, "remote signer request failed");
                    return Err(error);
                }
            };

            if response.status == StatusCode::OK {
                return Ok(response);
            }

            if !is_retryable(response.status) {
                return Err(SigningError::RemoteSigning {
                    status: response.status.0,
                    body: response.body_text(),
                });
            }

            if attempt >= self.params.max_retries {
                return Err(SigningError::RetryExhausted {
                    attempts: attempt + 1,
                    status: response.status.0,
                    body: response.body_text(),
                });
            }

            tracing::warn!(
                attempt,
                status = response.status.0,
                backoff_ms = self.backoff_delay(attempt).as_millis() as u64,
                "remote signer overloaded, retrying"
            );
            self.backoff(attempt, cancellation).await?;
            attempt += 1;
        }
    }

    async fn send_once(
        &self,
        url: &str,
        body: Vec<u8>,
        cancellation: &CancellationToken,
    ) -> Result<Response, SigningError> {
        let request = self
            .client
            .post(url)
            .header(VAULT_TOKEN_HEADER, self.params.token.as_str())
            .header("Content-Type", "application/json")
            .header("Accept", "*/*")
            .body(body)
            .send();
        let timeout = Duration::from_millis(self.params.request_timeout_ms);

        tokio::select! {
            biased;
            _ = cancellation.cancelled() => Err(SigningError::Cancelled),
            result = tokio::time::timeout(timeout, request) => match result {
                Err(_) => Err(SigningError::Timeout(self.params.request_timeout_ms)),
                Ok(Err(e)) => Err(SigningError::Transport(e.to_string())),
                Ok(Ok(response)) => Ok(response),
            },
        }
    }

    fn backoff_delay(&self, attempt: usize) -> Duration {
        Duration::from_millis(self.params.backoff_unit_ms.saturating_mul(attempt as u64 + 1))
    }

    async fn backoff(
        &self,
        attempt: usize,
        cancellation: &CancellationToken,
    ) -> Result<(), SigningError> {
        tokio::select! {
            biased;
            _ = cancellation.cancelled() => Err(SigningError::Cancelled),
            _ = tokio::time::sleep(self.backoff_delay(attempt)) => Ok(()),
        }
    }
}

fn is_retryable(status: StatusCode) -> bool {
    status == StatusCode::TOO_MANY_REQUESTS || status == StatusCode::SERVICE_UNAVAILABLE
}
