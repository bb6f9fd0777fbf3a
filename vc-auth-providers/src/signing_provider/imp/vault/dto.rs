use serde::{Deserialize, Serialize};
use zeroize::Zeroizing;

#[derive(Debug, Serialize)]
pub(super) struct SignRawRequest {
    pub payload: String,
}

#[derive(Deserialize)]
pub(super) struct SignRawResponse {
    pub data: SignRawResponseData,
}

#[derive(Deserialize)]
pub(super) struct SignRawResponseData {
    pub signature: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct StorePrivateKeyRequest {
    pub private_key: Zeroizing<String>,
}

#[derive(Deserialize)]
pub(super) struct StorePrivateKeyResponse {
    pub data: StorePrivateKeyResponseData,
}

#[derive(Deserialize)]
pub(super) struct StorePrivateKeyResponseData {
    pub address: String,
}
