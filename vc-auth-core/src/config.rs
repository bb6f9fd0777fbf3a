use serde::Deserialize;
use thiserror::Error;
use vc_auth_providers::{
    presentation_codec::imp::jwt_codec::Params as CodecParams,
    signing_provider::imp::vault::Params as VaultParams,
};

/// Settings of an assembled [`crate::VcAuthCore`].
///
/// Loading the values is up to the caller; the struct only describes their
/// shape so it can be deserialized from any serde source.
#[derive(Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VcAuthConfig {
    /// Remote signing service. Required by [`crate::VcAuthCore::new`].
    #[serde(default)]
    pub vault: Option<VaultParams>,
    #[serde(default)]
    pub codec: CodecParams,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing configuration: `{0}`")]
    Missing(String),
}
