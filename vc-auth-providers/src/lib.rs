//! Pluggable collaborators of the token service: remote signing providers,
//! the credential/presentation codec, and the HTTP transport they share.

pub mod common_models;
pub mod http_client;
pub mod presentation_codec;
pub mod signing_provider;
pub mod util;

pub use vc_auth_crypto as crypto;
