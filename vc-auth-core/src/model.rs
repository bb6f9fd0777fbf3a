use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Claims of one credential found in a verified presentation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct VcClaims {
    pub issuer: String,
    /// The credential's `credentialSubject` object.
    pub subject: Map<String, Value>,
}
