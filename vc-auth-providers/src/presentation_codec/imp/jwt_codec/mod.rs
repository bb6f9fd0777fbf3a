//! JWT credentials and ES256K-signed JWT presentations.
//!
//! Credentials travel as compact JWTs with a `vc` claim. A presentation is a
//! JWT issued by the holder carrying a `vp` claim whose `verifiableCredential`
//! list holds the credential JWTs verbatim.

use std::sync::Arc;

use async_trait::async_trait;
use serde::Deserialize;
use time::{Duration, OffsetDateTime};
use uuid::Uuid;

use self::{
    mapper::{check_validity, credential_document, seconds, unquote_token},
    model::{PresentationDocument, VPContent, VC, VP},
};
use super::jwt::{compact_token, model::JWTPayload, Jwt};
use crate::{
    common_models::did::DidValue,
    presentation_codec::{
        error::CodecError,
        model::{ParseOptions, PresentationContents, Proof, TokenVerifier, VERIFIABLE_PRESENTATION_TYPE},
        Credential, Presentation, PresentationCodec,
    },
};


mod mapper;
pub mod model;

pub const ALGORITHM: &str = "ES256K";

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Params {
    /// Clock skew tolerance in seconds.
    #[serde(default = "default_leeway")]
    pub leeway: u64,
    /// Lifetime of created presentations in seconds.
    #[serde(default = "default_presentation_validity")]
    pub presentation_validity: u64,
}

fn default_leeway() -> u64 {
    60
}

fn default_presentation_validity() -> u64 {
    300
}

impl Default for Params {
    fn default() -> Self {
        Self {
            leeway: default_leeway(),
            presentation_validity: default_presentation_validity(),
        }
    }
}

pub struct JwtCodec {
    params: Params,
    verifier: Arc<dyn TokenVerifier>,
}

impl JwtCodec {
    pub fn new(params: Params, verifier: Arc<dyn TokenVerifier>) -> Self {
        Self { params, verifier }
    }

    fn leeway(&self) -> Duration {
        seconds(self.params.leeway)
    }

    async fn verify_signature<T>(
        &self,
        payload: &JWTPayload<T>,
        key_id: Option<&str>,
        algorithm: &str,
        signing_input: &str,
        signature: &[u8],
    ) -> Result<(), CodecError> {
        self.verifier
            .verify(
                payload.issuer.clone().map(DidValue::from),
                key_id,
                algorithm,
                signing_input.as_bytes(),
                signature,
            )
            .await
            .map_err(|e| CodecError::CouldNotVerify(e.to_string()))
    }

    async fn validate_credential(&self, index: usize, token: &str) -> Result<(), CodecError> {
        let decomposed = Jwt::<VC>::decompose_token(token)
            .map_err(|e| CodecError::CouldNotVerify(format!("credential {index}: {e}")))?;

        self.verify_signature(
            &decomposed.payload,
            decomposed.header.key_id.as_deref(),
            &decomposed.header.algorithm,
            &decomposed.signing_input,
            &decomposed.signature,
        )
        .await
        .map_err(|e| CodecError::CouldNotVerify(format!("credential {index}: {e}")))?;

        check_validity(&decomposed.payload, OffsetDateTime::now_utc(), self.leeway())
            .map_err(|e| CodecError::CouldNotVerify(format!("credential {index}: {e}")))
    }
}

#[async_trait]
impl PresentationCodec for JwtCodec {
    fn parse_credential(&self, token: &str) -> Result<Box<dyn Credential>, CodecError> {
        let decomposed = Jwt::<VC>::decompose_token(token)?;

        Ok(Box::new(JwtCredential {
            token: token.trim().to_owned(),
            payload: decomposed.payload,
        }))
    }

    fn new_presentation(
        &self,
        contents: PresentationContents,
    ) -> Result<Box<dyn Presentation>, CodecError> {
        let holder = contents.holder.to_string();
        if holder.is_empty() {
            return Err(CodecError::CouldNotBuild("holder is required".to_owned()));
        }
        if !contents
            .types
            .iter()
            .any(|r#type| r#type == VERIFIABLE_PRESENTATION_TYPE)
        {
            return Err(CodecError::CouldNotBuild(format!(
                "type must include {VERIFIABLE_PRESENTATION_TYPE}"
            )));
        }

        let now = OffsetDateTime::now_utc();
        let payload = JWTPayload {
            issued_at: Some(now),
            expires_at: now.checked_add(seconds(self.params.presentation_validity)),
            invalid_before: now.checked_sub(self.leeway()),
            issuer: Some(holder.clone()),
            subject: None,
            jwt_id: Some(Uuid::new_v4().to_string()),
            custom: VP {
                vp: VPContent {
                    context: contents.context,
                    r#type: contents.types,
                    holder: Some(holder.clone()),
                    verifiable_credential: contents
                        .credentials
                        .iter()
                        .map(|credential| credential.token().to_owned())
                        .collect(),
                },
            },
        };

        let jwt = Jwt::new(
            "JWT".to_owned(),
            ALGORITHM.to_owned(),
            Some(format!("{holder}#key-1")),
            payload,
        );
        let signing_input = jwt.signing_input()?;

        Ok(Box::new(JwtPresentation {
            payload: jwt.payload,
            signing_input,
            signature: None,
        }))
    }

    async fn parse_presentation(
        &self,
        token: &str,
        options: ParseOptions,
    ) -> Result<Box<dyn Presentation>, CodecError> {
        let token = unquote_token(token)?;
        let decomposed = Jwt::<VP>::decompose_token(&token)?;

        if options.verify_proof {
            if decomposed.header.algorithm != ALGORITHM {
                return Err(CodecError::CouldNotVerify(format!(
                    "unsupported algorithm `{}`",
                    decomposed.header.algorithm
                )));
            }

            self.verify_signature(
                &decomposed.payload,
                decomposed.header.key_id.as_deref(),
                &decomposed.header.algorithm,
                &decomposed.signing_input,
                &decomposed.signature,
            )
            .await?;

            check_validity(&decomposed.payload, OffsetDateTime::now_utc(), self.leeway())?;
        }

        if options.validate_credentials {
            for (index, credential) in decomposed
                .payload
                .custom
                .vp
                .verifiable_credential
                .iter()
                .enumerate()
            {
                self.validate_credential(index, credential).await?;
            }
        }

        Ok(Box::new(JwtPresentation {
            payload: decomposed.payload,
            signing_input: decomposed.signing_input,
            signature: Some(decomposed.signature),
        }))
    }
}

pub struct JwtCredential {
    token: String,
    payload: JWTPayload<VC>,
}

impl Credential for JwtCredential {
    fn token(&self) -> &str {
        &self.token
    }

    fn contents(&self) -> Result<Vec<u8>, CodecError> {
        serde_json::to_vec(&credential_document(&self.payload))
            .map_err(|e| CodecError::JsonMapping(e.to_string()))
    }
}

pub struct JwtPresentation {
    payload: JWTPayload<VP>,
    signing_input: String,
    signature: Option<Vec<u8>>,
}

impl Presentation for JwtPresentation {
    fn signing_input(&self) -> Result<Vec<u8>, CodecError> {
        Ok(self.signing_input.as_bytes().to_vec())
    }

    fn add_proof(&mut self, proof: Proof) -> Result<(), CodecError> {
        if self.signature.is_some() {
            return Err(CodecError::ProofAlreadyPresent);
        }
        if proof.signature.is_empty() {
            return Err(CodecError::InvalidProof("empty signature".to_owned()));
        }

        self.signature = Some(proof.signature);
        Ok(())
    }

    fn serialize(&self) -> Result<serde_json::Value, CodecError> {
        let signature = self.signature.as_ref().ok_or(CodecError::MissingProof)?;

        Ok(serde_json::Value::String(compact_token(
            &self.signing_input,
            signature,
        )?))
    }

    fn contents(&self) -> Result<Vec<u8>, CodecError> {
        let vp = &self.payload.custom.vp;

        serde_json::to_vec(&PresentationDocument {
            context: &vp.context,
            r#type: &vp.r#type,
            id: self.payload.jwt_id.as_deref(),
            holder: vp.holder.as_deref().or(self.payload.issuer.as_deref()),
            verifiable_credential: &vp.verifiable_credential,
        })
        .map_err(|e| CodecError::JsonMapping(e.to_string()))
    }
}
