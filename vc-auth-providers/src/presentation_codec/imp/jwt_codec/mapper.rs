use time::{Duration, OffsetDateTime};

use super::model::{CredentialDocument, VC};
use crate::presentation_codec::{error::CodecError, imp::jwt::model::JWTPayload};

pub(super) fn credential_document(payload: &JWTPayload<VC>) -> CredentialDocument {
    let vc = &payload.custom.vc;

    CredentialDocument {
        context: vc.context.clone(),
        r#type: vc.r#type.clone(),
        id: vc.id.clone().or_else(|| payload.jwt_id.clone()),
        issuer: payload
            .issuer
            .clone()
            .or_else(|| vc.issuer.as_ref().map(|issuer| issuer.issuer().to_owned())),
        credential_subject: vc.credential_subject.clone(),
        valid_from: vc.valid_from.or(payload.issued_at),
        valid_until: vc.valid_until.or(payload.expires_at),
    }
}

/// Rejects tokens outside `[nbf - leeway, exp + leeway]`.
///
/// A bound shifted past the representable date range is treated as open.
pub(super) fn check_validity<T>(
    payload: &JWTPayload<T>,
    now: OffsetDateTime,
    leeway: Duration,
) -> Result<(), CodecError> {
    if let Some(expires_at) = payload.expires_at {
        if expires_at
            .checked_add(leeway)
            .is_some_and(|latest| latest < now)
        {
            return Err(CodecError::CouldNotVerify(format!(
                "token expired at {expires_at}"
            )));
        }
    }

    if let Some(invalid_before) = payload.invalid_before {
        if invalid_before
            .checked_sub(leeway)
            .is_some_and(|earliest| earliest > now)
        {
            return Err(CodecError::CouldNotVerify(format!(
                "token not valid before {invalid_before}"
            )));
        }
    }

    Ok(())
}

/// Seconds from configuration as a `Duration`, saturating instead of wrapping.
pub(super) fn seconds(value: u64) -> Duration {
    Duration::seconds(i64::try_from(value).unwrap_or(i64::MAX))
}

/// Presentation tokens travel as a JSON string literal; bare compact JWTs
/// are accepted as well.
pub(super) fn unquote_token(token: &str) -> Result<String, CodecError> {
    let token = token.trim();
    if token.starts_with('"') {
        serde_json::from_str(token).map_err(|e| CodecError::CouldNotParse(e.to_string()))
    } else {
        Ok(token.to_owned())
    }
}
