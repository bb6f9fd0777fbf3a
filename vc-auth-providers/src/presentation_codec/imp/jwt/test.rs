use serde::{Deserialize, Serialize};
use time::{macros::datetime, OffsetDateTime};

use super::{compact_token, model::JWTPayload, Jwt};
use crate::presentation_codec::error::CodecError;

#[derive(Serialize, Deserialize, Debug, Eq, PartialEq)]
struct Payload {
    test_field: String,
}

fn get_dummy_date() -> OffsetDateTime {
    datetime!(2005-04-02 21:37 +1)
}

const REFERENCE_TOKEN: &str = "eyJhbGciOiJBbGdvcml0aG0xIiwidHlwIjoiU2lnbmF0dXJlMSJ9.eyJpYXQiOjExMTI0NzQyMjAsImV4cCI6MTExMjQ3NDIyMCwibmJmIjoxMTEyNDc0MjIwLCJpc3MiOiJESUQiLCJzdWIiOiJESUQiLCJqdGkiOiJJRCIsInRlc3RfZmllbGQiOiJ0ZXN0In0.AQID";

fn prepare_test_jwt() -> Jwt<Payload> {
    let now = get_dummy_date();

    let payload = JWTPayload {
        issued_at: Some(now),
        expires_at: Some(now),
        invalid_before: Some(now),
        issuer: Some("DID".to_owned()),
        subject: Some("DID".to_owned()),
        jwt_id: Some("ID".to_owned()),
        custom: Payload {
            test_field: "test".to_owned(),
        },
    };

    Jwt::new(
        "Signature1".to_owned(),
        "Algorithm1".to_owned(),
        None,
        payload,
    )
}

fn signing_input_of(token: &str) -> &str {
    token.rsplit_once('.').unwrap().0
}

#[test]
fn test_signing_input_and_compact() {
    let jwt = prepare_test_jwt();

    let signing_input = jwt.signing_input().unwrap();
    assert_eq!(signing_input, signing_input_of(REFERENCE_TOKEN));

    let token = compact_token(&signing_input, &[1u8, 2, 3]).unwrap();
    assert_eq!(token, REFERENCE_TOKEN);
}

#[test]
fn test_decompose_token() {
    let reference = prepare_test_jwt();

    let decomposed = Jwt::<Payload>::decompose_token(REFERENCE_TOKEN).unwrap();

    assert_eq!(decomposed.header.algorithm, reference.header.algorithm);
    assert_eq!(
        decomposed.header.signature_type,
        reference.header.signature_type
    );
    assert_eq!(decomposed.payload.custom, reference.payload.custom);
    assert_eq!(decomposed.payload.issuer, reference.payload.issuer);
    assert_eq!(decomposed.payload.jwt_id, reference.payload.jwt_id);
    assert_eq!(decomposed.signing_input, signing_input_of(REFERENCE_TOKEN));
    assert_eq!(decomposed.signature, vec![1u8, 2, 3]);
}

#[test]
fn test_decompose_token_missing_part() {
    let token = signing_input_of(REFERENCE_TOKEN).split_once('.').unwrap().0;

    let result = Jwt::<Payload>::decompose_token(token);

    assert!(matches!(result, Err(CodecError::CouldNotParse(_))));
}

#[test]
fn test_decompose_token_too_many_parts() {
    let token = format!("a.{REFERENCE_TOKEN}");

    let result = Jwt::<Payload>::decompose_token(&token);

    assert!(matches!(result, Err(CodecError::CouldNotParse(_))));
}

#[test]
fn test_decompose_token_bad_payload() {
    let header = signing_input_of(REFERENCE_TOKEN).split_once('.').unwrap().0;
    // `{"x":1}` does not carry `test_field`
    let token = format!("{header}.eyJ4IjoxfQ.AQID");

    let result = Jwt::<Payload>::decompose_token(&token);

    assert!(matches!(result, Err(CodecError::CouldNotParse(_))));
}
