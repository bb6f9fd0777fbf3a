pub mod jwt;
pub mod jwt_codec;
