pub mod address_verification;
