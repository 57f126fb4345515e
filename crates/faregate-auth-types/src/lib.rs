//! Auth types shared across Faregate services.
//!
//! Provides authorization-token validation and the claims payload. Token
//! issuance lives in the login service; every other service only verifies.

pub mod token;
