//! Authorization-token validation.

use jsonwebtoken::{DecodingKey, Validation, decode};
use serde::Deserialize;
#[cfg(any(feature = "USE_ONLY_IN_LOGIN_SERVICE", test))]
use serde::Serialize;

use faregate_domain::role::Role;

/// Identity extracted from a validated authorization token.
#[derive(Debug, Clone)]
pub struct TokenDetails {
    pub username: String,
    pub roles: Vec<Role>,
    pub expires_at: u64,
}

/// Errors returned by [`validate_authorization_token`].
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("invalid signature")]
    InvalidSignature,
    #[error("token expired")]
    Expired,
    #[error("malformed token")]
    Malformed,
    #[error("unrecognized role in token")]
    UnknownRole,
    #[error("signing key is not valid base64")]
    InvalidKey,
}

/// JWT claims payload shared by token creation (login service) and validation
/// (every consumer).
///
/// | Field   | JWT claim | Meaning                             |
/// |---------|-----------|-------------------------------------|
/// | `sub`   | `sub`     | username                            |
/// | `roles` | custom    | role wire strings, see [`Role`]     |
/// | `iat`   | `iat`     | issue time, seconds since epoch     |
/// | `exp`   | `exp`     | expiration, seconds since epoch     |
///
/// [`Deserialize`] is always available — all consumers validate tokens.
/// [`Serialize`] requires the **`USE_ONLY_IN_LOGIN_SERVICE`** cargo feature.
/// Only the login service enables it because it is the sole token issuer.
#[derive(Debug, Deserialize)]
#[cfg_attr(any(feature = "USE_ONLY_IN_LOGIN_SERVICE", test), derive(Serialize))]
pub struct JwtClaims {
    /// Username the token asserts.
    pub sub: String,
    /// Role wire strings.
    pub roles: Vec<String>,
    /// Issue timestamp (seconds since UNIX epoch).
    pub iat: u64,
    /// Expiration timestamp (seconds since UNIX epoch).
    pub exp: u64,
}

/// Decode and validate a token, returning raw claims.
///
/// Validation: HS256 over a base64-encoded symmetric secret, exp checked,
/// required claims: `exp` + `sub`. Default leeway = 60s — tolerates clock
/// skew between services.
fn decode_jwt(token: &str, secret_b64: &str) -> Result<JwtClaims, AuthError> {
    let key = DecodingKey::from_base64_secret(secret_b64).map_err(|_| AuthError::InvalidKey)?;

    let mut validation = Validation::new(jsonwebtoken::Algorithm::HS256);
    validation.validate_exp = true;
    validation.required_spec_claims.clear();
    validation.set_required_spec_claims(&["exp", "sub"]);

    let data = decode::<JwtClaims>(token, &key, &validation).map_err(|e| match e.kind() {
        jsonwebtoken::errors::ErrorKind::ExpiredSignature => AuthError::Expired,
        jsonwebtoken::errors::ErrorKind::InvalidSignature => AuthError::InvalidSignature,
        _ => AuthError::Malformed,
    })?;

    Ok(data.claims)
}

/// Validate an authorization token, returning parsed identity.
///
/// This is the primary public API for token validation. Services call this on
/// every authenticated request to extract the traveler or admin identity.
///
/// A token whose `roles` claim carries a string outside the closed role set
/// fails with [`AuthError::UnknownRole`] — it is never coerced to a known
/// role.
pub fn validate_authorization_token(
    token: &str,
    secret_b64: &str,
) -> Result<TokenDetails, AuthError> {
    let claims = decode_jwt(token, secret_b64)?;
    if claims.roles.is_empty() {
        return Err(AuthError::Malformed);
    }
    let roles = claims
        .roles
        .iter()
        .map(|s| Role::from_str(s).ok_or(AuthError::UnknownRole))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(TokenDetails {
        username: claims.sub,
        roles,
        expires_at: claims.exp,
    })
}
