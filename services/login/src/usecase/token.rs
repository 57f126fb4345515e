use std::time::{SystemTime, UNIX_EPOCH};

use jsonwebtoken::{EncodingKey, Header, encode};

use faregate_auth_types::token::JwtClaims;

use crate::domain::repository::AccountRepository;
use crate::domain::types::{Account, AuthorizationToken};
use crate::error::LoginServiceError;
use crate::password::verify_password;

fn now_secs() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("system clock before UNIX epoch")
        .as_secs()
}

/// Issue a signed authorization token asserting the account's username and
/// roles. Claims are second-granularity; the configured TTL is milliseconds.
pub fn issue_authorization_token(
    account: &Account,
    secret_b64: &str,
    ttl_ms: u64,
) -> Result<String, LoginServiceError> {
    let iat = now_secs();
    let claims = JwtClaims {
        sub: account.username.clone(),
        roles: account.roles.iter().map(|r| r.as_str().to_owned()).collect(),
        iat,
        exp: iat + ttl_ms / 1000,
    };
    let key = EncodingKey::from_base64_secret(secret_b64)
        .map_err(|e| LoginServiceError::Internal(anyhow::anyhow!("decode signing secret: {e}")))?;
    encode(&Header::default(), &claims, &key)
        .map_err(|e| LoginServiceError::Internal(e.into()))
}

// ── Login ────────────────────────────────────────────────────────────────────

pub struct LoginInput {
    pub username: String,
    pub password: String,
}

pub struct LoginUseCase<A: AccountRepository> {
    pub accounts: A,
    pub jwt_secret_b64: String,
    pub jwt_ttl_ms: u64,
}

impl<A: AccountRepository> LoginUseCase<A> {
    /// Authenticate and issue a token.
    ///
    /// Unknown username, wrong password and inactive account all collapse to
    /// the same `LoginRejected`; callers learn nothing about which check
    /// failed.
    pub async fn execute(&self, input: LoginInput) -> Result<AuthorizationToken, LoginServiceError> {
        let Some(account) = self.accounts.find_by_username(&input.username).await? else {
            return Err(LoginServiceError::LoginRejected);
        };
        if !verify_password(&input.password, &account.password_hash) || !account.active {
            return Err(LoginServiceError::LoginRejected);
        }

        let token = issue_authorization_token(&account, &self.jwt_secret_b64, self.jwt_ttl_ms)?;
        Ok(AuthorizationToken {
            authorization: token,
        })
    }
}
