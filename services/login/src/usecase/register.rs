use chrono::{Duration, Utc};
use rand::RngExt;
use uuid::Uuid;

use faregate_domain::role::Role;

use crate::domain::credentials::{email_format_ok, password_strength_ok, username_shape_ok};
use crate::domain::repository::{AccountRepository, NotificationSink};
use crate::domain::types::{
    ACTIVATION_CODE_LEN, ACTIVATION_MAX_ATTEMPTS, ACTIVATION_TTL_HOURS, ActivationResult,
    NewAccount, NewActivation,
};
use crate::error::LoginServiceError;
use crate::password::hash_password;

/// Charset for generating activation codes (digits only).
const CHARSET: &[u8] = b"0123456789";

fn generate_activation_code() -> String {
    let mut rng = rand::rng();
    (0..ACTIVATION_CODE_LEN)
        .map(|_| CHARSET[rng.random_range(0..CHARSET.len())] as char)
        .collect()
}

// ── RegisterTraveler ─────────────────────────────────────────────────────────

pub struct RegisterTravelerInput {
    pub username: String,
    pub password: String,
    pub email: String,
}

pub struct RegisterTravelerUseCase<A, N>
where
    A: AccountRepository,
    N: NotificationSink,
{
    pub accounts: A,
    pub notifications: N,
}

impl<A, N> RegisterTravelerUseCase<A, N>
where
    A: AccountRepository,
    N: NotificationSink,
{
    pub async fn execute(
        &self,
        input: RegisterTravelerInput,
    ) -> Result<ActivationResult, LoginServiceError> {
        self.check_traveler_credentials(&input).await?;

        let new_account = NewAccount {
            username: input.username.clone(),
            email: Some(input.email.clone()),
            password_hash: hash_password(&input.password)?,
            active: false,
            roles: vec![Role::Customer],
            enrolling_capability: 0,
        };
        let new_activation = NewActivation {
            provisional_id: Uuid::new_v4(),
            code: generate_activation_code(),
            deadline: Utc::now() + Duration::hours(ACTIVATION_TTL_HOURS),
            attempt_counter: ACTIVATION_MAX_ATTEMPTS,
        };

        let (account, activation) = self
            .accounts
            .create_with_activation(&new_account, &new_activation)
            .await?;

        // Best-effort delivery: the pending registration stays valid and
        // resendable even when the sink fails.
        if let Err(e) = self
            .notifications
            .send(
                &account.username,
                &input.email,
                activation.provisional_id,
                &activation.code,
            )
            .await
        {
            tracing::warn!(
                error = %e,
                provisional_id = %activation.provisional_id,
                "activation notification failed"
            );
        }

        Ok(ActivationResult {
            provisional_id: activation.provisional_id,
            email: input.email,
        })
    }

    /// Fail-fast policy checks; the first violated rule becomes the reason.
    async fn check_traveler_credentials(
        &self,
        input: &RegisterTravelerInput,
    ) -> Result<(), LoginServiceError> {
        if !username_shape_ok(&input.username) || input.password.is_empty() || input.email.is_empty()
        {
            return Err(LoginServiceError::InvalidAccount(
                "fields cannot be empty".to_owned(),
            ));
        }
        if !email_format_ok(&input.email) {
            return Err(LoginServiceError::InvalidAccount(
                "wrong email format".to_owned(),
            ));
        }
        if !password_strength_ok(&input.password) {
            return Err(LoginServiceError::InvalidAccount(
                "password not strong enough".to_owned(),
            ));
        }
        if self
            .accounts
            .find_by_username_or_email(&input.username, &input.email)
            .await?
            .is_some()
        {
            return Err(LoginServiceError::InvalidAccount(
                "username or email already used".to_owned(),
            ));
        }
        Ok(())
    }
}

// ── DeleteAccount ────────────────────────────────────────────────────────────

pub struct DeleteAccountUseCase<A: AccountRepository> {
    pub accounts: A,
}

impl<A: AccountRepository> DeleteAccountUseCase<A> {
    /// Unconditional delete by username; unknown usernames are not an error.
    pub async fn execute(&self, username: &str) -> Result<(), LoginServiceError> {
        self.accounts.delete_by_username(username).await
    }
}
