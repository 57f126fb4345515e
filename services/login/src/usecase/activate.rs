use chrono::Utc;
use uuid::Uuid;

use crate::domain::credentials::activation_code_shape_ok;
use crate::domain::repository::{AccountRepository, ActivationRepository, AttemptOutcome};
use crate::domain::types::AccountResult;
use crate::error::LoginServiceError;

const NOT_FOUND_OR_EXPIRED: &str = "activation not found or expired";
const WRONG_CODE: &str = "wrong activation code";

pub struct ValidateTravelerInput {
    pub provisional_id: Uuid,
    pub code: String,
}

pub struct ValidateTravelerUseCase<A, V>
where
    A: AccountRepository,
    V: ActivationRepository,
{
    pub accounts: A,
    pub activations: V,
}

impl<A, V> ValidateTravelerUseCase<A, V>
where
    A: AccountRepository,
    V: ActivationRepository,
{
    /// Settle a pending activation.
    ///
    /// A correct six-digit code before the deadline consumes the activation
    /// and flips the account active. A wrong code burns one attempt; the
    /// attempt that would reach zero removes the pending account entirely.
    /// Deadlines are only checked here; expired activations linger until
    /// someone tries them.
    pub async fn execute(
        &self,
        input: ValidateTravelerInput,
    ) -> Result<AccountResult, LoginServiceError> {
        let activation = self
            .activations
            .find_by_provisional_id(input.provisional_id)
            .await?
            .ok_or(LoginServiceError::InvalidActivation(NOT_FOUND_OR_EXPIRED))?;

        if activation.is_expired(Utc::now()) {
            return Err(LoginServiceError::InvalidActivation(NOT_FOUND_OR_EXPIRED));
        }

        if !activation_code_shape_ok(&input.code) || input.code != activation.code {
            match self.activations.fail_attempt(input.provisional_id).await? {
                AttemptOutcome::Decremented => {
                    tracing::debug!(
                        provisional_id = %input.provisional_id,
                        "wrong activation code"
                    );
                }
                AttemptOutcome::Exhausted => {
                    tracing::info!(
                        provisional_id = %input.provisional_id,
                        "activation attempts exhausted, pending account removed"
                    );
                }
            }
            return Err(LoginServiceError::InvalidActivation(WRONG_CODE));
        }

        let account = self
            .accounts
            .find_by_id(activation.account_id)
            .await?
            .ok_or_else(|| {
                LoginServiceError::Internal(anyhow::anyhow!(
                    "activation {} has no owning account",
                    input.provisional_id
                ))
            })?;

        self.activations
            .consume(input.provisional_id, activation.account_id)
            .await?;

        Ok(AccountResult {
            id: account.id,
            username: account.username,
            email: account.email.unwrap_or_default(),
            roles: account.roles,
        })
    }
}
