#![allow(async_fn_in_trait)]

use uuid::Uuid;

use crate::domain::types::{Account, Activation, NewAccount, NewActivation};
use crate::error::LoginServiceError;

/// Store port for accounts.
///
/// Uniqueness of username and email is enforced by the store; inserts surface
/// constraint violations as `InvalidAccount`, so two concurrent registrations
/// of the same credentials can never both succeed.
pub trait AccountRepository: Send + Sync {
    async fn find_by_username(&self, username: &str)
    -> Result<Option<Account>, LoginServiceError>;

    async fn find_by_username_or_email(
        &self,
        username: &str,
        email: &str,
    ) -> Result<Option<Account>, LoginServiceError>;

    async fn find_by_id(&self, id: i64) -> Result<Option<Account>, LoginServiceError>;

    /// Insert an account, returning it with its assigned id.
    async fn create(&self, account: &NewAccount) -> Result<Account, LoginServiceError>;

    /// Insert an account and its activation in one transaction. No pending
    /// account may exist without its activation, and vice versa.
    async fn create_with_activation(
        &self,
        account: &NewAccount,
        activation: &NewActivation,
    ) -> Result<(Account, Activation), LoginServiceError>;

    /// Replace the password hash, leaving every other column untouched.
    async fn update_password_hash(
        &self,
        id: i64,
        password_hash: &str,
    ) -> Result<(), LoginServiceError>;

    /// Idempotent: deleting an unknown username is not an error. Deleting an
    /// account cascades to its pending activation.
    async fn delete_by_username(&self, username: &str) -> Result<(), LoginServiceError>;

    async fn deactivate_by_id(&self, id: i64) -> Result<(), LoginServiceError>;
}

/// Outcome of recording a wrong activation code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttemptOutcome {
    /// The attempt counter was decremented; the activation stays pending.
    Decremented,
    /// The counter was exhausted; the account and its activation are gone.
    Exhausted,
}

/// Store port for pending activations.
pub trait ActivationRepository: Send + Sync {
    async fn find_by_provisional_id(
        &self,
        provisional_id: Uuid,
    ) -> Result<Option<Activation>, LoginServiceError>;

    /// Consume a satisfied activation: delete it and flip its account to
    /// active, in one transaction.
    async fn consume(&self, provisional_id: Uuid, account_id: i64)
    -> Result<(), LoginServiceError>;

    /// Record a wrong code. The decrement is a single atomic conditional
    /// update; when the counter would reach zero the owning account is
    /// deleted together with the activation instead. Two concurrent wrong
    /// guesses can never both decrement past zero.
    async fn fail_attempt(
        &self,
        provisional_id: Uuid,
    ) -> Result<AttemptOutcome, LoginServiceError>;
}

/// Delivery port for activation notifications.
///
/// Best-effort from the lifecycle service's perspective: a failure here never
/// rolls back the just-created pending registration, and the activation stays
/// valid and resendable.
pub trait NotificationSink: Send + Sync {
    async fn send(
        &self,
        username: &str,
        email: &str,
        provisional_id: Uuid,
        code: &str,
    ) -> Result<(), LoginServiceError>;
}
