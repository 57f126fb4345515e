use std::sync::{Arc, Mutex};

use uuid::Uuid;

use faregate_login::domain::repository::{
    AccountRepository, ActivationRepository, AttemptOutcome, NotificationSink,
};
use faregate_login::domain::types::{Account, Activation, NewAccount, NewActivation};
use faregate_login::error::LoginServiceError;

// ── MockStore ────────────────────────────────────────────────────────────────

/// In-memory store backing both repositories, enforcing the same uniqueness
/// and cascade rules as the real store: username/email are unique, and
/// deleting an account removes its pending activation.
#[derive(Clone, Default)]
pub struct MockStore {
    accounts: Arc<Mutex<Vec<Account>>>,
    activations: Arc<Mutex<Vec<Activation>>>,
    next_id: Arc<Mutex<i64>>,
}

impl MockStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Shared handle to the account list for post-execution inspection.
    pub fn accounts_handle(&self) -> Arc<Mutex<Vec<Account>>> {
        Arc::clone(&self.accounts)
    }

    /// Shared handle to the activation list for post-execution inspection.
    pub fn activations_handle(&self) -> Arc<Mutex<Vec<Activation>>> {
        Arc::clone(&self.activations)
    }

    pub fn seed_account(&self, account: Account) {
        self.accounts.lock().unwrap().push(account);
    }

    pub fn seed_activation(&self, activation: Activation) {
        self.activations.lock().unwrap().push(activation);
    }

    fn assign_id(&self) -> i64 {
        let mut next = self.next_id.lock().unwrap();
        *next += 1;
        *next
    }

    fn insert_unique(&self, account: &NewAccount) -> Result<Account, LoginServiceError> {
        let mut accounts = self.accounts.lock().unwrap();
        let clash = accounts.iter().any(|a| {
            a.username == account.username || (account.email.is_some() && a.email == account.email)
        });
        if clash {
            return Err(LoginServiceError::InvalidAccount(
                "username or email already used".to_owned(),
            ));
        }
        let stored = Account {
            id: self.assign_id(),
            username: account.username.clone(),
            email: account.email.clone(),
            password_hash: account.password_hash.clone(),
            active: account.active,
            roles: account.roles.clone(),
            enrolling_capability: account.enrolling_capability,
        };
        accounts.push(stored.clone());
        Ok(stored)
    }
}

impl AccountRepository for MockStore {
    async fn find_by_username(
        &self,
        username: &str,
    ) -> Result<Option<Account>, LoginServiceError> {
        Ok(self
            .accounts
            .lock()
            .unwrap()
            .iter()
            .find(|a| a.username == username)
            .cloned())
    }

    async fn find_by_username_or_email(
        &self,
        username: &str,
        email: &str,
    ) -> Result<Option<Account>, LoginServiceError> {
        Ok(self
            .accounts
            .lock()
            .unwrap()
            .iter()
            .find(|a| a.username == username || a.email.as_deref() == Some(email))
            .cloned())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Account>, LoginServiceError> {
        Ok(self
            .accounts
            .lock()
            .unwrap()
            .iter()
            .find(|a| a.id == id)
            .cloned())
    }

    async fn create(&self, account: &NewAccount) -> Result<Account, LoginServiceError> {
        self.insert_unique(account)
    }

    async fn create_with_activation(
        &self,
        account: &NewAccount,
        activation: &NewActivation,
    ) -> Result<(Account, Activation), LoginServiceError> {
        let stored = self.insert_unique(account)?;
        let stored_activation = Activation {
            provisional_id: activation.provisional_id,
            account_id: stored.id,
            code: activation.code.clone(),
            deadline: activation.deadline,
            attempt_counter: activation.attempt_counter,
        };
        self.activations
            .lock()
            .unwrap()
            .push(stored_activation.clone());
        Ok((stored, stored_activation))
    }

    async fn update_password_hash(
        &self,
        id: i64,
        password_hash: &str,
    ) -> Result<(), LoginServiceError> {
        if let Some(account) = self.accounts.lock().unwrap().iter_mut().find(|a| a.id == id) {
            account.password_hash = password_hash.to_owned();
        }
        Ok(())
    }

    async fn delete_by_username(&self, username: &str) -> Result<(), LoginServiceError> {
        let mut accounts = self.accounts.lock().unwrap();
        if let Some(pos) = accounts.iter().position(|a| a.username == username) {
            let account = accounts.remove(pos);
            self.activations
                .lock()
                .unwrap()
                .retain(|v| v.account_id != account.id);
        }
        Ok(())
    }

    async fn deactivate_by_id(&self, id: i64) -> Result<(), LoginServiceError> {
        if let Some(account) = self.accounts.lock().unwrap().iter_mut().find(|a| a.id == id) {
            account.active = false;
        }
        Ok(())
    }
}

impl ActivationRepository for MockStore {
    async fn find_by_provisional_id(
        &self,
        provisional_id: Uuid,
    ) -> Result<Option<Activation>, LoginServiceError> {
        Ok(self
            .activations
            .lock()
            .unwrap()
            .iter()
            .find(|v| v.provisional_id == provisional_id)
            .cloned())
    }

    async fn consume(
        &self,
        provisional_id: Uuid,
        account_id: i64,
    ) -> Result<(), LoginServiceError> {
        self.activations
            .lock()
            .unwrap()
            .retain(|v| v.provisional_id != provisional_id);
        if let Some(account) = self
            .accounts
            .lock()
            .unwrap()
            .iter_mut()
            .find(|a| a.id == account_id)
        {
            account.active = true;
        }
        Ok(())
    }

    async fn fail_attempt(
        &self,
        provisional_id: Uuid,
    ) -> Result<AttemptOutcome, LoginServiceError> {
        let mut activations = self.activations.lock().unwrap();
        let Some(pos) = activations
            .iter()
            .position(|v| v.provisional_id == provisional_id)
        else {
            return Ok(AttemptOutcome::Exhausted);
        };
        if activations[pos].attempt_counter > 1 {
            activations[pos].attempt_counter -= 1;
            return Ok(AttemptOutcome::Decremented);
        }
        let activation = activations.remove(pos);
        self.accounts
            .lock()
            .unwrap()
            .retain(|a| a.id != activation.account_id);
        Ok(AttemptOutcome::Exhausted)
    }
}

// ── MockNotificationSink ─────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct SentNotification {
    pub username: String,
    pub email: String,
    pub provisional_id: Uuid,
    pub code: String,
}

#[derive(Clone, Default)]
pub struct MockNotificationSink {
    sent: Arc<Mutex<Vec<SentNotification>>>,
    fail: bool,
}

impl MockNotificationSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// A sink whose every delivery fails.
    pub fn failing() -> Self {
        Self {
            sent: Arc::new(Mutex::new(Vec::new())),
            fail: true,
        }
    }

    pub fn sent_handle(&self) -> Arc<Mutex<Vec<SentNotification>>> {
        Arc::clone(&self.sent)
    }
}

impl NotificationSink for MockNotificationSink {
    async fn send(
        &self,
        username: &str,
        email: &str,
        provisional_id: Uuid,
        code: &str,
    ) -> Result<(), LoginServiceError> {
        if self.fail {
            return Err(LoginServiceError::Internal(anyhow::anyhow!(
                "mail relay unavailable"
            )));
        }
        self.sent.lock().unwrap().push(SentNotification {
            username: username.to_owned(),
            email: email.to_owned(),
            provisional_id,
            code: code.to_owned(),
        });
        Ok(())
    }
}
