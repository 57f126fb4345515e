use faregate_domain::role::Role;

use crate::domain::credentials::{password_strength_ok, username_shape_ok};
use crate::domain::repository::AccountRepository;
use crate::domain::types::{AdminResult, NewAccount};
use crate::error::LoginServiceError;
use crate::password::hash_password;

/// Admin-side policy: username shape, password strength, capability range,
/// uniqueness by username only (admins carry no email). Fail-fast, first
/// violated rule wins.
async fn check_admin_credentials<A: AccountRepository>(
    accounts: &A,
    username: &str,
    password: &str,
    enrolling_capability: i32,
) -> Result<(), LoginServiceError> {
    if !username_shape_ok(username) || password.is_empty() {
        return Err(LoginServiceError::InvalidAccount(
            "fields cannot be empty".to_owned(),
        ));
    }
    if !password_strength_ok(password) {
        return Err(LoginServiceError::InvalidAccount(
            "password not strong enough".to_owned(),
        ));
    }
    if enrolling_capability < 0 {
        return Err(LoginServiceError::InvalidAccount(
            "enrolling capability can't be negative".to_owned(),
        ));
    }
    if accounts.find_by_username(username).await?.is_some() {
        return Err(LoginServiceError::InvalidAccount(
            "username already used".to_owned(),
        ));
    }
    Ok(())
}

async fn create_admin<A: AccountRepository>(
    accounts: &A,
    username: String,
    password: &str,
    enrolling_capability: i32,
) -> Result<AdminResult, LoginServiceError> {
    let account = accounts
        .create(&NewAccount {
            username,
            email: None,
            password_hash: hash_password(password)?,
            active: true,
            roles: vec![Role::Admin],
            enrolling_capability,
        })
        .await?;
    Ok(AdminResult {
        id: account.id,
        username: account.username,
        enrolling_capability: account.enrolling_capability,
        roles: account.roles,
    })
}

// ── EnrollAdmin ──────────────────────────────────────────────────────────────

pub struct EnrollAdminInput {
    pub acting_username: String,
    pub username: String,
    pub password: String,
    pub enrolling_capability: i32,
}

pub struct EnrollAdminUseCase<A: AccountRepository> {
    pub accounts: A,
}

impl<A: AccountRepository> EnrollAdminUseCase<A> {
    /// Create a new ACTIVE admin account on behalf of an admin whose
    /// enrolling capability is nonzero. An unknown acting username is
    /// refused the same way as one without capability.
    pub async fn execute(&self, input: EnrollAdminInput) -> Result<AdminResult, LoginServiceError> {
        let actor = self.accounts.find_by_username(&input.acting_username).await?;
        if !actor.is_some_and(|a| a.may_enroll()) {
            return Err(LoginServiceError::Forbidden);
        }
        check_admin_credentials(
            &self.accounts,
            &input.username,
            &input.password,
            input.enrolling_capability,
        )
        .await?;
        create_admin(
            &self.accounts,
            input.username,
            &input.password,
            input.enrolling_capability,
        )
        .await
    }
}

// ── EnrollDefaultAdmin ───────────────────────────────────────────────────────

pub struct EnrollDefaultAdminInput {
    pub username: String,
    pub password: String,
    pub enrolling_capability: i32,
}

/// Bootstrap-only enrollment with no authority check. The calling context is
/// responsible for making this unreachable after trusted initialization.
pub struct EnrollDefaultAdminUseCase<A: AccountRepository> {
    pub accounts: A,
}

impl<A: AccountRepository> EnrollDefaultAdminUseCase<A> {
    pub async fn execute(
        &self,
        input: EnrollDefaultAdminInput,
    ) -> Result<AdminResult, LoginServiceError> {
        check_admin_credentials(
            &self.accounts,
            &input.username,
            &input.password,
            input.enrolling_capability,
        )
        .await?;
        create_admin(
            &self.accounts,
            input.username,
            &input.password,
            input.enrolling_capability,
        )
        .await
    }
}

// ── DisableAccount ───────────────────────────────────────────────────────────

pub struct DisableAccountInput {
    pub acting_username: String,
    pub target_account_id: i64,
}

pub struct DisableAccountUseCase<A: AccountRepository> {
    pub accounts: A,
}

impl<A: AccountRepository> DisableAccountUseCase<A> {
    /// Flip a target account inactive. Never deletes, and an admin can never
    /// disable their own account.
    pub async fn execute(&self, input: DisableAccountInput) -> Result<(), LoginServiceError> {
        let actor = self
            .accounts
            .find_by_username(&input.acting_username)
            .await?
            .filter(|a| a.may_enroll())
            .ok_or(LoginServiceError::Forbidden)?;

        let target = self
            .accounts
            .find_by_id(input.target_account_id)
            .await?
            .ok_or(LoginServiceError::NotFound)?;

        if target.id == actor.id {
            return Err(LoginServiceError::SelfDisable);
        }

        self.accounts.deactivate_by_id(target.id).await
    }
}
