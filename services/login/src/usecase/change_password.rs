use crate::domain::credentials::password_strength_ok;
use crate::domain::repository::AccountRepository;
use crate::error::LoginServiceError;
use crate::password::{hash_password, verify_password};

const WRONG_OLD_PASSWORD: &str = "wrong old password";

pub struct ChangePasswordInput {
    pub username: String,
    pub old_password: String,
    pub new_password: String,
}

pub struct ChangePasswordUseCase<A: AccountRepository> {
    pub accounts: A,
}

impl<A: AccountRepository> ChangePasswordUseCase<A> {
    /// Replace an account's password hash. An unknown username reports the
    /// same reason as a wrong password.
    pub async fn execute(&self, input: ChangePasswordInput) -> Result<(), LoginServiceError> {
        let Some(account) = self.accounts.find_by_username(&input.username).await? else {
            return Err(LoginServiceError::InvalidPassword(WRONG_OLD_PASSWORD));
        };
        if !verify_password(&input.old_password, &account.password_hash) {
            return Err(LoginServiceError::InvalidPassword(WRONG_OLD_PASSWORD));
        }
        if !password_strength_ok(&input.new_password) {
            return Err(LoginServiceError::InvalidPassword(
                "new password not strong enough",
            ));
        }
        if input.old_password == input.new_password {
            return Err(LoginServiceError::InvalidPassword(
                "old password and new password can't be the same",
            ));
        }

        let password_hash = hash_password(&input.new_password)?;
        self.accounts
            .update_password_hash(account.id, &password_hash)
            .await
    }
}
