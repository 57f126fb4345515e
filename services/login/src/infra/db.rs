use anyhow::Context as _;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait,
    ActiveValue::{NotSet, Set},
    ColumnTrait, Condition, DatabaseConnection, DbErr, EntityTrait, QueryFilter, SqlErr,
    TransactionError, TransactionTrait,
};
use uuid::Uuid;

use faregate_domain::role::Role;
use faregate_login_schema::{accounts, activations};

use crate::domain::repository::{AccountRepository, ActivationRepository, AttemptOutcome};
use crate::domain::types::{Account, Activation, NewAccount, NewActivation};
use crate::error::LoginServiceError;

// ── Account repository ───────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbAccountRepository {
    pub db: DatabaseConnection,
}

impl AccountRepository for DbAccountRepository {
    async fn find_by_username(
        &self,
        username: &str,
    ) -> Result<Option<Account>, LoginServiceError> {
        let model = accounts::Entity::find()
            .filter(accounts::Column::Username.eq(username))
            .one(&self.db)
            .await
            .context("find account by username")?;
        model.map(account_from_model).transpose()
    }

    async fn find_by_username_or_email(
        &self,
        username: &str,
        email: &str,
    ) -> Result<Option<Account>, LoginServiceError> {
        let model = accounts::Entity::find()
            .filter(
                Condition::any()
                    .add(accounts::Column::Username.eq(username))
                    .add(accounts::Column::Email.eq(email)),
            )
            .one(&self.db)
            .await
            .context("find account by username or email")?;
        model.map(account_from_model).transpose()
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Account>, LoginServiceError> {
        let model = accounts::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find account by id")?;
        model.map(account_from_model).transpose()
    }

    async fn create(&self, account: &NewAccount) -> Result<Account, LoginServiceError> {
        match new_account_model(account).insert(&self.db).await {
            Ok(model) => account_from_model(model),
            Err(e) => Err(insert_error(e, "insert account")),
        }
    }

    async fn create_with_activation(
        &self,
        account: &NewAccount,
        activation: &NewActivation,
    ) -> Result<(Account, Activation), LoginServiceError> {
        let result = self
            .db
            .transaction::<_, (accounts::Model, activations::Model), DbErr>(|txn| {
                let account = account.clone();
                let activation = activation.clone();
                Box::pin(async move {
                    let account_model = new_account_model(&account).insert(txn).await?;
                    let activation_model = activations::ActiveModel {
                        provisional_id: Set(activation.provisional_id),
                        account_id: Set(account_model.id),
                        code: Set(activation.code.clone()),
                        deadline: Set(activation.deadline),
                        attempt_counter: Set(activation.attempt_counter),
                    }
                    .insert(txn)
                    .await?;
                    Ok((account_model, activation_model))
                })
            })
            .await;

        match result {
            Ok((account_model, activation_model)) => Ok((
                account_from_model(account_model)?,
                activation_from_model(activation_model),
            )),
            Err(TransactionError::Transaction(e)) => {
                Err(insert_error(e, "create account with activation"))
            }
            Err(e) => Err(LoginServiceError::Internal(
                anyhow::Error::new(e).context("create account with activation"),
            )),
        }
    }

    async fn update_password_hash(
        &self,
        id: i64,
        password_hash: &str,
    ) -> Result<(), LoginServiceError> {
        accounts::ActiveModel {
            id: Set(id),
            password_hash: Set(password_hash.to_owned()),
            ..Default::default()
        }
        .update(&self.db)
        .await
        .context("update password hash")?;
        Ok(())
    }

    async fn delete_by_username(&self, username: &str) -> Result<(), LoginServiceError> {
        self.db
            .transaction::<_, (), DbErr>(|txn| {
                let username = username.to_owned();
                Box::pin(async move {
                    let Some(account) = accounts::Entity::find()
                        .filter(accounts::Column::Username.eq(&username))
                        .one(txn)
                        .await?
                    else {
                        return Ok(());
                    };
                    activations::Entity::delete_many()
                        .filter(activations::Column::AccountId.eq(account.id))
                        .exec(txn)
                        .await?;
                    accounts::Entity::delete_by_id(account.id).exec(txn).await?;
                    Ok(())
                })
            })
            .await
            .context("delete account by username")?;
        Ok(())
    }

    async fn deactivate_by_id(&self, id: i64) -> Result<(), LoginServiceError> {
        accounts::ActiveModel {
            id: Set(id),
            active: Set(false),
            ..Default::default()
        }
        .update(&self.db)
        .await
        .context("deactivate account")?;
        Ok(())
    }
}

// ── Activation repository ────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbActivationRepository {
    pub db: DatabaseConnection,
}

impl ActivationRepository for DbActivationRepository {
    async fn find_by_provisional_id(
        &self,
        provisional_id: Uuid,
    ) -> Result<Option<Activation>, LoginServiceError> {
        let model = activations::Entity::find_by_id(provisional_id)
            .one(&self.db)
            .await
            .context("find activation by provisional id")?;
        Ok(model.map(activation_from_model))
    }

    async fn consume(
        &self,
        provisional_id: Uuid,
        account_id: i64,
    ) -> Result<(), LoginServiceError> {
        self.db
            .transaction::<_, (), DbErr>(|txn| {
                Box::pin(async move {
                    activations::Entity::delete_by_id(provisional_id)
                        .exec(txn)
                        .await?;
                    accounts::ActiveModel {
                        id: Set(account_id),
                        active: Set(true),
                        ..Default::default()
                    }
                    .update(txn)
                    .await?;
                    Ok(())
                })
            })
            .await
            .context("consume activation")?;
        Ok(())
    }

    async fn fail_attempt(
        &self,
        provisional_id: Uuid,
    ) -> Result<AttemptOutcome, LoginServiceError> {
        // Single conditional decrement; the counter guard keeps two racing
        // wrong guesses from decrementing past zero.
        let updated = activations::Entity::update_many()
            .col_expr(
                activations::Column::AttemptCounter,
                Expr::col(activations::Column::AttemptCounter).sub(1),
            )
            .filter(activations::Column::ProvisionalId.eq(provisional_id))
            .filter(activations::Column::AttemptCounter.gt(1))
            .exec(&self.db)
            .await
            .context("decrement attempt counter")?;

        if updated.rows_affected > 0 {
            return Ok(AttemptOutcome::Decremented);
        }

        // Counter exhausted (or the activation raced away): remove the
        // pending account together with its activation.
        self.db
            .transaction::<_, (), DbErr>(|txn| {
                Box::pin(async move {
                    if let Some(activation) = activations::Entity::find_by_id(provisional_id)
                        .one(txn)
                        .await?
                    {
                        activations::Entity::delete_by_id(provisional_id)
                            .exec(txn)
                            .await?;
                        accounts::Entity::delete_by_id(activation.account_id)
                            .exec(txn)
                            .await?;
                    }
                    Ok(())
                })
            })
            .await
            .context("remove exhausted activation")?;
        Ok(AttemptOutcome::Exhausted)
    }
}

// ── Model conversion ─────────────────────────────────────────────────────────

fn new_account_model(account: &NewAccount) -> accounts::ActiveModel {
    accounts::ActiveModel {
        id: NotSet,
        username: Set(account.username.clone()),
        email: Set(account.email.clone()),
        password_hash: Set(account.password_hash.clone()),
        active: Set(account.active),
        roles: Set(roles_to_column(&account.roles)),
        enrolling_capability: Set(account.enrolling_capability),
    }
}

fn account_from_model(model: accounts::Model) -> Result<Account, LoginServiceError> {
    let roles = model
        .roles
        .split(',')
        .map(Role::from_str)
        .collect::<Option<Vec<_>>>()
        .ok_or_else(|| {
            LoginServiceError::Internal(anyhow::anyhow!(
                "account {} carries an unknown role string",
                model.id
            ))
        })?;
    Ok(Account {
        id: model.id,
        username: model.username,
        email: model.email,
        password_hash: model.password_hash,
        active: model.active,
        roles,
        enrolling_capability: model.enrolling_capability,
    })
}

fn activation_from_model(model: activations::Model) -> Activation {
    Activation {
        provisional_id: model.provisional_id,
        account_id: model.account_id,
        code: model.code,
        deadline: model.deadline,
        attempt_counter: model.attempt_counter,
    }
}

fn roles_to_column(roles: &[Role]) -> String {
    roles
        .iter()
        .map(|r| r.as_str())
        .collect::<Vec<_>>()
        .join(",")
}

fn insert_error(e: DbErr, context: &'static str) -> LoginServiceError {
    // The pre-insert uniqueness check is advisory; the unique constraints
    // are what make concurrent duplicate registrations lose.
    if matches!(e.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) {
        LoginServiceError::InvalidAccount("username or email already used".to_owned())
    } else {
        LoginServiceError::Internal(anyhow::Error::new(e).context(context))
    }
}
