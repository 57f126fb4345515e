use sea_orm::DatabaseConnection;

use crate::infra::db::{DbAccountRepository, DbActivationRepository};
use crate::infra::notify::TracingNotificationSink;

/// Shared service state. The lifecycle use-cases are stateless between
/// calls; everything durable lives behind the repositories.
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub jwt_secret_b64: String,
    pub jwt_ttl_ms: u64,
}

impl AppState {
    pub fn account_repo(&self) -> DbAccountRepository {
        DbAccountRepository {
            db: self.db.clone(),
        }
    }

    pub fn activation_repo(&self) -> DbActivationRepository {
        DbActivationRepository {
            db: self.db.clone(),
        }
    }

    pub fn notification_sink(&self) -> TracingNotificationSink {
        TracingNotificationSink
    }
}
