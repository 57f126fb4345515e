use uuid::Uuid;

use crate::domain::repository::NotificationSink;
use crate::error::LoginServiceError;

/// Development sink: records the activation hand-off in the service log
/// instead of sending mail. Production delivery rides the platform notifier
/// service, which is outside this repository.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotificationSink;

impl NotificationSink for TracingNotificationSink {
    async fn send(
        &self,
        username: &str,
        email: &str,
        provisional_id: Uuid,
        code: &str,
    ) -> Result<(), LoginServiceError> {
        tracing::info!(username, email, %provisional_id, code, "activation code issued");
        Ok(())
    }
}
