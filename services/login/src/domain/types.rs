use chrono::{DateTime, Utc};
use uuid::Uuid;

use faregate_domain::role::Role;

/// Account owned by the login service.
///
/// `email` is present for travelers and absent for enrolled admins. The
/// password is only ever held as an argon2 PHC digest.
#[derive(Debug, Clone)]
pub struct Account {
    pub id: i64,
    pub username: String,
    pub email: Option<String>,
    pub password_hash: String,
    pub active: bool,
    pub roles: Vec<Role>,
    pub enrolling_capability: i32,
}

impl Account {
    /// Nonzero enrolling capability lets an admin create further admins and
    /// disable accounts.
    pub fn may_enroll(&self) -> bool {
        self.enrolling_capability > 0
    }
}

/// Fields for an account insert; the store assigns the id.
#[derive(Debug, Clone)]
pub struct NewAccount {
    pub username: String,
    pub email: Option<String>,
    pub password_hash: String,
    pub active: bool,
    pub roles: Vec<Role>,
    pub enrolling_capability: i32,
}

/// Pending activation challenge owned by a not-yet-active account.
#[derive(Debug, Clone)]
pub struct Activation {
    pub provisional_id: Uuid,
    pub account_id: i64,
    pub code: String,
    pub deadline: DateTime<Utc>,
    pub attempt_counter: i32,
}

impl Activation {
    /// Deadlines are checked lazily at validation time; nothing expires
    /// activations proactively.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.deadline <= now
    }
}

/// Fields for an activation insert. The owning account id is wired up by the
/// store inside the same transaction that creates the account.
#[derive(Debug, Clone)]
pub struct NewActivation {
    pub provisional_id: Uuid,
    pub code: String,
    pub deadline: DateTime<Utc>,
    pub attempt_counter: i32,
}

/// Activation code length in digits.
pub const ACTIVATION_CODE_LEN: usize = 6;

/// Wrong-code submissions allowed before the pending account is removed.
pub const ACTIVATION_MAX_ATTEMPTS: i32 = 5;

/// Activation window in hours.
pub const ACTIVATION_TTL_HOURS: i64 = 24;

// ── Public results ───────────────────────────────────────────────────────────

/// Returned by traveler registration.
#[derive(Debug, Clone)]
pub struct ActivationResult {
    pub provisional_id: Uuid,
    pub email: String,
}

/// Returned by successful activation.
#[derive(Debug, Clone)]
pub struct AccountResult {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub roles: Vec<Role>,
}

/// Returned by admin enrollment.
#[derive(Debug, Clone)]
pub struct AdminResult {
    pub id: i64,
    pub username: String,
    pub enrolling_capability: i32,
    pub roles: Vec<Role>,
}

/// Returned by login. Never persisted; verified via `faregate-auth-types`.
#[derive(Debug, Clone)]
pub struct AuthorizationToken {
    pub authorization: String,
}
