//! Account role types.

use serde::{Deserialize, Serialize};

/// Account permission level.
///
/// Wire format: SCREAMING_SNAKE strings (`"CUSTOMER"`, `"ADMIN"`) — used in
/// the `roles` token claim and in persisted role sets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    Customer,
    Admin,
}

impl Role {
    /// Convert from a wire string. Returns `None` for unknown values;
    /// unrecognized role strings are rejected, never defaulted.
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "CUSTOMER" => Some(Self::Customer),
            "ADMIN" => Some(Self::Admin),
            _ => None,
        }
    }

    /// Convert to the wire string.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Customer => "CUSTOMER",
            Self::Admin => "ADMIN",
        }
    }
}
