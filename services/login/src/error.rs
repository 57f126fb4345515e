/// Login service domain error variants.
///
/// Every variant except `Internal` is a caller-visible, non-retryable
/// validation or authorization failure carrying its own reason. Store-layer
/// failures surface only as `Internal`.
#[derive(Debug, thiserror::Error)]
pub enum LoginServiceError {
    /// Registration or enrollment rejected; carries the first violated rule.
    #[error("account not valid: {0}")]
    InvalidAccount(String),
    #[error("{0}")]
    InvalidActivation(&'static str),
    /// Never reveals which login check failed.
    #[error("login rejected")]
    LoginRejected,
    #[error("{0}")]
    InvalidPassword(&'static str),
    #[error("forbidden")]
    Forbidden,
    #[error("user id does not exist")]
    NotFound,
    #[error("own account can't be disabled")]
    SelfDisable,
    #[error("internal error")]
    Internal(#[from] anyhow::Error),
}

impl LoginServiceError {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::InvalidAccount(_) => "INVALID_ACCOUNT",
            Self::InvalidActivation(_) => "INVALID_ACTIVATION",
            Self::LoginRejected => "LOGIN_REJECTED",
            Self::InvalidPassword(_) => "INVALID_PASSWORD",
            Self::Forbidden => "FORBIDDEN",
            Self::NotFound => "NOT_FOUND",
            Self::SelfDisable => "SELF_DISABLE",
            Self::Internal(_) => "INTERNAL",
        }
    }
}
