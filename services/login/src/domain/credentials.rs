//! Credential policy checks.
//!
//! Pure predicates; use-cases surface the first violated rule as the error
//! reason, in a fixed order (empties, then email format, then password
//! strength, then uniqueness).

use crate::domain::types::ACTIVATION_CODE_LEN;

/// Symbols accepted as the required special character in passwords.
const PASSWORD_SYMBOLS: &str = "@#$%^&+=";

/// `local@domain.tld`: local part 1-16 chars of `[A-Za-z0-9._-]`, domain
/// 2-8 chars of `[A-Za-z0-9-]`, tld 2-8 alphanumeric chars. Exactly one `@`
/// and exactly one `.` after it.
pub fn email_format_ok(email: &str) -> bool {
    let Some((local, rest)) = email.split_once('@') else {
        return false;
    };
    if rest.contains('@') {
        return false;
    }
    let Some((domain, tld)) = rest.split_once('.') else {
        return false;
    };
    if tld.contains('.') {
        return false;
    }
    (1..=16).contains(&local.len())
        && local
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '.' || c == '_' || c == '-')
        && (2..=8).contains(&domain.len())
        && domain.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
        && (2..=8).contains(&tld.len())
        && tld.chars().all(|c| c.is_ascii_alphanumeric())
}

/// At least 8 characters with one lowercase, one uppercase, one digit and
/// one of `@#$%^&+=`; whitespace is not allowed anywhere.
pub fn password_strength_ok(password: &str) -> bool {
    password.chars().count() >= 8
        && password.chars().any(|c| c.is_ascii_lowercase())
        && password.chars().any(|c| c.is_ascii_uppercase())
        && password.chars().any(|c| c.is_ascii_digit())
        && password.chars().any(|c| PASSWORD_SYMBOLS.contains(c))
        && !password.chars().any(char::is_whitespace)
}

/// Non-empty and free of whitespace.
pub fn username_shape_ok(username: &str) -> bool {
    !username.is_empty() && !username.chars().any(char::is_whitespace)
}

/// Exactly six ASCII digits.
pub fn activation_code_shape_ok(code: &str) -> bool {
    code.len() == ACTIVATION_CODE_LEN && code.chars().all(|c| c.is_ascii_digit())
}
