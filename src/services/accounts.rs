//! Account service: signup and credential verification.

use std::sync::LazyLock;

use tracing::info;

use crate::db::DbPool;
use crate::error::{AppError, AppResult};
use crate::models::UserAccount;
use crate::services::password;

/// Hash verified against when the username is unknown, so lookup timing
/// does not reveal whether an account exists.
static UNKNOWN_USER_HASH: LazyLock<String> =
    LazyLock::new(|| password::hash_password("placeholder-password").unwrap_or_default());

/// Maximum username length. The username doubles as a directory name.
const MAX_USERNAME_LENGTH: usize = 64;
/// Minimum password length at signup.
const MIN_PASSWORD_LENGTH: usize = 8;

/// Validate a username for use as an account and namespace key.
pub fn validate_username(username: &str) -> AppResult<()> {
    if username.is_empty() || username.len() > MAX_USERNAME_LENGTH {
        return Err(AppError::InvalidInput(format!(
            "Username must be 1-{} characters",
            MAX_USERNAME_LENGTH
        )));
    }
    if !username
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-'))
    {
        return Err(AppError::InvalidInput(
            "Username may only contain letters, digits, '_', '.' and '-'".to_string(),
        ));
    }
    // '.' and '..' are directory names
    if username.chars().all(|c| c == '.') {
        return Err(AppError::InvalidInput("Invalid username".to_string()));
    }
    Ok(())
}

/// Create a new account.
///
/// Fails with `DuplicateUsername` if the name is taken; the existing
/// account is untouched.
pub async fn register(pool: &DbPool, username: &str, pass: &str) -> AppResult<UserAccount> {
    validate_username(username)?;

    if pass.len() < MIN_PASSWORD_LENGTH {
        return Err(AppError::InvalidInput(format!(
            "Password must be at least {} characters",
            MIN_PASSWORD_LENGTH
        )));
    }

    let hash = password::hash_password(pass)?;
    let account = pool.insert_user(username, &hash).await?;

    info!("Created account for '{}'", account.username);
    Ok(account)
}

/// Check a (username, password) pair against the credential store.
///
/// Unknown usernames and wrong passwords both come back `false`; callers
/// surface the indistinct `InvalidCredentials`.
pub async fn verify_credentials(pool: &DbPool, username: &str, pass: &str) -> AppResult<bool> {
    let Some(user) = pool.find_user(username).await? else {
        let _ = password::verify_password(pass, &UNKNOWN_USER_HASH);
        return Ok(false);
    };

    password::verify_password(pass, &user.password_hash)
}
