use lazy_static::lazy_static;
use regex::Regex;

use crate::auth::{dto::SignupRequest, repo_types::User};
use crate::error::AppError;

pub(crate) fn is_valid_username(username: &str) -> bool {
    lazy_static! {
        static ref USERNAME_RE: Regex = Regex::new(r"^[A-Za-z0-9_.@-]{3,64}$").unwrap();
    }
    USERNAME_RE.is_match(username)
}

/// Trims a signup payload in place and checks the username rule.
pub(crate) fn normalize_signup(req: &mut SignupRequest) -> Result<(), AppError> {
    req.username = req.username.trim().to_string();
    req.user_type = req.user_type.trim().to_string();

    if !is_valid_username(&req.username) {
        return Err(AppError::invalid(
            "Username must be 3-64 characters of letters, digits, '_', '.', '@' or '-'",
        ));
    }
    Ok(())
}

/// A taken username is a conflict whatever the rest of the payload holds.
pub(crate) fn check_signup(req: &SignupRequest, username_taken: bool) -> Result<(), AppError> {
    if username_taken {
        return Err(AppError::Conflict("Username already registered".into()));
    }
    if req.password.is_empty() {
        return Err(AppError::invalid("Password must not be empty"));
    }
    if req.user_type.is_empty() {
        return Err(AppError::invalid("user_type must not be empty"));
    }
    Ok(())
}

/// Credentials are compared as plaintext, byte for byte.
pub(crate) fn check_login(
    user: Option<User>,
    username: &str,
    password: &str,
) -> Result<User, AppError> {
    match user {
        Some(u) if u.username == username && u.password == password => Ok(u),
        _ => Err(AppError::Unauthorized),
    }
}
