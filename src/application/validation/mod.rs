//! Field-level request validation. Email/password checks run only at
//! registration; the title/content caps mirror the column widths.

use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

pub const MAX_TITLE_LEN: usize = 150;
pub const MAX_CONTENT_LEN: usize = 2000;
pub const MIN_PASSWORD_LEN: usize = 3;

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("email regex"));

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Invalid email")]
    InvalidEmail,
    #[error("Password must be at least 3 characters long")]
    PasswordTooShort,
    #[error("title is required")]
    MissingTitle,
    #[error("completed is required")]
    MissingCompleted,
    #[error("title exceeds max length of {MAX_TITLE_LEN}")]
    TitleTooLong,
    #[error("content exceeds max length of {MAX_CONTENT_LEN}")]
    ContentTooLong,
}

pub fn validate_email(email: &str) -> Result<(), ValidationError> {
    if EMAIL_RE.is_match(email) {
        Ok(())
    } else {
        Err(ValidationError::InvalidEmail)
    }
}

pub fn validate_password(password: &str) -> Result<(), ValidationError> {
    if password.len() < MIN_PASSWORD_LEN {
        return Err(ValidationError::PasswordTooShort);
    }
    Ok(())
}

pub fn validate_note_fields(title: &str, content: &str) -> Result<(), ValidationError> {
    if title.is_empty() {
        return Err(ValidationError::MissingTitle);
    }
    if title.chars().count() > MAX_TITLE_LEN {
        return Err(ValidationError::TitleTooLong);
    }
    if content.chars().count() > MAX_CONTENT_LEN {
        return Err(ValidationError::ContentTooLong);
    }
    Ok(())
}
