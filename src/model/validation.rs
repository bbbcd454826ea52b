use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;

use super::picture::{PNG_MEDIA_TYPE, PictureFile};

/// Validation errors for profile fields.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("name cannot be empty")]
    EmptyName,
    #[error("name must start with a letter: {0}")]
    InvalidName(String),
    #[error("invalid email address: {0}")]
    InvalidEmail(String),
    #[error("phone must be at least 7 digits, digits only: {0}")]
    InvalidPhone(String),
    #[error("a profile picture is required")]
    MissingPicture,
    #[error("profile picture must be a PNG, got {0}")]
    NotPng(String),
}

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^[A-Za-z0-9_]+([.-]?[A-Za-z0-9_]+)*@[A-Za-z0-9_]+([.-]?[A-Za-z0-9_]+)*(\.[A-Za-z]{2,3})+$",
    )
    .expect("valid hardcoded regex")
});

/// Validates a name: must be non-empty and start with an ASCII letter.
pub fn validate_name(name: &str) -> Result<(), ValidationError> {
    match name {
        "" => Err(ValidationError::EmptyName),
        s if s.chars().next().is_some_and(|c| c.is_ascii_alphabetic()) => Ok(()),
        _ => Err(ValidationError::InvalidName(name.to_string())),
    }
}

/// Validates an email address: `local@domain.tld` with optional single
/// dot/hyphen separators inside the local and domain parts, TLD 2-3 letters.
pub fn validate_email(email: &str) -> Result<(), ValidationError> {
    if EMAIL_RE.is_match(email) {
        Ok(())
    } else {
        Err(ValidationError::InvalidEmail(email.to_string()))
    }
}

/// Validates a phone number: at least 7 characters, decimal digits only.
pub fn validate_phone(phone: &str) -> Result<(), ValidationError> {
    if phone.len() >= 7 && phone.chars().all(|c| c.is_ascii_digit()) {
        Ok(())
    } else {
        Err(ValidationError::InvalidPhone(phone.to_string()))
    }
}

/// Validates a profile picture: must be present with declared media type
/// exactly `image/png`.
pub fn validate_picture(picture: Option<&PictureFile>) -> Result<(), ValidationError> {
    match picture {
        None => Err(ValidationError::MissingPicture),
        Some(p) if p.media_type == PNG_MEDIA_TYPE => Ok(()),
        Some(p) => Err(ValidationError::NotPng(p.media_type.clone())),
    }
}
