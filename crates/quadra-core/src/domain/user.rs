//! User profile entity and authentication errors

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};

lazy_static! {
    static ref EMAIL: Regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
}

/// Shortest password accepted at sign-up or password change.
pub const MIN_PASSWORD_LEN: usize = 6;

/// Authenticated user as seen by the app.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub uid: String,
    pub email: String,
    pub display_name: Option<String>,
    pub phone: Option<String>,
    pub photo_url: Option<String>,
}

impl UserProfile {
    pub fn new(uid: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            uid: uid.into(),
            email: email.into(),
            display_name: None,
            phone: None,
            photo_url: None,
        }
    }

    pub fn with_display_name(mut self, display_name: impl Into<String>) -> Self {
        self.display_name = Some(display_name.into());
        self
    }

    /// Apply the fields present in `update`, leaving the rest untouched.
    pub fn apply(&mut self, update: &ProfileUpdate) {
        if let Some(display_name) = &update.display_name {
            self.display_name = Some(display_name.clone());
        }
        if let Some(phone) = &update.phone {
            self.phone = Some(phone.clone());
        }
        if let Some(photo_url) = &update.photo_url {
            self.photo_url = Some(photo_url.clone());
        }
    }
}

/// Partial profile edit.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUpdate {
    pub display_name: Option<String>,
    pub phone: Option<String>,
    pub photo_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    #[error("invalid email address")]
    InvalidEmail,

    #[error("password must be at least {min} characters")]
    WeakPassword { min: usize },

    #[error("an account already exists for this email")]
    EmailInUse,

    #[error("email or password is incorrect")]
    InvalidCredentials,

    #[error("user not found")]
    UserNotFound,

    #[error("no user is signed in")]
    NotSignedIn,

    #[error("authentication service is unavailable")]
    Unavailable,
}

pub fn validate_email(email: &str) -> Result<(), AuthError> {
    if EMAIL.is_match(email) {
        Ok(())
    } else {
        Err(AuthError::InvalidEmail)
    }
}

pub fn validate_password(password: &str) -> Result<(), AuthError> {
    if password.chars().count() >= MIN_PASSWORD_LEN {
        Ok(())
    } else {
        Err(AuthError::WeakPassword {
            min: MIN_PASSWORD_LEN,
        })
    }
}
