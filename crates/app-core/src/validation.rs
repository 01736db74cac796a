//! Form validation for the login and signup screens
//!
//! Screens run these checks synchronously before they call into the session
//! store. A failed check never reaches the store; the screen renders the
//! message next to the offending field and blocks submission.
//!
//! # Example
//!
//! ```rust
//! use app_core::validation::{FieldError, FormField, LoginForm};
//!
//! let form = LoginForm::new("abc", "abc123");
//! let errors = form.validate().unwrap_err();
//! assert_eq!(errors.get(FormField::Email), Some(&FieldError::EmailInvalid));
//! assert_eq!(errors.message(FormField::Email).as_deref(), Some("Email is invalid"));
//! ```

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;
use thiserror::Error;

/// Minimum accepted password length, in characters
pub const MIN_PASSWORD_LENGTH: usize = 6;

/// A field on one of the authentication forms
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FormField {
    /// Display name (signup only)
    DisplayName,
    /// Email address
    Email,
    /// Password
    Password,
    /// Password confirmation (signup only)
    ConfirmPassword,
}

/// A single rule violation on a form field
///
/// The `Display` output is the exact message shown inline on the screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldError {
    /// Name left blank
    #[error("Name is required")]
    NameRequired,

    /// Email left blank
    #[error("Email is required")]
    EmailRequired,

    /// Email does not look like an address
    #[error("Email is invalid")]
    EmailInvalid,

    /// Password left blank
    #[error("Password is required")]
    PasswordRequired,

    /// Password shorter than [`MIN_PASSWORD_LENGTH`]
    #[error("Password must be at least 6 characters")]
    PasswordTooShort,

    /// Confirmation left blank
    #[error("Please confirm your password")]
    ConfirmPasswordRequired,

    /// Confirmation differs from the password
    #[error("Passwords do not match")]
    PasswordMismatch,
}

impl FieldError {
    /// The field this error belongs to
    pub fn field(&self) -> FormField {
        match self {
            FieldError::NameRequired => FormField::DisplayName,
            FieldError::EmailRequired | FieldError::EmailInvalid => FormField::Email,
            FieldError::PasswordRequired | FieldError::PasswordTooShort => FormField::Password,
            FieldError::ConfirmPasswordRequired | FieldError::PasswordMismatch => {
                FormField::ConfirmPassword
            }
        }
    }
}

/// All rule violations found on a form, at most one per field
#[derive(Debug, Clone, Default, PartialEq, Eq, Error, Serialize, Deserialize)]
#[error("{}", summarize(.errors))]
pub struct ValidationError {
    errors: Vec<FieldError>,
}

fn summarize(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

impl ValidationError {
    /// Create an empty error set
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an error, replacing any earlier error on the same field
    pub fn push(&mut self, error: FieldError) {
        self.errors.retain(|e| e.field() != error.field());
        self.errors.push(error);
    }

    /// Error recorded for a field, if any
    pub fn get(&self, field: FormField) -> Option<&FieldError> {
        self.errors.iter().find(|e| e.field() == field)
    }

    /// Inline message for a field, if any
    pub fn message(&self, field: FormField) -> Option<String> {
        self.get(field).map(ToString::to_string)
    }

    /// All recorded errors, in the order the checks ran
    pub fn errors(&self) -> &[FieldError] {
        &self.errors
    }

    /// Whether no errors were recorded
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Number of fields with errors
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    fn record(&mut self, check: Result<(), FieldError>) {
        if let Err(e) = check {
            self.push(e);
        }
    }

    fn into_result(self) -> Result<(), ValidationError> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

fn email_regex() -> &'static Regex {
    static EMAIL_REGEX: OnceLock<Regex> = OnceLock::new();
    EMAIL_REGEX.get_or_init(|| Regex::new(r"^\S+@\S+\.\S+$").expect("email pattern compiles"))
}

/// Check an email address
///
/// Leading and trailing whitespace is ignored.
pub fn validate_email(email: &str) -> Result<(), FieldError> {
    let email = email.trim();
    if email.is_empty() {
        return Err(FieldError::EmailRequired);
    }
    if !email_regex().is_match(email) {
        return Err(FieldError::EmailInvalid);
    }
    Ok(())
}

/// Check a password
///
/// Whitespace counts toward the length; passwords are never trimmed.
pub fn validate_password(password: &str) -> Result<(), FieldError> {
    if password.is_empty() {
        return Err(FieldError::PasswordRequired);
    }
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(FieldError::PasswordTooShort);
    }
    Ok(())
}

/// Check a password confirmation against the password
pub fn validate_confirm_password(password: &str, confirm: &str) -> Result<(), FieldError> {
    if confirm.is_empty() {
        return Err(FieldError::ConfirmPasswordRequired);
    }
    if password != confirm {
        return Err(FieldError::PasswordMismatch);
    }
    Ok(())
}

/// Check a display name
pub fn validate_display_name(name: &str) -> Result<(), FieldError> {
    if name.trim().is_empty() {
        return Err(FieldError::NameRequired);
    }
    Ok(())
}

/// Contents of the login form
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginForm {
    /// Email as typed
    pub email: String,
    /// Password as typed
    pub password: String,
}

impl LoginForm {
    /// Create a login form
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }

    /// Run every login rule and collect the failures
    pub fn validate(&self) -> Result<(), ValidationError> {
        let mut errors = ValidationError::new();
        errors.record(validate_email(&self.email));
        errors.record(validate_password(&self.password));
        errors.into_result()
    }

    /// Email with surrounding whitespace removed, as submitted to the store
    pub fn normalized_email(&self) -> &str {
        self.email.trim()
    }
}

/// Contents of the signup form
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignupForm {
    /// Display name as typed
    pub display_name: String,
    /// Email as typed
    pub email: String,
    /// Password as typed
    pub password: String,
    /// Confirmation as typed
    pub confirm_password: String,
}

impl SignupForm {
    /// Create a signup form
    pub fn new(
        display_name: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
        confirm_password: impl Into<String>,
    ) -> Self {
        Self {
            display_name: display_name.into(),
            email: email.into(),
            password: password.into(),
            confirm_password: confirm_password.into(),
        }
    }

    /// Run every signup rule and collect the failures
    pub fn validate(&self) -> Result<(), ValidationError> {
        let mut errors = ValidationError::new();
        errors.record(validate_display_name(&self.display_name));
        errors.record(validate_email(&self.email));
        errors.record(validate_password(&self.password));
        errors.record(validate_confirm_password(&self.password, &self.confirm_password));
        errors.into_result()
    }

    /// Email with surrounding whitespace removed, as submitted to the store
    pub fn normalized_email(&self) -> &str {
        self.email.trim()
    }

    /// Display name with surrounding whitespace removed
    pub fn normalized_display_name(&self) -> &str {
        self.display_name.trim()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_rules() {
        assert_eq!(validate_email("a@b.com"), Ok(()));
        assert_eq!(validate_email("abc"), Err(FieldError::EmailInvalid));
        assert_eq!(validate_email(""), Err(FieldError::EmailRequired));
        assert_eq!(validate_email("   "), Err(FieldError::EmailRequired));
        assert_eq!(validate_email("a@b"), Err(FieldError::EmailInvalid));
        assert_eq!(validate_email("a b@c.d"), Err(FieldError::EmailInvalid));
        assert_eq!(validate_email("  user@example.org "), Ok(()));
    }

    #[test]
    fn test_password_rules() {
        assert_eq!(validate_password(""), Err(FieldError::PasswordRequired));
        assert_eq!(validate_password("abc12"), Err(FieldError::PasswordTooShort));
        assert_eq!(validate_password("abc123"), Ok(()));
        // Multi-byte characters count once each
        assert_eq!(validate_password("ééééé"), Err(FieldError::PasswordTooShort));
        assert_eq!(validate_password("éééééé"), Ok(()));
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(FieldError::EmailRequired.to_string(), "Email is required");
        assert_eq!(FieldError::EmailInvalid.to_string(), "Email is invalid");
        assert_eq!(FieldError::PasswordRequired.to_string(), "Password is required");
        assert_eq!(
            FieldError::PasswordTooShort.to_string(),
            "Password must be at least 6 characters"
        );
        assert_eq!(FieldError::PasswordMismatch.to_string(), "Passwords do not match");
        assert_eq!(FieldError::NameRequired.to_string(), "Name is required");
    }

    #[test]
    fn test_login_form_collects_all_errors() {
        let errors = LoginForm::new("", "abc").validate().unwrap_err();
        assert_eq!(errors.len(), 2);
        assert_eq!(errors.get(FormField::Email), Some(&FieldError::EmailRequired));
        assert_eq!(errors.get(FormField::Password), Some(&FieldError::PasswordTooShort));
        assert_eq!(
            errors.to_string(),
            "Email is required; Password must be at least 6 characters"
        );
    }

    #[test]
    fn test_login_form_valid() {
        let form = LoginForm::new(" a@b.com ", "abc123");
        assert!(form.validate().is_ok());
        assert_eq!(form.normalized_email(), "a@b.com");
    }

    #[test]
    fn test_signup_password_mismatch() {
        let form = SignupForm::new("Ada", "a@b.com", "abc123", "abc124");
        let errors = form.validate().unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(
            errors.message(FormField::ConfirmPassword).as_deref(),
            Some("Passwords do not match")
        );
    }

    #[test]
    fn test_signup_empty_form() {
        let errors = SignupForm::default().validate().unwrap_err();
        assert_eq!(
            errors.errors(),
            &[
                FieldError::NameRequired,
                FieldError::EmailRequired,
                FieldError::PasswordRequired,
                FieldError::ConfirmPasswordRequired,
            ]
        );
    }

    #[test]
    fn test_push_replaces_same_field() {
        let mut errors = ValidationError::new();
        errors.push(FieldError::EmailRequired);
        errors.push(FieldError::EmailInvalid);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors.get(FormField::Email), Some(&FieldError::EmailInvalid));
    }
}
