//! Client-side input checks and OTP field normalization.
//!
//! These run before anything is sent. Messages match what the dashboard
//! showed inline under each field.

use lazy_static::lazy_static;
use regex::Regex;

use crate::error::FieldErrors;

/// Number of digits in an OTP.
pub const OTP_LENGTH: usize = 6;

/// Minimum password length accepted at registration.
pub const MIN_PASSWORD_LENGTH: usize = 6;

pub const EMAIL_FIELD: &str = "email";
pub const PASSWORD_FIELD: &str = "password";
pub const OTP_FIELD: &str = "otp";

pub const INVALID_EMAIL: &str = "Please enter a valid email address";
pub const SHORT_PASSWORD: &str = "Password must be at least 6 characters";
pub const PASSWORD_REQUIRED: &str = "Password is required";
pub const OTP_REQUIRED: &str = "Please enter the 6-digit OTP";

lazy_static! {
    static ref EMAIL_RE: Regex =
        Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern should compile");
}

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email.trim())
}

/// Registration input: email format and password length.
pub fn check_registration(email: &str, password: &str) -> FieldErrors {
    let mut errors = FieldErrors::new();
    if !is_valid_email(email) {
        errors.insert(EMAIL_FIELD, INVALID_EMAIL);
    }
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        errors.insert(PASSWORD_FIELD, SHORT_PASSWORD);
    }
    errors
}

/// Login input: email format and a non-empty password.
pub fn check_login(email: &str, password: &str) -> FieldErrors {
    let mut errors = FieldErrors::new();
    if !is_valid_email(email) {
        errors.insert(EMAIL_FIELD, INVALID_EMAIL);
    }
    if password.is_empty() {
        errors.insert(PASSWORD_FIELD, PASSWORD_REQUIRED);
    }
    errors
}

/// The OTP input field.
///
/// Every edit strips non-digits and keeps at most six characters, so the
/// field can never hold anything but a (possibly partial) numeric code.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OtpCode(String);

impl OtpCode {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from raw field contents.
    pub fn from_input(raw: &str) -> Self {
        Self(
            raw.chars()
                .filter(char::is_ascii_digit)
                .take(OTP_LENGTH)
                .collect(),
        )
    }

    /// Replace the contents with a normalized version of `raw`.
    pub fn set(&mut self, raw: &str) {
        *self = Self::from_input(raw);
    }

    /// Apply a single keystroke. Returns whether the character was kept.
    pub fn push(&mut self, c: char) -> bool {
        if c.is_ascii_digit() && self.0.len() < OTP_LENGTH {
            self.0.push(c);
            true
        } else {
            false
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn is_complete(&self) -> bool {
        self.0.len() == OTP_LENGTH
    }

    /// Numeric value sent to the backend. `None` until all six digits are in.
    ///
    /// The backend takes the code as an integer, so leading zeros are not
    /// preserved on the wire.
    pub fn to_number(&self) -> Option<u32> {
        if self.is_complete() {
            self.0.parse().ok()
        } else {
            None
        }
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    /// Field-level check before submitting.
    pub fn check(&self) -> FieldErrors {
        let mut errors = FieldErrors::new();
        if !self.is_complete() {
            errors.insert(OTP_FIELD, OTP_REQUIRED);
        }
        errors
    }
}

/// Mask an address for display: `johnathan@example.com` → `joh...an@example.com`.
pub fn mask_email(email: &str) -> String {
    let Some((user, domain)) = email.split_once('@') else {
        return email.to_string();
    };
    let chars: Vec<char> = user.chars().collect();
    let head: String = chars.iter().take(3).collect();
    let tail: String = chars[chars.len().saturating_sub(2)..].iter().collect();
    format!("{}...{}@{}", head, tail, domain)
}
