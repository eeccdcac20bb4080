//! Flow errors.

use std::collections::BTreeMap;
use std::fmt;

use thiserror::Error;

/// Result type for flow operations.
pub type Result<T> = std::result::Result<T, FlowError>;

/// Why a submission did not go through.
///
/// None of these are fatal: the flow is always left in a state the user can
/// resubmit from.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FlowError {
    /// Input failed validation before anything was sent.
    #[error("{0}")]
    Invalid(FieldErrors),

    /// The backend rejected the request. Carries the message shown to the user.
    #[error("{0}")]
    Rejected(String),

    /// Required booking fields are missing.
    #[error("All fields are required (missing: {})", missing.join(", "))]
    Incomplete { missing: Vec<&'static str> },

    /// The selected vaccine is not offered by the selected doctor.
    #[error("Vaccine {vaccine_id} is not offered by the selected doctor")]
    NotOffered { vaccine_id: i64 },

    /// The action does not apply to the current phase.
    #[error("{action} is not available while {phase}")]
    WrongPhase {
        action: &'static str,
        phase: &'static str,
    },
}

/// Per-field validation messages, keyed by field name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors(BTreeMap<&'static str, String>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, field: &'static str, message: impl Into<String>) {
        self.0.insert(field, message.into());
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn remove(&mut self, field: &str) {
        self.0.remove(field);
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> {
        self.0.iter().map(|(k, v)| (*k, v.as_str()))
    }

    /// Convert to `Err(FlowError::Invalid)` when any field failed.
    pub fn into_result(self) -> Result<()> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(FlowError::Invalid(self))
        }
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for message in self.0.values() {
            if !first {
                f.write_str("; ")?;
            }
            f.write_str(message)?;
            first = false;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_errors_display_joins_messages() {
        let mut errors = FieldErrors::new();
        errors.insert("password", "Password must be at least 6 characters");
        errors.insert("email", "Please enter a valid email address");

        assert_eq!(
            FlowError::Invalid(errors).to_string(),
            "Please enter a valid email address; Password must be at least 6 characters"
        );
    }

    #[test]
    fn test_into_result() {
        assert_eq!(FieldErrors::new().into_result(), Ok(()));

        let mut errors = FieldErrors::new();
        errors.insert("otp", "Please enter the 6-digit OTP");
        assert!(matches!(errors.into_result(), Err(FlowError::Invalid(_))));
    }

    #[test]
    fn test_incomplete_lists_missing_fields() {
        let err = FlowError::Incomplete {
            missing: vec!["doctor", "time"],
        };
        assert_eq!(err.to_string(), "All fields are required (missing: doctor, time)");
    }
}
