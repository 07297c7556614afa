//! Validation error types and text field helpers

use std::fmt;

/// Validation error for submitted forms and JSON bodies
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Field is empty when it shouldn't be
    Empty { field: &'static str },

    /// Field exceeds maximum length
    TooLong { field: &'static str, max: usize },

    /// Value doesn't match required format (e.g., an integer id)
    InvalidFormat {
        field: &'static str,
        reason: &'static str,
    },

    /// Number outside the accepted range
    OutOfRange {
        field: &'static str,
        min: i64,
        max: i64,
    },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty { field } => write!(f, "{} cannot be empty", field),
            Self::TooLong { field, max } => {
                write!(f, "{} exceeds maximum length of {} characters", field, max)
            }
            Self::InvalidFormat { field, reason } => {
                write!(f, "{}: {}", field, reason)
            }
            Self::OutOfRange { field, min, max } => {
                write!(f, "{} must be between {} and {}", field, min, max)
            }
        }
    }
}

impl std::error::Error for ValidationError {}

/// Trimmed, non-empty text no longer than `max` characters.
pub fn required_text(
    field: &'static str,
    value: Option<&str>,
    max: usize,
) -> Result<String, ValidationError> {
    let trimmed = value.map(str::trim).unwrap_or_default();

    if trimmed.is_empty() {
        return Err(ValidationError::Empty { field });
    }

    if trimmed.chars().count() > max {
        return Err(ValidationError::TooLong { field, max });
    }

    Ok(trimmed.to_owned())
}

/// Trimmed text where blank means absent.
pub fn optional_text(
    field: &'static str,
    value: Option<&str>,
    max: usize,
) -> Result<Option<String>, ValidationError> {
    match value.map(str::trim) {
        None | Some("") => Ok(None),
        Some(s) if s.chars().count() > max => Err(ValidationError::TooLong { field, max }),
        Some(s) => Ok(Some(s.to_owned())),
    }
}
