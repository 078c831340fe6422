//! Domain error types

use thiserror::Error;

/// Errors raised while validating a caller-supplied tool payload.
///
/// Validation happens before any thread or model is touched, so a
/// `ValidationError` always means no state was mutated.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("missing required field: {0}")]
    MissingField(&'static str),

    #[error("invalid value for {field}: {reason}")]
    InvalidField { field: &'static str, reason: String },

    #[error("malformed payload: {0}")]
    Malformed(String),

    #[error("consensus requires at least 2 models, got {0}")]
    TooFewParticipants(usize),

    #[error("duplicate model+stance combination: {model} with {stance} stance")]
    DuplicateParticipant { model: String, stance: String },

    #[error("unknown tool: {0}")]
    UnknownTool(String),
}

impl ValidationError {
    /// Shorthand for [`ValidationError::InvalidField`].
    pub fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        ValidationError::InvalidField {
            field,
            reason: reason.into(),
        }
    }
}

/// Reject an absent or whitespace-only required string field.
pub fn require_text(field: &'static str, value: Option<String>) -> Result<String, ValidationError> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(ValidationError::MissingField(field)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duplicate_participant_display() {
        let error = ValidationError::DuplicateParticipant {
            model: "gpt-x".to_string(),
            stance: "for".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "duplicate model+stance combination: gpt-x with for stance"
        );
    }

    #[test]
    fn test_require_text() {
        assert_eq!(require_text("step", Some("go".into())).unwrap(), "go");
        assert_eq!(
            require_text("step", Some("   ".into())),
            Err(ValidationError::MissingField("step"))
        );
        assert_eq!(
            require_text("findings", None),
            Err(ValidationError::MissingField("findings"))
        );
    }
}
