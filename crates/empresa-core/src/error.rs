//! # Error Hierarchy
//!
//! Structured error types for the Empresa stack, built with `thiserror`.
//! No `Box<dyn Error>`, no `.unwrap()` outside tests.
//!
//! Identifier errors split into two kinds so that callers can present a
//! field-specific message: a *format* error means the input never had the
//! shape of the identifier, a *checksum* error means the shape was right
//! but the check digits do not agree with the body.

use thiserror::Error;

use crate::identity::IdentifierKind;
use crate::validation::ValidationResult;

/// Errors raised while loading submitted forms from outside the process.
#[derive(Error, Debug)]
pub enum EmpresaError {
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Why a well-formed identifier was rejected by the checksum stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChecksumFailure {
    /// Every digit is the same (e.g. `000.000.000-00`).
    RepeatedDigits,
    /// The first check digit does not match the computed one.
    FirstCheckDigit,
    /// The second check digit does not match the computed one.
    SecondCheckDigit,
}

impl std::fmt::Display for ChecksumFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::RepeatedDigits => f.write_str("all digits are identical"),
            Self::FirstCheckDigit => f.write_str("first check digit mismatch"),
            Self::SecondCheckDigit => f.write_str("second check digit mismatch"),
        }
    }
}

/// Validation errors for the CPF and CNPJ newtypes.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum IdentifierError {
    /// The input does not match the punctuated pattern or digit count.
    #[error("invalid {kind} format: \"{value}\" (expected {expected})")]
    Format {
        /// Which identifier was being validated.
        kind: IdentifierKind,
        /// The rejected input.
        value: String,
        /// Human-readable shape of an accepted value.
        expected: &'static str,
    },

    /// Correct format, but the check digits do not verify.
    #[error("invalid {kind}: \"{value}\" ({failure})")]
    Checksum {
        /// Which identifier was being validated.
        kind: IdentifierKind,
        /// The rejected input.
        value: String,
        /// Which checksum stage rejected it.
        failure: ChecksumFailure,
    },
}

impl IdentifierError {
    /// Whether this is a format (shape) failure rather than a checksum failure.
    pub fn is_format(&self) -> bool {
        matches!(self, Self::Format { .. })
    }
}

/// Errors raised when applying a form rule set.
#[derive(Error, Debug, Clone)]
pub enum ValidationError {
    /// No rule set is registered under this name.
    #[error("unknown rule set: \"{0}\"")]
    UnknownRuleSet(String),

    /// The submitted form failed one or more rules.
    #[error("{} field(s) rejected: {}", .0.errors.len(), .0.fields().join(", "))]
    Rejected(ValidationResult),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_error_display_mentions_expected_shape() {
        let err = IdentifierError::Format {
            kind: IdentifierKind::Cpf,
            value: "123".to_string(),
            expected: "XXX.XXX.XXX-XX",
        };
        let msg = format!("{err}");
        assert!(msg.contains("CPF"));
        assert!(msg.contains("123"));
        assert!(msg.contains("XXX.XXX.XXX-XX"));
        assert!(err.is_format());
    }

    #[test]
    fn checksum_error_display_mentions_failure() {
        let err = IdentifierError::Checksum {
            kind: IdentifierKind::Cnpj,
            value: "11.222.333/0001-80".to_string(),
            failure: ChecksumFailure::SecondCheckDigit,
        };
        let msg = format!("{err}");
        assert!(msg.contains("CNPJ"));
        assert!(msg.contains("second check digit"));
        assert!(!err.is_format());
    }

    #[test]
    fn unknown_rule_set_display() {
        let err = ValidationError::UnknownRuleSet("wizard".to_string());
        assert!(format!("{err}").contains("wizard"));
    }

    #[test]
    fn rejected_lists_fields() {
        let mut result = ValidationResult::new();
        result.add_field_error("cidade", "Cidade é obrigatória");
        result.add_field_error("estado", "Estado é obrigatório");
        let err = ValidationError::Rejected(result);
        let msg = format!("{err}");
        assert!(msg.starts_with("2 field(s)"));
        assert!(msg.contains("cidade, estado"));
    }
}
