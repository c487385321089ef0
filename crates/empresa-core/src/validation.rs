//! # Validation Results
//!
//! The structured outcome of a validation pass. Nothing in the core throws
//! on bad input; every failure becomes a [`FieldError`] inside a
//! [`ValidationResult`] so the web layer can re-render the originating form
//! with messages attached to each field.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::{EmpresaError, IdentifierError, ValidationError};

/// Category of a single field failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub enum ErrorKind {
    /// Identifier does not match the expected punctuation/length pattern.
    #[serde(rename = "FormatError")]
    Format,
    /// Identifier is well-formed but its check digits do not verify.
    #[serde(rename = "ChecksumError")]
    Checksum,
    /// A generic field predicate failed.
    #[serde(rename = "FieldError")]
    Field,
}

impl From<&IdentifierError> for ErrorKind {
    fn from(err: &IdentifierError) -> Self {
        if err.is_format() {
            Self::Format
        } else {
            Self::Checksum
        }
    }
}

/// One rejected field with its user-facing message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct FieldError {
    /// Form field name, exactly as submitted (e.g. `"razao_social"`).
    pub field: String,
    /// Message to show next to the field.
    pub message: String,
    /// Failure category.
    pub kind: ErrorKind,
}

/// Outcome of a validation pass: a validity flag plus the rejected fields.
///
/// Errors appear in the order the rules were evaluated, so identical input
/// always yields an identical result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ValidationResult {
    /// `true` iff `errors` is empty.
    pub valid: bool,
    /// Rejected fields, in evaluation order.
    pub errors: Vec<FieldError>,
}

impl ValidationResult {
    /// A passing result with no errors.
    pub fn new() -> Self {
        Self {
            valid: true,
            errors: Vec::new(),
        }
    }

    /// Record a failure and mark the result invalid.
    pub fn push(&mut self, error: FieldError) {
        self.valid = false;
        self.errors.push(error);
    }

    /// Record a generic predicate failure.
    pub fn add_field_error(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.push(FieldError {
            field: field.into(),
            message: message.into(),
            kind: ErrorKind::Field,
        });
    }

    /// Record an identifier failure, classifying it as format or checksum.
    pub fn add_identifier_error(
        &mut self,
        field: impl Into<String>,
        message: impl Into<String>,
        err: &IdentifierError,
    ) {
        self.push(FieldError {
            field: field.into(),
            message: message.into(),
            kind: ErrorKind::from(err),
        });
    }

    /// Whether every rule passed.
    pub fn is_valid(&self) -> bool {
        self.valid
    }

    /// Names of the rejected fields, in order (duplicates preserved).
    pub fn fields(&self) -> Vec<&str> {
        self.errors.iter().map(|e| e.field.as_str()).collect()
    }

    /// First error recorded for `field`, if any.
    pub fn error_for(&self, field: &str) -> Option<&FieldError> {
        self.errors.iter().find(|e| e.field == field)
    }

    /// Convert into a `Result`, wrapping a failing result in
    /// [`ValidationError::Rejected`].
    pub fn into_result(self) -> Result<(), ValidationError> {
        if self.valid {
            Ok(())
        } else {
            Err(ValidationError::Rejected(self))
        }
    }
}

impl Default for ValidationResult {
    fn default() -> Self {
        Self::new()
    }
}

/// Raw submitted form fields, keyed by field name.
///
/// Backed by a `BTreeMap` so iteration and serialization are stable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(transparent)]
pub struct FormValues(BTreeMap<String, String>);

impl FormValues {
    /// An empty form.
    pub fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// Set a field, returning the previous value.
    pub fn insert(&mut self, field: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.0.insert(field.into(), value.into())
    }

    /// Raw value of a field, if submitted.
    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    /// Number of submitted fields.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether no field was submitted.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Parse a flat JSON object of string values.
    pub fn from_json(raw: &str) -> Result<Self, EmpresaError> {
        Ok(serde_json::from_str(raw)?)
    }

    /// Read a form saved as a flat JSON object of string values.
    pub fn from_path(path: &Path) -> Result<Self, EmpresaError> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_json(&raw)
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for FormValues {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

impl From<BTreeMap<String, String>> for FormValues {
    fn from(map: BTreeMap<String, String>) -> Self {
        Self(map)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ChecksumFailure;
    use crate::identity::IdentifierKind;

    #[test]
    fn new_result_is_valid() {
        let result = ValidationResult::new();
        assert!(result.is_valid());
        assert!(result.errors.is_empty());
        assert!(result.into_result().is_ok());
    }

    #[test]
    fn field_error_invalidates() {
        let mut result = ValidationResult::new();
        result.add_field_error("telefone", "Telefone é obrigatório");
        assert!(!result.is_valid());
        assert_eq!(result.fields(), vec!["telefone"]);
        assert_eq!(result.errors[0].kind, ErrorKind::Field);
    }

    #[test]
    fn identifier_error_kind_is_classified() {
        let mut result = ValidationResult::new();
        let checksum = IdentifierError::Checksum {
            kind: IdentifierKind::Cpf,
            value: "111.111.111-11".to_string(),
            failure: ChecksumFailure::RepeatedDigits,
        };
        let format = IdentifierError::Format {
            kind: IdentifierKind::Cpf,
            value: "abc".to_string(),
            expected: "XXX.XXX.XXX-XX",
        };
        result.add_identifier_error("cpf", "CPF inválido", &checksum);
        result.add_identifier_error("cpf", "CPF deve estar no formato XXX.XXX.XXX-XX", &format);
        assert_eq!(result.errors[0].kind, ErrorKind::Checksum);
        assert_eq!(result.errors[1].kind, ErrorKind::Format);
        assert_eq!(result.error_for("cpf").map(|e| e.kind), Some(ErrorKind::Checksum));
    }

    #[test]
    fn failing_result_converts_to_rejected() {
        let mut result = ValidationResult::new();
        result.add_field_error("nome", "x");
        match result.into_result() {
            Err(ValidationError::Rejected(rejected)) => assert_eq!(rejected.fields(), vec!["nome"]),
            other => panic!("expected Rejected, got: {other:?}"),
        }
    }

    #[test]
    fn error_kind_serializes_with_wire_names() {
        assert_eq!(serde_json::to_string(&ErrorKind::Format).unwrap(), "\"FormatError\"");
        assert_eq!(
            serde_json::to_string(&ErrorKind::Checksum).unwrap(),
            "\"ChecksumError\""
        );
        assert_eq!(serde_json::to_string(&ErrorKind::Field).unwrap(), "\"FieldError\"");
    }

    #[test]
    fn form_values_deserialize_from_json_object() {
        let form: FormValues =
            serde_json::from_str(r#"{"cidade": "São Paulo", "estado": "SP"}"#).unwrap();
        assert_eq!(form.get("cidade"), Some("São Paulo"));
        assert_eq!(form.get("cep"), None);
        assert_eq!(form.len(), 2);
    }

    #[test]
    fn from_json_rejects_non_string_values() {
        assert!(matches!(
            FormValues::from_json(r#"{"cnpj": 11222333000181}"#),
            Err(EmpresaError::Json(_))
        ));
        assert!(matches!(FormValues::from_json("[]"), Err(EmpresaError::Json(_))));
    }

    #[test]
    fn from_path_reads_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("form.json");
        std::fs::write(&path, r#"{"estado": "RJ"}"#).unwrap();
        let form = FormValues::from_path(&path).unwrap();
        assert_eq!(form.get("estado"), Some("RJ"));

        let missing = dir.path().join("missing.json");
        assert!(matches!(FormValues::from_path(&missing), Err(EmpresaError::Io(_))));
    }
}
