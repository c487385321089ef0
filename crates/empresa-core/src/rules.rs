//! # Form Rule Engine
//!
//! A field is described by a [`FieldRule`]: its name, whether surrounding
//! whitespace is trimmed, whether it may be left blank, and an ordered list
//! of [`Check`]s. A [`RuleSet`] applies its rules in declaration order and
//! collects at most one error per field: the first check that fails.
//!
//! Rule sets hold no state; one instance can validate any number of forms
//! concurrently.

use crate::error::IdentifierError;
use crate::identity::{check_cnpj, check_cpf, cnpj_message, cpf_message};
use crate::predicates;
use crate::validation::{ErrorKind, FieldError, FormValues, ValidationResult};

/// A single predicate over a field value, with the message shown on failure.
#[derive(Debug, Clone)]
pub enum Check {
    /// Must not be blank.
    Required(&'static str),
    /// Character count within the inclusive bounds.
    Length {
        /// Minimum character count.
        min: Option<usize>,
        /// Maximum character count.
        max: Option<usize>,
        /// Failure message.
        message: &'static str,
    },
    /// `(XX) XXXX-XXXX` or `(XX) XXXXX-XXXX`.
    Phone(&'static str),
    /// `XXXXX-XXX` or `XXXXXXXX`.
    Cep(&'static str),
    /// Letters (accented included) and spaces only.
    LettersAndSpaces(&'static str),
    /// One of the 27 federative-unit codes.
    StateCode(&'static str),
    /// Well-formed email address.
    Email(&'static str),
    /// Well-formed http(s) URL.
    Url(&'static str),
    /// Must equal the (untrimmed) value of another field.
    EqualsField {
        /// Name of the field to compare against.
        other: &'static str,
        /// Failure message.
        message: &'static str,
    },
    /// CPF format and check digits.
    Cpf,
    /// CNPJ format and check digits.
    Cnpj,
}

impl Check {
    /// Apply the check. Returns the error to record, if any.
    fn apply(&self, field: &str, value: &str, form: &FormValues) -> Option<FieldError> {
        let (passed, message) = match self {
            Self::Required(message) => (predicates::is_present(value), *message),
            Self::Length { min, max, message } => {
                (predicates::length_between(value, *min, *max), *message)
            }
            Self::Phone(message) => (predicates::is_phone(value), *message),
            Self::Cep(message) => (predicates::is_cep(value), *message),
            Self::LettersAndSpaces(message) => (predicates::is_letters_and_spaces(value), *message),
            Self::StateCode(message) => (predicates::is_state_code(value), *message),
            Self::Email(message) => (predicates::is_email(value), *message),
            Self::Url(message) => (predicates::is_url(value), *message),
            Self::EqualsField { other, message } => {
                let expected = form.get(other).unwrap_or_default();
                (predicates::passwords_match(expected, value), *message)
            }
            Self::Cpf => {
                return check_cpf(value)
                    .err()
                    .map(|err| identifier_error(field, cpf_message(&err), &err));
            }
            Self::Cnpj => {
                return check_cnpj(value)
                    .err()
                    .map(|err| identifier_error(field, cnpj_message(&err), &err));
            }
        };
        (!passed).then(|| FieldError {
            field: field.to_string(),
            message: message.to_string(),
            kind: ErrorKind::Field,
        })
    }
}

fn identifier_error(field: &str, message: &str, err: &IdentifierError) -> FieldError {
    FieldError {
        field: field.to_string(),
        message: message.to_string(),
        kind: ErrorKind::from(err),
    }
}

/// The validation chain for one form field.
#[derive(Debug, Clone)]
pub struct FieldRule {
    field: &'static str,
    trim: bool,
    optional: bool,
    checks: Vec<Check>,
}

impl FieldRule {
    /// A rule for `field` that trims its value before checking.
    pub fn new(field: &'static str) -> Self {
        Self {
            field,
            trim: true,
            optional: false,
            checks: Vec::new(),
        }
    }

    /// Check the value exactly as submitted (passwords).
    pub fn untrimmed(mut self) -> Self {
        self.trim = false;
        self
    }

    /// Skip every check when the field is absent or blank.
    pub fn optional(mut self) -> Self {
        self.optional = true;
        self
    }

    /// Append a check.
    pub fn check(mut self, check: Check) -> Self {
        self.checks.push(check);
        self
    }

    /// Shorthand for [`Check::Required`].
    pub fn required(self, message: &'static str) -> Self {
        self.check(Check::Required(message))
    }

    /// Shorthand for [`Check::Length`].
    pub fn length(self, min: Option<usize>, max: Option<usize>, message: &'static str) -> Self {
        self.check(Check::Length { min, max, message })
    }

    /// The field this rule validates.
    pub fn field(&self) -> &'static str {
        self.field
    }

    /// Validate this field of `form`, returning the first failure.
    pub fn evaluate(&self, form: &FormValues) -> Option<FieldError> {
        let raw = form.get(self.field).unwrap_or_default();
        let value = if self.trim { raw.trim() } else { raw };
        if self.optional && value.is_empty() {
            return None;
        }
        self.checks
            .iter()
            .find_map(|check| check.apply(self.field, value, form))
    }
}

/// An ordered collection of field rules applied as one validation pass.
#[derive(Debug, Clone)]
pub struct RuleSet {
    name: &'static str,
    rules: Vec<FieldRule>,
}

impl RuleSet {
    /// Create an empty rule set.
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            rules: Vec::new(),
        }
    }

    /// Append a field rule.
    pub fn rule(mut self, rule: FieldRule) -> Self {
        self.rules.push(rule);
        self
    }

    /// The rule set's registry name.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Names of the fields this set inspects.
    pub fn fields(&self) -> Vec<&'static str> {
        self.rules.iter().map(FieldRule::field).collect()
    }

    /// Validate a submitted form.
    pub fn validate(&self, form: &FormValues) -> ValidationResult {
        let mut result = ValidationResult::new();
        for rule in &self.rules {
            if let Some(err) = rule.evaluate(form) {
                tracing::debug!(
                    rule_set = self.name,
                    field = %err.field,
                    kind = ?err.kind,
                    "field rejected"
                );
                result.push(err);
            }
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(pairs: &[(&str, &str)]) -> FormValues {
        pairs.iter().copied().collect()
    }

    #[test]
    fn first_failing_check_wins() {
        let rule = FieldRule::new("nome")
            .required("Nome é obrigatório")
            .length(Some(2), Some(100), "tamanho")
            .check(Check::LettersAndSpaces("letras"));
        let err = rule.evaluate(&form(&[("nome", "")])).unwrap();
        assert_eq!(err.message, "Nome é obrigatório");
        let err = rule.evaluate(&form(&[("nome", "A")])).unwrap();
        assert_eq!(err.message, "tamanho");
        let err = rule.evaluate(&form(&[("nome", "Ana 2")])).unwrap();
        assert_eq!(err.message, "letras");
        assert!(rule.evaluate(&form(&[("nome", "Ana")])).is_none());
    }

    #[test]
    fn missing_field_is_treated_as_blank() {
        let rule = FieldRule::new("cargo").required("Cargo é obrigatório");
        let err = rule.evaluate(&FormValues::new()).unwrap();
        assert_eq!(err.field, "cargo");
        assert_eq!(err.kind, ErrorKind::Field);
    }

    #[test]
    fn trimming_applies_before_checks() {
        let rule = FieldRule::new("estado").check(Check::StateCode("estado"));
        assert!(rule.evaluate(&form(&[("estado", "  SP ")])).is_none());
    }

    #[test]
    fn untrimmed_keeps_whitespace() {
        let rule = FieldRule::new("senha")
            .untrimmed()
            .length(Some(6), None, "curta");
        assert!(rule.evaluate(&form(&[("senha", "  ab  ")])).is_none());
    }

    #[test]
    fn optional_blank_is_skipped() {
        let rule = FieldRule::new("cep").optional().check(Check::Cep("cep"));
        assert!(rule.evaluate(&FormValues::new()).is_none());
        assert!(rule.evaluate(&form(&[("cep", "  ")])).is_none());
        assert!(rule.evaluate(&form(&[("cep", "123")])).is_some());
    }

    #[test]
    fn equals_field_compares_against_other_value() {
        let rule = FieldRule::new("confirmarSenha").check(Check::EqualsField {
            other: "senha",
            message: "Senhas não coincidem",
        });
        assert!(rule
            .evaluate(&form(&[("senha", "abcdef"), ("confirmarSenha", "abcdef")]))
            .is_none());
        let err = rule
            .evaluate(&form(&[("senha", "abcdef"), ("confirmarSenha", "abcdeg")]))
            .unwrap();
        assert_eq!(err.message, "Senhas não coincidem");
    }

    #[test]
    fn identifier_checks_carry_their_kind() {
        let rule = FieldRule::new("cpf").check(Check::Cpf);
        let err = rule.evaluate(&form(&[("cpf", "52998224725")])).unwrap();
        assert_eq!(err.kind, ErrorKind::Format);
        let err = rule.evaluate(&form(&[("cpf", "529.982.247-26")])).unwrap();
        assert_eq!(err.kind, ErrorKind::Checksum);
        assert!(rule.evaluate(&form(&[("cpf", " 529.982.247-25 ")])).is_none());

        let rule = FieldRule::new("cnpj").check(Check::Cnpj);
        let err = rule.evaluate(&form(&[("cnpj", "11.222.333/0001-80")])).unwrap();
        assert_eq!(err.kind, ErrorKind::Checksum);
        assert_eq!(err.message, "CNPJ inválido");
    }

    #[test]
    fn rule_set_reports_in_declaration_order() {
        let set = RuleSet::new("test")
            .rule(FieldRule::new("b").required("b"))
            .rule(FieldRule::new("a").required("a"));
        let result = set.validate(&FormValues::new());
        assert_eq!(result.fields(), vec!["b", "a"]);
        assert_eq!(set.fields(), vec!["b", "a"]);
        assert_eq!(set.name(), "test");
    }
}
