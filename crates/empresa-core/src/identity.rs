//! # Brazilian Taxpayer Identifiers
//!
//! Validated newtypes for the two federal registry numbers collected by the
//! company-registration flow:
//!
//! - [`Cpf`]: Cadastro de Pessoas Físicas, natural persons. 11 digits, the
//!   last two being check digits. Canonical form `XXX.XXX.XXX-XX`.
//! - [`Cnpj`]: Cadastro Nacional da Pessoa Jurídica, legal entities. 14
//!   digits, the last two being check digits. Canonical form
//!   `XX.XXX.XXX/XXXX-XX`.
//!
//! ## Validation
//!
//! Both types validate in three stages and stop at the first failure:
//!
//! 1. the input must match the canonical punctuation pattern (ASCII digits
//!    only);
//! 2. the digit run must not be a single repeated digit;
//! 3. both mod-11 check digits must match the ones supplied.
//!
//! Stage 1 failures are [`IdentifierError::Format`]; stages 2 and 3 are
//! [`IdentifierError::Checksum`].
//!
//! Everything here is pure and allocation-light. The compiled patterns are
//! immutable statics, so the functions can be called from any thread.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::{ChecksumFailure, IdentifierError};
use crate::validation::ValidationResult;

/// Helper macro to implement `Deserialize` for string newtypes that must
/// validate their contents. Deserializes as a plain `String`, then routes
/// through the type's `new()` constructor so that invalid values are
/// rejected at deserialization time.
macro_rules! impl_validating_deserialize {
    ($ty:ident) => {
        impl<'de> Deserialize<'de> for $ty {
            fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
            where
                D: serde::Deserializer<'de>,
            {
                let raw = String::deserialize(deserializer)?;
                Self::new(raw).map_err(serde::de::Error::custom)
            }
        }
    };
}

// `[0-9]` rather than `\d`: the regex crate's `\d` is Unicode-aware and
// would let non-ASCII digits through to the arithmetic.
static CPF_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[0-9]{3}\.[0-9]{3}\.[0-9]{3}-[0-9]{2}$").expect("CPF pattern is valid")
});

static CNPJ_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[0-9]{2}\.[0-9]{3}\.[0-9]{3}/[0-9]{4}-[0-9]{2}$").expect("CNPJ pattern is valid")
});

const CPF_SHAPE: &str = "XXX.XXX.XXX-XX";
const CNPJ_SHAPE: &str = "XX.XXX.XXX/XXXX-XX";

/// CNPJ weights for the first check digit: 5 down to 2, then 9 down to 2.
const CNPJ_FIRST_WEIGHTS: [u32; 12] = [5, 4, 3, 2, 9, 8, 7, 6, 5, 4, 3, 2];
/// CNPJ weights for the second check digit: 6 down to 2, then 9 down to 2.
const CNPJ_SECOND_WEIGHTS: [u32; 13] = [6, 5, 4, 3, 2, 9, 8, 7, 6, 5, 4, 3, 2];

/// Which identifier a value or error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum IdentifierKind {
    /// Individual taxpayer number.
    Cpf,
    /// Legal-entity taxpayer number.
    Cnpj,
}

impl IdentifierKind {
    /// The canonical punctuated shape, e.g. `XXX.XXX.XXX-XX`.
    pub fn shape(self) -> &'static str {
        match self {
            Self::Cpf => CPF_SHAPE,
            Self::Cnpj => CNPJ_SHAPE,
        }
    }

    fn pattern(self) -> &'static Regex {
        match self {
            Self::Cpf => &CPF_PATTERN,
            Self::Cnpj => &CNPJ_PATTERN,
        }
    }
}

impl std::fmt::Display for IdentifierKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Cpf => f.write_str("CPF"),
            Self::Cnpj => f.write_str("CNPJ"),
        }
    }
}

// ---------------------------------------------------------------------------
// Check digits
// ---------------------------------------------------------------------------

/// Compute the two CPF check digits for a 9-digit body.
///
/// Each digit is weighted by `len + 1 - index` (10..2 for the first check
/// digit, 11..2 for the second), reduced as `11 - sum % 11`, and any
/// result of 10 or 11 becomes 0.
pub fn cpf_check_digits(body: &[u8; 9]) -> [u8; 2] {
    let first = cpf_digit(body);
    let mut extended = [0u8; 10];
    extended[..9].copy_from_slice(body);
    extended[9] = first;
    [first, cpf_digit(&extended)]
}

fn cpf_digit(digits: &[u8]) -> u8 {
    let top = digits.len() as u32 + 1;
    let sum: u32 = digits
        .iter()
        .enumerate()
        .map(|(i, &d)| u32::from(d) * (top - i as u32))
        .sum();
    let digit = 11 - sum % 11;
    if digit >= 10 {
        0
    } else {
        digit as u8
    }
}

/// Compute the two CNPJ check digits for a 12-digit body.
///
/// Weights cycle 5..2 then 9..2 (first digit) and 6..2 then 9..2 (second
/// digit). A remainder below 2 yields 0, otherwise `11 - remainder`.
pub fn cnpj_check_digits(body: &[u8; 12]) -> [u8; 2] {
    let first = cnpj_digit(body, &CNPJ_FIRST_WEIGHTS);
    let mut extended = [0u8; 13];
    extended[..12].copy_from_slice(body);
    extended[12] = first;
    [first, cnpj_digit(&extended, &CNPJ_SECOND_WEIGHTS)]
}

fn cnpj_digit(digits: &[u8], weights: &[u32]) -> u8 {
    let sum: u32 = digits
        .iter()
        .zip(weights)
        .map(|(&d, &w)| u32::from(d) * w)
        .sum();
    let remainder = sum % 11;
    if remainder < 2 {
        0
    } else {
        (11 - remainder) as u8
    }
}

/// Extract exactly `N` ASCII digits from `raw`, ignoring everything else.
fn digits_of<const N: usize>(raw: &str) -> Option<[u8; N]> {
    let mut out = [0u8; N];
    let mut count = 0;
    for b in raw.bytes().filter(u8::is_ascii_digit) {
        if count == N {
            return None;
        }
        out[count] = b - b'0';
        count += 1;
    }
    (count == N).then_some(out)
}

fn format_error(kind: IdentifierKind, raw: &str) -> IdentifierError {
    IdentifierError::Format {
        kind,
        value: raw.to_string(),
        expected: kind.shape(),
    }
}

fn checksum_error(kind: IdentifierKind, raw: &str, failure: ChecksumFailure) -> IdentifierError {
    IdentifierError::Checksum {
        kind,
        value: raw.to_string(),
        failure,
    }
}

/// Shared three-stage check. `check` maps the body to its expected check digits.
fn check_identifier<const N: usize>(
    kind: IdentifierKind,
    raw: &str,
    check: impl Fn(&[u8]) -> [u8; 2],
) -> Result<(), IdentifierError> {
    if !kind.pattern().is_match(raw) {
        return Err(format_error(kind, raw));
    }
    let digits: [u8; N] = digits_of(raw).ok_or_else(|| format_error(kind, raw))?;

    if digits.iter().all(|&d| d == digits[0]) {
        return Err(checksum_error(kind, raw, ChecksumFailure::RepeatedDigits));
    }

    let [first, second] = check(&digits[..N - 2]);
    if first != digits[N - 2] {
        return Err(checksum_error(kind, raw, ChecksumFailure::FirstCheckDigit));
    }
    if second != digits[N - 1] {
        return Err(checksum_error(kind, raw, ChecksumFailure::SecondCheckDigit));
    }
    Ok(())
}

/// Check a CPF in canonical `XXX.XXX.XXX-XX` form.
///
/// # Errors
///
/// [`IdentifierError::Format`] when the punctuation or digit count is wrong,
/// [`IdentifierError::Checksum`] when the digits are degenerate or the check
/// digits do not match.
pub fn check_cpf(raw: &str) -> Result<(), IdentifierError> {
    check_identifier::<11>(IdentifierKind::Cpf, raw, |body| {
        let mut b = [0u8; 9];
        b.copy_from_slice(body);
        cpf_check_digits(&b)
    })
}

/// Check a CNPJ in canonical `XX.XXX.XXX/XXXX-XX` form.
///
/// # Errors
///
/// Same classification as [`check_cpf`].
pub fn check_cnpj(raw: &str) -> Result<(), IdentifierError> {
    check_identifier::<14>(IdentifierKind::Cnpj, raw, |body| {
        let mut b = [0u8; 12];
        b.copy_from_slice(body);
        cnpj_check_digits(&b)
    })
}

/// Whether `raw` is a valid, canonically punctuated CPF.
pub fn is_valid_cpf(raw: &str) -> bool {
    check_cpf(raw).is_ok()
}

/// Whether `raw` is a valid, canonically punctuated CNPJ.
pub fn is_valid_cnpj(raw: &str) -> bool {
    check_cnpj(raw).is_ok()
}

/// User-facing message for a CPF failure.
pub(crate) fn cpf_message(err: &IdentifierError) -> &'static str {
    match err {
        IdentifierError::Format { .. } => "CPF deve estar no formato XXX.XXX.XXX-XX",
        IdentifierError::Checksum { .. } => "CPF inválido",
    }
}

/// User-facing message for a CNPJ failure.
pub(crate) fn cnpj_message(err: &IdentifierError) -> &'static str {
    match err {
        IdentifierError::Format { .. } => "CNPJ deve estar no formato XX.XXX.XXX/XXXX-XX",
        IdentifierError::Checksum { .. } => "CNPJ inválido",
    }
}

/// Validate a CPF and report the outcome against the `cpf` field.
///
/// The input is taken verbatim; callers that accept padded form input
/// should trim first (the form rule sets do).
pub fn validate_cpf(raw: &str) -> ValidationResult {
    let mut result = ValidationResult::new();
    if let Err(err) = check_cpf(raw) {
        result.add_identifier_error("cpf", cpf_message(&err), &err);
    }
    result
}

/// Validate a CNPJ and report the outcome against the `cnpj` field.
pub fn validate_cnpj(raw: &str) -> ValidationResult {
    let mut result = ValidationResult::new();
    if let Err(err) = check_cnpj(raw) {
        result.add_identifier_error("cnpj", cnpj_message(&err), &err);
    }
    result
}

// ---------------------------------------------------------------------------
// Newtypes
// ---------------------------------------------------------------------------

/// A validated CPF, stored in canonical `XXX.XXX.XXX-XX` form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, ToSchema)]
#[schema(value_type = String, example = "529.982.247-25")]
pub struct Cpf(String);

impl_validating_deserialize!(Cpf);

impl Cpf {
    /// Create a CPF, validating format and check digits.
    ///
    /// # Errors
    ///
    /// See [`check_cpf`].
    pub fn new(value: impl Into<String>) -> Result<Self, IdentifierError> {
        let s = value.into();
        check_cpf(&s)?;
        Ok(Self(s))
    }

    /// The canonical punctuated form.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The 11 digits without punctuation.
    pub fn digits(&self) -> String {
        self.0.chars().filter(char::is_ascii_digit).collect()
    }
}

impl std::fmt::Display for Cpf {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::str::FromStr for Cpf {
    type Err = IdentifierError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

/// A validated CNPJ, stored in canonical `XX.XXX.XXX/XXXX-XX` form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, ToSchema)]
#[schema(value_type = String, example = "11.222.333/0001-81")]
pub struct Cnpj(String);

impl_validating_deserialize!(Cnpj);

impl Cnpj {
    /// Create a CNPJ, validating format and check digits.
    ///
    /// # Errors
    ///
    /// See [`check_cnpj`].
    pub fn new(value: impl Into<String>) -> Result<Self, IdentifierError> {
        let s = value.into();
        check_cnpj(&s)?;
        Ok(Self(s))
    }

    /// The canonical punctuated form.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The 14 digits without punctuation.
    pub fn digits(&self) -> String {
        self.0.chars().filter(char::is_ascii_digit).collect()
    }

    /// The 8-digit root shared by every establishment of the company.
    pub fn root(&self) -> String {
        self.digits()[..8].to_string()
    }

    /// The 4-digit establishment number (`0001` is the head office).
    pub fn branch(&self) -> String {
        self.digits()[8..12].to_string()
    }
}

impl std::fmt::Display for Cnpj {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::str::FromStr for Cnpj {
    type Err = IdentifierError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}
