//! # empresa-core: Validation Core for the Empresa Stack
//!
//! Everything the company-registration and company-profile forms need to
//! decide whether submitted values are acceptable. The web layer
//! (`empresa-api`) and the CLI (`empresa-cli`) call into this crate with raw
//! field values and receive a structured [`ValidationResult`].
//!
//! ## Modules
//!
//! - [`identity`]: CPF and CNPJ newtypes, mod-11 check digits.
//! - [`predicates`]: phone, CEP, state code, email, URL, length checks.
//! - [`rules`]: per-field rule chains and rule sets.
//! - [`rule_sets`]: the concrete registration and profile-edit rule sets.
//! - [`validation`]: [`ValidationResult`], [`FieldError`], [`FormValues`].
//! - [`error`]: `thiserror` error hierarchy.
//!
//! ## Crate Policy
//!
//! - No shared mutable state. Every function is safe to call
//!   concurrently. The only I/O is [`FormValues::from_path`].
//! - No `unsafe` code.
//! - No `.unwrap()` outside tests; the only `.expect()` calls compile
//!   constant regex patterns.

pub mod error;
pub mod identity;
pub mod predicates;
pub mod rule_sets;
pub mod rules;
pub mod validation;

// Re-export primary types for ergonomic imports.
pub use error::{ChecksumFailure, EmpresaError, IdentifierError, ValidationError};
pub use identity::{
    check_cnpj, check_cpf, cnpj_check_digits, cpf_check_digits, is_valid_cnpj, is_valid_cpf,
    validate_cnpj, validate_cpf, Cnpj, Cpf, IdentifierKind,
};
pub use rule_sets::{validate_form, RuleSetName};
pub use rules::{Check, FieldRule, RuleSet};
pub use validation::{ErrorKind, FieldError, FormValues, ValidationResult};
