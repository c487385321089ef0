//! # API Route Modules
//!
//! - `pages`: the `/empresa` pages and the profile edit form.
//! - `profiles`: JSON CRUD over company profiles, validated with the
//!   `profile-edit` rule set.
//! - `registration`: per-step validation for the registration wizard.
//! - `identifiers`: standalone CPF and CNPJ validation.

pub mod identifiers;
pub mod pages;
pub mod profiles;
pub mod registration;
