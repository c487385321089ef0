//! # empresa-cli: CLI Tool for the Empresa Stack
//!
//! Provides the `empresa` command-line interface over `empresa-core`.
//!
//! ## Subcommands
//!
//! - `empresa validate`: check one value (CPF, CNPJ, phone, CEP, email,
//!   URL, state) or a JSON form file against a named rule set.
//! - `empresa rule-sets`: list the rule sets and the fields they inspect.
//!
//! ```bash
//! empresa validate cpf 529.982.247-25
//! empresa validate form company step1.json --json
//! ```
//!
//! ## Exit Codes
//!
//! `0` valid, `1` rejected, `2` operational error (unreadable file,
//! malformed JSON, unknown rule set).

pub mod rule_sets;
pub mod validate;

use empresa_core::ValidationResult;

/// Print a validation result in the requested format.
pub fn print_result(label: &str, result: &ValidationResult, json: bool) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(result)?);
        return Ok(());
    }
    if result.is_valid() {
        println!("OK: {label}");
    } else {
        println!("FAIL: {label}");
        for err in &result.errors {
            println!("  {}: {}", err.field, err.message);
        }
    }
    Ok(())
}

/// Exit code for a finished validation.
pub fn exit_code(result: &ValidationResult) -> u8 {
    if result.is_valid() {
        0
    } else {
        1
    }
}
