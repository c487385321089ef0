//! # Validate Subcommand
//!
//! Single-value checks and rule-set validation of form files.
//!
//! Single values run through a one-field rule, so the CLI reports the same
//! messages and error kinds the web forms do.

use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Subcommand};

use empresa_core::{
    validate_cnpj, validate_cpf, validate_form, Check, Cnpj, Cpf, FieldRule, FormValues, RuleSet,
    ValidationResult,
};

/// Arguments for the `empresa validate` subcommand.
#[derive(Args, Debug)]
pub struct ValidateArgs {
    #[command(subcommand)]
    pub target: ValidateTarget,
}

/// What to validate.
#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum ValidateTarget {
    /// CPF in `XXX.XXX.XXX-XX` form.
    Cpf { value: String },
    /// CNPJ in `XX.XXX.XXX/XXXX-XX` form.
    Cnpj { value: String },
    /// Phone number, `(XX) XXXX-XXXX` or `(XX) XXXXX-XXXX`.
    Phone { value: String },
    /// Postal code, `XXXXX-XXX` or `XXXXXXXX`.
    Cep { value: String },
    /// Email address.
    Email { value: String },
    /// Website or social-network URL.
    Url { value: String },
    /// Two-letter state code.
    State { value: String },
    /// A JSON object of form fields against a named rule set.
    Form {
        /// Rule set name (see `empresa rule-sets`).
        rule_set: String,
        /// JSON file with the submitted fields; `-` reads stdin.
        #[arg(value_name = "FILE")]
        path: PathBuf,
    },
}

/// Execute the validate subcommand.
///
/// Returns exit code: 0 when valid, 1 when rejected.
pub fn run_validate(args: &ValidateArgs, json: bool) -> Result<u8> {
    let (label, result) = evaluate(&args.target)?;
    tracing::info!(subject = %label, valid = result.is_valid(), "validated");
    crate::print_result(&label, &result, json)?;
    Ok(crate::exit_code(&result))
}

/// Run the check for `target`, returning a display label and the result.
pub fn evaluate(target: &ValidateTarget) -> Result<(String, ValidationResult)> {
    let outcome = match target {
        ValidateTarget::Cpf { value } => {
            let result = validate_cpf(value);
            let label = match Cpf::new(value.as_str()) {
                Ok(cpf) => format!("CPF {cpf} ({})", cpf.digits()),
                Err(_) => format!("CPF {value}"),
            };
            (label, result)
        }
        ValidateTarget::Cnpj { value } => {
            let result = validate_cnpj(value);
            let label = match Cnpj::new(value.as_str()) {
                Ok(cnpj) => format!("CNPJ {cnpj} (raiz {}, filial {})", cnpj.root(), cnpj.branch()),
                Err(_) => format!("CNPJ {value}"),
            };
            (label, result)
        }
        ValidateTarget::Phone { value } => single(
            "telefone",
            value,
            Check::Phone("Digite um telefone válido no formato (XX) XXXXX-XXXX"),
        ),
        ValidateTarget::Cep { value } => single(
            "cep",
            value,
            Check::Cep("CEP deve estar no formato XXXXX-XXX"),
        ),
        ValidateTarget::Email { value } => {
            single("email", value, Check::Email("Digite um email válido"))
        }
        ValidateTarget::Url { value } => single("url", value, Check::Url("O url não é valido!")),
        ValidateTarget::State { value } => single(
            "estado",
            value,
            Check::StateCode("Selecione um estado válido"),
        ),
        ValidateTarget::Form { rule_set, path } => {
            let form = read_form(path)?;
            let result = validate_form(rule_set, &form)?;
            (format!("{rule_set} form {}", path.display()), result)
        }
    };
    Ok(outcome)
}

fn single(field: &'static str, value: &str, check: Check) -> (String, ValidationResult) {
    let rule_set = RuleSet::new(field).rule(FieldRule::new(field).check(check));
    let form: FormValues = [(field, value)].into_iter().collect();
    (format!("{field} {value}"), rule_set.validate(&form))
}

/// Load a form file: a flat JSON object of string values.
fn read_form(path: &Path) -> Result<FormValues> {
    if path == Path::new("-") {
        let mut raw = String::new();
        std::io::stdin()
            .read_to_string(&mut raw)
            .context("failed to read form from stdin")?;
        return FormValues::from_json(&raw).context("stdin is not a JSON object of string fields");
    }
    FormValues::from_path(path)
        .with_context(|| format!("failed to load form file {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn args(target: ValidateTarget) -> ValidateArgs {
        ValidateArgs { target }
    }

    fn form_file(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn valid_cpf_exits_zero() {
        let code = run_validate(
            &args(ValidateTarget::Cpf {
                value: "529.982.247-25".into(),
            }),
            false,
        )
        .unwrap();
        assert_eq!(code, 0);
    }

    #[test]
    fn invalid_cnpj_exits_one() {
        let code = run_validate(
            &args(ValidateTarget::Cnpj {
                value: "11.222.333/0001-80".into(),
            }),
            true,
        )
        .unwrap();
        assert_eq!(code, 1);
    }

    #[test]
    fn cpf_label_shows_digits_when_valid() {
        let (label, _) = evaluate(&ValidateTarget::Cpf {
            value: "529.982.247-25".into(),
        })
        .unwrap();
        assert_eq!(label, "CPF 529.982.247-25 (52998224725)");
    }

    #[test]
    fn cnpj_label_shows_root_and_branch() {
        let (label, _) = evaluate(&ValidateTarget::Cnpj {
            value: "11.222.333/0001-81".into(),
        })
        .unwrap();
        assert_eq!(label, "CNPJ 11.222.333/0001-81 (raiz 11222333, filial 0001)");
    }

    #[test]
    fn single_value_checks_use_form_messages() {
        let (_, result) = evaluate(&ValidateTarget::Phone {
            value: "11 91234-5678".into(),
        })
        .unwrap();
        assert!(!result.is_valid());
        assert_eq!(result.errors[0].field, "telefone");

        let (_, result) = evaluate(&ValidateTarget::State { value: "SP".into() }).unwrap();
        assert!(result.is_valid());

        let (_, result) = evaluate(&ValidateTarget::Url {
            value: "www.natura.com.br".into(),
        })
        .unwrap();
        assert!(result.is_valid());

        let (_, result) = evaluate(&ValidateTarget::Cep { value: "0131".into() }).unwrap();
        assert_eq!(
            result.errors[0].message,
            "CEP deve estar no formato XXXXX-XXX"
        );

        let (_, result) = evaluate(&ValidateTarget::Email {
            value: "sem-arroba".into(),
        })
        .unwrap();
        assert!(!result.is_valid());
    }

    #[test]
    fn form_file_is_validated_against_rule_set() {
        let file = form_file(
            r#"{
                "nome": "Maria Souza",
                "cargo": "Diretora",
                "email": "maria@empresa.com.br",
                "telefone": "(21) 3333-4444"
            }"#,
        );
        let target = ValidateTarget::Form {
            rule_set: "representative-contact".into(),
            path: file.path().to_path_buf(),
        };
        assert_eq!(run_validate(&args(target), false).unwrap(), 0);
    }

    #[test]
    fn rejected_form_exits_one() {
        let file = form_file(r#"{ "nome": "M", "cargo": "", "email": "x", "telefone": "" }"#);
        let target = ValidateTarget::Form {
            rule_set: "representative-contact".into(),
            path: file.path().to_path_buf(),
        };
        let (_, result) = evaluate(&target).unwrap();
        assert_eq!(result.fields(), vec!["nome", "cargo", "email", "telefone"]);
        assert_eq!(run_validate(&args(target), true).unwrap(), 1);
    }

    #[test]
    fn unknown_rule_set_is_an_error() {
        let file = form_file("{}");
        let target = ValidateTarget::Form {
            rule_set: "socios".into(),
            path: file.path().to_path_buf(),
        };
        let err = run_validate(&args(target), false).unwrap_err();
        assert!(format!("{err:#}").contains("socios"));
    }

    #[test]
    fn malformed_form_file_is_an_error() {
        let file = form_file("[1, 2, 3]");
        let target = ValidateTarget::Form {
            rule_set: "company".into(),
            path: file.path().to_path_buf(),
        };
        let err = run_validate(&args(target), false).unwrap_err();
        assert!(format!("{err:#}").contains("JSON error"));
    }

    #[test]
    fn missing_form_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let target = ValidateTarget::Form {
            rule_set: "company".into(),
            path: dir.path().join("missing.json"),
        };
        let err = run_validate(&args(target), false).unwrap_err();
        let message = format!("{err:#}");
        assert!(message.contains("failed to load form file"));
        assert!(message.contains("I/O error"));
    }
}
