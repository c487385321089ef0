//! # Registration and Profile Rule Sets
//!
//! The concrete rule sets used by the company forms. Field names match the
//! HTML form inputs; messages are the user-facing Portuguese strings.
//!
//! | Name | Form |
//! |------|------|
//! | `company` | registration step 1: company data |
//! | `representative` | registration step 2: legal representative and account |
//! | `representative-contact` | step 2 as served by the current contact form |
//! | `profile-edit` | public company profile edit |

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::ValidationError;
use crate::rules::{Check, FieldRule, RuleSet};
use crate::validation::{FormValues, ValidationResult};

/// Registry key of a rule set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "kebab-case")]
pub enum RuleSetName {
    /// `company`: registration step 1.
    Company,
    /// `representative`: registration step 2 with account credentials.
    Representative,
    /// `representative-contact`: step 2 as the contact form submits it.
    RepresentativeContact,
    /// `profile-edit`: the public profile edit form.
    ProfileEdit,
}

impl RuleSetName {
    /// Every registered rule set, in a stable order.
    pub const ALL: [RuleSetName; 4] = [
        Self::Company,
        Self::Representative,
        Self::RepresentativeContact,
        Self::ProfileEdit,
    ];

    /// The name used in URLs and on the command line.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Company => "company",
            Self::Representative => "representative",
            Self::RepresentativeContact => "representative-contact",
            Self::ProfileEdit => "profile-edit",
        }
    }

    /// Build the rule set registered under this name.
    pub fn rule_set(self) -> RuleSet {
        match self {
            Self::Company => company(),
            Self::Representative => representative(),
            Self::RepresentativeContact => representative_contact(),
            Self::ProfileEdit => profile_edit(),
        }
    }
}

impl std::fmt::Display for RuleSetName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RuleSetName {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|name| name.as_str() == s)
            .ok_or_else(|| ValidationError::UnknownRuleSet(s.to_string()))
    }
}

/// Validate `form` against the rule set registered as `name`.
///
/// # Errors
///
/// [`ValidationError::UnknownRuleSet`] when no such set exists. A form that
/// fails its rules is *not* an error here; inspect the returned result.
pub fn validate_form(name: &str, form: &FormValues) -> Result<ValidationResult, ValidationError> {
    let name: RuleSetName = name.parse()?;
    Ok(name.rule_set().validate(form))
}

const PHONE_MESSAGE: &str = "Digite um telefone válido no formato (XX) XXXXX-XXXX";
const LETTERS_NAME_MESSAGE: &str = "Nome deve conter apenas letras e espaços";
const URL_MESSAGE: &str = "O url não é valido!";

fn telefone() -> FieldRule {
    FieldRule::new("telefone")
        .required("Telefone é obrigatório")
        .check(Check::Phone(PHONE_MESSAGE))
}

fn email() -> FieldRule {
    FieldRule::new("email")
        .required("Email é obrigatório")
        .check(Check::Email("Digite um email válido"))
}

fn optional_url(field: &'static str) -> FieldRule {
    FieldRule::new(field).optional().check(Check::Url(URL_MESSAGE))
}

/// Registration step 1: company data.
pub fn company() -> RuleSet {
    RuleSet::new(RuleSetName::Company.as_str())
        .rule(
            FieldRule::new("razao_social")
                .required("Razão social é obrigatória")
                .length(Some(2), Some(200), "Razão social deve ter entre 2 e 200 caracteres"),
        )
        .rule(
            FieldRule::new("nome_fantasia")
                .required("Nome fantasia é obrigatório")
                .length(Some(2), Some(100), "Nome fantasia deve ter entre 2 e 100 caracteres"),
        )
        .rule(
            FieldRule::new("cnpj")
                .required("CNPJ é obrigatório")
                .check(Check::Cnpj),
        )
        .rule(telefone())
        .rule(
            FieldRule::new("logradouro")
                .required("Logradouro é obrigatório")
                .length(Some(5), Some(200), "Logradouro deve ter entre 5 e 200 caracteres"),
        )
        .rule(
            FieldRule::new("cidade")
                .required("Cidade é obrigatória")
                .length(Some(2), Some(100), "Cidade deve ter entre 2 e 100 caracteres")
                .check(Check::LettersAndSpaces(
                    "Cidade deve conter apenas letras e espaços",
                )),
        )
        .rule(
            FieldRule::new("estado")
                .required("Estado é obrigatório")
                .check(Check::StateCode("Selecione um estado válido")),
        )
        .rule(
            FieldRule::new("cep")
                .optional()
                .check(Check::Cep("CEP deve estar no formato XXXXX-XXX")),
        )
        .rule(FieldRule::new("complemento").optional().length(
            None,
            Some(100),
            "Complemento deve ter no máximo 100 caracteres",
        ))
}

/// Registration step 2: legal representative and account credentials.
pub fn representative() -> RuleSet {
    RuleSet::new(RuleSetName::Representative.as_str())
        .rule(
            FieldRule::new("nomeCompleto")
                .required("Nome completo é obrigatório")
                .length(Some(2), Some(100), "Nome deve ter entre 2 e 100 caracteres")
                .check(Check::LettersAndSpaces(LETTERS_NAME_MESSAGE)),
        )
        .rule(email())
        .rule(
            FieldRule::new("cpf")
                .required("CPF é obrigatório")
                .check(Check::Cpf),
        )
        .rule(telefone())
        .rule(
            FieldRule::new("senha")
                .untrimmed()
                .required("Senha é obrigatória")
                .length(Some(6), None, "Senha deve ter pelo menos 6 caracteres")
                .length(None, Some(128), "Senha muito longa"),
        )
        .rule(
            FieldRule::new("confirmarSenha")
                .untrimmed()
                .required("Confirmação de senha é obrigatória")
                .check(Check::EqualsField {
                    other: "senha",
                    message: "Senhas não coincidem",
                }),
        )
}

/// Registration step 2 as collected by the contact form.
pub fn representative_contact() -> RuleSet {
    RuleSet::new(RuleSetName::RepresentativeContact.as_str())
        .rule(
            FieldRule::new("nome")
                .required("Nome é obrigatório")
                .length(Some(2), Some(100), "Nome deve ter entre 2 e 100 caracteres")
                .check(Check::LettersAndSpaces(LETTERS_NAME_MESSAGE)),
        )
        .rule(
            FieldRule::new("cargo")
                .required("Cargo é obrigatório")
                .length(Some(2), Some(100), "Cargo deve ter entre 2 e 100 caracteres"),
        )
        .rule(email())
        .rule(telefone())
}

/// Public company profile edit.
///
/// Lengths are counted on the trimmed text, which is also what gets saved.
pub fn profile_edit() -> RuleSet {
    RuleSet::new(RuleSetName::ProfileEdit.as_str())
        .rule(FieldRule::new("nome").length(
            Some(5),
            Some(35),
            "O nome deve possuir entre 5 a 35 carácteres!",
        ))
        .rule(FieldRule::new("descricao").length(
            Some(50),
            Some(350),
            "A descrição deve ter entre 50 a 350 caracteres!",
        ))
        .rule(
            FieldRule::new("emailempresa")
                .optional()
                .check(Check::Email("O email deve seguir a estrutura email@origem.com!")),
        )
        .rule(optional_url("siteempresa"))
        .rule(optional_url("instagram"))
        .rule(optional_url("facebook"))
        .rule(optional_url("linkedin"))
}
