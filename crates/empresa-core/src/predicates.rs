//! # Field Predicates
//!
//! Plain `fn(&str) -> bool` checks used alongside the identifier checks.
//! Email and URL well-formedness are delegated to the `email_address` and
//! `url` crates.

use std::sync::LazyLock;

use email_address::{EmailAddress, Options};
use regex::Regex;
use url::Url;

static PHONE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\([0-9]{2}\)\s[0-9]{4,5}-[0-9]{4}$").expect("phone pattern is valid")
});

static CEP_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{5}-?[0-9]{3}$").expect("CEP pattern is valid"));

static LETTERS_AND_SPACES: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-zA-ZÀ-ÿ\s]+$").expect("letters pattern is valid"));

/// The 27 Brazilian federative units (26 states plus the Federal District).
pub const STATE_CODES: [&str; 27] = [
    "AC", "AL", "AP", "AM", "BA", "CE", "ES", "GO", "MA", "MT", "MS", "MG", "PA", "PB", "PR", "PE",
    "PI", "RJ", "RN", "RS", "RO", "RR", "SC", "SP", "SE", "TO", "DF",
];

/// Non-empty after trimming surrounding whitespace.
pub fn is_present(value: &str) -> bool {
    !value.trim().is_empty()
}

/// Character count (not bytes) within the inclusive bounds.
pub fn length_between(value: &str, min: Option<usize>, max: Option<usize>) -> bool {
    let len = value.chars().count();
    min.map_or(true, |m| len >= m) && max.map_or(true, |m| len <= m)
}

/// `(XX) XXXX-XXXX` landline or `(XX) XXXXX-XXXX` mobile.
pub fn is_phone(value: &str) -> bool {
    PHONE_PATTERN.is_match(value)
}

/// Postal code, `XXXXX-XXX` or `XXXXXXXX`.
pub fn is_cep(value: &str) -> bool {
    CEP_PATTERN.is_match(value)
}

/// Latin letters (including Latin-1 accented letters) and whitespace only.
pub fn is_letters_and_spaces(value: &str) -> bool {
    LETTERS_AND_SPACES.is_match(value)
}

/// One of the 27 federative-unit abbreviations. Case-sensitive.
pub fn is_state_code(value: &str) -> bool {
    STATE_CODES.contains(&value)
}

/// A bare `local@domain.tld` address.
///
/// Display text (`Nome <a@b.com>`), single-label domains and domain
/// literals (`a@[127.0.0.1]`) are rejected.
pub fn is_email(value: &str) -> bool {
    let options = Options::default()
        .without_display_text()
        .without_domain_literal()
        .with_required_tld();
    EmailAddress::parse_with_options(value, options).is_ok()
}

/// An `http`/`https` URL whose host has at least two labels.
///
/// A missing scheme is tolerated (`www.example.com.br` is accepted) by
/// parsing as if `http://` had been typed. Host labels must be non-empty
/// and may not start or end with a hyphen.
pub fn is_url(value: &str) -> bool {
    let schemeless = !value.contains("://");
    let candidate = if schemeless {
        format!("http://{value}")
    } else {
        value.to_string()
    };
    let Ok(url) = Url::parse(&candidate) else {
        return false;
    };
    if !matches!(url.scheme(), "http" | "https") {
        return false;
    }
    // `mailto:a@b.com` would otherwise parse as userinfo once prefixed.
    if schemeless && (!url.username().is_empty() || url.password().is_some()) {
        return false;
    }
    match url.host_str() {
        Some(host) => host.contains('.') && host.split('.').all(is_host_label),
        None => false,
    }
}

fn is_host_label(label: &str) -> bool {
    !label.is_empty() && !label.starts_with('-') && !label.ends_with('-')
}

/// Password confirmation equality.
pub fn passwords_match(password: &str, confirmation: &str) -> bool {
    password == confirmation
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn phone_accepts_mobile_and_landline() {
        assert!(is_phone("(11) 91234-5678"));
        assert!(is_phone("(11) 1234-5678"));
    }

    #[test]
    fn phone_rejects_missing_parentheses() {
        assert!(!is_phone("11 91234-5678"));
        assert!(!is_phone("(11)91234-5678"));
        assert!(!is_phone("(11) 912345678"));
        assert!(!is_phone("(11) 123-5678"));
        assert!(!is_phone(""));
    }

    #[test]
    fn cep_with_and_without_dash() {
        assert!(is_cep("01310-100"));
        assert!(is_cep("01310100"));
        assert!(!is_cep("0131-0100"));
        assert!(!is_cep("01310-10"));
    }

    #[test]
    fn letters_and_spaces_allow_accents() {
        assert!(is_letters_and_spaces("São Paulo"));
        assert!(is_letters_and_spaces("João da Silva"));
        assert!(!is_letters_and_spaces("Rua 25"));
        assert!(!is_letters_and_spaces("Ana-Maria"));
        assert!(!is_letters_and_spaces(""));
    }

    #[test]
    fn state_codes() {
        assert_eq!(STATE_CODES.len(), 27);
        assert!(is_state_code("SP"));
        assert!(is_state_code("DF"));
        assert!(!is_state_code("sp"));
        assert!(!is_state_code("XX"));
    }

    #[test]
    fn length_counts_characters() {
        assert!(length_between("ção", Some(3), Some(3)));
        assert!(!length_between("a", Some(2), None));
        assert!(length_between("", None, Some(100)));
    }

    #[test]
    fn email_delegation() {
        assert!(is_email("contato@natura.com.br"));
        assert!(!is_email("contato.natura.com.br"));
        assert!(!is_email(""));
    }

    #[test]
    fn email_rejects_display_text_and_bare_hosts() {
        assert!(!is_email("Natura <contato@natura.com.br>"));
        assert!(!is_email("contato@natura"));
        assert!(!is_email("a@[127.0.0.1]"));
        assert!(is_email("joao.silva@empresa.com"));
    }

    #[test]
    fn url_delegation() {
        assert!(is_url("https://www.natura.com.br"));
        assert!(is_url("www.instagram.com/natura"));
        assert!(is_url("http://linkedin.com/company/natura"));
        assert!(!is_url("ftp://natura.com.br"));
        assert!(!is_url("not a url"));
        assert!(!is_url("localhost"));
        assert!(!is_url(""));
    }

    #[test]
    fn url_rejects_malformed_hosts() {
        assert!(!is_url("mailto:x@y.com"));
        assert!(!is_url("http://a..b"));
        assert!(!is_url("https://-.com"));
        assert!(!is_url("https://natura-.com.br"));
        assert!(is_url("https://minha-empresa.com.br"));
        assert!(is_url("https://user:pw@natura.com.br"));
    }

    #[test]
    fn password_confirmation() {
        assert!(passwords_match("segredo1", "segredo1"));
        assert!(!passwords_match("segredo1", "segredo2"));
    }
}
