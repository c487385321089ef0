//! # Rule-Sets Subcommand
//!
//! Lists the registered rule sets and the fields each inspects.

use anyhow::Result;
use clap::Args;
use serde::Serialize;

use empresa_core::RuleSetName;

/// Arguments for the `empresa rule-sets` subcommand.
#[derive(Args, Debug)]
pub struct RuleSetsArgs {
    /// Also list the fields each rule set inspects.
    #[arg(long)]
    pub fields: bool,
}

#[derive(Debug, Serialize)]
struct RuleSetListing {
    name: &'static str,
    fields: Vec<&'static str>,
}

fn listings() -> Vec<RuleSetListing> {
    RuleSetName::ALL
        .into_iter()
        .map(|name| RuleSetListing {
            name: name.as_str(),
            fields: name.rule_set().fields(),
        })
        .collect()
}

/// Execute the rule-sets subcommand. Always returns exit code 0.
pub fn run_rule_sets(args: &RuleSetsArgs, json: bool) -> Result<u8> {
    let listings = listings();
    if json {
        println!("{}", serde_json::to_string_pretty(&listings)?);
        return Ok(0);
    }
    for listing in &listings {
        if args.fields {
            println!("{}: {}", listing.name, listing.fields.join(", "));
        } else {
            println!("{}", listing.name);
        }
    }
    Ok(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lists_every_rule_set_in_order() {
        let names: Vec<_> = listings().into_iter().map(|l| l.name).collect();
        assert_eq!(
            names,
            vec!["company", "representative", "representative-contact", "profile-edit"]
        );
    }

    #[test]
    fn profile_edit_fields() {
        let listing = listings()
            .into_iter()
            .find(|l| l.name == "profile-edit")
            .unwrap();
        assert_eq!(
            listing.fields,
            vec![
                "nome",
                "descricao",
                "emailempresa",
                "siteempresa",
                "instagram",
                "facebook",
                "linkedin"
            ]
        );
    }

    #[test]
    fn run_exits_zero() {
        assert_eq!(run_rule_sets(&RuleSetsArgs { fields: true }, false).unwrap(), 0);
        assert_eq!(run_rule_sets(&RuleSetsArgs { fields: false }, true).unwrap(), 0);
    }
}
