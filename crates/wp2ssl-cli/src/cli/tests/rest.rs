//! Tests for check, show-rules and top-level errors.

use super::parse;
use crate::cli::{Cli, CliCommand};
use clap::Parser;

#[test]
fn cli_parse_check() {
    match parse(&["wp2ssl", "check"]) {
        CliCommand::Check => {}
        _ => panic!("expected Check"),
    }
}

#[test]
fn cli_parse_show_rules() {
    match parse(&["wp2ssl", "show-rules"]) {
        CliCommand::ShowRules => {}
        _ => panic!("expected ShowRules"),
    }
}

#[test]
fn cli_requires_subcommand() {
    assert!(Cli::try_parse_from(["wp2ssl"]).is_err());
}

#[test]
fn cli_rejects_unknown_subcommand() {
    assert!(Cli::try_parse_from(["wp2ssl", "wp2https"]).is_err());
}

#[test]
fn cli_definition_is_consistent() {
    use clap::CommandFactory;
    Cli::command().debug_assert();
}
