//! Tests for lookup, set, reset, levels.

use super::parse;
use crate::cli::CliCommand;
use clap::Parser;

#[test]
fn cli_parse_lookup() {
    match parse(&["zoomer", "lookup", "https://example.com/page"]) {
        CliCommand::Lookup { url } => assert_eq!(url, "https://example.com/page"),
        _ => panic!("expected Lookup"),
    }
}

#[test]
fn cli_parse_set() {
    match parse(&["zoomer", "set", "https://example.com/page", "1.5"]) {
        CliCommand::Set { url, zoom } => {
            assert_eq!(url, "https://example.com/page");
            assert!((zoom - 1.5).abs() < f64::EPSILON);
        }
        _ => panic!("expected Set"),
    }
}

#[test]
fn cli_parse_set_rejects_non_numeric_zoom() {
    assert!(crate::cli::Cli::try_parse_from(["zoomer", "set", "https://a.com", "big"]).is_err());
}

#[test]
fn cli_parse_reset() {
    match parse(&["zoomer", "reset", "https://example.com"]) {
        CliCommand::Reset { url } => assert_eq!(url, "https://example.com"),
        _ => panic!("expected Reset"),
    }
}

#[test]
fn cli_parse_levels() {
    match parse(&["zoomer", "levels", "https://example.com/a?b=1#c"]) {
        CliCommand::Levels { url } => assert_eq!(url, "https://example.com/a?b=1#c"),
        _ => panic!("expected Levels"),
    }
}

#[test]
fn cli_requires_a_subcommand() {
    assert!(crate::cli::Cli::try_parse_from(["zoomer"]).is_err());
}
