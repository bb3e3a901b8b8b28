//! Tests for status, reset, resolve, completions.

use super::parse;
use crate::cli::{Cli, CliCommand};
use clap::Parser;

#[test]
fn cli_parse_status() {
    match parse(&["qfetch", "status", "--job", "daily"]) {
        CliCommand::Status { job } => assert_eq!(job, "daily"),
        _ => panic!("expected Status"),
    }
}

#[test]
fn cli_parse_reset() {
    match parse(&["qfetch", "reset", "--job", "daily"]) {
        CliCommand::Reset { job } => assert_eq!(job, "daily"),
        _ => panic!("expected Reset"),
    }
}

#[test]
fn cli_parse_resolve_default_key() {
    match parse(&["qfetch", "resolve", "https://h.example.com/a/index.m3u8"]) {
        CliCommand::Resolve { url, key } => {
            assert_eq!(url, "https://h.example.com/a/index.m3u8");
            assert!(key.is_none());
        }
        _ => panic!("expected Resolve"),
    }
}

#[test]
fn cli_parse_resolve_with_key() {
    match parse(&[
        "qfetch",
        "resolve",
        "https://h/a/index.m3u8",
        "--key",
        "mirror/x.m3u8",
    ]) {
        CliCommand::Resolve { key, .. } => assert_eq!(key.as_deref(), Some("mirror/x.m3u8")),
        _ => panic!("expected Resolve with --key"),
    }
}

#[test]
fn cli_parse_completions() {
    match parse(&["qfetch", "completions", "bash"]) {
        CliCommand::Completions { shell } => assert_eq!(shell, clap_complete::Shell::Bash),
        _ => panic!("expected Completions"),
    }
}

#[test]
fn cli_parse_unknown_subcommand_fails() {
    assert!(Cli::try_parse_from(["qfetch", "download"]).is_err());
}

#[test]
fn cli_definition_is_consistent() {
    use clap::CommandFactory;
    Cli::command().debug_assert();
}
