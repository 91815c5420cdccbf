//! Tests for CLI argument parsing.

use super::*;

#[test]
fn bare_invocation_parses_with_defaults() {
    let cli = Cli::parse_from(["skiff-install"]);
    assert!(cli.tag.is_none());
    assert!(!cli.latest);
    assert!(cli.install_dir.is_none());
    assert!(!cli.yes);
    assert!(!cli.quiet);
    assert_eq!(cli.verbosity, 0);
    assert!(!cli.dry_run);
}

#[test]
fn tag_flag_captures_value() {
    let cli = Cli::parse_from(["skiff-install", "--tag", "v0.50.0"]);
    assert_eq!(cli.tag.as_deref(), Some("v0.50.0"));
}

#[test]
fn tag_and_latest_conflict() {
    let result = Cli::try_parse_from(["skiff-install", "--tag", "v0.50.0", "--latest"]);
    assert!(result.is_err());
}

#[test]
fn quiet_and_verbose_conflict() {
    let result = Cli::try_parse_from(["skiff-install", "--quiet", "-v"]);
    assert!(result.is_err());
}

#[test]
fn verbosity_counts_repeats() {
    let cli = Cli::parse_from(["skiff-install", "-vv"]);
    assert_eq!(cli.verbosity, 2);
}

#[test]
fn install_dir_accepts_path() {
    let cli = Cli::parse_from(["skiff-install", "--install-dir", "/opt/skiff/bin"]);
    assert_eq!(
        cli.install_dir,
        Some(camino::Utf8PathBuf::from("/opt/skiff/bin"))
    );
}

#[test]
fn short_yes_flag_parses() {
    let cli = Cli::parse_from(["skiff-install", "-y"]);
    assert!(cli.yes);
}
