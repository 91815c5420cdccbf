//! Skiff installer CLI entrypoint.
//!
//! Parses arguments, assembles the run configuration, wires the production
//! resolver, downloader, extractor, and confirmer into the pipeline, and
//! maps the outcome to an exit code. A declined reinstall exits zero; every
//! failure exits non-zero after printing a diagnostic.

use clap::Parser;
use log::LevelFilter;
use skiff_install::cli::Cli;
use skiff_install::config::{ResolveMode, RunConfig};
use skiff_install::download::{GITHUB_REPO, HttpDownloader};
use skiff_install::error::Result;
use skiff_install::extract::DefaultExtractor;
use skiff_install::install::TerminalConfirmer;
use skiff_install::output::write_stderr_line;
use skiff_install::pipeline::{RunOutcome, run_pipeline};
use skiff_install::release::{LatestReleaseResolver, PinnedReleaseResolver, ReleaseResolver};
use std::io::Write;

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbosity);
    let mut stderr = std::io::stderr();
    let run_result = run(&cli, &mut stderr);
    let exit_code = exit_code_for_run_result(run_result, &mut stderr);
    if exit_code != 0 {
        std::process::exit(exit_code);
    }
}

fn run(cli: &Cli, stderr: &mut dyn Write) -> Result<RunOutcome> {
    let config = RunConfig::from_cli(cli)?;
    let resolver = make_resolver(&config);
    let confirmer = TerminalConfirmer::new(config.assume_yes, config.ci);
    run_pipeline(
        &config,
        resolver.as_ref(),
        &HttpDownloader,
        &DefaultExtractor,
        &confirmer,
        stderr,
    )
}

/// Select the release resolver for the configured mode.
fn make_resolver(config: &RunConfig) -> Box<dyn ReleaseResolver> {
    match &config.mode {
        ResolveMode::Latest => Box::new(LatestReleaseResolver::new(GITHUB_REPO)),
        ResolveMode::Pinned(tag) => Box::new(PinnedReleaseResolver::new(tag.clone())),
        ResolveMode::Baked => Box::new(PinnedReleaseResolver::baked()),
    }
}

/// Map repeatable `-v` flags onto the log filter; `RUST_LOG` still wins.
fn init_logging(verbosity: u8) {
    let level = match verbosity {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        _ => LevelFilter::Debug,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
}

fn exit_code_for_run_result(result: Result<RunOutcome>, stderr: &mut dyn Write) -> i32 {
    match result {
        Ok(RunOutcome::Installed { .. } | RunOutcome::Declined | RunOutcome::DryRun) => 0,
        Err(err) => {
            write_stderr_line(stderr, format!("Error: {err}"));
            1
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use camino::Utf8PathBuf;
    use skiff_install::error::InstallError;

    #[test]
    fn exit_code_is_zero_on_install() {
        let mut stderr = Vec::new();
        let result = Ok(RunOutcome::Installed {
            path: Utf8PathBuf::from("/usr/local/bin/skiff"),
        });
        assert_eq!(exit_code_for_run_result(result, &mut stderr), 0);
        assert!(stderr.is_empty());
    }

    #[test]
    fn exit_code_is_zero_on_declined_reinstall() {
        let mut stderr = Vec::new();
        assert_eq!(
            exit_code_for_run_result(Ok(RunOutcome::Declined), &mut stderr),
            0
        );
    }

    #[test]
    fn exit_code_is_one_on_error_with_diagnostic() {
        let mut stderr = Vec::new();
        let result = Err(InstallError::UnsupportedOs {
            value: "plan9".to_owned(),
        });
        assert_eq!(exit_code_for_run_result(result, &mut stderr), 1);
        let text = String::from_utf8(stderr).expect("stderr was not UTF-8");
        assert!(text.contains("Error:"));
        assert!(text.contains("plan9"));
    }

    #[test]
    fn resolver_selection_follows_mode() {
        let cli = Cli::parse_from(["skiff-install", "--tag", "v0.50.0"]);
        let config = RunConfig::from_cli(&cli).expect("supported test host");
        let resolver = make_resolver(&config);
        let tag = resolver.resolve().expect("pinned tag resolves");
        assert_eq!(tag.as_str(), "v0.50.0");
    }
}
