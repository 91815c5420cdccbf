//! CLI argument definitions for the Skiff installer.
//!
//! Separated from the main entrypoint to keep the binary focused on
//! orchestration. The original shell installer took no flags; this surface
//! keeps every flag optional so a bare invocation behaves the same way.

use camino::Utf8PathBuf;
use clap::Parser;

/// Install the prebuilt Skiff binary for this machine.
#[derive(Parser, Debug, Clone, Default)]
#[command(name = "skiff-install")]
#[command(version, about)]
#[command(long_about = concat!(
    "Install the prebuilt Skiff binary for this machine.\n\n",
    "The installer detects the host operating system and CPU architecture, ",
    "downloads the matching release archive from GitHub, verifies it against ",
    "the published checksums when available, and places the binary in the ",
    "install directory (/usr/local/bin by default, which requires sudo).\n\n",
    "By default the release tag baked in at publish time is installed. Use ",
    "--latest to query the newest published release, or --tag to pin one.",
))]
#[command(after_help = concat!(
    "EXAMPLES:\n",
    "  Install the release this installer was published with:\n",
    "    $ sudo skiff-install\n\n",
    "  Install the newest published release:\n",
    "    $ sudo skiff-install --latest\n\n",
    "  Install a specific release into a user directory:\n",
    "    $ skiff-install --tag v0.50.0 --install-dir ~/.local/bin\n\n",
    "  Preview without downloading:\n",
    "    $ skiff-install --dry-run\n\n",
    "For more information, see: https://github.com/dockyard-sh/skiff",
))]
pub struct Cli {
    /// Install a specific release tag instead of the baked-in one.
    #[arg(long, value_name = "TAG", conflicts_with = "latest")]
    pub tag: Option<String>,

    /// Query the release API for the newest published release.
    #[arg(long)]
    pub latest: bool,

    /// Install directory [default: /usr/local/bin].
    #[arg(long, value_name = "DIR")]
    pub install_dir: Option<Utf8PathBuf>,

    /// Overwrite an existing installation without prompting.
    #[arg(short, long)]
    pub yes: bool,

    /// Suppress progress output (errors still shown).
    #[arg(short, long, conflicts_with = "verbosity")]
    pub quiet: bool,

    /// Increase diagnostic verbosity (repeatable: -v, -vv).
    #[arg(
        short,
        long = "verbose",
        action = clap::ArgAction::Count,
        conflicts_with = "quiet"
    )]
    pub verbosity: u8,

    /// Show the resolved plan and exit without installing.
    #[arg(long)]
    pub dry_run: bool,
}

#[cfg(test)]
#[path = "cli_tests.rs"]
mod tests;
