//! Run configuration assembled once from CLI flags and the environment.
//!
//! All state the pipeline needs travels in a single [`RunConfig`] passed
//! explicitly between steps; nothing is read from process-wide globals
//! after construction.

use crate::cli::Cli;
use crate::error::Result;
use crate::install::{default_install_dir, is_ci_environment};
use crate::platform::{Os, Platform};
use camino::Utf8PathBuf;

/// How the release tag is obtained.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolveMode {
    /// Query the latest-release API endpoint.
    Latest,
    /// Use a caller-pinned tag.
    Pinned(String),
    /// Use the tag baked in at publish time (the default).
    Baked,
}

/// Immutable configuration for one installer run.
#[derive(Debug, Clone)]
pub struct RunConfig {
    /// Detected canonical platform pair.
    pub platform: Platform,
    /// Release tag resolution mode.
    pub mode: ResolveMode,
    /// Target install directory.
    pub install_dir: Utf8PathBuf,
    /// Whether the install directory is the system default (which gates the
    /// elevated-privilege precondition).
    pub uses_default_dir: bool,
    /// Skip the existing-install prompt.
    pub assume_yes: bool,
    /// Suppress progress output.
    pub quiet: bool,
    /// Show the resolved plan without installing.
    pub dry_run: bool,
    /// Whether recognized CI environment signals are present.
    pub ci: bool,
}

impl RunConfig {
    /// Build the run configuration from parsed CLI arguments and the
    /// environment.
    ///
    /// # Errors
    ///
    /// Fails when the host platform is unsupported; this is the first
    /// check of every run and has no side effects.
    pub fn from_cli(cli: &Cli) -> Result<Self> {
        let platform = Platform::detect()?;
        let mode = match (&cli.tag, cli.latest) {
            (Some(tag), _) => ResolveMode::Pinned(tag.clone()),
            (None, true) => ResolveMode::Latest,
            (None, false) => ResolveMode::Baked,
        };
        let (install_dir, uses_default_dir) = match &cli.install_dir {
            Some(dir) => (dir.clone(), false),
            None => (default_install_dir(), true),
        };
        Ok(Self {
            platform,
            mode,
            install_dir,
            uses_default_dir,
            assume_yes: cli.yes,
            quiet: cli.quiet,
            dry_run: cli.dry_run,
            ci: is_ci_environment(),
        })
    }

    /// Whether this run must hold elevated privileges before writing.
    ///
    /// Only installs into the default system directory on non-Windows
    /// platforms require root; custom directories and the Windows branch
    /// rely on ordinary filesystem errors.
    #[must_use]
    pub fn requires_elevation(&self) -> bool {
        self.uses_default_dir && self.platform.os != Os::Windows
    }

    /// The installed binary's filename, including any platform suffix.
    #[must_use]
    pub fn binary_filename(&self) -> String {
        format!(
            "{}{}",
            crate::download::BINARY_NAME,
            self.platform.exe_suffix()
        )
    }

    /// The full path the binary will occupy after installation.
    #[must_use]
    pub fn installed_path(&self) -> Utf8PathBuf {
        self.install_dir.join(self.binary_filename())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::Arch;
    use clap::Parser;

    fn config_for(args: &[&str]) -> RunConfig {
        let cli = Cli::parse_from(args);
        RunConfig::from_cli(&cli).expect("supported test host")
    }

    #[test]
    fn default_mode_uses_baked_tag() {
        let config = config_for(&["skiff-install"]);
        assert_eq!(config.mode, ResolveMode::Baked);
    }

    #[test]
    fn latest_flag_selects_api_resolution() {
        let config = config_for(&["skiff-install", "--latest"]);
        assert_eq!(config.mode, ResolveMode::Latest);
    }

    #[test]
    fn tag_flag_pins_the_release() {
        let config = config_for(&["skiff-install", "--tag", "v0.50.0"]);
        assert_eq!(config.mode, ResolveMode::Pinned("v0.50.0".to_owned()));
    }

    #[test]
    fn custom_install_dir_skips_elevation_requirement() {
        let config = config_for(&["skiff-install", "--install-dir", "/tmp/bin"]);
        assert!(!config.uses_default_dir);
        assert!(!config.requires_elevation());
        assert_eq!(config.install_dir, Utf8PathBuf::from("/tmp/bin"));
    }

    #[test]
    fn windows_platform_never_requires_elevation() {
        let config = RunConfig {
            platform: Platform::new(Os::Windows, Arch::X86_64),
            mode: ResolveMode::Baked,
            install_dir: Utf8PathBuf::from("/usr/local/bin"),
            uses_default_dir: true,
            assume_yes: false,
            quiet: false,
            dry_run: false,
            ci: false,
        };
        assert!(!config.requires_elevation());
    }

    #[test]
    fn binary_filename_carries_windows_suffix() {
        let config = RunConfig {
            platform: Platform::new(Os::Windows, Arch::Arm64),
            mode: ResolveMode::Baked,
            install_dir: Utf8PathBuf::from("/home/sailor/bin"),
            uses_default_dir: false,
            assume_yes: false,
            quiet: false,
            dry_run: false,
            ci: false,
        };
        assert_eq!(config.binary_filename(), "skiff.exe");
        assert_eq!(
            config.installed_path(),
            Utf8PathBuf::from("/home/sailor/bin/skiff.exe")
        );
    }

    #[test]
    fn default_dir_on_unix_requires_elevation() {
        let config = RunConfig {
            platform: Platform::new(Os::Linux, Arch::X86_64),
            mode: ResolveMode::Baked,
            install_dir: Utf8PathBuf::from("/usr/local/bin"),
            uses_default_dir: true,
            assume_yes: false,
            quiet: false,
            dry_run: false,
            ci: false,
        };
        assert!(config.requires_elevation());
    }
}
