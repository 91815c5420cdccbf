//! Binary installation: existing-install confirmation, directory
//! preparation, the move into place, and permission bits.
//!
//! The confirmation step is behind a trait so the pipeline can be tested
//! without a terminal. The production implementation prompts only when
//! attached to an interactive terminal outside CI.

use crate::error::{InstallError, Result};
use camino::{Utf8Path, Utf8PathBuf};
use std::io::{BufRead, IsTerminal, Write};

/// Default system install directory on Unix-like hosts.
pub const DEFAULT_INSTALL_DIR: &str = "/usr/local/bin";

/// Environment variables that signal a CI environment.
const CI_ENV_VARS: &[&str] = &["CI", "GITHUB_ACTIONS"];

/// Environment marker identifying an MSYS-style Windows emulation shell.
const MSYS_ENV_MARKER: &str = "MSYSTEM";

/// The caller's decision when an existing installation is found.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReinstallDecision {
    /// Overwrite the existing binary.
    Proceed,
    /// Keep the existing binary and exit cleanly.
    Decline,
}

/// Trait for confirming overwrite of an existing installation.
#[cfg_attr(test, mockall::automock)]
pub trait Confirmer {
    /// Decide whether to overwrite the binary at `existing`.
    ///
    /// # Errors
    ///
    /// Returns an I/O error when the confirmation channel fails.
    fn confirm_overwrite(&self, existing: &Utf8Path) -> Result<ReinstallDecision>;
}

/// Production confirmer reading from the process's terminal.
///
/// Prompts only when stdin is a terminal and neither a CI signal nor an
/// explicit `--yes` is present; otherwise installation proceeds silently
/// after a warning, matching non-interactive expectations.
#[derive(Debug, Clone, Copy)]
pub struct TerminalConfirmer {
    assume_yes: bool,
    ci: bool,
}

impl TerminalConfirmer {
    /// Create a confirmer honouring the `--yes` flag and CI detection.
    #[must_use]
    pub fn new(assume_yes: bool, ci: bool) -> Self {
        Self { assume_yes, ci }
    }
}

impl Confirmer for TerminalConfirmer {
    fn confirm_overwrite(&self, existing: &Utf8Path) -> Result<ReinstallDecision> {
        if self.assume_yes || self.ci || !std::io::stdin().is_terminal() {
            return Ok(ReinstallDecision::Proceed);
        }
        let mut stderr = std::io::stderr();
        let mut stdin = std::io::stdin().lock();
        prompt_overwrite(existing, &mut stdin, &mut stderr)
    }
}

/// Prompt for overwrite confirmation over explicit I/O channels.
///
/// Reads one line; only `y`/`yes` (case-insensitive) proceeds, anything
/// else declines. Declining is a neutral outcome, not an error.
///
/// # Errors
///
/// Returns an I/O error when the prompt cannot be written or read.
pub fn prompt_overwrite(
    existing: &Utf8Path,
    input: &mut dyn BufRead,
    output: &mut dyn Write,
) -> Result<ReinstallDecision> {
    write!(output, "{existing} already exists. Overwrite? [y/N] ")?;
    output.flush()?;
    let mut line = String::new();
    input.read_line(&mut line)?;
    let answer = line.trim().to_ascii_lowercase();
    if answer == "y" || answer == "yes" {
        Ok(ReinstallDecision::Proceed)
    } else {
        Ok(ReinstallDecision::Decline)
    }
}

/// Return true when recognized CI environment signals are present.
///
/// An empty or `false` value does not count as a signal; some shells export
/// placeholder variables.
#[must_use]
pub fn is_ci_environment() -> bool {
    CI_ENV_VARS.iter().any(|name| {
        std::env::var(name)
            .map(|value| !value.is_empty() && value != "false" && value != "0")
            .unwrap_or(false)
    })
}

/// Resolve the default install directory for this run.
///
/// Under an MSYS-style environment marker the directory relocates to the
/// user's `~/bin`, which is writable without elevation in those shells.
#[must_use]
pub fn default_install_dir() -> Utf8PathBuf {
    if std::env::var_os(MSYS_ENV_MARKER).is_some() {
        if let Ok(home) = std::env::var("HOME") {
            return Utf8PathBuf::from(home).join("bin");
        }
    }
    Utf8PathBuf::from(DEFAULT_INSTALL_DIR)
}

/// Move the extracted binary into the install directory and mark it
/// executable.
///
/// Creates the install directory recursively when missing, overwrites any
/// prior file at the destination, and falls back to copy-then-remove when a
/// direct rename crosses filesystems (the scratch directory usually lives
/// on a different mount than the install directory).
///
/// # Errors
///
/// Returns a distinct error for each failing step: directory creation, the
/// move itself, and the permission change.
pub fn install_binary(
    extracted: &std::path::Path,
    install_dir: &Utf8Path,
    dest_name: &str,
) -> Result<Utf8PathBuf> {
    std::fs::create_dir_all(install_dir.as_std_path()).map_err(|source| {
        InstallError::InstallDirCreation {
            path: install_dir.to_owned(),
            source,
        }
    })?;

    let dest = install_dir.join(dest_name);
    move_file(extracted, dest.as_std_path()).map_err(|source| InstallError::MoveFailed {
        dest: dest.clone(),
        source,
    })?;

    set_executable(dest.as_std_path()).map_err(|source| InstallError::PermissionsFailed {
        path: dest.clone(),
        source,
    })?;

    Ok(dest)
}

/// Move a file, falling back to copy-then-remove across filesystems.
fn move_file(from: &std::path::Path, to: &std::path::Path) -> std::io::Result<()> {
    match std::fs::rename(from, to) {
        Ok(()) => Ok(()),
        Err(_) => {
            std::fs::copy(from, to)?;
            std::fs::remove_file(from)?;
            Ok(())
        }
    }
}

/// Set owner, group, and other executable bits.
#[cfg(unix)]
fn set_executable(path: &std::path::Path) -> std::io::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o755))
}

/// Permission bits are not meaningful on non-Unix hosts.
#[cfg(not(unix))]
fn set_executable(_path: &std::path::Path) -> std::io::Result<()> {
    Ok(())
}

#[cfg(test)]
#[path = "install_tests.rs"]
mod tests;
