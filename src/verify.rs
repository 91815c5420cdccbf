//! Post-install verification of the installed binary.
//!
//! Checks run in order: the file exists, it carries the executable bit, its
//! base name resolves on `PATH` (a warning only; install success does not
//! depend on the caller's shell configuration), and a bounded probe
//! invocation succeeds. Usage or help output from the probe counts as a
//! success signal; any other failure is fatal with the raw output surfaced.

use crate::error::{InstallError, Result};
use crate::output::{warning_line, write_stderr_line};
use camino::Utf8Path;
use log::debug;
use std::io::{Read, Write};
use std::process::{Command, Stdio};
use std::time::Duration;
use wait_timeout::ChildExt;

/// Bounded wait for the verification probe.
const PROBE_TIMEOUT: Duration = Duration::from_secs(10);

/// Markers in probe output that indicate a working binary even when the
/// probe exits non-zero (some tools print usage and exit 1 or 2).
const USAGE_MARKERS: &[&str] = &["usage", "help"];

/// Verify the installed binary.
///
/// `binary_name` is the bare name used for the `PATH` lookup; `quiet`
/// suppresses the non-fatal warning output.
///
/// # Errors
///
/// Returns a verification error when the binary is missing, not executable,
/// or fails its probe invocation.
pub fn verify_install(
    installed: &Utf8Path,
    binary_name: &str,
    quiet: bool,
    stderr: &mut dyn Write,
) -> Result<()> {
    if !installed.as_std_path().is_file() {
        return Err(InstallError::BinaryMissing {
            path: installed.to_owned(),
        });
    }

    check_executable(installed)?;

    if which::which(binary_name).is_err() {
        if !quiet {
            warning_line(
                stderr,
                format!(
                    "{binary_name} installed to {installed} but is not on your PATH; \
                     add {} to PATH to run it by name",
                    installed.parent().unwrap_or(installed)
                ),
            );
        }
    } else {
        debug!("{binary_name} resolves on PATH");
    }

    probe(installed, binary_name)?;

    if !quiet {
        write_stderr_line(stderr, format!("Verified: {installed} runs correctly."));
    }
    Ok(())
}

/// Check the executable permission bits.
#[cfg(unix)]
fn check_executable(installed: &Utf8Path) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;
    let mode = std::fs::metadata(installed.as_std_path())?.permissions().mode();
    if mode & 0o111 == 0 {
        return Err(InstallError::NotExecutable {
            path: installed.to_owned(),
        });
    }
    Ok(())
}

/// Executable bits do not exist on non-Unix filesystems.
#[cfg(not(unix))]
fn check_executable(_installed: &Utf8Path) -> Result<()> {
    Ok(())
}

/// Invoke the binary with a version probe and classify the outcome.
fn probe(installed: &Utf8Path, binary_name: &str) -> Result<()> {
    let mut child = Command::new(installed.as_std_path())
        .arg("--version")
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|e| InstallError::ProbeFailed {
            binary: binary_name.to_owned(),
            details: format!("failed to invoke: {e}"),
        })?;

    let Some(status) = child.wait_timeout(PROBE_TIMEOUT)? else {
        child.kill()?;
        child.wait()?;
        return Err(InstallError::ProbeFailed {
            binary: binary_name.to_owned(),
            details: format!("probe did not finish within {}s", PROBE_TIMEOUT.as_secs()),
        });
    };

    let stdout = read_pipe(child.stdout.take());
    let stderr = read_pipe(child.stderr.take());

    if status.success() || is_usage_output(&stdout) || is_usage_output(&stderr) {
        debug!("probe of {binary_name} succeeded with {status}");
        return Ok(());
    }

    let details = if stderr.trim().is_empty() {
        format!("exited with {status}")
    } else {
        format!("exited with {status}: {}", stderr.trim())
    };
    Err(InstallError::ProbeFailed {
        binary: binary_name.to_owned(),
        details,
    })
}

/// Drain a captured pipe; probe output is small by construction.
fn read_pipe(pipe: Option<impl Read>) -> String {
    let mut text = String::new();
    if let Some(mut pipe) = pipe {
        // Best-effort read; undecodable output just yields an empty string.
        let _ = pipe.read_to_string(&mut text);
    }
    text
}

/// Whether output looks like a usage or help banner.
fn is_usage_output(output: &str) -> bool {
    let lowered = output.to_ascii_lowercase();
    USAGE_MARKERS.iter().any(|marker| lowered.contains(marker))
}
