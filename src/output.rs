//! User-facing output helpers for the installer CLI.
//!
//! Progress and warnings go to the diagnostic stream; warnings carry a
//! distinct prefix so they are never mistaken for fatal errors.

use crate::platform::Platform;
use camino::Utf8Path;
use std::io::Write;

/// Write a line to the diagnostic stream, ignoring write failures.
pub fn write_stderr_line(stderr: &mut dyn Write, message: impl std::fmt::Display) {
    if writeln!(stderr, "{message}").is_err() {
        // Best-effort logging; ignore write failures.
    }
}

/// Write a clearly marked non-fatal warning line.
pub fn warning_line(stderr: &mut dyn Write, message: impl std::fmt::Display) {
    write_stderr_line(stderr, format!("Warning: {message}"));
}

/// Format the success message after installation.
#[must_use]
pub fn success_message(installed: &Utf8Path) -> String {
    format!("Successfully installed {installed}")
}

/// Resolved run information printed in dry-run mode.
///
/// # Example
///
/// ```
/// use camino::Utf8PathBuf;
/// use skiff_install::output::InstallPlan;
/// use skiff_install::platform::Platform;
///
/// let install_dir = Utf8PathBuf::from("/usr/local/bin");
/// let plan = InstallPlan {
///     platform: Platform::from_raw("linux", "x86_64").expect("supported"),
///     tag: "v0.67.0",
///     archive_url: "https://github.com/dockyard-sh/skiff/releases/download/v0.67.0/skiff_Linux_x86_64.tar.gz",
///     install_dir: &install_dir,
/// };
/// assert!(plan.display_text().contains("Dry run"));
/// ```
#[derive(Debug)]
pub struct InstallPlan<'a> {
    /// Detected canonical platform pair.
    pub platform: Platform,
    /// Resolved release tag.
    pub tag: &'a str,
    /// Fully qualified archive download URL.
    pub archive_url: &'a str,
    /// Target install directory.
    pub install_dir: &'a Utf8Path,
}

impl InstallPlan<'_> {
    /// Format the plan for display.
    #[must_use]
    pub fn display_text(&self) -> String {
        [
            "Dry run - no files will be modified".to_owned(),
            String::new(),
            format!("Platform:    {}", self.platform),
            format!("Release tag: {}", self.tag),
            format!("Archive URL: {}", self.archive_url),
            format!("Install dir: {}", self.install_dir),
        ]
        .join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use camino::Utf8PathBuf;

    #[test]
    fn warning_lines_carry_prefix() {
        let mut out = Vec::new();
        warning_line(&mut out, "existing installation found");
        let text = String::from_utf8(out).expect("UTF-8 output");
        assert!(text.starts_with("Warning: "));
        assert!(text.contains("existing installation found"));
    }

    #[test]
    fn success_message_names_the_path() {
        let msg = success_message(Utf8Path::new("/usr/local/bin/skiff"));
        assert!(msg.contains("/usr/local/bin/skiff"));
    }

    #[test]
    fn plan_lists_all_resolved_values() {
        let install_dir = Utf8PathBuf::from("/opt/bin");
        let plan = InstallPlan {
            platform: Platform::from_raw("darwin", "arm64").expect("supported"),
            tag: "v0.67.0",
            archive_url: "https://example.test/skiff_Darwin_arm64.tar.gz",
            install_dir: &install_dir,
        };
        let text = plan.display_text();
        assert!(text.contains("Darwin_arm64"));
        assert!(text.contains("v0.67.0"));
        assert!(text.contains("/opt/bin"));
        assert!(text.contains("skiff_Darwin_arm64.tar.gz"));
    }
}
