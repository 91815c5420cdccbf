//! Elevated-privilege precondition for system directory installs.

use crate::error::{InstallError, Result};
use camino::Utf8Path;

/// Require effective root when installing into the system directory.
///
/// The check runs before any download so a doomed run fails immediately.
/// Callers skip it for user-chosen directories and on the Windows branch,
/// where ordinary filesystem errors are the authority instead.
///
/// # Errors
///
/// Returns [`InstallError::MissingPrivileges`] when the process is not
/// running as root.
pub fn require_root(install_dir: &Utf8Path) -> Result<()> {
    if is_elevated() {
        Ok(())
    } else {
        Err(InstallError::MissingPrivileges {
            install_dir: install_dir.to_owned(),
        })
    }
}

/// Whether the process has effective root privileges.
#[cfg(unix)]
#[must_use]
pub fn is_elevated() -> bool {
    // geteuid cannot fail; it reads the process credential.
    unsafe { libc::geteuid() == 0 }
}

/// Non-Unix hosts have no euid; treat the process as sufficiently
/// privileged and let filesystem errors surface any real restriction.
#[cfg(not(unix))]
#[must_use]
pub fn is_elevated() -> bool {
    true
}
