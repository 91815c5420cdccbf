//! Run-scoped scratch directory for staging downloads.
//!
//! The scratch directory is exclusively owned by one installer run and is
//! removed on every exit path: normal completion via [`ScratchDir::cleanup`],
//! and error returns or panic unwinds via `Drop`. A half-downloaded or
//! half-extracted archive therefore never survives the process.

use std::io;
use std::path::Path;
use tempfile::TempDir;

/// Prefix for scratch directory names, keeping leftovers identifiable if the
/// process is killed before destructors can run.
const SCRATCH_PREFIX: &str = "skiff-install-";

/// An exclusively owned, process-lifetime temporary directory.
///
/// # Examples
///
/// ```
/// use skiff_install::scratch::ScratchDir;
///
/// let scratch = ScratchDir::new().expect("scratch dir");
/// let staged = scratch.path().join("archive.tar.gz");
/// std::fs::write(&staged, b"payload").expect("write");
/// scratch.cleanup().expect("cleanup");
/// ```
#[derive(Debug)]
pub struct ScratchDir {
    inner: TempDir,
}

impl ScratchDir {
    /// Create a fresh, uniquely named scratch directory.
    ///
    /// # Errors
    ///
    /// Returns the underlying I/O error when the directory cannot be created.
    pub fn new() -> io::Result<Self> {
        let inner = tempfile::Builder::new().prefix(SCRATCH_PREFIX).tempdir()?;
        Ok(Self { inner })
    }

    /// Return the scratch directory path.
    #[must_use]
    pub fn path(&self) -> &Path {
        self.inner.path()
    }

    /// Remove the scratch directory, surfacing removal errors.
    ///
    /// Dropping the value removes the directory too, but silently; the
    /// happy path calls this to report cleanup problems.
    ///
    /// # Errors
    ///
    /// Returns the underlying I/O error when removal fails.
    pub fn cleanup(self) -> io::Result<()> {
        self.inner.close()
    }
}
