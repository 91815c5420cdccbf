//! Error types for the Skiff installer CLI.
//!
//! This module defines semantic error variants that provide actionable
//! guidance when installation fails. Variants group into the four failure
//! classes the installer distinguishes: environment preconditions, network,
//! filesystem, and post-install verification.

use crate::checksum::ChecksumError;
use crate::download::DownloadError;
use crate::extract::ExtractionError;
use crate::release::ResolveError;
use camino::Utf8PathBuf;
use thiserror::Error;

/// Errors that can occur during the installation process.
#[derive(Debug, Error)]
pub enum InstallError {
    /// The host CPU architecture is not in the supported set.
    #[error("unsupported architecture: {value} (supported: x86_64, arm64)")]
    UnsupportedArch {
        /// The raw architecture identifier reported by the host.
        value: String,
    },

    /// The host operating system is not in the supported set.
    #[error("unsupported operating system: {value} (supported: Linux, Darwin, Windows)")]
    UnsupportedOs {
        /// The raw OS identifier reported by the host.
        value: String,
    },

    /// Installation into the system directory requires elevated privileges.
    #[error("installing to {install_dir} requires elevated privileges; re-run with sudo")]
    MissingPrivileges {
        /// The system install directory that needs root access.
        install_dir: Utf8PathBuf,
    },

    /// Release tag resolution failed.
    #[error(transparent)]
    Resolve(#[from] ResolveError),

    /// Archive or checksum download failed.
    #[error(transparent)]
    Download(#[from] DownloadError),

    /// Downloaded archive failed checksum verification.
    #[error(transparent)]
    Checksum(#[from] ChecksumError),

    /// Archive extraction failed.
    #[error(transparent)]
    Extraction(#[from] ExtractionError),

    /// The archive did not contain the expected binary entry.
    #[error("archive did not contain the expected binary {name}")]
    BinaryNotInArchive {
        /// The binary filename that was expected inside the archive.
        name: String,
    },

    /// The install directory could not be created.
    #[error("failed to create install directory {path}: {source}")]
    InstallDirCreation {
        /// The directory that could not be created.
        path: Utf8PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Moving the extracted binary into the install directory failed.
    #[error("failed to move binary into {dest}: {source}")]
    MoveFailed {
        /// The destination path of the attempted move.
        dest: Utf8PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Setting executable permission bits failed.
    #[error("failed to set executable permissions on {path}: {source}")]
    PermissionsFailed {
        /// The file whose permissions could not be changed.
        path: Utf8PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The installed binary is missing after installation.
    #[error("verification failed: {path} does not exist")]
    BinaryMissing {
        /// The expected location of the installed binary.
        path: Utf8PathBuf,
    },

    /// The installed binary lacks the executable bit.
    #[error("verification failed: {path} is not executable")]
    NotExecutable {
        /// The installed binary path.
        path: Utf8PathBuf,
    },

    /// The probe invocation of the installed binary failed.
    #[error("verification probe of {binary} failed: {details}")]
    ProbeFailed {
        /// Name of the probed binary.
        binary: String,
        /// Raw diagnostic output from the failed probe.
        details: String,
    },

    /// An I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias using [`InstallError`].
pub type Result<T> = std::result::Result<T, InstallError>;
