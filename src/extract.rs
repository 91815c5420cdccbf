//! Archive extraction for downloaded release assets.
//!
//! Handles both release archive formats: gzipped tar for Linux and macOS
//! assets, zip for Windows assets. Every entry path is validated before
//! unpacking to guard against path traversal (zip-slip) attacks.

use crate::platform::Platform;
use std::io::Read;
use std::path::{Component, Path};

/// The archive format of a release asset, selected by platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArchiveKind {
    /// A `.tar.gz` archive (non-Windows assets).
    TarGz,
    /// A `.zip` archive (Windows assets).
    Zip,
}

impl ArchiveKind {
    /// Select the archive kind matching a platform's release asset.
    #[must_use]
    pub const fn for_platform(platform: Platform) -> Self {
        match platform.os {
            crate::platform::Os::Windows => Self::Zip,
            crate::platform::Os::Linux | crate::platform::Os::Darwin => Self::TarGz,
        }
    }
}

/// Errors arising from archive extraction.
#[derive(Debug, thiserror::Error)]
pub enum ExtractionError {
    /// I/O error during extraction.
    #[error("extraction I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The zip archive is structurally invalid.
    #[error("zip archive error: {0}")]
    Zip(#[from] zip::result::ZipError),

    /// A path in the archive attempts to traverse outside the destination.
    #[error("path traversal detected: {path}")]
    PathTraversal {
        /// The offending path from the archive entry.
        path: String,
    },

    /// The archive contains no files.
    #[error("archive contains no files")]
    EmptyArchive,
}

/// Trait for extracting release archives, enabling test mocking.
#[cfg_attr(test, mockall::automock)]
pub trait ArchiveExtractor {
    /// Extract the archive at `archive_path` into `dest_dir`.
    ///
    /// Returns the list of filenames that were extracted.
    ///
    /// # Errors
    ///
    /// Returns [`ExtractionError::PathTraversal`] if any entry attempts to
    /// escape the destination directory, [`ExtractionError::EmptyArchive`]
    /// if no files are found, and I/O or format errors otherwise.
    fn extract(
        &self,
        kind: ArchiveKind,
        archive_path: &Path,
        dest_dir: &Path,
    ) -> Result<Vec<String>, ExtractionError>;
}

/// Default extractor backed by the `tar`/`flate2` and `zip` crates.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultExtractor;

impl ArchiveExtractor for DefaultExtractor {
    fn extract(
        &self,
        kind: ArchiveKind,
        archive_path: &Path,
        dest_dir: &Path,
    ) -> Result<Vec<String>, ExtractionError> {
        let extracted = match kind {
            ArchiveKind::TarGz => extract_tar_gz(archive_path, dest_dir)?,
            ArchiveKind::Zip => extract_zip(archive_path, dest_dir)?,
        };
        if extracted.is_empty() {
            return Err(ExtractionError::EmptyArchive);
        }
        Ok(extracted)
    }
}

/// Extract a gzipped tar archive, validating each entry path.
fn extract_tar_gz(archive_path: &Path, dest_dir: &Path) -> Result<Vec<String>, ExtractionError> {
    let file = std::fs::File::open(archive_path)?;
    let decoder = flate2::read::GzDecoder::new(file);
    let mut archive = tar::Archive::new(decoder);
    let mut extracted = Vec::new();

    for entry_result in archive.entries()? {
        let mut entry = entry_result?;
        let entry_path = entry.path()?.into_owned();

        validate_entry_path(&entry_path)?;

        let dest_path = dest_dir.join(&entry_path);
        if let Some(parent) = dest_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        entry.unpack(&dest_path)?;

        if dest_path.is_file() {
            if let Some(name) = entry_path.file_name() {
                extracted.push(name.to_string_lossy().into_owned());
            }
        }
    }

    Ok(extracted)
}

/// Extract a zip archive, validating each entry path.
fn extract_zip(archive_path: &Path, dest_dir: &Path) -> Result<Vec<String>, ExtractionError> {
    let file = std::fs::File::open(archive_path)?;
    let mut archive = zip::ZipArchive::new(file)?;
    let mut extracted = Vec::new();

    for index in 0..archive.len() {
        let mut entry = archive.by_index(index)?;
        let Some(entry_path) = entry.enclosed_name() else {
            return Err(ExtractionError::PathTraversal {
                path: entry.name().to_owned(),
            });
        };

        let dest_path = dest_dir.join(&entry_path);
        if entry.is_dir() {
            std::fs::create_dir_all(&dest_path)?;
            continue;
        }

        if let Some(parent) = dest_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let mut contents = Vec::new();
        entry.read_to_end(&mut contents)?;
        std::fs::write(&dest_path, contents)?;

        if let Some(name) = entry_path.file_name() {
            extracted.push(name.to_string_lossy().into_owned());
        }
    }

    Ok(extracted)
}

/// Validate that a tar entry path does not escape the destination directory
/// via `..` components or absolute paths.
fn validate_entry_path(path: &Path) -> Result<(), ExtractionError> {
    if path.is_absolute() {
        return Err(ExtractionError::PathTraversal {
            path: path.display().to_string(),
        });
    }
    for component in path.components() {
        if matches!(component, Component::ParentDir) {
            return Err(ExtractionError::PathTraversal {
                path: path.display().to_string(),
            });
        }
    }
    Ok(())
}
