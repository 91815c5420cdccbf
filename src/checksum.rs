//! SHA-256 verification of downloaded archives.
//!
//! Releases publish a checksums sidecar listing one `<digest>  <filename>`
//! line per asset. When the sidecar is available, the downloaded archive's
//! digest must match before extraction proceeds.

use sha2::{Digest, Sha256};
use std::fmt;
use std::io::Read;
use std::path::Path;

/// Expected length of a hex-encoded SHA-256 digest.
const DIGEST_HEX_LEN: usize = 64;

/// Errors arising from checksum verification.
#[derive(Debug, thiserror::Error)]
pub enum ChecksumError {
    /// A digest string was not 64 characters of lowercase hex.
    #[error("invalid SHA-256 digest: {reason}")]
    InvalidDigest {
        /// Description of the malformation.
        reason: String,
    },

    /// The checksums sidecar has no entry for the downloaded asset.
    #[error("checksums file has no entry for {filename}")]
    MissingEntry {
        /// The asset filename that was looked up.
        filename: String,
    },

    /// The archive digest does not match the published digest.
    #[error("checksum mismatch for {filename}: expected {expected}, got {actual}")]
    Mismatch {
        /// The asset filename that failed verification.
        filename: String,
        /// The digest recorded in the checksums file.
        expected: String,
        /// The digest computed from the downloaded archive.
        actual: String,
    },

    /// I/O error reading the archive.
    #[error("I/O error computing checksum: {0}")]
    Io(#[from] std::io::Error),
}

/// A validated hex-encoded SHA-256 digest.
///
/// # Examples
///
/// ```
/// use skiff_install::checksum::Sha256Digest;
///
/// let hex = "a".repeat(64);
/// let digest: Sha256Digest = hex.as_str().try_into().expect("valid digest");
/// assert_eq!(digest.as_str().len(), 64);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Sha256Digest(String);

impl Sha256Digest {
    /// Return the digest as a hex string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<&str> for Sha256Digest {
    type Error = ChecksumError;

    fn try_from(value: &str) -> Result<Self, ChecksumError> {
        validate_digest(value)?;
        Ok(Self(value.to_owned()))
    }
}

impl TryFrom<String> for Sha256Digest {
    type Error = ChecksumError;

    fn try_from(value: String) -> Result<Self, ChecksumError> {
        validate_digest(&value)?;
        Ok(Self(value))
    }
}

impl fmt::Display for Sha256Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Validate that `value` is a well-formed lowercase hex SHA-256 digest.
fn validate_digest(value: &str) -> Result<(), ChecksumError> {
    if value.len() != DIGEST_HEX_LEN {
        return Err(ChecksumError::InvalidDigest {
            reason: format!(
                "expected {DIGEST_HEX_LEN} hex characters, got {}",
                value.len()
            ),
        });
    }
    if let Some(bad) = value
        .chars()
        .find(|c| !c.is_ascii_hexdigit() || c.is_ascii_uppercase())
    {
        return Err(ChecksumError::InvalidDigest {
            reason: format!("unexpected character '{bad}'"),
        });
    }
    Ok(())
}

/// Compute the SHA-256 digest of the file at `path` by streaming.
///
/// # Errors
///
/// Returns [`ChecksumError::Io`] when the file cannot be read.
pub fn compute_sha256(path: &Path) -> Result<Sha256Digest, ChecksumError> {
    let mut file = std::fs::File::open(path)?;
    let mut hasher = Sha256::new();
    let mut buffer = [0u8; 8192];
    loop {
        let bytes_read = file.read(&mut buffer)?;
        if bytes_read == 0 {
            break;
        }
        hasher.update(&buffer[..bytes_read]);
    }
    let hex = format!("{:x}", hasher.finalize());
    // sha2 always produces valid 64-char lowercase hex.
    Sha256Digest::try_from(hex)
}

/// Find the published digest for `filename` in a checksums sidecar body.
///
/// Lines are `<digest>  <filename>`; unrelated and malformed lines are
/// skipped so one bad entry does not poison the whole sidecar.
///
/// # Errors
///
/// Returns [`ChecksumError::MissingEntry`] when no line names `filename`,
/// or [`ChecksumError::InvalidDigest`] when the matching digest is
/// malformed.
pub fn find_digest(checksums: &str, filename: &str) -> Result<Sha256Digest, ChecksumError> {
    for line in checksums.lines() {
        let mut fields = line.split_whitespace();
        let (Some(digest), Some(name)) = (fields.next(), fields.next()) else {
            continue;
        };
        // goreleaser writes plain names; some tools prefix binary-mode
        // entries with '*'.
        if name.trim_start_matches('*') == filename {
            return Sha256Digest::try_from(digest);
        }
    }
    Err(ChecksumError::MissingEntry {
        filename: filename.to_owned(),
    })
}

/// Verify the archive at `archive_path` against the checksums sidecar.
///
/// # Errors
///
/// Returns [`ChecksumError::Mismatch`] when digests differ, plus any lookup
/// or I/O error from the underlying steps. Verification runs before
/// extraction, so a corrupt archive never reaches the installer.
pub fn verify_archive(
    checksums: &str,
    filename: &str,
    archive_path: &Path,
) -> Result<(), ChecksumError> {
    let expected = find_digest(checksums, filename)?;
    let actual = compute_sha256(archive_path)?;
    if actual != expected {
        return Err(ChecksumError::Mismatch {
            filename: filename.to_owned(),
            expected: expected.as_str().to_owned(),
            actual: actual.as_str().to_owned(),
        });
    }
    Ok(())
}
