//! Release asset download over HTTPS.
//!
//! Provides deterministic asset URL construction and a trait-based download
//! abstraction so tests exercise the pipeline without network access. A
//! single failed attempt is terminal; there is no retry logic.

use crate::platform::Platform;
use crate::release::ReleaseTag;
use std::path::Path;
use std::sync::OnceLock;
use std::time::Duration;

/// The GitHub repository `owner/name` for URL construction.
pub const GITHUB_REPO: &str = "dockyard-sh/skiff";

/// Base name of the installed binary and of every release asset.
pub const BINARY_NAME: &str = "skiff";

/// Network timeout covering each download request.
const DOWNLOAD_TIMEOUT: Duration = Duration::from_secs(30);

/// Errors arising from asset download operations.
#[derive(Debug, thiserror::Error)]
pub enum DownloadError {
    /// HTTP request failed or returned a non-success status.
    #[error("download failed for {url}: {reason}")]
    HttpError {
        /// The URL that was requested.
        url: String,
        /// A human-readable description of the failure.
        reason: String,
    },

    /// The requested asset was not found (HTTP 404).
    #[error("release asset not found: {url}")]
    NotFound {
        /// The URL that returned 404.
        url: String,
    },

    /// I/O error writing the downloaded file.
    #[error("I/O error writing download: {0}")]
    Io(#[from] std::io::Error),
}

/// Return the release asset filename for a platform, e.g.
/// `skiff_Linux_x86_64.tar.gz`.
#[must_use]
pub fn archive_filename(platform: Platform) -> String {
    format!("{BINARY_NAME}_{platform}{}", platform.archive_ext())
}

/// Return the checksums sidecar filename for a release tag.
#[must_use]
pub fn checksums_filename(tag: &ReleaseTag) -> String {
    format!("{BINARY_NAME}_{tag}_checksums.txt")
}

/// Construct the versioned download URL for a release asset.
///
/// The URL is fully determined by repository identity, tag, and filename, so
/// a fixed version and platform always produce the same URL.
///
/// # Examples
///
/// ```
/// use skiff_install::download::asset_url;
/// use skiff_install::release::ReleaseTag;
///
/// let tag: ReleaseTag = "v0.67.0".try_into().expect("valid tag");
/// let url = asset_url(&tag, "skiff_Linux_x86_64.tar.gz");
/// assert_eq!(
///     url,
///     "https://github.com/dockyard-sh/skiff/releases/download/v0.67.0/skiff_Linux_x86_64.tar.gz"
/// );
/// ```
#[must_use]
pub fn asset_url(tag: &ReleaseTag, filename: &str) -> String {
    format!("https://github.com/{GITHUB_REPO}/releases/download/{tag}/{filename}")
}

/// Trait for downloading release assets, enabling test injection.
#[cfg_attr(test, mockall::automock)]
pub trait AssetDownloader {
    /// Download the asset at `url` into the file at `dest`.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails, the server responds with a
    /// non-success status, or the file cannot be written.
    fn download_archive(&self, url: &str, dest: &Path) -> Result<(), DownloadError>;

    /// Download the asset at `url` and return its body as text.
    ///
    /// Used for the small checksums sidecar.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the body is not readable.
    fn download_text(&self, url: &str) -> Result<String, DownloadError>;
}

/// HTTP-based downloader using `ureq`.
///
/// Follows redirects (the GitHub release download endpoint redirects to
/// object storage) and enforces a bounded request timeout.
#[derive(Debug, Clone, Copy, Default)]
pub struct HttpDownloader;

impl AssetDownloader for HttpDownloader {
    fn download_archive(&self, url: &str, dest: &Path) -> Result<(), DownloadError> {
        let response = http_agent()
            .get(url)
            .call()
            .map_err(|e| map_ureq_error(url, &e))?;
        let mut file = std::fs::File::create(dest)?;
        std::io::copy(&mut response.into_body().as_reader(), &mut file)
            .map_err(DownloadError::Io)?;
        Ok(())
    }

    fn download_text(&self, url: &str) -> Result<String, DownloadError> {
        let response = http_agent()
            .get(url)
            .call()
            .map_err(|e| map_ureq_error(url, &e))?;
        response
            .into_body()
            .read_to_string()
            .map_err(|e| DownloadError::HttpError {
                url: url.to_owned(),
                reason: e.to_string(),
            })
    }
}

/// Shared `ureq` agent with request timeout configuration.
pub(crate) fn http_agent() -> &'static ureq::Agent {
    static AGENT: OnceLock<ureq::Agent> = OnceLock::new();
    AGENT.get_or_init(|| {
        let config = ureq::Agent::config_builder()
            .timeout_global(Some(DOWNLOAD_TIMEOUT))
            .build();
        ureq::Agent::new_with_config(config)
    })
}

/// Map a ureq error to a [`DownloadError`].
fn map_ureq_error(url: &str, err: &ureq::Error) -> DownloadError {
    match err {
        ureq::Error::StatusCode(404) => DownloadError::NotFound {
            url: url.to_owned(),
        },
        other => DownloadError::HttpError {
            url: url.to_owned(),
            reason: other.to_string(),
        },
    }
}
