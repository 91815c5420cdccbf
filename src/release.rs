//! Release tag resolution.
//!
//! A release tag is an opaque token used verbatim in download URLs; it is
//! never parsed as a semantic version. Resolution either queries the GitHub
//! latest-release endpoint or uses the tag baked into this binary at publish
//! time, selected by the caller's mode flag.

use crate::download::http_agent;
use serde::Deserialize;
use std::fmt;

/// The release tag baked in at publish time.
///
/// Release automation rewrites this constant when a new release is tagged,
/// so a distributed binary installs its own release without a network
/// round-trip.
pub const BAKED_RELEASE_TAG: &str = "v0.67.0";

/// Errors arising from release tag resolution.
#[derive(Debug, thiserror::Error)]
pub enum ResolveError {
    /// The latest-release request failed.
    #[error("release lookup failed for {url}: {reason}")]
    Http {
        /// The endpoint that was queried.
        url: String,
        /// A human-readable description of the failure.
        reason: String,
    },

    /// The release response could not be decoded.
    #[error("release response could not be decoded: {0}")]
    Decode(#[from] serde_json::Error),

    /// The resolved tag was empty or whitespace-only.
    #[error("release resolved to an empty tag")]
    EmptyTag,
}

/// A validated, opaque release tag.
///
/// Construction rejects empty and whitespace-only values so an unusable tag
/// aborts the run before any download is attempted.
///
/// # Examples
///
/// ```
/// use skiff_install::release::ReleaseTag;
///
/// let tag: ReleaseTag = "v0.67.0".try_into().expect("valid tag");
/// assert_eq!(tag.as_str(), "v0.67.0");
/// assert!(ReleaseTag::try_from("").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ReleaseTag(String);

impl ReleaseTag {
    /// Return the tag as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume the wrapper and return the inner string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl TryFrom<&str> for ReleaseTag {
    type Error = ResolveError;

    fn try_from(value: &str) -> Result<Self, ResolveError> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ResolveError::EmptyTag);
        }
        Ok(Self(trimmed.to_owned()))
    }
}

impl TryFrom<String> for ReleaseTag {
    type Error = ResolveError;

    fn try_from(value: String) -> Result<Self, ResolveError> {
        Self::try_from(value.as_str())
    }
}

impl AsRef<str> for ReleaseTag {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ReleaseTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Trait for resolving the release tag to install.
///
/// Abstraction allows tests to resolve tags without network access.
#[cfg_attr(test, mockall::automock)]
pub trait ReleaseResolver {
    /// Resolve the target release tag.
    ///
    /// # Errors
    ///
    /// Returns an error when the lookup fails or produces an unusable tag.
    /// Resolution failures are fatal and occur before any download attempt.
    fn resolve(&self) -> Result<ReleaseTag, ResolveError>;
}

/// Subset of the GitHub latest-release response the installer consumes.
#[derive(Debug, Deserialize)]
struct LatestRelease {
    /// The tag name associated with the latest published release.
    tag_name: String,
}

/// Resolver that queries the GitHub latest-release endpoint.
#[derive(Debug, Clone)]
pub struct LatestReleaseResolver {
    repo: String,
}

impl LatestReleaseResolver {
    /// Create a resolver for the given `owner/name` repository.
    #[must_use]
    pub fn new(repo: impl Into<String>) -> Self {
        Self { repo: repo.into() }
    }

    /// Construct the latest-release API endpoint URL.
    ///
    /// # Examples
    ///
    /// ```
    /// use skiff_install::release::LatestReleaseResolver;
    ///
    /// let resolver = LatestReleaseResolver::new("dockyard-sh/skiff");
    /// assert_eq!(
    ///     resolver.api_url(),
    ///     "https://api.github.com/repos/dockyard-sh/skiff/releases/latest"
    /// );
    /// ```
    #[must_use]
    pub fn api_url(&self) -> String {
        format!("https://api.github.com/repos/{}/releases/latest", self.repo)
    }
}

impl ReleaseResolver for LatestReleaseResolver {
    fn resolve(&self) -> Result<ReleaseTag, ResolveError> {
        let url = self.api_url();
        let response = http_agent()
            .get(&url)
            .header("Accept", "application/vnd.github+json")
            .call()
            .map_err(|e| ResolveError::Http {
                url: url.clone(),
                reason: e.to_string(),
            })?;
        let body = response
            .into_body()
            .read_to_string()
            .map_err(|e| ResolveError::Http {
                url,
                reason: e.to_string(),
            })?;
        parse_latest_release(&body)
    }
}

/// Decode a latest-release response body into a validated tag.
///
/// This is a structured decode of the JSON payload rather than a text-pattern
/// extraction, so malformed responses fail with a decode error instead of
/// silently producing garbage tags.
///
/// # Errors
///
/// Returns a decode error for malformed JSON and [`ResolveError::EmptyTag`]
/// when the tag field is present but unusable.
pub fn parse_latest_release(body: &str) -> Result<ReleaseTag, ResolveError> {
    let release: LatestRelease = serde_json::from_str(body)?;
    ReleaseTag::try_from(release.tag_name)
}

/// Resolver that returns a fixed tag without any network call.
///
/// Used both for the baked-in publish-time tag and for caller-pinned tags.
#[derive(Debug, Clone)]
pub struct PinnedReleaseResolver {
    tag: String,
}

impl PinnedReleaseResolver {
    /// Create a resolver pinned to the given tag.
    #[must_use]
    pub fn new(tag: impl Into<String>) -> Self {
        Self { tag: tag.into() }
    }

    /// Create a resolver for the tag baked in at publish time.
    #[must_use]
    pub fn baked() -> Self {
        Self::new(BAKED_RELEASE_TAG)
    }
}

impl ReleaseResolver for PinnedReleaseResolver {
    fn resolve(&self) -> Result<ReleaseTag, ResolveError> {
        ReleaseTag::try_from(self.tag.as_str())
    }
}
