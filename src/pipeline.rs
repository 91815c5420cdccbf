//! Linear installation pipeline.
//!
//! Drives the strictly sequential flow: platform detection happens during
//! configuration, then resolver → existing-install confirmation → fetch →
//! checksum verification → extraction → install → verify. Collaborators are
//! injected as trait objects so the flow is testable without network access
//! or real release archives.

use crate::checksum::verify_archive;
use crate::config::RunConfig;
use crate::download::{
    AssetDownloader, BINARY_NAME, DownloadError, archive_filename, asset_url, checksums_filename,
};
use crate::error::{InstallError, Result};
use crate::extract::{ArchiveExtractor, ArchiveKind};
use crate::install::{Confirmer, ReinstallDecision, install_binary};
use crate::output::{InstallPlan, success_message, warning_line, write_stderr_line};
use crate::privilege::require_root;
use crate::release::ReleaseResolver;
use crate::scratch::ScratchDir;
use crate::verify::verify_install;
use camino::Utf8PathBuf;
use log::{debug, info};
use std::io::Write;

/// The terminal state of an installer run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    /// The binary was installed and verified.
    Installed {
        /// Final location of the installed binary.
        path: Utf8PathBuf,
    },
    /// The caller declined to overwrite an existing installation.
    ///
    /// This is a neutral outcome and maps to a zero exit status.
    Declined,
    /// Dry-run mode printed the plan without side effects.
    DryRun,
}

/// Execute the installation pipeline.
///
/// # Errors
///
/// Every failure is fatal and immediate; there is no retry or partial
/// success. The scratch directory is removed on all paths, including error
/// returns, via its drop guard.
pub fn run_pipeline(
    config: &RunConfig,
    resolver: &dyn ReleaseResolver,
    downloader: &dyn AssetDownloader,
    extractor: &dyn ArchiveExtractor,
    confirmer: &dyn Confirmer,
    stderr: &mut dyn Write,
) -> Result<RunOutcome> {
    if config.requires_elevation() && !config.dry_run {
        require_root(&config.install_dir)?;
    }

    let tag = resolver.resolve()?;
    info!("resolved release tag {tag}");

    let filename = archive_filename(config.platform);
    let url = asset_url(&tag, &filename);

    if config.dry_run {
        let plan = InstallPlan {
            platform: config.platform,
            tag: tag.as_str(),
            archive_url: &url,
            install_dir: &config.install_dir,
        };
        write_stderr_line(stderr, plan.display_text());
        return Ok(RunOutcome::DryRun);
    }

    let installed_path = config.installed_path();
    if installed_path.as_std_path().exists() {
        warning_line(
            stderr,
            format!("existing installation found at {installed_path}"),
        );
        if confirmer.confirm_overwrite(&installed_path)? == ReinstallDecision::Decline {
            write_stderr_line(stderr, "Keeping the existing installation.");
            return Ok(RunOutcome::Declined);
        }
    }

    let scratch = ScratchDir::new()?;
    let archive_path = scratch.path().join(&filename);

    if !config.quiet {
        write_stderr_line(stderr, format!("Downloading {url}..."));
    }
    downloader.download_archive(&url, &archive_path)?;

    verify_download(config, downloader, &tag, &filename, &archive_path, stderr)?;

    let unpack_dir = scratch.path().join("unpacked");
    std::fs::create_dir_all(&unpack_dir)?;
    if !config.quiet {
        write_stderr_line(stderr, "Extracting archive...");
    }
    let kind = ArchiveKind::for_platform(config.platform);
    let entries = extractor.extract(kind, &archive_path, &unpack_dir)?;
    debug!("extracted entries: {entries:?}");

    let binary_filename = config.binary_filename();
    let staged_binary = unpack_dir.join(&binary_filename);
    if !staged_binary.is_file() {
        return Err(InstallError::BinaryNotInArchive {
            name: binary_filename,
        });
    }

    let installed = install_binary(&staged_binary, &config.install_dir, &binary_filename)?;

    // The happy path reports cleanup problems; error paths clean up via the
    // drop guard.
    if let Err(e) = scratch.cleanup() {
        warning_line(stderr, format!("could not remove scratch directory: {e}"));
    }

    verify_install(&installed, BINARY_NAME, config.quiet, stderr)?;

    if !config.quiet {
        write_stderr_line(stderr, success_message(&installed));
    }
    Ok(RunOutcome::Installed { path: installed })
}

/// Verify the downloaded archive against the release's checksums sidecar.
///
/// A release without a published sidecar downgrades to a warning; any other
/// sidecar failure, and any digest mismatch, is fatal.
fn verify_download(
    config: &RunConfig,
    downloader: &dyn AssetDownloader,
    tag: &crate::release::ReleaseTag,
    filename: &str,
    archive_path: &std::path::Path,
    stderr: &mut dyn Write,
) -> Result<()> {
    let sidecar_url = asset_url(tag, &checksums_filename(tag));
    match downloader.download_text(&sidecar_url) {
        Ok(checksums) => {
            verify_archive(&checksums, filename, archive_path)?;
            if !config.quiet {
                write_stderr_line(stderr, "Checksum verified.");
            }
            Ok(())
        }
        Err(DownloadError::NotFound { .. }) => {
            warning_line(
                stderr,
                format!("release {tag} publishes no checksums; skipping verification"),
            );
            Ok(())
        }
        Err(other) => Err(other.into()),
    }
}

#[cfg(test)]
#[path = "pipeline_tests.rs"]
mod tests;
