//! Skiff installer library.
//!
//! This crate implements the installation flow for prebuilt Skiff release
//! binaries: detect the host platform, resolve a release tag, download the
//! matching archive into a run-scoped scratch directory, verify it against
//! the published checksums, extract it, move the binary onto the system
//! path, and verify the result. It is used by the `skiff-install` CLI and
//! can be consumed programmatically for testing or custom flows.
//!
//! # Modules
//!
//! - [`checksum`] - SHA-256 verification of downloaded archives
//! - [`cli`] - Command-line argument definitions
//! - [`config`] - Run configuration assembled from CLI flags and environment
//! - [`download`] - Asset URL construction and HTTPS download
//! - [`error`] - Semantic error types with recovery hints
//! - [`extract`] - Tar and zip archive extraction
//! - [`install`] - Confirmation, directory preparation, move, permissions
//! - [`output`] - Progress, warning, and dry-run formatting
//! - [`pipeline`] - Linear installation orchestration
//! - [`platform`] - Canonical platform pair detection
//! - [`privilege`] - Elevated-privilege precondition
//! - [`release`] - Release tag resolution
//! - [`scratch`] - Run-scoped scratch directory
//! - [`verify`] - Post-install verification

pub mod checksum;
pub mod cli;
pub mod config;
pub mod download;
pub mod error;
pub mod extract;
pub mod install;
pub mod output;
pub mod pipeline;
pub mod platform;
pub mod privilege;
pub mod release;
pub mod scratch;
pub mod verify;
