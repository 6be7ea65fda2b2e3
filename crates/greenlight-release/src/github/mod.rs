//! Release host interaction
//!
//! This module provides:
//! - HTTP client construction with the launcher's user agent and redirect policy
//! - Artifact URL construction from a release coordinate and platform
//! - Archive fetching with a capped redirect loop

pub mod client;
pub mod fetch;
pub mod url;

// Re-exports for convenient access
pub use client::{USER_AGENT, build_client, build_default_client};
pub use fetch::fetch_archive;
pub use self::url::{ArtifactLocation, archive_file_name, locate_artifact};
