//! Release artifact URL construction

use greenlight_core::{LauncherError, ReleaseCoordinate, Result};
use url::Url;

use crate::install::PlatformKey;

/// Everything needed to download one release archive and to point the user
/// at the release listing when it is missing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactLocation {
    /// Archive filename (e.g. `greenlight_1.2.3_darwin_amd64.tar.gz`)
    pub file_name: String,
    pub download_url: Url,
    /// Release listing page of the repository
    pub releases_url: Url,
    pub version: String,
}

/// Archive filename: `<binary>_<version>_<os>_<arch>.tar.gz`
pub fn archive_file_name(binary_name: &str, version: &str, platform: PlatformKey) -> String {
    format!(
        "{}_{}_{}_{}.tar.gz",
        binary_name, version, platform.os, platform.arch
    )
}

/// Builds the download location for a release archive
///
/// Produces `<host>/<owner>/<name>/releases/download/v<version>/<file>`.
/// Reachability is not checked.
///
/// # Errors
///
/// Returns `InvalidUrl` if `host` does not parse or cannot carry a path
pub fn locate_artifact(
    host: &str,
    coordinate: &ReleaseCoordinate,
    binary_name: &str,
    platform: PlatformKey,
) -> Result<ArtifactLocation> {
    let base = Url::parse(host).map_err(|e| LauncherError::InvalidUrl(format!("{host}: {e}")))?;
    let file_name = archive_file_name(binary_name, &coordinate.version, platform);
    let tag = coordinate.tag();

    let mut repo_segments: Vec<&str> = coordinate
        .repository
        .split('/')
        .filter(|s| !s.is_empty())
        .collect();

    let mut releases_url = base.clone();
    repo_segments.push("releases");
    add_path_segments(&mut releases_url, &repo_segments)?;

    let mut download_url = base;
    repo_segments.extend(["download", tag.as_str(), file_name.as_str()]);
    add_path_segments(&mut download_url, &repo_segments)?;

    Ok(ArtifactLocation {
        file_name,
        download_url,
        releases_url,
        version: coordinate.version.clone(),
    })
}

/// Replaces the URL path with the given segments, percent-encoding each one
fn add_path_segments(url: &mut Url, segments: &[&str]) -> Result<()> {
    let url_for_error = url.to_string();
    url.path_segments_mut()
        .map_err(|_| LauncherError::InvalidUrl(format!("URL cannot be a base: {url_for_error}")))?
        .clear()
        .extend(segments);
    Ok(())
}
