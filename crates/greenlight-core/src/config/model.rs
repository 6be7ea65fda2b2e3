use std::path::PathBuf;
use std::time::Duration;

use super::consts;

/// Repository and version pair identifying one published release.
///
/// The version is used verbatim; it must equal the tag the archive was
/// published under, minus the leading `v`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseCoordinate {
    /// `owner/name` on the release host
    pub repository: String,
    pub version: String,
}

impl ReleaseCoordinate {
    pub fn new(repository: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            repository: repository.into(),
            version: version.into(),
        }
    }

    /// Tag the release was published under (e.g. `v1.2.3`)
    pub fn tag(&self) -> String {
        format!("v{}", self.version)
    }
}

/// Settings for one launcher invocation
#[derive(Debug, Clone)]
pub struct LauncherConfig {
    pub repository: String,
    pub version: String,
    /// Executable expected inside the archive
    pub binary_name: String,
    /// Base URL of the release host (scheme and authority)
    pub release_host: String,
    pub max_redirects: usize,
    /// `None` waits indefinitely
    pub request_timeout: Option<Duration>,
    /// Parent of the scratch directory, `None` for the OS temp directory
    pub scratch_root: Option<PathBuf>,
}

impl Default for LauncherConfig {
    fn default() -> Self {
        Self {
            repository: consts::REPOSITORY.to_string(),
            version: consts::VERSION.to_string(),
            binary_name: consts::BINARY_NAME.to_string(),
            release_host: consts::RELEASE_HOST.to_string(),
            max_redirects: consts::MAX_REDIRECTS,
            request_timeout: None,
            scratch_root: None,
        }
    }
}

impl LauncherConfig {
    pub fn coordinate(&self) -> ReleaseCoordinate {
        ReleaseCoordinate::new(&self.repository, &self.version)
    }

    pub fn with_repository(mut self, repository: impl Into<String>) -> Self {
        self.repository = repository.into();
        self
    }

    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    pub fn with_binary_name(mut self, binary_name: impl Into<String>) -> Self {
        self.binary_name = binary_name.into();
        self
    }

    pub fn with_release_host(mut self, release_host: impl Into<String>) -> Self {
        self.release_host = release_host.into();
        self
    }

    pub fn with_max_redirects(mut self, max_redirects: usize) -> Self {
        self.max_redirects = max_redirects;
        self
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = Some(timeout);
        self
    }

    pub fn with_scratch_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.scratch_root = Some(root.into());
        self
    }
}
