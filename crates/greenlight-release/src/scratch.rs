//! Per-invocation scratch directory

use std::path::Path;

use greenlight_core::{LauncherError, Result};
use tempfile::TempDir;
use tracing::debug;

/// Uniquely named temporary directory owned by one invocation.
///
/// Removed by [`ScratchDir::release`] or, on any early return, when dropped.
/// Removal failures are never reported to the caller.
#[derive(Debug)]
pub struct ScratchDir {
    dir: TempDir,
}

impl ScratchDir {
    /// Creates `<root>/<prefix><random>`; `root` defaults to the OS temp dir
    pub fn create(prefix: &str, root: Option<&Path>) -> Result<Self> {
        let mut builder = tempfile::Builder::new();
        builder.prefix(prefix);

        let dir = match root {
            Some(root) => builder.tempdir_in(root),
            None => builder.tempdir(),
        }
        .map_err(|e| LauncherError::io("create scratch directory", e))?;

        debug!(path = %dir.path().display(), "created scratch directory");
        Ok(Self { dir })
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Deletes the directory tree, best-effort
    pub fn release(self) {
        let path = self.dir.path().to_path_buf();
        match self.dir.close() {
            Ok(()) => debug!(path = %path.display(), "removed scratch directory"),
            Err(e) => debug!(path = %path.display(), error = %e, "failed to remove scratch directory"),
        }
    }
}
