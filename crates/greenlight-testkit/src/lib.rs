//! Test utilities for greenlight
//!
//! This crate provides shared testing utilities used across the greenlight workspace.

pub mod fixtures;

pub use fixtures::{tar_gz_with_file, tar_with_file, write_executable};

use tempfile::TempDir;

/// Creates a temporary directory within `.tmp/` at the current directory
///
/// All test temporary files end up in one gitignored location that is easy
/// to clean up manually.
///
/// # Panics
///
/// Panics if the current directory cannot be determined or `.tmp/` cannot be
/// created.
///
/// # Examples
///
/// ```rust
/// use greenlight_testkit::temp_dir_in_workspace;
///
/// let temp = temp_dir_in_workspace();
/// let file_path = temp.path().join("test.txt");
/// std::fs::write(&file_path, "test data").unwrap();
/// // Cleanup happens automatically when temp is dropped
/// ```
pub fn temp_dir_in_workspace() -> TempDir {
    try_temp_dir_in_workspace().expect("Failed to create temporary directory in .tmp/")
}

/// Alternative with Result for callers that handle errors
pub fn try_temp_dir_in_workspace() -> std::io::Result<TempDir> {
    let workspace_root = std::env::current_dir()?;
    let tmp_base = workspace_root.join(".tmp");
    std::fs::create_dir_all(&tmp_base)?;
    TempDir::new_in(&tmp_base)
}
