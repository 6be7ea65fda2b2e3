use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LauncherError {
    // Platform errors
    #[error("Unsupported platform: {os}. Greenlight supports macOS and Linux.")]
    UnsupportedPlatform { os: String },

    #[error("Unsupported architecture: {arch}. Greenlight supports x64 and arm64.")]
    UnsupportedArchitecture { arch: String },

    // Download errors
    #[error("Invalid release URL: {0}")]
    InvalidUrl(String),

    #[error("Download failed (HTTP {status}). Make sure v{version} exists at {releases_url}")]
    HttpStatus {
        status: u16,
        version: String,
        releases_url: String,
    },

    #[error("Download failed: more than {max} redirects while fetching {url}")]
    TooManyRedirects { max: usize, url: String },

    #[error("{0}")]
    Network(String),

    // Archive errors
    #[error("Failed to decompress archive: {0}")]
    Decompress(#[source] std::io::Error),

    #[error(
        "Archive entry '{name}' is truncated: declared {declared} bytes, {available} available"
    )]
    TruncatedEntry {
        name: String,
        declared: u64,
        available: u64,
    },

    #[error("I/O error during {operation}: {source}")]
    Io {
        operation: String,
        #[source]
        source: std::io::Error,
    },

    // Launch errors
    #[error("Failed to extract {binary_name} binary from archive.")]
    ExtractionIncomplete { binary_name: String, path: PathBuf },

    #[error("Failed to run {binary_name}: {source}")]
    Spawn {
        binary_name: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{binary_name} failed while running: {source}")]
    ChildRuntime {
        binary_name: String,
        #[source]
        source: std::io::Error,
    },
}

impl LauncherError {
    pub fn io(operation: impl Into<String>, source: std::io::Error) -> Self {
        LauncherError::Io {
            operation: operation.into(),
            source,
        }
    }

    /// Process exit status reported for this failure
    pub fn exit_code(&self) -> i32 {
        1
    }
}

pub type Result<T> = std::result::Result<T, LauncherError>;
