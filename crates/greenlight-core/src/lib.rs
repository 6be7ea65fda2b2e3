// Core modules
pub mod config;
pub mod error;

// Re-export commonly used types
pub use config::{LauncherConfig, ReleaseCoordinate};
pub use error::{LauncherError, Result};
