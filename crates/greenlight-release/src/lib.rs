//! Release download and launch for the greenlight shim.
//!
//! This crate fetches the prebuilt `greenlight` release archive matching the
//! host platform, unpacks it into a scratch directory and runs the binary
//! inside it.
//!
//! # Architecture
//!
//! - [`install`]: platform resolution and the minimal tar.gz reader
//! - [`github`]: artifact URLs, HTTP client, redirect-following fetch
//! - [`exec`]: locating and running the extracted binary
//! - [`scratch`]: the per-invocation temporary directory
//! - [`pipeline`]: the end-to-end flow
//!
//! # Launch Flow
//!
//! ```text
//! run()
//!     ↓
//! 1. Resolve platform (darwin|linux, amd64|arm64)
//!     → unsupported: error, nothing created
//!     ↓
//! 2. Build URL
//!     → {host}/{repo}/releases/download/v{version}/greenlight_{version}_{os}_{arch}.tar.gz
//!     ↓
//! 3. Create scratch dir ──────────────────────────┐
//!     ↓                                           │
//! 4. GET, following at most N redirects           │
//!     ↓                                           │ removed on
//! 5. gunzip + scan blocks, write regular files    │ every path
//!     ↓                                           │
//! 6. Check {scratch}/greenlight exists            │
//!     ↓                                           │
//! 7. Spawn with inherited stdio, wait ────────────┘
//!     ↓
//! exit code of the child
//! ```
//!
//! # Example
//!
//! ```no_run
//! use greenlight_core::LauncherConfig;
//!
//! # fn main() -> greenlight_core::Result<()> {
//! let config = LauncherConfig::default();
//! let code = greenlight_release::run(&config, std::env::args_os().skip(1))?;
//! std::process::exit(code);
//! # }
//! ```

// Core modules
pub mod exec;
pub mod github;
pub mod install;
pub mod pipeline;
pub mod scratch;

// Re-export commonly used types
pub use exec::{ExecOptions, exec_binary, locate_binary};
pub use install::{PlatformKey, ScanOutcome, detect_platform, resolve_platform};
pub use pipeline::{run, run_for_host, run_with_platform};
pub use scratch::ScratchDir;

// Type alias for convenience
pub type Result<T> = greenlight_core::Result<T>;
