//! Values baked into the launcher at build time

/// Release repository used when `GREENLIGHT_REPOSITORY` is not set at build time
pub const DEFAULT_REPOSITORY: &str = "atlantic-blue/greenlight";

/// Name of the executable shipped inside every release archive
pub const BINARY_NAME: &str = "greenlight";

/// Host serving release downloads
pub const RELEASE_HOST: &str = "https://github.com";

/// Maximum number of redirect hops followed for one download
pub const MAX_REDIRECTS: usize = 10;

/// Prefix of the per-invocation scratch directory
pub const SCRATCH_PREFIX: &str = "greenlight-";

/// Pinned release version.
///
/// Packaging sets `GREENLIGHT_VERSION` to the published tag (without `v`);
/// otherwise the launcher crate's own version is used.
pub const VERSION: &str = match option_env!("GREENLIGHT_VERSION") {
    Some(version) => version,
    None => env!("CARGO_PKG_VERSION"),
};

/// Repository the archive is published under
pub const REPOSITORY: &str = match option_env!("GREENLIGHT_REPOSITORY") {
    Some(repository) => repository,
    None => DEFAULT_REPOSITORY,
};
