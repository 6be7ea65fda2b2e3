pub mod extract;
pub mod platform;

// Re-export for convenience
pub use extract::{ArchiveEntry, ScanOutcome, extract_tar, extract_tar_gz, parse_header, parse_octal};
pub use platform::{Arch, Os, PlatformKey, detect_platform, resolve_platform};
