//! Host platform resolution
//!
//! Maps raw operating-system and architecture identifiers onto the naming
//! used by published release archives (`darwin`/`linux`, `amd64`/`arm64`).

use std::fmt;

use greenlight_core::{LauncherError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Os {
    Darwin,
    Linux,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arch {
    Amd64,
    Arm64,
}

impl Os {
    /// Looks up a raw OS identifier (Rust `std::env::consts::OS` or Node-style)
    pub fn from_raw(raw: &str) -> Option<Self> {
        match raw {
            "macos" | "darwin" => Some(Os::Darwin),
            "linux" => Some(Os::Linux),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Os::Darwin => "darwin",
            Os::Linux => "linux",
        }
    }
}

impl Arch {
    /// Looks up a raw CPU identifier (Rust `std::env::consts::ARCH` or Node-style)
    pub fn from_raw(raw: &str) -> Option<Self> {
        match raw {
            "x86_64" | "x64" | "amd64" => Some(Arch::Amd64),
            "aarch64" | "arm64" => Some(Arch::Arm64),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Arch::Amd64 => "amd64",
            Arch::Arm64 => "arm64",
        }
    }
}

impl fmt::Display for Os {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for Arch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Operating system and architecture in release vocabulary
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlatformKey {
    pub os: Os,
    pub arch: Arch,
}

impl fmt::Display for PlatformKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{}", self.os, self.arch)
    }
}

/// Resolves raw identifiers into a [`PlatformKey`].
///
/// The OS is checked before the architecture, so a host that is wrong on
/// both counts reports the platform.
pub fn resolve_platform(raw_os: &str, raw_arch: &str) -> Result<PlatformKey> {
    let os = Os::from_raw(raw_os).ok_or_else(|| LauncherError::UnsupportedPlatform {
        os: raw_os.to_string(),
    })?;
    let arch = Arch::from_raw(raw_arch).ok_or_else(|| LauncherError::UnsupportedArchitecture {
        arch: raw_arch.to_string(),
    })?;
    Ok(PlatformKey { os, arch })
}

/// Resolves the platform this process runs on
pub fn detect_platform() -> Result<PlatformKey> {
    resolve_platform(std::env::consts::OS, std::env::consts::ARCH)
}
