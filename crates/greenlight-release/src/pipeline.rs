//! End-to-end launch: resolve, download, extract, run, clean up

use std::ffi::{OsStr, OsString};
use std::path::Path;

use greenlight_core::config::consts::SCRATCH_PREFIX;
use greenlight_core::{LauncherConfig, Result};
use tracing::debug;

use crate::exec::{ExecOptions, exec_binary, locate_binary};
use crate::github::fetch::network_error;
use crate::github::{ArtifactLocation, build_client, fetch_archive, locate_artifact};
use crate::install::{PlatformKey, extract_tar_gz, resolve_platform};
use crate::scratch::ScratchDir;

/// Downloads the release for the host platform and runs it with `args`
///
/// Returns the child's exit code. Platform resolution happens first, so an
/// unsupported host fails before any directory is created or request made.
pub fn run<I, S>(config: &LauncherConfig, args: I) -> Result<i32>
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    run_for_host(config, std::env::consts::OS, std::env::consts::ARCH, args)
}

/// Same as [`run`] for the given raw OS and architecture names
///
/// Names are looked up the way [`resolve_platform`] does; an unsupported
/// pair fails without touching the filesystem or the network.
pub fn run_for_host<I, S>(config: &LauncherConfig, raw_os: &str, raw_arch: &str, args: I) -> Result<i32>
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    let platform = resolve_platform(raw_os, raw_arch)?;
    run_with_platform(config, platform, args)
}

/// Same as [`run`] for an already-resolved platform
pub fn run_with_platform<I, S>(config: &LauncherConfig, platform: PlatformKey, args: I) -> Result<i32>
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    let args: Vec<OsString> = args
        .into_iter()
        .map(|arg| arg.as_ref().to_os_string())
        .collect();

    let location = locate_artifact(
        &config.release_host,
        &config.coordinate(),
        &config.binary_name,
        platform,
    )?;
    debug!(
        %platform,
        file = %location.file_name,
        url = %location.download_url,
        "resolved release archive"
    );

    let scratch = ScratchDir::create(SCRATCH_PREFIX, config.scratch_root.as_deref())?;
    let result = launch_in(config, &location, scratch.path(), args);
    scratch.release();
    result
}

fn launch_in(
    config: &LauncherConfig,
    location: &ArtifactLocation,
    dir: &Path,
    args: Vec<OsString>,
) -> Result<i32> {
    let client = build_client(config.request_timeout).map_err(network_error)?;
    let response = fetch_archive(&client, location, config.max_redirects)?;

    let outcome = extract_tar_gz(response, dir)?;
    debug!(?outcome, "archive scan finished");

    let binary = locate_binary(dir, &config.binary_name)?;
    exec_binary(ExecOptions {
        binary,
        binary_name: config.binary_name.clone(),
        args,
    })
}
