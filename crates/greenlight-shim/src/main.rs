mod logging;

use std::io::Write;

use greenlight_core::{LauncherConfig, Result};

fn main() {
    logging::init();

    let config = LauncherConfig::default();
    tracing::debug!(
        repository = %config.repository,
        version = %config.version,
        "launching"
    );

    let result = greenlight_release::run(&config, std::env::args_os().skip(1));
    std::process::exit(exit_status(result, &mut std::io::stderr()));
}

/// Maps the launch result to the process exit status
///
/// The child's code passes through untouched. A launcher failure is
/// reported as one line on `stderr`.
fn exit_status(result: Result<i32>, stderr: &mut impl Write) -> i32 {
    match result {
        Ok(code) => code,
        Err(e) => {
            let _ = writeln!(stderr, "{}", e);
            e.exit_code()
        }
    }
}
