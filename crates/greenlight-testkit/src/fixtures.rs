//! Archive and executable fixtures
//!
//! Archives are produced with the `tar` crate so tests exercise the launcher
//! against the same layout a real release pipeline emits.

use std::fs;
use std::path::{Path, PathBuf};

use flate2::Compression;
use flate2::write::GzEncoder;

/// Builds an uncompressed tar archive holding one regular file
pub fn tar_with_file(name: &str, content: &[u8]) -> Vec<u8> {
    let mut builder = tar::Builder::new(Vec::new());
    append_file(&mut builder, name, content);
    builder.into_inner().expect("Failed to finish tar archive")
}

/// Builds a gzip-compressed tar archive holding one regular file
pub fn tar_gz_with_file(name: &str, content: &[u8]) -> Vec<u8> {
    let encoder = GzEncoder::new(Vec::new(), Compression::default());
    let mut builder = tar::Builder::new(encoder);
    append_file(&mut builder, name, content);
    builder
        .into_inner()
        .expect("Failed to finish tar archive")
        .finish()
        .expect("Failed to finish gzip stream")
}

fn append_file<W: std::io::Write>(builder: &mut tar::Builder<W>, name: &str, content: &[u8]) {
    let mut header = tar::Header::new_gnu();
    header.set_size(content.len() as u64);
    header.set_mode(0o644);
    header.set_entry_type(tar::EntryType::Regular);
    builder
        .append_data(&mut header, name, content)
        .expect("Failed to append file to tar archive");
}

/// Writes a `/bin/sh` script and marks it executable
///
/// `body` is placed after the shebang line.
pub fn write_executable(dir: &Path, name: &str, body: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, format!("#!/bin/sh\n{body}")).expect("Failed to write script");

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let mut perms = fs::metadata(&path).unwrap().permissions();
        perms.set_mode(0o755);
        fs::set_permissions(&path, perms).unwrap();
    }

    path
}
