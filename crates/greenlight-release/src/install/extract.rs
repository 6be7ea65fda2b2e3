//! Minimal tar.gz reader
//!
//! Release archives carry a single executable, so this reader only
//! understands what that needs: 512-byte header blocks with a name, an octal
//! size and a type flag, followed by the entry data padded to a block
//! boundary. Every regular-file entry is written flat into the destination
//! directory under its base name and marked executable.
//!
//! The decompressed archive is buffered in memory and then scanned once.
//!
//! # Scan states
//!
//! ```text
//! Scanning ──zero block──────────────▶ EndOfArchive
//!    │   ──0 bytes left──────────────▶ Exhausted
//!    │   ──1..511 bytes left─────────▶ Truncated (tolerated, logged)
//!    └──header──▶ Entry ──data fits──▶ Scanning
//!                       ──data short─▶ error: TruncatedEntry
//! ```

use std::ffi::OsStr;
use std::fs;
use std::io::Read;
use std::path::{Component, Path};

use flate2::read::GzDecoder;
use greenlight_core::{LauncherError, Result};
use tracing::{debug, warn};

/// Size of a header block and the data alignment unit
pub const BLOCK_SIZE: usize = 512;

const NAME_FIELD: std::ops::Range<usize> = 0..100;
const SIZE_FIELD: std::ops::Range<usize> = 124..136;
const TYPE_FLAG_OFFSET: usize = 156;

/// Header fields of one archive entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveEntry {
    pub name: String,
    /// Declared data length in bytes
    pub size: u64,
    /// Raw type flag byte
    pub kind: u8,
}

impl ArchiveEntry {
    /// `'0'` and NUL both denote a regular file
    pub fn is_regular_file(&self) -> bool {
        self.kind == b'0' || self.kind == 0
    }

    /// Final path component, or `None` when the name has no normal last
    /// component (empty, `.`, `..`, `/`). A trailing `/` is ignored, so
    /// `dir/` yields `dir`.
    pub fn base_name(&self) -> Option<&OsStr> {
        match Path::new(&self.name).components().next_back() {
            Some(Component::Normal(name)) => Some(name),
            _ => None,
        }
    }
}

/// Where the scan stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanOutcome {
    /// An all-zero block was reached
    EndOfArchive,
    /// The data ended exactly on a block boundary without a zero block
    Exhausted,
    /// Fewer than one block of trailing bytes was left where a header belongs
    Truncated { trailing: usize },
}

/// Decompresses a gzip stream and extracts its entries into `dest`
pub fn extract_tar_gz<R: Read>(reader: R, dest: &Path) -> Result<ScanOutcome> {
    let mut decoder = GzDecoder::new(reader);
    let mut data = Vec::new();
    decoder
        .read_to_end(&mut data)
        .map_err(LauncherError::Decompress)?;

    debug!(bytes = data.len(), "decompressed archive");
    extract_tar(&data, dest)
}

/// Scans an uncompressed archive and writes its regular files into `dest`
pub fn extract_tar(data: &[u8], dest: &Path) -> Result<ScanOutcome> {
    let mut offset = 0;

    loop {
        let Some(block) = data[offset..].first_chunk::<BLOCK_SIZE>() else {
            let remaining = data.len() - offset;
            if remaining == 0 {
                return Ok(ScanOutcome::Exhausted);
            }
            warn!(
                trailing = remaining,
                "archive ends with a partial block, treating as end of archive"
            );
            return Ok(ScanOutcome::Truncated {
                trailing: remaining,
            });
        };

        if block.iter().all(|&b| b == 0) {
            return Ok(ScanOutcome::EndOfArchive);
        }

        let entry = parse_header(block);
        offset += BLOCK_SIZE;

        if entry.is_regular_file() {
            write_entry(&entry, &data[offset..], dest)?;
        } else {
            debug!(name = %entry.name, kind = entry.kind, "skipping non-regular entry");
        }

        offset = offset
            .saturating_add(padded_len(entry.size))
            .min(data.len());
    }
}

/// Reads name, size and type flag from a header block
///
/// NUL bytes anywhere in the name field are dropped, not treated as a
/// terminator.
pub fn parse_header(block: &[u8; BLOCK_SIZE]) -> ArchiveEntry {
    let name: Vec<u8> = block[NAME_FIELD]
        .iter()
        .copied()
        .filter(|&b| b != 0)
        .collect();

    ArchiveEntry {
        name: String::from_utf8_lossy(&name).into_owned(),
        size: parse_octal(&block[SIZE_FIELD]),
        kind: block[TYPE_FLAG_OFFSET],
    }
}

/// Parses an octal text field.
///
/// NULs are dropped and surrounding whitespace ignored; parsing stops at the
/// first non-octal character. A blank, non-numeric or overflowing field is 0.
pub fn parse_octal(field: &[u8]) -> u64 {
    let text: Vec<u8> = field.iter().copied().filter(|&b| b != 0).collect();
    let digits = text
        .iter()
        .skip_while(|b| b.is_ascii_whitespace())
        .take_while(|b| (b'0'..=b'7').contains(*b));

    let mut value: u64 = 0;
    for digit in digits {
        match value
            .checked_mul(8)
            .and_then(|v| v.checked_add(u64::from(digit - b'0')))
        {
            Some(next) => value = next,
            None => return 0,
        }
    }
    value
}

fn padded_len(size: u64) -> usize {
    usize::try_from(size)
        .ok()
        .and_then(|size| size.checked_next_multiple_of(BLOCK_SIZE))
        .unwrap_or(usize::MAX)
}

fn write_entry(entry: &ArchiveEntry, rest: &[u8], dest: &Path) -> Result<()> {
    let available = rest.len() as u64;
    if entry.size > available {
        return Err(LauncherError::TruncatedEntry {
            name: entry.name.clone(),
            declared: entry.size,
            available,
        });
    }

    let Some(base_name) = entry.base_name() else {
        debug!(name = %entry.name, "skipping entry without a file name");
        return Ok(());
    };

    // size <= rest.len() so the cast cannot truncate
    let content = &rest[..entry.size as usize];
    let path = dest.join(base_name);
    fs::write(&path, content)
        .map_err(|e| LauncherError::io(format!("write {}", path.display()), e))?;

    #[cfg(unix)]
    set_executable_permissions(&path)?;

    debug!(path = %path.display(), bytes = entry.size, "extracted entry");
    Ok(())
}

/// Sets rwxr-xr-x on Unix
#[cfg(unix)]
fn set_executable_permissions(path: &Path) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;

    fs::set_permissions(path, fs::Permissions::from_mode(0o755))
        .map_err(|e| LauncherError::io(format!("set permissions for {}", path.display()), e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use greenlight_testkit::temp_dir_in_workspace;

    /// Builds a header block with only the fields this reader looks at
    fn header(name: &str, size_field: &str, kind: u8) -> Vec<u8> {
        let mut block = vec![0u8; BLOCK_SIZE];
        block[..name.len()].copy_from_slice(name.as_bytes());
        block[124..124 + size_field.len()].copy_from_slice(size_field.as_bytes());
        block[TYPE_FLAG_OFFSET] = kind;
        block
    }

    fn entry(name: &str, content: &[u8], kind: u8) -> Vec<u8> {
        let mut bytes = header(name, &format!("{:011o}\0", content.len()), kind);
        bytes.extend_from_slice(content);
        let padding = padded_len(content.len() as u64) - content.len();
        bytes.extend(std::iter::repeat_n(0u8, padding));
        bytes
    }

    // ============================================================================
    // Header Parsing
    // ============================================================================

    #[test]
    fn test_parse_octal() {
        assert_eq!(parse_octal(b"00000001750\0"), 1000);
        assert_eq!(parse_octal(b"0000000\0\0\0\0\0"), 0);
        assert_eq!(parse_octal(b"  1750 \0"), 1000);
        assert_eq!(parse_octal(b"17\x0050"), 0o1750);
    }

    #[test]
    fn test_parse_octal_blank_or_invalid_is_zero() {
        assert_eq!(parse_octal(b"\0\0\0\0\0\0\0\0\0\0\0\0"), 0);
        assert_eq!(parse_octal(b"            "), 0);
        assert_eq!(parse_octal(b"xyz"), 0);
        assert_eq!(parse_octal(b"9"), 0);
    }

    #[test]
    fn test_parse_octal_stops_at_first_non_digit() {
        assert_eq!(parse_octal(b"12x4"), 0o12);
    }

    #[test]
    fn test_parse_octal_overflow_is_zero() {
        assert_eq!(parse_octal(b"7777777777777777777777777"), 0);
    }

    #[test]
    fn test_parse_header_fields() {
        let block = header("bin/greenlight", "00000000012\0", b'0');
        let entry = parse_header(block.first_chunk().unwrap());
        assert_eq!(entry.name, "bin/greenlight");
        assert_eq!(entry.size, 10);
        assert_eq!(entry.kind, b'0');
        assert!(entry.is_regular_file());
        assert_eq!(entry.base_name(), Some(OsStr::new("greenlight")));
    }

    #[test]
    fn test_parse_header_drops_embedded_nuls() {
        let block = header("green\0light", "00000000003\0", b'0');
        let entry = parse_header(block.first_chunk().unwrap());
        assert_eq!(entry.name, "greenlight");
        assert_eq!(entry.base_name(), Some(OsStr::new("greenlight")));
    }

    #[test]
    fn test_regular_file_flags() {
        for (kind, regular) in [(b'0', true), (0, true), (b'5', false), (b'2', false), (b'x', false)] {
            let entry = ArchiveEntry {
                name: "f".to_string(),
                size: 0,
                kind,
            };
            assert_eq!(entry.is_regular_file(), regular, "kind {kind}");
        }
    }

    #[test]
    fn test_base_name_rejects_parent_components() {
        let entry = |name: &str| ArchiveEntry {
            name: name.to_string(),
            size: 0,
            kind: b'0',
        };
        assert_eq!(entry("..").base_name(), None);
        assert_eq!(entry("a/..").base_name(), None);
        assert_eq!(entry("").base_name(), None);
        assert_eq!(entry("/").base_name(), None);
        assert_eq!(entry("./greenlight").base_name(), Some(OsStr::new("greenlight")));
        assert_eq!(entry("../../greenlight").base_name(), Some(OsStr::new("greenlight")));
    }

    // ============================================================================
    // Scanning
    // ============================================================================

    #[test]
    fn test_stops_at_first_zero_block() {
        let temp = temp_dir_in_workspace();
        let mut data = entry("first", b"one", b'0');
        data.extend(vec![0u8; BLOCK_SIZE]);
        // Anything after the marker must be ignored
        data.extend(entry("second", b"two", b'0'));

        let outcome = extract_tar(&data, temp.path()).unwrap();
        assert_eq!(outcome, ScanOutcome::EndOfArchive);
        assert_eq!(fs::read(temp.path().join("first")).unwrap(), b"one");
        assert!(!temp.path().join("second").exists());
    }

    #[test]
    fn test_ignores_garbage_after_zero_block() {
        let temp = temp_dir_in_workspace();
        let mut data = vec![0u8; BLOCK_SIZE];
        data.extend(vec![0xff; BLOCK_SIZE * 3 + 17]);

        let outcome = extract_tar(&data, temp.path()).unwrap();
        assert_eq!(outcome, ScanOutcome::EndOfArchive);
        assert_eq!(fs::read_dir(temp.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_empty_input_is_exhausted() {
        let temp = temp_dir_in_workspace();
        assert_eq!(extract_tar(&[], temp.path()).unwrap(), ScanOutcome::Exhausted);
    }

    #[test]
    fn test_missing_end_marker_is_exhausted() {
        let temp = temp_dir_in_workspace();
        let data = entry("greenlight", b"#!/bin/sh\n", b'0');

        let outcome = extract_tar(&data, temp.path()).unwrap();
        assert_eq!(outcome, ScanOutcome::Exhausted);
        assert!(temp.path().join("greenlight").exists());
    }

    #[test]
    fn test_partial_trailer_is_tolerated() {
        let temp = temp_dir_in_workspace();
        let mut data = entry("greenlight", b"payload", b'0');
        data.extend(vec![0x41; 100]);

        let outcome = extract_tar(&data, temp.path()).unwrap();
        assert_eq!(outcome, ScanOutcome::Truncated { trailing: 100 });
        assert_eq!(fs::read(temp.path().join("greenlight")).unwrap(), b"payload");
    }

    #[test]
    fn test_truncated_entry_data_is_an_error() {
        let temp = temp_dir_in_workspace();
        let mut data = header("greenlight", "00000002000\0", b'0');
        data.extend(vec![1u8; 100]);

        let err = extract_tar(&data, temp.path()).unwrap_err();
        match err {
            LauncherError::TruncatedEntry {
                name,
                declared,
                available,
            } => {
                assert_eq!(name, "greenlight");
                assert_eq!(declared, 1024);
                assert_eq!(available, 100);
            }
            other => panic!("Expected TruncatedEntry, got: {other:?}"),
        }
        assert!(!temp.path().join("greenlight").exists());
    }

    #[test]
    fn test_skips_non_regular_entries_and_their_data() {
        let temp = temp_dir_in_workspace();
        let mut data = entry("docs/", b"", b'5');
        data.extend(entry("link", b"not-a-file-payload", b'2'));
        data.extend(entry("greenlight", b"binary", b'0'));
        data.extend(vec![0u8; BLOCK_SIZE * 2]);

        let outcome = extract_tar(&data, temp.path()).unwrap();
        assert_eq!(outcome, ScanOutcome::EndOfArchive);
        assert!(!temp.path().join("docs").exists());
        assert!(!temp.path().join("link").exists());
        assert_eq!(fs::read(temp.path().join("greenlight")).unwrap(), b"binary");
    }

    #[test]
    fn test_nul_type_flag_is_regular_file() {
        let temp = temp_dir_in_workspace();
        let data = entry("legacy", b"old-style", 0);

        extract_tar(&data, temp.path()).unwrap();
        assert_eq!(fs::read(temp.path().join("legacy")).unwrap(), b"old-style");
    }

    #[test]
    fn test_flattens_directories_to_base_name() {
        let temp = temp_dir_in_workspace();
        let data = entry("greenlight_1.0.0_linux_amd64/bin/greenlight", b"nested", b'0');

        extract_tar(&data, temp.path()).unwrap();
        assert_eq!(fs::read(temp.path().join("greenlight")).unwrap(), b"nested");
        assert!(!temp.path().join("greenlight_1.0.0_linux_amd64").exists());
    }

    #[test]
    fn test_parent_traversal_stays_inside_dest() {
        let temp = temp_dir_in_workspace();
        let dest = temp.path().join("dest");
        fs::create_dir(&dest).unwrap();
        let mut data = entry("../escape", b"x", b'0');
        data.extend(entry("..", b"y", b'0'));

        extract_tar(&data, &dest).unwrap();
        assert!(dest.join("escape").exists());
        assert!(!temp.path().join("escape").exists());
    }

    #[test]
    fn test_trailing_slash_regular_entry_is_written_as_file() {
        let temp = temp_dir_in_workspace();
        let mut data = entry("dir/", b"", b'0');
        data.extend(vec![0u8; BLOCK_SIZE]);

        extract_tar(&data, temp.path()).unwrap();
        assert!(temp.path().join("dir").is_file());
    }

    #[test]
    fn test_colliding_base_names_last_wins() {
        let temp = temp_dir_in_workspace();
        let mut data = entry("a/greenlight", b"first", b'0');
        data.extend(entry("b/greenlight", b"second", b'0'));

        extract_tar(&data, temp.path()).unwrap();
        assert_eq!(fs::read(temp.path().join("greenlight")).unwrap(), b"second");
    }

    #[test]
    fn test_invalid_size_field_is_treated_as_empty() {
        let temp = temp_dir_in_workspace();
        let mut data = header("greenlight", "garbage\0\0\0\0\0", b'0');
        data.extend(vec![0u8; BLOCK_SIZE]);

        let outcome = extract_tar(&data, temp.path()).unwrap();
        assert_eq!(outcome, ScanOutcome::EndOfArchive);
        assert_eq!(fs::read(temp.path().join("greenlight")).unwrap(), b"");
    }

    #[test]
    #[cfg(unix)]
    fn test_extracted_files_are_executable() {
        use std::os::unix::fs::PermissionsExt;

        let temp = temp_dir_in_workspace();
        extract_tar(&entry("greenlight", b"#!/bin/sh\n", b'0'), temp.path()).unwrap();

        let mode = fs::metadata(temp.path().join("greenlight"))
            .unwrap()
            .permissions()
            .mode();
        assert_eq!(mode & 0o777, 0o755);
    }

    #[test]
    fn test_gzip_error_is_decompress_error() {
        let temp = temp_dir_in_workspace();
        let err = extract_tar_gz(&b"definitely not gzip"[..], temp.path()).unwrap_err();
        assert!(matches!(err, LauncherError::Decompress(_)), "got: {err:?}");
    }

    #[test]
    fn test_padded_len() {
        assert_eq!(padded_len(0), 0);
        assert_eq!(padded_len(1), 512);
        assert_eq!(padded_len(512), 512);
        assert_eq!(padded_len(513), 1024);
        assert_eq!(padded_len(u64::MAX), usize::MAX);
    }
}
