//! Capability-based filesystem helpers shared by the Huddle tooling.
//!
//! Built on `cap-std` and `camino` so callers open files through explicit
//! ambient authority and UTF-8 paths.

#![forbid(unsafe_code)]

use std::io;

use camino::Utf8Path;
use cap_std::{ambient_authority, fs_utf8};

/// Open a UTF-8 file path using ambient authority.
///
/// # Errors
/// Propagates the underlying I/O error when the file cannot be opened.
pub fn open_utf8_file(path: &Utf8Path) -> io::Result<fs_utf8::File> {
    fs_utf8::File::open_ambient(path, ambient_authority())
}

/// Return whether a path exists and is a regular file.
///
/// # Errors
/// Returns the underlying I/O error when the path cannot be inspected,
/// including `NotFound` when it does not exist.
pub fn file_is_file(path: &Utf8Path) -> io::Result<bool> {
    let (dir, file_name) = open_parent_dir(path)?;
    dir.metadata(file_name).map(|meta| meta.is_file())
}

/// Resolve the parent directory of `path` with ambient authority, together
/// with the file name inside it.
fn open_parent_dir(path: &Utf8Path) -> io::Result<(fs_utf8::Dir, &str)> {
    let file_name = path
        .file_name()
        .ok_or_else(|| io::Error::other("target should include a file name"))?;
    let parent = path
        .parent()
        .filter(|parent| !parent.as_str().is_empty())
        .unwrap_or_else(|| Utf8Path::new("."));
    let dir = fs_utf8::Dir::open_ambient_dir(parent, ambient_authority())?;
    Ok((dir, file_name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use camino::Utf8PathBuf;
    use rstest::rstest;
    use tempfile::TempDir;

    #[rstest]
    #[expect(clippy::expect_used, reason = "tests should fail fast on setup errors")]
    fn regular_files_are_recognised() {
        let dir = TempDir::new().expect("create tempdir");
        let path = Utf8PathBuf::from_path_buf(dir.path().join("request.json"))
            .expect("utf8 temp path");
        std::fs::write(path.as_std_path(), b"{}").expect("write fixture");

        assert!(file_is_file(&path).expect("inspect fixture"));
        assert!(open_utf8_file(&path).is_ok());
    }

    #[rstest]
    #[expect(clippy::expect_used, reason = "tests should fail fast on setup errors")]
    fn directories_are_not_files() {
        let dir = TempDir::new().expect("create tempdir");
        let nested = dir.path().join("nested");
        std::fs::create_dir(&nested).expect("create nested dir");
        let path = Utf8PathBuf::from_path_buf(nested).expect("utf8 temp path");

        assert!(!file_is_file(&path).expect("inspect directory"));
    }

    #[rstest]
    #[expect(clippy::expect_used, reason = "tests should fail fast on setup errors")]
    fn missing_paths_surface_not_found() {
        let dir = TempDir::new().expect("create tempdir");
        let path = Utf8PathBuf::from_path_buf(dir.path().join("absent.json"))
            .expect("utf8 temp path");

        let err = file_is_file(&path).expect_err("missing file should error");
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }
}
