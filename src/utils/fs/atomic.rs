//! Atomic file write operations using temp-and-rename strategy.
//!
//! Rendered runner pages are opened by browsers and headless executors that
//! may poll the output directory, so a page must never be observed half
//! written.

use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

use super::dirs::ensure_dir;
use crate::core::{FsOperation, IoResultExt, RunnerResult};

/// Writes a string to a file atomically.
///
/// # Errors
///
/// See [`atomic_write`].
pub fn safe_write(path: &Path, content: &str) -> RunnerResult<()> {
    atomic_write(path, content.as_bytes())
}

/// Writes bytes to a file atomically.
///
/// The content goes to a temporary file in the same directory, is synced to
/// disk and then renamed over `path`. Parent directories are created first.
///
/// # Errors
///
/// Returns [`crate::core::RunnerError::Io`] if the parent directory cannot be
/// created or the temporary file cannot be written, synced or renamed.
///
/// # Examples
///
/// ```rust,no_run
/// use specrunner_cli::utils::fs::atomic_write;
/// use std::path::Path;
///
/// # fn example() -> Result<(), specrunner_cli::core::RunnerError> {
/// atomic_write(Path::new("target/jasmine/SpecRunner.html"), b"<!DOCTYPE html>")?;
/// # Ok(())
/// # }
/// ```
pub fn atomic_write(path: &Path, content: &[u8]) -> RunnerResult<()> {
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    ensure_dir(parent)?;

    let mut temp = NamedTempFile::new_in(parent).with_fs_context(FsOperation::Write, path)?;
    temp.write_all(content).with_fs_context(FsOperation::Write, path)?;
    temp.as_file().sync_all().with_fs_context(FsOperation::Write, path)?;

    temp.persist(path).map_err(|e| e.error).with_fs_context(FsOperation::Write, path)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_safe_write() {
        let temp = tempdir().unwrap();
        let file_path = temp.path().join("SpecRunner.html");

        safe_write(&file_path, "<html></html>").unwrap();

        assert_eq!(std::fs::read_to_string(&file_path).unwrap(), "<html></html>");
    }

    #[test]
    fn test_atomic_write_creates_parent() {
        let temp = tempdir().unwrap();
        let file = temp.path().join("deep").join("nested").join("page.html");

        atomic_write(&file, b"nested content").unwrap();

        assert_eq!(std::fs::read_to_string(&file).unwrap(), "nested content");
    }

    #[test]
    fn test_atomic_write_overwrites() {
        let temp = tempdir().unwrap();
        let file = temp.path().join("page.html");

        atomic_write(&file, b"initial").unwrap();
        atomic_write(&file, b"updated").unwrap();

        assert_eq!(std::fs::read_to_string(&file).unwrap(), "updated");
    }

    #[test]
    fn test_atomic_write_leaves_no_temp_files() {
        let temp = tempdir().unwrap();
        let file = temp.path().join("page.html");

        atomic_write(&file, b"content").unwrap();

        let entries: Vec<_> = std::fs::read_dir(temp.path()).unwrap().collect();
        assert_eq!(entries.len(), 1);
    }

    #[test]
    fn test_atomic_write_parent_is_file() {
        let temp = tempdir().unwrap();
        let blocker = temp.path().join("not_a_directory.txt");
        std::fs::write(&blocker, "file").unwrap();

        assert!(atomic_write(&blocker.join("page.html"), b"x").is_err());
    }
}
