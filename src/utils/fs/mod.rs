//! Filesystem access for the generator and the copier.
//!
//! Everything the core does to the disk goes through the [`FileSystem`]
//! trait, so the generator and copier can be exercised against an in-memory
//! fake (`test_utils::MemoryFileSystem`) as easily as against a real tree.
//! [`LocalFileSystem`] is the production implementation.
//!
//! # Operations
//!
//! | Method | Used by |
//! |--------|---------|
//! | [`FileSystem::read_bytes`] / [`FileSystem::read_text`] | template and dependency loading |
//! | [`FileSystem::exists`] | load-first resolution |
//! | [`FileSystem::ensure_directory`] | source/spec scans |
//! | [`FileSystem::list_matching`] | source/spec scans |
//! | [`FileSystem::copy_tree`] | filtered directory copy |
//! | [`FileSystem::write_bytes`] / [`FileSystem::write_text`] | writing rendered runner pages |
//!
//! # Examples
//!
//! ```rust,no_run
//! use specrunner_cli::pattern::PatternSet;
//! use specrunner_cli::utils::fs::{FileSystem, LocalFileSystem};
//! use std::path::Path;
//!
//! # fn example() -> Result<(), specrunner_cli::core::RunnerError> {
//! let fs = LocalFileSystem::new();
//! let patterns = PatternSet::new("**/*.js", "")?;
//!
//! fs.ensure_directory(Path::new("/project/spec"))?;
//! for file in fs.list_matching(Path::new("/project/spec"), &patterns)? {
//!     println!("{}", file.display());
//! }
//! # Ok(())
//! # }
//! ```

pub mod atomic;
pub mod dirs;
pub mod discovery;
pub mod encoding;

use encoding_rs::Encoding;
use std::path::{Path, PathBuf};

use crate::core::{FsOperation, IoResultExt, RunnerResult};
use crate::filter::EntryFilter;
use crate::pattern::PatternSet;

pub use atomic::{atomic_write, safe_write};
pub use dirs::{copy_dir_filtered, ensure_dir};
pub use discovery::find_matching_files;
pub use encoding::{decode_text, encode_text, resolve_encoding, resolve_encoding_or_utf8};

/// Filesystem capability used by the generator and the copier.
///
/// Implementations must be usable from several threads at once; the CLI
/// renders runner pages concurrently against one shared filesystem.
pub trait FileSystem: Send + Sync {
    /// Reads a whole file as raw bytes.
    ///
    /// # Errors
    ///
    /// [`crate::core::RunnerError::Io`] if the file is missing or unreadable.
    fn read_bytes(&self, path: &Path) -> RunnerResult<Vec<u8>>;

    /// Reads a whole file and decodes it from `encoding`.
    ///
    /// # Errors
    ///
    /// Same as [`read_bytes`](Self::read_bytes). Malformed bytes are replaced,
    /// not reported.
    fn read_text(&self, path: &Path, encoding: &'static Encoding) -> RunnerResult<String> {
        self.read_bytes(path).map(|bytes| decode_text(&bytes, encoding, path))
    }

    /// Returns whether anything (file or directory) exists at `path`.
    fn exists(&self, path: &Path) -> bool;

    /// Creates `path` and any missing parents. Existing directories are fine.
    ///
    /// # Errors
    ///
    /// [`crate::core::RunnerError::Io`] if creation fails or a file is in the way.
    fn ensure_directory(&self, path: &Path) -> RunnerResult<()>;

    /// Lists the regular files under `dir` (recursively) selected by `patterns`.
    ///
    /// Patterns are matched against paths relative to `dir`; the returned
    /// paths are `dir` joined with that relative path. Order is unspecified.
    ///
    /// # Errors
    ///
    /// [`crate::core::RunnerError::Io`] if the tree cannot be read.
    fn list_matching(&self, dir: &Path, patterns: &PatternSet) -> RunnerResult<Vec<PathBuf>>;

    /// Recursively copies the entries of `source` accepted by `filter` into
    /// `destination`, creating it if needed.
    ///
    /// Rejected directories are not descended into. Accepted directories are
    /// recreated in the destination even if they end up empty.
    ///
    /// # Errors
    ///
    /// [`crate::core::RunnerError::Io`] on the first failure. Entries copied
    /// before the failure stay in place.
    fn copy_tree(
        &self,
        source: &Path,
        destination: &Path,
        filter: &EntryFilter,
    ) -> RunnerResult<()>;

    /// Writes `content` to `path`, creating parent directories.
    ///
    /// # Errors
    ///
    /// [`crate::core::RunnerError::Io`] if the file cannot be written.
    fn write_bytes(&self, path: &Path, content: &[u8]) -> RunnerResult<()>;

    /// Encodes `content` as `encoding` and writes it to `path`.
    ///
    /// # Errors
    ///
    /// Same as [`write_bytes`](Self::write_bytes).
    fn write_text(
        &self,
        path: &Path,
        content: &str,
        encoding: &'static Encoding,
    ) -> RunnerResult<()> {
        self.write_bytes(path, &encode_text(content, encoding, path))
    }
}

/// [`FileSystem`] backed by the real disk.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFileSystem;

impl LocalFileSystem {
    /// Creates a handle to the local filesystem.
    pub const fn new() -> Self {
        Self
    }
}

impl FileSystem for LocalFileSystem {
    fn read_bytes(&self, path: &Path) -> RunnerResult<Vec<u8>> {
        std::fs::read(path).with_fs_context(FsOperation::Read, path)
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn ensure_directory(&self, path: &Path) -> RunnerResult<()> {
        ensure_dir(path)
    }

    fn list_matching(&self, dir: &Path, patterns: &PatternSet) -> RunnerResult<Vec<PathBuf>> {
        find_matching_files(dir, patterns)
    }

    fn copy_tree(
        &self,
        source: &Path,
        destination: &Path,
        filter: &EntryFilter,
    ) -> RunnerResult<()> {
        copy_dir_filtered(source, destination, filter)
    }

    fn write_bytes(&self, path: &Path, content: &[u8]) -> RunnerResult<()> {
        atomic_write(path, content)
    }
}

impl<T: FileSystem + ?Sized> FileSystem for &T {
    fn read_bytes(&self, path: &Path) -> RunnerResult<Vec<u8>> {
        (**self).read_bytes(path)
    }

    fn exists(&self, path: &Path) -> bool {
        (**self).exists(path)
    }

    fn ensure_directory(&self, path: &Path) -> RunnerResult<()> {
        (**self).ensure_directory(path)
    }

    fn list_matching(&self, dir: &Path, patterns: &PatternSet) -> RunnerResult<Vec<PathBuf>> {
        (**self).list_matching(dir, patterns)
    }

    fn copy_tree(
        &self,
        source: &Path,
        destination: &Path,
        filter: &EntryFilter,
    ) -> RunnerResult<()> {
        (**self).copy_tree(source, destination, filter)
    }

    fn write_bytes(&self, path: &Path, content: &[u8]) -> RunnerResult<()> {
        (**self).write_bytes(path, content)
    }
}
