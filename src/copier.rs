//! Filtered recursive directory copy used to stage scripts before generation.
//!
//! [`DirectoryCopier::copy_directory`] copies every visible file ending with
//! a suffix, descending into every visible directory. Hidden entries are
//! skipped along with everything below them, and non-matching files are left
//! where they are.
//!
//! Copies are not transactional: a failure part-way through leaves whatever
//! was already copied in the destination.

use std::path::Path;
use tracing::debug;

use crate::core::RunnerResult;
use crate::filter::EntryFilter;
use crate::utils::fs::{FileSystem, LocalFileSystem};

/// Copies matching files between directory trees.
#[derive(Debug, Clone, Default)]
pub struct DirectoryCopier<F: FileSystem = LocalFileSystem> {
    fs: F,
}

impl DirectoryCopier<LocalFileSystem> {
    /// A copier over the local filesystem.
    pub fn new() -> Self {
        Self::with_file_system(LocalFileSystem::new())
    }
}

impl<F: FileSystem> DirectoryCopier<F> {
    /// A copier over an arbitrary [`FileSystem`].
    pub fn with_file_system(fs: F) -> Self {
        Self {
            fs,
        }
    }

    /// Copies visible files ending with `suffix` from `source` into
    /// `destination`, recreating visible subdirectories.
    ///
    /// # Errors
    ///
    /// [`crate::core::RunnerError::Io`] if `source` is missing or any entry
    /// fails to copy.
    ///
    /// # Examples
    ///
    /// ```rust,no_run
    /// use specrunner_cli::copier::DirectoryCopier;
    /// use std::path::Path;
    ///
    /// # fn example() -> Result<(), specrunner_cli::core::RunnerError> {
    /// DirectoryCopier::new().copy_directory(
    ///     Path::new("src/main/javascript"),
    ///     Path::new("target/jasmine/src"),
    ///     ".js",
    /// )?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn copy_directory(&self, source: &Path, destination: &Path, suffix: &str) -> RunnerResult<()> {
        let filter = EntryFilter::copy_filter(suffix);
        debug!(
            "Copying {} to {} with filter {}",
            source.display(),
            destination.display(),
            filter
        );

        self.fs.copy_tree(source, destination, &filter)
    }
}
