//! In-memory [`FileSystem`] for generator and copier tests.
//!
//! Paths are stored as given, so tests should use absolute paths such as
//! `/project/src/app.js`. Clones share state: hand a clone to the generator
//! and inspect the original afterwards.

use std::collections::{BTreeMap, BTreeSet};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::core::{FsOperation, RunnerError, RunnerResult};
use crate::filter::{Entry, EntryFilter, EntryKind};
use crate::pattern::PatternSet;
use crate::utils::fs::FileSystem;

#[derive(Debug, Default)]
struct State {
    files: BTreeMap<PathBuf, Vec<u8>>,
    dirs: BTreeSet<PathBuf>,
    reads: Vec<PathBuf>,
}

impl State {
    fn add_dir_with_parents(&mut self, path: &Path) {
        for ancestor in path.ancestors() {
            if ancestor.as_os_str().is_empty() {
                break;
            }
            self.dirs.insert(ancestor.to_path_buf());
        }
    }

    fn add_file(&mut self, path: &Path, content: Vec<u8>) {
        if let Some(parent) = path.parent() {
            self.add_dir_with_parents(parent);
        }
        self.files.insert(path.to_path_buf(), content);
    }
}

/// A [`FileSystem`] held entirely in memory that records every read.
#[derive(Debug, Clone, Default)]
pub struct MemoryFileSystem {
    state: Arc<Mutex<State>>,
}

impl MemoryFileSystem {
    /// An empty filesystem.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a file (and its parent directories).
    #[must_use]
    pub fn with_file(self, path: impl AsRef<Path>, content: impl Into<String>) -> Self {
        self.add_file(path, content);
        self
    }

    /// Adds an empty directory (and its parents).
    #[must_use]
    pub fn with_dir(self, path: impl AsRef<Path>) -> Self {
        self.state().add_dir_with_parents(path.as_ref());
        self
    }

    /// Adds a file with raw, possibly non-UTF-8, content.
    #[must_use]
    pub fn with_bytes(self, path: impl AsRef<Path>, content: impl Into<Vec<u8>>) -> Self {
        self.state().add_file(path.as_ref(), content.into());
        self
    }

    /// Adds or replaces a file through a shared handle.
    pub fn add_file(&self, path: impl AsRef<Path>, content: impl Into<String>) {
        self.state().add_file(path.as_ref(), content.into().into_bytes());
    }

    /// Every path passed to [`FileSystem::read_bytes`], in call order.
    pub fn reads(&self) -> Vec<PathBuf> {
        self.state().reads.clone()
    }

    /// How many times `path` was read.
    pub fn read_count(&self, path: &Path) -> usize {
        self.state().reads.iter().filter(|p| p.as_path() == path).count()
    }

    /// Content of the file at `path` as lossy UTF-8, if any.
    pub fn file(&self, path: &Path) -> Option<String> {
        self.bytes(path).map(|bytes| String::from_utf8_lossy(&bytes).into_owned())
    }

    /// Raw content of the file at `path`, if any.
    pub fn bytes(&self, path: &Path) -> Option<Vec<u8>> {
        self.state().files.get(path).cloned()
    }

    /// Whether `path` is a directory.
    pub fn is_dir(&self, path: &Path) -> bool {
        self.state().dirs.contains(path)
    }

    /// Every file path, sorted.
    pub fn files(&self) -> Vec<PathBuf> {
        self.state().files.keys().cloned().collect()
    }

    fn state(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

fn not_found(operation: FsOperation, path: &Path) -> RunnerError {
    RunnerError::io(operation, path, io::Error::new(io::ErrorKind::NotFound, "no such file or directory"))
}

/// Applies `filter` to every component of `relative`, treating all but the
/// last as directories. Mirrors a traversal that prunes rejected directories.
fn reachable(relative: &Path, leaf_kind: EntryKind, filter: &EntryFilter) -> bool {
    let names: Vec<&str> = relative.iter().filter_map(|c| c.to_str()).collect();
    let Some((leaf, parents)) = names.split_last() else {
        return false;
    };

    parents.iter().all(|name| filter.accepts(&Entry::new(name, EntryKind::Directory)))
        && filter.accepts(&Entry::new(leaf, leaf_kind))
}

impl FileSystem for MemoryFileSystem {
    fn read_bytes(&self, path: &Path) -> RunnerResult<Vec<u8>> {
        let mut state = self.state();
        state.reads.push(path.to_path_buf());
        state.files.get(path).cloned().ok_or_else(|| not_found(FsOperation::Read, path))
    }

    fn exists(&self, path: &Path) -> bool {
        let state = self.state();
        state.files.contains_key(path) || state.dirs.contains(path)
    }

    fn ensure_directory(&self, path: &Path) -> RunnerResult<()> {
        let mut state = self.state();
        if let Some(blocker) = path.ancestors().find(|a| state.files.contains_key(*a)) {
            return Err(RunnerError::io(
                FsOperation::CreateDir,
                path,
                io::Error::new(
                    io::ErrorKind::AlreadyExists,
                    format!("{} is a file", blocker.display()),
                ),
            ));
        }
        state.add_dir_with_parents(path);
        Ok(())
    }

    fn list_matching(&self, dir: &Path, patterns: &PatternSet) -> RunnerResult<Vec<PathBuf>> {
        let state = self.state();
        if !state.dirs.contains(dir) {
            return Err(not_found(FsOperation::List, dir));
        }

        Ok(state
            .files
            .keys()
            .filter_map(|path| path.strip_prefix(dir).ok())
            .filter(|relative| patterns.matches(relative))
            .map(|relative| dir.join(relative))
            .collect())
    }

    fn copy_tree(
        &self,
        source: &Path,
        destination: &Path,
        filter: &EntryFilter,
    ) -> RunnerResult<()> {
        let mut state = self.state();
        if !state.dirs.contains(source) {
            return Err(not_found(FsOperation::Copy, source));
        }

        let dirs: Vec<PathBuf> = state
            .dirs
            .iter()
            .filter_map(|dir| dir.strip_prefix(source).ok())
            .filter(|relative| reachable(relative, EntryKind::Directory, filter))
            .map(|relative| destination.join(relative))
            .collect();
        let files: Vec<(PathBuf, Vec<u8>)> = state
            .files
            .iter()
            .filter_map(|(path, content)| {
                let relative = path.strip_prefix(source).ok()?;
                reachable(relative, EntryKind::File, filter)
                    .then(|| (destination.join(relative), content.clone()))
            })
            .collect();

        state.add_dir_with_parents(destination);
        for dir in dirs {
            state.add_dir_with_parents(&dir);
        }
        for (path, content) in files {
            state.add_file(&path, content);
        }
        Ok(())
    }

    fn write_bytes(&self, path: &Path, content: &[u8]) -> RunnerResult<()> {
        self.state().add_file(path, content.to_vec());
        Ok(())
    }
}
