//! Directory operations: creation and filtered recursive copy.

use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, trace, warn};
use walkdir::{DirEntry, WalkDir};

use crate::core::{FsOperation, IoResultExt, RunnerError, RunnerResult};
use crate::filter::{Entry, EntryFilter, EntryKind};

/// Ensures a directory exists, creating it and all parent directories if necessary.
///
/// # Errors
///
/// Returns [`RunnerError::Io`] if the directory cannot be created or if a
/// non-directory already exists at `path`.
///
/// # Examples
///
/// ```rust,no_run
/// use specrunner_cli::utils::fs::ensure_dir;
/// use std::path::Path;
///
/// # fn example() -> Result<(), specrunner_cli::core::RunnerError> {
/// ensure_dir(Path::new("target/jasmine/spec"))?;
/// # Ok(())
/// # }
/// ```
pub fn ensure_dir(path: &Path) -> RunnerResult<()> {
    if !path.exists() {
        debug!("Creating directory {}", path.display());
        fs::create_dir_all(path).with_fs_context(FsOperation::CreateDir, path)?;
    } else if !path.is_dir() {
        return Err(RunnerError::io(
            FsOperation::CreateDir,
            path,
            std::io::Error::new(
                std::io::ErrorKind::AlreadyExists,
                "path exists but is not a directory",
            ),
        ));
    }
    Ok(())
}

/// Recursively copies the entries of `src` accepted by `filter` into `dst`.
///
/// Traversal is pruned at every directory the filter rejects, so a filter
/// that rejects hidden entries never looks inside `.git`. Accepted
/// directories are recreated in `dst`; accepted regular files are copied and
/// overwrite existing destination files. Symbolic links are followed and
/// classified by their target: a linked file is copied as a regular file and
/// a linked directory is copied recursively. Dangling links and links back to
/// an ancestor directory are skipped with a warning.
///
/// When `dst` lies inside `src`, the destination subtree is skipped so the
/// copy does not feed on itself.
///
/// # Errors
///
/// Returns [`RunnerError::Io`] for the first entry that cannot be read,
/// created or copied. Files copied before the failure are left in place.
///
/// # Examples
///
/// ```rust,no_run
/// use specrunner_cli::filter::EntryFilter;
/// use specrunner_cli::utils::fs::copy_dir_filtered;
/// use std::path::Path;
///
/// # fn example() -> Result<(), specrunner_cli::core::RunnerError> {
/// copy_dir_filtered(
///     Path::new("src/main/javascript"),
///     Path::new("target/jasmine/src"),
///     &EntryFilter::copy_filter(".js"),
/// )?;
/// # Ok(())
/// # }
/// ```
pub fn copy_dir_filtered(src: &Path, dst: &Path, filter: &EntryFilter) -> RunnerResult<()> {
    if !src.is_dir() {
        return Err(RunnerError::io(
            FsOperation::Copy,
            src,
            std::io::Error::new(std::io::ErrorKind::NotFound, "source is not a directory"),
        ));
    }

    ensure_dir(dst)?;
    let dst_absolute = std::path::absolute(dst).with_fs_context(FsOperation::Resolve, dst)?;
    let src_absolute = std::path::absolute(src).with_fs_context(FsOperation::Resolve, src)?;

    debug!("Copying {} -> {} with filter {}", src.display(), dst.display(), filter);

    let walker = WalkDir::new(&src_absolute)
        .follow_links(true)
        .min_depth(1)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| !entry.path().starts_with(&dst_absolute) && accepts(filter, entry));

    let mut copied = 0usize;
    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) if is_skippable(&e) => {
                warn!("Not copying {}", e);
                continue;
            }
            Err(e) => return Err(walk_error(&src_absolute, e)),
        };
        let relative = entry.path().strip_prefix(&src_absolute).map_err(|_| {
            RunnerError::io(
                FsOperation::Copy,
                entry.path(),
                std::io::Error::other("entry escaped the source directory"),
            )
        })?;
        let target = dst.join(relative);

        if entry.file_type().is_dir() {
            ensure_dir(&target)?;
        } else if entry.file_type().is_file() {
            if let Some(parent) = target.parent() {
                ensure_dir(parent)?;
            }
            trace!("Copying {} -> {}", entry.path().display(), target.display());
            fs::copy(entry.path(), &target).with_fs_context(FsOperation::Copy, entry.path())?;
            copied += 1;
        }
    }

    debug!("Copied {} file(s) into {}", copied, dst.display());
    Ok(())
}

fn accepts(filter: &EntryFilter, entry: &DirEntry) -> bool {
    let name = entry.file_name().to_string_lossy();
    let file_type = entry.file_type();
    let kind = if file_type.is_dir() {
        EntryKind::Directory
    } else if file_type.is_file() {
        EntryKind::File
    } else {
        EntryKind::Other
    };

    let accepted = filter.accepts(&Entry::new(&name, kind));
    if !accepted {
        trace!("Filter rejected {}", entry.path().display());
    }
    accepted
}

/// Whether a walk error concerns a single link that can be passed over: one
/// whose target is missing, or one pointing back at an ancestor directory.
pub(crate) fn is_skippable(error: &walkdir::Error) -> bool {
    if error.loop_ancestor().is_some() {
        return true;
    }

    let missing_target =
        error.io_error().is_some_and(|e| e.kind() == std::io::ErrorKind::NotFound);
    missing_target
        && error
            .path()
            .and_then(|path| path.symlink_metadata().ok())
            .is_some_and(|meta| meta.file_type().is_symlink())
}

/// Converts a walkdir error into [`RunnerError::Io`] keeping the failing path.
pub(crate) fn walk_error(root: &Path, error: walkdir::Error) -> RunnerError {
    let path: PathBuf = error.path().map_or_else(|| root.to_path_buf(), Path::to_path_buf);
    let source = std::io::Error::from(error);
    RunnerError::io(FsOperation::List, path, source)
}
