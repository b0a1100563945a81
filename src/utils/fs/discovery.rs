//! Script discovery for source and spec directory scans.

use std::path::{Path, PathBuf};
use tracing::{debug, trace, warn};
use walkdir::WalkDir;

use super::dirs::{is_skippable, walk_error};
use crate::core::RunnerResult;
use crate::pattern::PatternSet;

/// Recursively finds the regular files under `dir` selected by `patterns`.
///
/// Each file's path relative to `dir` is tested against the include and
/// exclude lists; matches are returned as `dir` joined with that relative
/// path. Symbolic links are followed, so a linked script or a linked
/// directory of scripts is found under the link's own path. Dangling links and
/// links back to an ancestor are skipped with a warning. The result is in
/// traversal order; callers that need a stable order sort it themselves.
///
/// # Errors
///
/// Returns [`crate::core::RunnerError::Io`] if `dir` or any directory below it
/// cannot be read.
///
/// # Examples
///
/// ```rust,no_run
/// use specrunner_cli::pattern::PatternSet;
/// use specrunner_cli::utils::fs::find_matching_files;
/// use std::path::Path;
///
/// # fn example() -> Result<(), specrunner_cli::core::RunnerError> {
/// let patterns = PatternSet::new("**/*.js", "**/*.min.js")?;
/// let mut scripts = find_matching_files(Path::new("src/main/javascript"), &patterns)?;
/// scripts.sort_by(|a, b| a.as_os_str().cmp(b.as_os_str()));
/// # Ok(())
/// # }
/// ```
pub fn find_matching_files(dir: &Path, patterns: &PatternSet) -> RunnerResult<Vec<PathBuf>> {
    debug!(
        "Scanning {} (includes: '{}', excludes: '{}')",
        dir.display(),
        patterns.includes(),
        patterns.excludes()
    );

    let mut files = Vec::new();
    for entry in WalkDir::new(dir).follow_links(true).min_depth(1) {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) if is_skippable(&e) => {
                warn!("Skipping {}", e);
                continue;
            }
            Err(e) => return Err(walk_error(dir, e)),
        };
        if !entry.file_type().is_file() {
            continue;
        }

        if let Ok(relative) = entry.path().strip_prefix(dir)
            && patterns.matches(relative)
        {
            trace!("Selected {}", relative.display());
            files.push(dir.join(relative));
        }
    }

    debug!("Found {} script(s) in {}", files.len(), dir.display());
    Ok(files)
}
