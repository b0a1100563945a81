//! Include/exclude pattern matching for source and spec directory scans.
//!
//! Scans select script files with a pair of pattern lists, mirroring the
//! include/exclude convention of most build tools:
//!
//! - **Includes** - a file must match at least one include pattern
//! - **Excludes** - a file matching any exclude pattern is dropped, even if
//!   it was included
//! - **Default excludes** - VCS metadata and editor backups are always
//!   dropped (see [`DEFAULT_EXCLUDES`])
//!
//! # Pattern Syntax
//!
//! Each list is a comma-separated set of glob patterns matched against the
//! path relative to the scanned directory, using `/` as separator on every
//! platform:
//!
//! - `*` matches any sequence of characters within a single path component
//! - `**/` matches zero or more directories
//! - `?` matches any single character
//! - `[abc]` / `[a-z]` match character sets and ranges
//!
//! Matching is **case-sensitive** on every platform, so `*.JS` does not pick
//! up `app.js`.
//!
//! # Examples
//!
//! ```rust,no_run
//! use specrunner_cli::pattern::PatternSet;
//! use std::path::Path;
//!
//! # fn example() -> Result<(), specrunner_cli::core::RunnerError> {
//! let patterns = PatternSet::new("**/*.js", "vendor/**, **/*.min.js")?;
//!
//! assert!(patterns.matches(Path::new("app/models/user.js")));
//! assert!(!patterns.matches(Path::new("vendor/jquery.js")));
//! assert!(!patterns.matches(Path::new("dist/app.min.js")));
//! # Ok(())
//! # }
//! ```

use glob::{MatchOptions, Pattern};
use std::path::{Component, Path};
use tracing::trace;

use crate::constants::{DEFAULT_EXCLUDES, DEFAULT_INCLUDES};
use crate::core::{RunnerError, RunnerResult};

const MATCH_OPTIONS: MatchOptions = MatchOptions {
    case_sensitive: true,
    require_literal_separator: true,
    require_literal_leading_dot: false,
};

/// Compiled include and exclude pattern lists.
///
/// Patterns are compiled once at construction. `PatternSet` is cheap to clone
/// and safe to share between threads.
#[derive(Debug, Clone)]
pub struct PatternSet {
    includes: Vec<Pattern>,
    excludes: Vec<Pattern>,
    original_includes: String,
    original_excludes: String,
}

impl PatternSet {
    /// Compiles comma-separated include and exclude lists.
    ///
    /// A blank include list falls back to [`DEFAULT_INCLUDES`]. A blank
    /// exclude list excludes nothing beyond the default excludes.
    ///
    /// # Errors
    ///
    /// Returns [`RunnerError::InvalidPattern`] naming the first pattern that is
    /// not valid glob syntax.
    pub fn new(includes: &str, excludes: &str) -> RunnerResult<Self> {
        let include_list = if includes.trim().is_empty() {
            DEFAULT_INCLUDES
        } else {
            includes
        };

        let includes_compiled =
            split_patterns(include_list).map(compile).collect::<RunnerResult<Vec<_>>>()?;

        let mut excludes_compiled =
            split_patterns(excludes).map(compile).collect::<RunnerResult<Vec<_>>>()?;
        for default in DEFAULT_EXCLUDES {
            excludes_compiled.push(compile(default)?);
        }

        Ok(Self {
            includes: includes_compiled,
            excludes: excludes_compiled,
            original_includes: include_list.to_string(),
            original_excludes: excludes.to_string(),
        })
    }

    /// Checks whether a path relative to the scanned directory is selected.
    ///
    /// The path must match an include pattern and no exclude pattern.
    pub fn matches(&self, relative_path: &Path) -> bool {
        let candidate = to_slash_path(relative_path);

        let included = self.includes.iter().any(|p| p.matches_with(&candidate, MATCH_OPTIONS));
        if !included {
            trace!("Not included: {}", candidate);
            return false;
        }

        let excluded = self.excludes.iter().any(|p| p.matches_with(&candidate, MATCH_OPTIONS));
        if excluded {
            trace!("Excluded: {}", candidate);
        }
        !excluded
    }

    /// Returns the include list as configured (after defaulting).
    pub fn includes(&self) -> &str {
        &self.original_includes
    }

    /// Returns the exclude list as configured.
    pub fn excludes(&self) -> &str {
        &self.original_excludes
    }
}

fn split_patterns(list: &str) -> impl Iterator<Item = &str> {
    list.split(',').map(str::trim).filter(|p| !p.is_empty())
}

fn compile(pattern: &str) -> RunnerResult<Pattern> {
    Pattern::new(pattern).map_err(|source| RunnerError::InvalidPattern {
        pattern: pattern.to_string(),
        source,
    })
}

/// Renders a relative path with `/` separators so patterns behave the same on
/// every platform.
fn to_slash_path(path: &Path) -> String {
    path.components()
        .filter_map(|component| match component {
            Component::Normal(part) => Some(part.to_string_lossy()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}
