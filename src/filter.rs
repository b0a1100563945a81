//! Composable predicates over directory entries.
//!
//! [`EntryFilter`] is a small expression tree: four leaf tests combined with
//! `And`/`Or`. The directory copier builds one filter per call and evaluates
//! it against every entry it visits, so the tree must accept the directories
//! that traversal has to descend into as well as the files to copy.
//!
//! # Leaves
//!
//! | Filter | Accepts |
//! |--------|---------|
//! | [`EntryFilter::Suffix`] | entries whose name ends with the suffix (case-sensitive) |
//! | [`EntryFilter::File`] | regular files |
//! | [`EntryFilter::Directory`] | directories |
//! | [`EntryFilter::Visible`] | entries whose name does not start with `.` |
//!
//! # Examples
//!
//! ```rust
//! use specrunner_cli::filter::{Entry, EntryFilter, EntryKind};
//!
//! let filter = EntryFilter::copy_filter(".js");
//!
//! assert!(filter.accepts(&Entry::new("app.js", EntryKind::File)));
//! assert!(filter.accepts(&Entry::new("models", EntryKind::Directory)));
//! assert!(!filter.accepts(&Entry::new("notes.txt", EntryKind::File)));
//! assert!(!filter.accepts(&Entry::new(".hidden.js", EntryKind::File)));
//! ```

use std::fmt;

/// What kind of filesystem object an [`Entry`] is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    /// A regular file
    File,
    /// A directory
    Directory,
    /// Symlinks, sockets, devices and anything else
    Other,
}

/// A directory entry as seen by a filter: its file name and kind.
#[derive(Debug, Clone, Copy)]
pub struct Entry<'a> {
    /// File name only, without parent path
    pub name: &'a str,
    /// Type of the entry
    pub kind: EntryKind,
}

impl<'a> Entry<'a> {
    /// Creates an entry view.
    pub const fn new(name: &'a str, kind: EntryKind) -> Self {
        Self {
            name,
            kind,
        }
    }
}

/// A predicate over directory entries, built from leaves and combinators.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryFilter {
    /// Name ends with the given suffix
    Suffix(String),
    /// Entry is a regular file
    File,
    /// Entry is a directory
    Directory,
    /// Entry is not hidden (name does not start with `.`)
    Visible,
    /// Every child accepts the entry (empty list accepts everything)
    And(Vec<EntryFilter>),
    /// At least one child accepts the entry (empty list accepts nothing)
    Or(Vec<EntryFilter>),
}

impl EntryFilter {
    /// Leaf filter matching names ending with `suffix`.
    pub fn suffix(suffix: impl Into<String>) -> Self {
        Self::Suffix(suffix.into())
    }

    /// Conjunction of `filters`.
    pub fn and(filters: impl IntoIterator<Item = EntryFilter>) -> Self {
        Self::And(filters.into_iter().collect())
    }

    /// Disjunction of `filters`.
    pub fn or(filters: impl IntoIterator<Item = EntryFilter>) -> Self {
        Self::Or(filters.into_iter().collect())
    }

    /// The filter used when staging files: `visible AND (directory OR (file AND suffix))`.
    ///
    /// Visible directories are always accepted so traversal continues below
    /// them, whatever their name.
    pub fn copy_filter(suffix: &str) -> Self {
        let file_filter = Self::and([Self::File, Self::suffix(suffix)]);
        let dir_filter = Self::or([Self::Directory, file_filter]);
        Self::and([Self::Visible, dir_filter])
    }

    /// Evaluates the filter against `entry`.
    pub fn accepts(&self, entry: &Entry<'_>) -> bool {
        match self {
            Self::Suffix(suffix) => entry.name.ends_with(suffix.as_str()),
            Self::File => entry.kind == EntryKind::File,
            Self::Directory => entry.kind == EntryKind::Directory,
            Self::Visible => !is_hidden_name(entry.name),
            Self::And(filters) => filters.iter().all(|f| f.accepts(entry)),
            Self::Or(filters) => filters.iter().any(|f| f.accepts(entry)),
        }
    }
}

impl fmt::Display for EntryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Suffix(suffix) => write!(f, "suffix({suffix:?})"),
            Self::File => write!(f, "file"),
            Self::Directory => write!(f, "directory"),
            Self::Visible => write!(f, "visible"),
            Self::And(filters) => write_joined(f, filters, " AND "),
            Self::Or(filters) => write_joined(f, filters, " OR "),
        }
    }
}

fn write_joined(f: &mut fmt::Formatter<'_>, filters: &[EntryFilter], separator: &str) -> fmt::Result {
    write!(f, "(")?;
    for (i, filter) in filters.iter().enumerate() {
        if i > 0 {
            write!(f, "{separator}")?;
        }
        write!(f, "{filter}")?;
    }
    write!(f, ")")
}

/// Hidden by Unix convention: a leading dot. `.` and `..` never reach filters.
pub fn is_hidden_name(name: &str) -> bool {
    name.starts_with('.')
}
