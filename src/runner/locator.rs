//! Script locators and the deduplicated `<script src>` tag list.

use std::collections::HashSet;
use std::path::Path;
use url::Url;

use crate::core::{RunnerError, RunnerResult};

/// Converts an absolute file path into a `file://` URL string.
///
/// # Errors
///
/// [`RunnerError::MalformedLocator`] if `path` is not absolute or cannot be
/// expressed as a URL.
///
/// # Examples
///
/// ```rust
/// use specrunner_cli::runner::locator::to_locator;
/// use std::path::Path;
///
/// # #[cfg(unix)]
/// assert_eq!(to_locator(Path::new("/src/app.js")).unwrap(), "file:///src/app.js");
/// assert!(to_locator(Path::new("relative/app.js")).is_err());
/// ```
pub fn to_locator(path: &Path) -> RunnerResult<String> {
    Url::from_file_path(path).map(String::from).map_err(|()| RunnerError::MalformedLocator {
        path: path.to_path_buf(),
    })
}

/// Ordered `<script src>` markup, deduplicated by exact locator string.
///
/// The first occurrence of a locator wins; later duplicates are dropped
/// silently. Two different paths that produce the same locator count as one.
#[derive(Debug, Default)]
pub struct ScriptTags {
    seen: HashSet<String>,
    order: Vec<String>,
}

impl ScriptTags {
    /// An empty list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `locator` unless it was already emitted. Returns whether it was added.
    pub fn push(&mut self, locator: String) -> bool {
        if !self.seen.insert(locator.clone()) {
            return false;
        }
        self.order.push(locator);
        true
    }

    /// Appends every locator in order, skipping duplicates.
    pub fn extend(&mut self, locators: impl IntoIterator<Item = String>) {
        for locator in locators {
            self.push(locator);
        }
    }

    /// Emitted locators in order.
    pub fn locators(&self) -> &[String] {
        &self.order
    }

    /// Number of distinct locators.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Whether nothing has been emitted.
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Renders one `<script type="text/javascript" src="...">` tag per locator.
    pub fn to_markup(&self) -> String {
        self.order
            .iter()
            .map(|locator| format!("<script type=\"text/javascript\" src=\"{locator}\"></script>"))
            .collect()
    }
}
