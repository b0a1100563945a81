//! Third-party script and stylesheet dependencies inlined into the page.
//!
//! Dependencies are resolved elsewhere; the generator only sees a kind and
//! some content. Scripts become `<script>` blocks, stylesheets become
//! `<style>` blocks, and every other kind is ignored. Unlike script
//! references, dependencies are never deduplicated.

use encoding_rs::Encoding;
use serde::Deserialize;
use std::path::PathBuf;
use tracing::{debug, trace};

use crate::constants::{CSS_TYPE, JAVASCRIPT_TYPE};
use crate::core::RunnerResult;
use crate::utils::fs::FileSystem;

/// What a dependency contributes to the page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DependencyKind {
    /// Inlined as a `<script type="text/javascript">` block
    Script,
    /// Inlined as a `<style type="text/css">` block
    Stylesheet,
    /// Anything else; ignored
    Other(String),
}

impl DependencyKind {
    /// Maps an artifact type string (`js`, `css`, ...) to a kind.
    pub fn from_type(artifact_type: &str) -> Self {
        match artifact_type {
            JAVASCRIPT_TYPE => Self::Script,
            CSS_TYPE => Self::Stylesheet,
            other => Self::Other(other.to_string()),
        }
    }
}

impl<'de> Deserialize<'de> for DependencyKind {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let artifact_type = String::deserialize(deserializer)?;
        Ok(Self::from_type(&artifact_type))
    }
}

/// Where a dependency's text comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DependencyContent {
    /// Text already in memory
    Inline(String),
    /// A file read through the [`FileSystem`] at generation time
    File(PathBuf),
}

/// An external artifact to inline into the runner page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dependency {
    /// What the dependency contributes
    pub kind: DependencyKind,
    /// Its text
    pub content: DependencyContent,
}

impl Dependency {
    /// A script dependency with inline text.
    pub fn script(content: impl Into<String>) -> Self {
        Self {
            kind: DependencyKind::Script,
            content: DependencyContent::Inline(content.into()),
        }
    }

    /// A stylesheet dependency with inline text.
    pub fn stylesheet(content: impl Into<String>) -> Self {
        Self {
            kind: DependencyKind::Stylesheet,
            content: DependencyContent::Inline(content.into()),
        }
    }

    /// A dependency whose text lives in `path`.
    pub fn from_file(kind: DependencyKind, path: impl Into<PathBuf>) -> Self {
        Self {
            kind,
            content: DependencyContent::File(path.into()),
        }
    }

    fn read(&self, fs: &impl FileSystem, encoding: &'static Encoding) -> RunnerResult<String> {
        match &self.content {
            DependencyContent::Inline(text) => Ok(text.clone()),
            DependencyContent::File(path) => fs.read_text(path, encoding),
        }
    }
}

/// The two dependency buffers produced for the template.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InlinedDependencies {
    /// Concatenated `<script>` blocks
    pub javascript: String,
    /// Concatenated `<style>` blocks
    pub css: String,
}

impl InlinedDependencies {
    /// Inlines `dependencies` in order, decoding file-backed content from
    /// `encoding`.
    ///
    /// Other-kind dependencies are skipped without reading their content.
    ///
    /// # Errors
    ///
    /// [`crate::core::RunnerError::Io`] if a file-backed dependency cannot be read.
    pub fn collect(
        dependencies: &[Dependency],
        fs: &impl FileSystem,
        encoding: &'static Encoding,
    ) -> RunnerResult<Self> {
        let mut inlined = Self::default();

        for dependency in dependencies {
            match &dependency.kind {
                DependencyKind::Script => {
                    inlined.javascript.push_str("<script type=\"text/javascript\">");
                    inlined.javascript.push_str(&dependency.read(fs, encoding)?);
                    inlined.javascript.push_str("</script>");
                }
                DependencyKind::Stylesheet => {
                    inlined.css.push_str("<style type=\"text/css\">");
                    inlined.css.push_str(&dependency.read(fs, encoding)?);
                    inlined.css.push_str("</style>");
                }
                DependencyKind::Other(kind) => {
                    trace!("Ignoring dependency of type '{}'", kind);
                }
            }
        }

        debug!(
            "Inlined {} bytes of scripts and {} bytes of styles",
            inlined.javascript.len(),
            inlined.css.len()
        );
        Ok(inlined)
    }
}
