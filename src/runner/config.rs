//! Generator configuration.
//!
//! [`RunnerConfig`] holds everything a [`super::SpecRunnerGenerator`] needs
//! apart from the per-call dependencies and reporter. Defaults are resolved
//! once when the configuration is built, so the generator never has to look
//! at a blank encoding or an empty include list.

use encoding_rs::Encoding;
use std::path::{Path, PathBuf};

use crate::constants::{DEFAULT_INCLUDES, DEFAULT_SOURCE_ENCODING};
use crate::core::{FsOperation, IoResultExt, RunnerResult};
use crate::pattern::PatternSet;
use crate::utils::fs::resolve_encoding_or_utf8;

/// Resolved generator configuration.
#[derive(Debug, Clone)]
pub struct RunnerConfig {
    source_dir: Option<PathBuf>,
    spec_dir: Option<PathBuf>,
    load_first: Vec<String>,
    source_encoding: String,
    encoding: &'static Encoding,
    patterns: PatternSet,
    custom_template: Option<PathBuf>,
}

impl RunnerConfig {
    /// Starts a builder with every field unset.
    pub fn builder() -> RunnerConfigBuilder {
        RunnerConfigBuilder::default()
    }

    /// Absolute source directory, if configured.
    pub fn source_dir(&self) -> Option<&Path> {
        self.source_dir.as_deref()
    }

    /// Absolute spec directory, if configured.
    pub fn spec_dir(&self) -> Option<&Path> {
        self.spec_dir.as_deref()
    }

    /// Names loaded before any scanned file, in order.
    pub fn load_first(&self) -> &[String] {
        &self.load_first
    }

    /// Page encoding label as configured; never blank.
    pub fn source_encoding(&self) -> &str {
        &self.source_encoding
    }

    /// Codec for [`source_encoding`](Self::source_encoding). Templates and
    /// file dependencies are decoded with it and pages are written with it.
    /// Labels it does not recognise still reach the meta tag verbatim but
    /// read and write as UTF-8.
    pub fn encoding(&self) -> &'static Encoding {
        self.encoding
    }

    /// Compiled include/exclude patterns.
    pub fn patterns(&self) -> &PatternSet {
        &self.patterns
    }

    /// Custom template used by [`super::SpecRunnerGenerator::generate`].
    pub fn custom_template(&self) -> Option<&Path> {
        self.custom_template.as_deref()
    }
}

/// Builder for [`RunnerConfig`].
///
/// # Examples
///
/// ```rust,no_run
/// use specrunner_cli::runner::RunnerConfig;
///
/// # fn example() -> Result<(), specrunner_cli::core::RunnerError> {
/// let config = RunnerConfig::builder()
///     .source_dir("/project/src/main/javascript")
///     .spec_dir("/project/src/test/javascript")
///     .load_first(["vendor/jquery.js"])
///     .include("**/*.js")
///     .build()?;
///
/// assert_eq!(config.source_encoding(), "UTF-8");
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Default)]
pub struct RunnerConfigBuilder {
    source_dir: Option<PathBuf>,
    spec_dir: Option<PathBuf>,
    load_first: Vec<String>,
    source_encoding: Option<String>,
    include: Option<String>,
    exclude: Option<String>,
    custom_template: Option<PathBuf>,
}

impl RunnerConfigBuilder {
    /// Directory of production scripts.
    #[must_use]
    pub fn source_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.source_dir = Some(dir.into());
        self
    }

    /// Directory of spec scripts.
    #[must_use]
    pub fn spec_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.spec_dir = Some(dir.into());
        self
    }

    /// Replaces the load-first list.
    #[must_use]
    pub fn load_first<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.load_first = names.into_iter().map(Into::into).collect();
        self
    }

    /// Page encoding. Blank means `UTF-8`.
    #[must_use]
    pub fn source_encoding(mut self, encoding: impl Into<String>) -> Self {
        self.source_encoding = Some(encoding.into());
        self
    }

    /// Comma-separated include globs. Blank means `**/*.js`.
    #[must_use]
    pub fn include(mut self, patterns: impl Into<String>) -> Self {
        self.include = Some(patterns.into());
        self
    }

    /// Comma-separated exclude globs.
    #[must_use]
    pub fn exclude(mut self, patterns: impl Into<String>) -> Self {
        self.exclude = Some(patterns.into());
        self
    }

    /// Template file used instead of the bundled one.
    #[must_use]
    pub fn custom_template(mut self, path: impl Into<PathBuf>) -> Self {
        self.custom_template = Some(path.into());
        self
    }

    /// Resolves defaults, compiles patterns and makes the directories absolute.
    ///
    /// # Errors
    ///
    /// - [`crate::core::RunnerError::InvalidPattern`] for a bad include or exclude glob
    /// - [`crate::core::RunnerError::Io`] if a directory cannot be made absolute
    pub fn build(self) -> RunnerResult<RunnerConfig> {
        let include = self.include.as_deref().unwrap_or(DEFAULT_INCLUDES);
        let exclude = self.exclude.as_deref().unwrap_or_default();
        let patterns = PatternSet::new(include, exclude)?;

        let source_encoding = match self.source_encoding {
            Some(encoding) if !encoding.trim().is_empty() => encoding.trim().to_string(),
            _ => DEFAULT_SOURCE_ENCODING.to_string(),
        };
        let encoding = resolve_encoding_or_utf8(&source_encoding);

        Ok(RunnerConfig {
            source_dir: self.source_dir.as_deref().map(absolute).transpose()?,
            spec_dir: self.spec_dir.as_deref().map(absolute).transpose()?,
            load_first: self.load_first,
            source_encoding,
            encoding,
            patterns,
            custom_template: self.custom_template,
        })
    }
}

fn absolute(path: &Path) -> RunnerResult<PathBuf> {
    std::path::absolute(path).with_fs_context(FsOperation::Resolve, path)
}
