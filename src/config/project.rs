//! Project configuration (`specrunner.toml`).
//!
//! Paths in the file are relative to the directory containing it. Loading
//! resolves and validates everything up front, so the CLI only ever sees a
//! consistent configuration.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::collections::HashSet;
use std::path::{Component, Path, PathBuf};
use tracing::debug;

use super::parse_config;
use crate::constants::{
    CONFIG_FILE_NAME, DEFAULT_COPY_SUFFIX, MANUAL_SPEC_RUNNER_FILE, SPEC_RUNNER_FILE,
    STAGED_SOURCE_DIR, STAGED_SPEC_DIR,
};
use crate::core::{RunnerError, RunnerResult};
use crate::runner::{Dependency, DependencyContent, DependencyKind, ReporterKind, RunnerConfig};

fn default_output_dir() -> PathBuf {
    PathBuf::from("target/jasmine")
}

fn default_suffix() -> String {
    DEFAULT_COPY_SUFFIX.to_string()
}

/// Contents of `specrunner.toml`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct ProjectConfig {
    /// Production scripts
    #[serde(default)]
    pub source_dir: Option<PathBuf>,
    /// Spec scripts
    #[serde(default)]
    pub spec_dir: Option<PathBuf>,
    /// Where runner pages (and staged copies) are written
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
    /// Scripts loaded before everything else
    #[serde(default)]
    pub load_first: Vec<String>,
    /// Page encoding; blank or absent means UTF-8
    #[serde(default)]
    pub source_encoding: Option<String>,
    /// Comma-separated include globs
    #[serde(default)]
    pub include: Option<String>,
    /// Comma-separated exclude globs
    #[serde(default)]
    pub exclude: Option<String>,
    /// Template used instead of the bundled one
    #[serde(default)]
    pub custom_template: Option<PathBuf>,
    /// Reporter for single-page generation
    #[serde(default)]
    pub reporter: ReporterKind,
    /// Copy scripts into the output directory before scanning
    #[serde(default)]
    pub staging: StagingConfig,
    /// Dependencies inlined into every page
    #[serde(default)]
    pub dependencies: Vec<DependencyEntry>,
    /// Pages to generate
    #[serde(default)]
    pub outputs: Vec<OutputEntry>,

    #[serde(skip)]
    base_dir: PathBuf,
}

/// `[staging]` table.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct StagingConfig {
    /// Whether `generate` copies scripts before scanning
    #[serde(default)]
    pub enabled: bool,
    /// Name suffix a file needs to be copied, `.js` by default
    #[serde(default = "default_suffix")]
    pub suffix: String,
}

impl Default for StagingConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            suffix: default_suffix(),
        }
    }
}

/// One `[[dependencies]]` entry. Exactly one of `path` and `content` is set.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DependencyEntry {
    /// `js`, `css` or anything else (ignored)
    #[serde(rename = "type")]
    pub kind: DependencyKind,
    /// File to inline, relative to the configuration file
    #[serde(default)]
    pub path: Option<PathBuf>,
    /// Literal text to inline
    #[serde(default)]
    pub content: Option<String>,
}

/// One `[[outputs]]` entry.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OutputEntry {
    /// File name, relative to the output directory
    pub file: PathBuf,
    /// Reporter the page activates
    #[serde(default)]
    pub reporter: ReporterKind,
}

impl OutputEntry {
    /// An output entry for `file` rendered with `reporter`.
    pub fn new(file: impl Into<PathBuf>, reporter: ReporterKind) -> Self {
        Self {
            file: file.into(),
            reporter,
        }
    }
}

impl ProjectConfig {
    /// Finds the configuration file: `explicit` if given, else
    /// `specrunner.toml` in `dir`.
    ///
    /// # Errors
    ///
    /// [`RunnerError::ConfigNotFound`] if the chosen file does not exist.
    pub fn discover(explicit: Option<&Path>, dir: &Path) -> RunnerResult<PathBuf> {
        let path = explicit.map_or_else(|| dir.join(CONFIG_FILE_NAME), Path::to_path_buf);
        if path.is_file() {
            Ok(path)
        } else {
            Err(RunnerError::ConfigNotFound {
                path,
            })
        }
    }

    /// Loads, resolves and validates a configuration file.
    ///
    /// # Errors
    ///
    /// - [`RunnerError::ConfigNotFound`] if `path` does not exist
    /// - a parse error with file context for invalid TOML or unknown keys
    /// - [`RunnerError::ConfigError`] naming the offending key for invalid values
    pub fn load(path: &Path) -> Result<Self> {
        if !path.is_file() {
            return Err(RunnerError::ConfigNotFound {
                path: path.to_path_buf(),
            }
            .into());
        }

        let mut config: Self = parse_config(path)?;
        let base = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        config.base_dir = std::path::absolute(base)
            .with_context(|| format!("Failed to resolve {}", base.display()))?;
        config.validate()?;

        debug!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Parses configuration text with paths relative to `base_dir`.
    ///
    /// # Errors
    ///
    /// Same as [`load`](Self::load) minus the file errors.
    pub fn from_toml(content: &str, base_dir: impl Into<PathBuf>) -> Result<Self> {
        let mut config: Self = toml::from_str(content).context("Failed to parse configuration")?;
        config.base_dir = base_dir.into();
        config.validate()?;
        Ok(config)
    }

    /// Directory relative paths are resolved against.
    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Checks values serde cannot.
    ///
    /// # Errors
    ///
    /// [`RunnerError::ConfigError`] naming the first offending key.
    pub fn validate(&self) -> RunnerResult<()> {
        if self.output_dir.as_os_str().is_empty() {
            return Err(config_error("output-dir must not be empty"));
        }

        if self.staging.enabled && self.staging.suffix.is_empty() {
            return Err(config_error("staging.suffix must not be empty when staging is enabled"));
        }

        for (i, dependency) in self.dependencies.iter().enumerate() {
            if dependency.path.is_some() == dependency.content.is_some() {
                return Err(config_error(format!(
                    "dependencies[{i}] must set exactly one of 'path' or 'content'"
                )));
            }
        }

        let mut files = HashSet::new();
        for (i, output) in self.outputs.iter().enumerate() {
            if output.file.as_os_str().is_empty() {
                return Err(config_error(format!("outputs[{i}].file must not be empty")));
            }
            let escapes = output
                .file
                .components()
                .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir));
            if escapes {
                return Err(config_error(format!(
                    "outputs[{i}].file '{}' must be a relative path inside output-dir",
                    output.file.display()
                )));
            }
            if !files.insert(&output.file) {
                return Err(config_error(format!(
                    "outputs[{i}].file '{}' is listed more than once",
                    output.file.display()
                )));
            }
        }

        Ok(())
    }

    /// Resolves `path` against the configuration directory.
    pub fn resolve(&self, path: &Path) -> PathBuf {
        self.base_dir.join(path)
    }

    /// Absolute output directory.
    pub fn output_dir(&self) -> PathBuf {
        self.resolve(&self.output_dir)
    }

    /// Absolute source directory, if configured.
    pub fn source_dir(&self) -> Option<PathBuf> {
        self.source_dir.as_deref().map(|p| self.resolve(p))
    }

    /// Absolute spec directory, if configured.
    pub fn spec_dir(&self) -> Option<PathBuf> {
        self.spec_dir.as_deref().map(|p| self.resolve(p))
    }

    /// Where staging copies the sources.
    pub fn staged_source_dir(&self) -> PathBuf {
        self.output_dir().join(STAGED_SOURCE_DIR)
    }

    /// Where staging copies the specs.
    pub fn staged_spec_dir(&self) -> PathBuf {
        self.output_dir().join(STAGED_SPEC_DIR)
    }

    /// Configured outputs, or `SpecRunner.html` (js-api) and
    /// `ManualSpecRunner.html` (trivial) when none are listed.
    pub fn outputs(&self) -> Vec<OutputEntry> {
        if self.outputs.is_empty() {
            vec![
                OutputEntry::new(SPEC_RUNNER_FILE, ReporterKind::JsApi),
                OutputEntry::new(MANUAL_SPEC_RUNNER_FILE, ReporterKind::Trivial),
            ]
        } else {
            self.outputs.clone()
        }
    }

    /// Dependencies with file paths resolved.
    pub fn dependencies(&self) -> Vec<Dependency> {
        self.dependencies
            .iter()
            .map(|entry| {
                let content = match (&entry.path, &entry.content) {
                    (Some(path), _) => DependencyContent::File(self.resolve(path)),
                    (None, content) => DependencyContent::Inline(content.clone().unwrap_or_default()),
                };
                Dependency {
                    kind: entry.kind.clone(),
                    content,
                }
            })
            .collect()
    }

    /// Builds the generator configuration. With `staged`, the generator scans
    /// the staged copies in the output directory instead of the originals.
    ///
    /// # Errors
    ///
    /// [`RunnerError::InvalidPattern`] for bad include or exclude globs.
    pub fn runner_config(&self, staged: bool) -> RunnerResult<RunnerConfig> {
        let mut builder = RunnerConfig::builder().load_first(self.load_first.iter().cloned());

        let (source_dir, spec_dir) = if staged {
            (
                self.source_dir.as_ref().map(|_| self.staged_source_dir()),
                self.spec_dir.as_ref().map(|_| self.staged_spec_dir()),
            )
        } else {
            (self.source_dir(), self.spec_dir())
        };

        if let Some(dir) = source_dir {
            builder = builder.source_dir(dir);
        }
        if let Some(dir) = spec_dir {
            builder = builder.spec_dir(dir);
        }
        if let Some(encoding) = &self.source_encoding {
            builder = builder.source_encoding(encoding.clone());
        }
        if let Some(include) = &self.include {
            builder = builder.include(include.clone());
        }
        if let Some(exclude) = &self.exclude {
            builder = builder.exclude(exclude.clone());
        }
        if let Some(template) = &self.custom_template {
            builder = builder.custom_template(self.resolve(template));
        }

        builder.build()
    }
}

fn config_error(message: impl Into<String>) -> RunnerError {
    RunnerError::ConfigError {
        message: message.into(),
    }
}
