//! Runner page generation.
//!
//! [`SpecRunnerGenerator`] turns a [`RunnerConfig`], a list of
//! [`Dependency`] values and a [`ReporterKind`] into a complete HTML page that
//! loads the project's scripts and specs in a deterministic order.
//!
//! # Pipeline
//!
//! Each [`SpecRunnerGenerator::generate`] call runs these steps and shares no
//! state with any other call:
//!
//! 1. **Template** - the custom template is read once, otherwise the bundled
//!    one is used
//! 2. **Dependencies** - scripts and stylesheets are inlined in caller order
//! 3. **Script tags** - load-first entries, then the source scan, then the
//!    spec scan, deduplicated by locator with the first occurrence winning
//! 4. **Render** - the five placeholders are filled in
//!
//! # Load-first resolution
//!
//! Each load-first name is tried under the source directory, then under the
//! spec directory. A name found under neither is emitted literally, which is
//! how CDN URLs such as `https://code.jquery.com/jquery.js` get into the page.
//!
//! # Examples
//!
//! ```rust,no_run
//! use specrunner_cli::runner::{Dependency, ReporterKind, RunnerConfig, SpecRunnerGenerator};
//!
//! # fn example() -> Result<(), specrunner_cli::core::RunnerError> {
//! let config = RunnerConfig::builder()
//!     .source_dir("/project/src/main/javascript")
//!     .spec_dir("/project/src/test/javascript")
//!     .build()?;
//!
//! let generator = SpecRunnerGenerator::new(config);
//! let html = generator.generate(&[Dependency::script("var jasmine = {};")], ReporterKind::Trivial)?;
//! assert!(html.contains("TrivialReporter"));
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod dependency;
pub mod locator;
pub mod template;

use serde::Deserialize;
use std::fmt;
use std::path::Path;
use tracing::{debug, trace};

use crate::core::RunnerResult;
use crate::utils::fs::{FileSystem, LocalFileSystem};

pub use config::{RunnerConfig, RunnerConfigBuilder};
pub use dependency::{Dependency, DependencyContent, DependencyKind, InlinedDependencies};
pub use locator::{ScriptTags, to_locator};
pub use template::{RunnerTemplate, TemplateAttributes, TemplateOrigin};

/// Jasmine reporter activated by the runner page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum ReporterKind {
    /// HTML reporter for manual runs in a browser
    #[default]
    #[serde(alias = "TrivialReporter")]
    Trivial,
    /// Reporter exposing results to headless executors
    #[serde(alias = "JsApiReporter")]
    JsApi,
}

impl ReporterKind {
    /// Name substituted into the `reporter` placeholder.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Trivial => "TrivialReporter",
            Self::JsApi => "JsApiReporter",
        }
    }
}

impl fmt::Display for ReporterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Builds runner pages from a [`RunnerConfig`].
///
/// The generator is immutable; every call to [`generate`](Self::generate)
/// rescans the directories and rereads the custom template, so one generator
/// can be reused (or shared between threads) without going stale.
#[derive(Debug, Clone)]
pub struct SpecRunnerGenerator<F: FileSystem = LocalFileSystem> {
    config: RunnerConfig,
    fs: F,
}

impl SpecRunnerGenerator<LocalFileSystem> {
    /// Creates a generator over the local filesystem.
    pub fn new(config: RunnerConfig) -> Self {
        Self::with_file_system(config, LocalFileSystem::new())
    }
}

impl<F: FileSystem> SpecRunnerGenerator<F> {
    /// Creates a generator over an arbitrary [`FileSystem`].
    pub fn with_file_system(config: RunnerConfig, fs: F) -> Self {
        Self {
            config,
            fs,
        }
    }

    /// The configuration this generator renders with.
    pub fn config(&self) -> &RunnerConfig {
        &self.config
    }

    /// Renders a runner page with the configured template.
    ///
    /// # Errors
    ///
    /// See [`generate_with_template`](Self::generate_with_template).
    pub fn generate(
        &self,
        dependencies: &[Dependency],
        reporter: ReporterKind,
    ) -> RunnerResult<String> {
        self.generate_with_template(dependencies, reporter, self.config.custom_template())
    }

    /// Renders a runner page, using `custom_template` instead of the bundled
    /// template when given.
    ///
    /// Configured source and spec directories are created if missing.
    ///
    /// # Errors
    ///
    /// - [`crate::core::RunnerError::Io`] if the template or a dependency
    ///   cannot be read, or a directory cannot be created or listed
    /// - [`crate::core::RunnerError::MalformedLocator`] if a scanned file
    ///   cannot be turned into a `file://` URL
    /// - [`crate::core::RunnerError::Template`] if the template fails to render
    pub fn generate_with_template(
        &self,
        dependencies: &[Dependency],
        reporter: ReporterKind,
        custom_template: Option<&Path>,
    ) -> RunnerResult<String> {
        let encoding = self.config.encoding();
        let template = RunnerTemplate::resolve(custom_template, &self.fs, encoding)?;
        debug!("Using runner template {:?}", template.origin());

        let inlined = InlinedDependencies::collect(dependencies, &self.fs, encoding)?;
        let tags = self.script_tags()?;
        debug!("Emitting {} script tags", tags.len());

        template.render(&TemplateAttributes {
            javascript_dependencies: inlined.javascript,
            css_dependencies: inlined.css,
            sources: tags.to_markup(),
            reporter: reporter.as_str().to_string(),
            source_encoding: self.config.source_encoding().to_string(),
        })
    }

    /// Load-first entries, then source files, then spec files, deduplicated.
    ///
    /// # Errors
    ///
    /// Same as [`generate_with_template`](Self::generate_with_template) minus
    /// template and dependency failures.
    pub fn script_tags(&self) -> RunnerResult<ScriptTags> {
        let mut tags = ScriptTags::new();

        for name in self.config.load_first() {
            let locator = self.resolve_load_first(name)?;
            if !tags.push(locator) {
                trace!("Skipping duplicate load-first entry {}", name);
            }
        }

        for dir in [self.config.source_dir(), self.config.spec_dir()].into_iter().flatten() {
            for locator in self.scan(dir)? {
                if !tags.push(locator) {
                    trace!("Skipping script already emitted");
                }
            }
        }

        Ok(tags)
    }

    fn resolve_load_first(&self, name: &str) -> RunnerResult<String> {
        for root in [self.config.source_dir(), self.config.spec_dir()].into_iter().flatten() {
            let candidate = root.join(name);
            if self.fs.exists(&candidate) {
                trace!("Load-first {} found at {}", name, candidate.display());
                return to_locator(&candidate);
            }
        }

        trace!("Load-first {} not found locally, emitting as given", name);
        Ok(name.to_string())
    }

    fn scan(&self, dir: &Path) -> RunnerResult<Vec<String>> {
        self.fs.ensure_directory(dir)?;

        let mut files = self.fs.list_matching(dir, self.config.patterns())?;
        // Whole-path string order: `lib.js` sorts before `lib/util.js`.
        files.sort_by(|a, b| a.as_os_str().cmp(b.as_os_str()));
        debug!("Found {} scripts under {}", files.len(), dir.display());

        files.iter().map(|file| to_locator(file)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::RunnerError;
    use crate::test_utils::MemoryFileSystem;
    use std::path::PathBuf;

    fn sources_block(html: &str) -> Vec<&str> {
        html.match_indices(" src=\"")
            .map(|(start, _)| {
                let rest = &html[start + 6..];
                &rest[..rest.find('"').unwrap_or(rest.len())]
            })
            .collect()
    }

    fn generator(fs: &MemoryFileSystem, config: RunnerConfig) -> SpecRunnerGenerator<MemoryFileSystem> {
        SpecRunnerGenerator::with_file_system(config, fs.clone())
    }

    fn project() -> MemoryFileSystem {
        MemoryFileSystem::new()
            .with_file("/p/src/b.js", "b")
            .with_file("/p/src/a.js", "a")
            .with_file("/p/src/c.js", "c")
            .with_file("/p/src/notes.txt", "n")
            .with_file("/p/spec/a_spec.js", "spec")
    }

    fn project_config() -> RunnerConfigBuilder {
        RunnerConfig::builder().source_dir("/p/src").spec_dir("/p/spec")
    }

    #[test]
    fn test_empty_generation_is_html_document() {
        let fs = MemoryFileSystem::new();
        let config = RunnerConfig::builder().build().unwrap();

        let html = generator(&fs, config).generate(&[], ReporterKind::Trivial).unwrap();

        assert!(html.contains("<!DOCTYPE html>"));
        assert!(html.contains("<html>"));
        assert!(html.contains("</html>"));
        assert!(html.contains("TrivialReporter"));
    }

    #[test]
    fn test_dependency_blocks_follow_input_order() {
        let fs = MemoryFileSystem::new();
        let config = RunnerConfig::builder().build().unwrap();
        let deps = vec![
            Dependency::script("one()"),
            Dependency::stylesheet(".a{}"),
            Dependency::from_file(DependencyKind::Other("jar".into()), "/x.jar"),
            Dependency::script("two()"),
            Dependency::stylesheet(".b{}"),
        ];

        let html = generator(&fs, config).generate(&deps, ReporterKind::JsApi).unwrap();

        assert_eq!(html.matches("<script type=\"text/javascript\">").count(), 2);
        assert_eq!(html.matches("<style type=\"text/css\">").count(), 2);
        let one = html.find("one()").unwrap();
        let two = html.find("two()").unwrap();
        assert!(one < two);
        assert!(html.find(".a{}").unwrap() < html.find(".b{}").unwrap());
    }

    #[test]
    fn test_scan_sorts_and_filters() {
        let fs = project();
        let config = project_config().build().unwrap();

        let html = generator(&fs, config).generate(&[], ReporterKind::Trivial).unwrap();

        assert_eq!(
            sources_block(&html),
            [
                "file:///p/src/a.js",
                "file:///p/src/b.js",
                "file:///p/src/c.js",
                "file:///p/spec/a_spec.js",
            ]
        );
    }

    #[test]
    fn test_scan_sorts_by_whole_path_string() {
        let fs = MemoryFileSystem::new()
            .with_file("/p/src/lib/util.js", "u")
            .with_file("/p/src/lib.js", "l")
            .with_file("/p/src/a/b.js", "ab")
            .with_file("/p/src/a-b.js", "a-b");
        let config = RunnerConfig::builder().source_dir("/p/src").build().unwrap();

        let tags = generator(&fs, config).script_tags().unwrap();

        assert_eq!(
            tags.locators(),
            [
                "file:///p/src/a-b.js",
                "file:///p/src/a/b.js",
                "file:///p/src/lib.js",
                "file:///p/src/lib/util.js",
            ]
        );
    }

    #[test]
    fn test_latin1_dependency_is_decoded() {
        let fs =
            MemoryFileSystem::new().with_bytes("/lib/strings.js", b"var s = 'na\xefve';".to_vec());
        let config = RunnerConfig::builder().source_encoding("ISO-8859-1").build().unwrap();
        let deps = [Dependency::from_file(DependencyKind::Script, "/lib/strings.js")];

        let html = generator(&fs, config).generate(&deps, ReporterKind::Trivial).unwrap();

        assert!(html.contains("var s = 'naïve';"));
        assert!(html.contains("charset=ISO-8859-1"));
    }

    #[test]
    fn test_load_first_prefers_source_then_spec_then_literal() {
        let fs = project().with_file("/p/spec/helper.js", "h").with_file("/p/spec/c.js", "shadow");
        let config = project_config()
            .load_first(["c.js", "helper.js", "https://cdn.example.com/jquery.js"])
            .build()
            .unwrap();

        let tags = generator(&fs, config).script_tags().unwrap();

        assert_eq!(
            &tags.locators()[..3],
            [
                "file:///p/src/c.js",
                "file:///p/spec/helper.js",
                "https://cdn.example.com/jquery.js",
            ]
        );
    }

    #[test]
    fn test_load_first_is_not_repeated_by_scans() {
        let fs = project();
        let config = project_config().load_first(["c.js"]).build().unwrap();

        let tags = generator(&fs, config).script_tags().unwrap();

        assert_eq!(
            tags.locators(),
            [
                "file:///p/src/c.js",
                "file:///p/src/a.js",
                "file:///p/src/b.js",
                "file:///p/spec/a_spec.js",
            ]
        );
    }

    #[test]
    fn test_same_directory_for_source_and_spec_emits_once() {
        let fs = project();
        let config = RunnerConfig::builder().source_dir("/p/src").spec_dir("/p/src").build().unwrap();

        let tags = generator(&fs, config).script_tags().unwrap();

        assert_eq!(tags.len(), 3);
    }

    #[test]
    fn test_missing_directories_are_created() {
        let fs = MemoryFileSystem::new();
        let config = RunnerConfig::builder().source_dir("/new/src").spec_dir("/new/spec").build().unwrap();

        let tags = generator(&fs, config).script_tags().unwrap();

        assert!(tags.is_empty());
        assert!(fs.is_dir(Path::new("/new/src")));
        assert!(fs.is_dir(Path::new("/new/spec")));
    }

    #[test]
    fn test_unconfigured_directories_are_skipped() {
        let fs = project();
        let config = RunnerConfig::builder().spec_dir("/p/spec").build().unwrap();

        let tags = generator(&fs, config).script_tags().unwrap();

        assert_eq!(tags.locators(), ["file:///p/spec/a_spec.js"]);
    }

    #[test]
    fn test_exclude_patterns() {
        let fs = project().with_file("/p/src/vendor/lib.js", "v");
        let config = project_config().exclude("vendor/**").build().unwrap();

        let tags = generator(&fs, config).script_tags().unwrap();

        assert!(!tags.locators().iter().any(|l| l.contains("vendor")));
        assert_eq!(tags.len(), 4);
    }

    #[test]
    fn test_encoding_defaults_and_overrides() {
        let fs = MemoryFileSystem::new();

        let blank = RunnerConfig::builder().source_encoding("").build().unwrap();
        let html = generator(&fs, blank).generate(&[], ReporterKind::Trivial).unwrap();
        assert!(html.contains("charset=UTF-8"));

        let latin = RunnerConfig::builder().source_encoding("ISO-8859-1").build().unwrap();
        let html = generator(&fs, latin).generate(&[], ReporterKind::Trivial).unwrap();
        assert!(html.contains("charset=ISO-8859-1"));
    }

    #[test]
    fn test_custom_template_is_read_once_and_replaces_bundled() {
        let fs = MemoryFileSystem::new()
            .with_file("/t/runner.html", "<x>{{ reporter }}|{{ sourceEncoding }}</x>");
        let config = RunnerConfig::builder().custom_template("/t/runner.html").build().unwrap();

        let html = generator(&fs, config).generate(&[], ReporterKind::JsApi).unwrap();

        assert_eq!(html, "<x>JsApiReporter|UTF-8</x>");
        assert_eq!(fs.read_count(Path::new("/t/runner.html")), 1);
    }

    #[test]
    fn test_generate_with_template_overrides_config() {
        let fs = MemoryFileSystem::new()
            .with_file("/t/configured.html", "configured")
            .with_file("/t/explicit.html", "explicit");
        let config = RunnerConfig::builder().custom_template("/t/configured.html").build().unwrap();

        let html = generator(&fs, config)
            .generate_with_template(&[], ReporterKind::Trivial, Some(Path::new("/t/explicit.html")))
            .unwrap();

        assert_eq!(html, "explicit");
        assert_eq!(fs.reads(), vec![PathBuf::from("/t/explicit.html")]);
    }

    #[test]
    fn test_missing_custom_template_fails() {
        let fs = MemoryFileSystem::new();
        let config = RunnerConfig::builder().custom_template("/t/missing.html").build().unwrap();

        let error = generator(&fs, config).generate(&[], ReporterKind::Trivial).unwrap_err();

        assert!(matches!(error, RunnerError::Io { .. }));
    }

    #[test]
    fn test_repeated_generation_sees_new_files() {
        let fs = project();
        let config = project_config().build().unwrap();
        let generator = generator(&fs, config);

        let before = generator.script_tags().unwrap().len();
        fs.add_file("/p/spec/b_spec.js", "later");
        let after = generator.script_tags().unwrap().len();

        assert_eq!(after, before + 1);
    }

    #[test]
    fn test_reporter_names() {
        assert_eq!(ReporterKind::Trivial.as_str(), "TrivialReporter");
        assert_eq!(ReporterKind::JsApi.to_string(), "JsApiReporter");
    }

    #[test]
    fn test_reporter_deserializes_from_config_names() {
        #[derive(Deserialize)]
        struct Wrapper {
            reporter: ReporterKind,
        }

        let parsed: Wrapper = toml::from_str("reporter = \"js-api\"").unwrap();
        assert_eq!(parsed.reporter, ReporterKind::JsApi);

        let parsed: Wrapper = toml::from_str("reporter = \"TrivialReporter\"").unwrap();
        assert_eq!(parsed.reporter, ReporterKind::Trivial);
    }
}
