//! Shared constants for specrunner.
//!
//! Placeholder names are the contract between the generator and any runner
//! template, bundled or custom. Renaming one breaks every custom template in
//! the wild.

/// Template placeholder receiving the inlined `<script>` dependency blocks.
pub const JAVASCRIPT_DEPENDENCIES_ATTR: &str = "javascriptDependencies";

/// Template placeholder receiving the inlined `<style>` dependency blocks.
pub const CSS_DEPENDENCIES_ATTR: &str = "cssDependencies";

/// Template placeholder receiving the `<script src=...>` tags for sources and specs.
pub const SOURCES_ATTR: &str = "sources";

/// Template placeholder receiving the reporter name (e.g. `TrivialReporter`).
pub const REPORTER_ATTR: &str = "reporter";

/// Template placeholder receiving the page character encoding.
pub const SOURCE_ENCODING_ATTR: &str = "sourceEncoding";

/// Encoding used when the caller leaves `source_encoding` blank.
pub const DEFAULT_SOURCE_ENCODING: &str = "UTF-8";

/// Include pattern used when none is configured.
pub const DEFAULT_INCLUDES: &str = "**/*.js";

/// Patterns excluded from every directory scan, regardless of configuration.
pub const DEFAULT_EXCLUDES: &[&str] = &[
    "**/.git/**",
    "**/.svn/**",
    "**/.hg/**",
    "**/CVS/**",
    "**/*~",
    "**/.DS_Store",
];

/// Artifact type string for script dependencies.
pub const JAVASCRIPT_TYPE: &str = "js";

/// Artifact type string for stylesheet dependencies.
pub const CSS_TYPE: &str = "css";

/// Suffix used by the copier when none is given.
pub const DEFAULT_COPY_SUFFIX: &str = ".js";

/// Name of the project configuration file.
pub const CONFIG_FILE_NAME: &str = "specrunner.toml";

/// Environment variable overriding configuration discovery.
pub const CONFIG_ENV_VAR: &str = "SPECRUNNER_CONFIG";

/// Runner page used by headless executors.
pub const SPEC_RUNNER_FILE: &str = "SpecRunner.html";

/// Runner page meant to be opened by hand in a browser.
pub const MANUAL_SPEC_RUNNER_FILE: &str = "ManualSpecRunner.html";

/// Subdirectory of the output directory receiving staged sources.
pub const STAGED_SOURCE_DIR: &str = "src";

/// Subdirectory of the output directory receiving staged specs.
pub const STAGED_SPEC_DIR: &str = "spec";
