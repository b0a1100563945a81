//! specrunner - HTML spec runner generation for JavaScript test suites
//!
//! Builds a self-contained HTML page that loads a project's JavaScript
//! sources and specs in a deterministic order, together with any inlined
//! third-party scripts and stylesheets, so a browser or headless executor can
//! run a Jasmine suite. Running the suite and collecting results is left to
//! whatever opens the page.
//!
//! # Architecture Overview
//!
//! Two stateless components do the work:
//!
//! - **Runner page builder** ([`runner::SpecRunnerGenerator`]) - resolves the
//!   template, inlines dependencies, assembles the ordered and deduplicated
//!   `<script src>` list and renders the page
//! - **Filtered directory copier** ([`copier::DirectoryCopier`]) - stages
//!   visible files with a given suffix into a directory the builder scans
//!
//! Both reach the disk only through [`utils::fs::FileSystem`].
//!
//! # Core Modules
//!
//! - [`runner`] - page generation, templates, dependencies and locators
//! - [`copier`] - filtered recursive copy
//! - [`filter`] - the entry filter expression tree used by the copier
//! - [`pattern`] - include/exclude glob lists used by directory scans
//! - [`config`] - `specrunner.toml` loading and validation
//! - [`cli`] - the `specrunner` command line
//! - [`core`] - error types and user-facing error reporting
//! - [`utils`] - filesystem seam, discovery, filtered copy and atomic writes
//!
//! # Script ordering
//!
//! The `sources` placeholder receives, in order and without repeats:
//!
//! 1. load-first entries (source dir, then spec dir, then the literal name)
//! 2. files under the source directory, sorted by path
//! 3. files under the spec directory, sorted by path
//!
//! # Example
//!
//! ```rust,no_run
//! use specrunner_cli::runner::{ReporterKind, RunnerConfig, SpecRunnerGenerator};
//!
//! # fn example() -> Result<(), specrunner_cli::core::RunnerError> {
//! let config = RunnerConfig::builder()
//!     .source_dir("src/main/javascript")
//!     .spec_dir("src/test/javascript")
//!     .load_first(["vendor/jquery.js"])
//!     .build()?;
//!
//! let html = SpecRunnerGenerator::new(config).generate(&[], ReporterKind::JsApi)?;
//! std::fs::write("SpecRunner.html", html).ok();
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod config;
pub mod constants;
pub mod copier;
pub mod core;
pub mod filter;
pub mod pattern;
pub mod runner;
pub mod utils;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;
