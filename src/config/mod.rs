//! Configuration management for specrunner
//!
//! A project describes its layout in `specrunner.toml` at the project root.
//! The CLI locates it through `--config`, the `SPECRUNNER_CONFIG` environment
//! variable, or the current directory, in that order.
//!
//! # Modules
//!
//! - `parser` - generic TOML parsing with file path context
//! - `project` - the [`ProjectConfig`] schema, path resolution and validation
//!
//! # Example
//!
//! ```toml
//! source-dir = "src/main/javascript"
//! spec-dir = "src/test/javascript"
//! output-dir = "target/jasmine"
//! load-first = ["vendor/jquery.js"]
//! exclude = "vendor/**"
//!
//! [staging]
//! enabled = true
//! suffix = ".js"
//!
//! [[dependencies]]
//! type = "js"
//! path = "lib/jasmine.js"
//!
//! [[outputs]]
//! file = "SpecRunner.html"
//! reporter = "js-api"
//! ```
//!
//! All paths are relative to the directory holding `specrunner.toml`. Unknown
//! keys are rejected so that typos do not silently fall back to defaults.

pub mod parser;
pub mod project;

pub use parser::parse_config;
pub use project::{DependencyEntry, OutputEntry, ProjectConfig, StagingConfig};
