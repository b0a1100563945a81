//! Test environment setup and management
//!
//! This module provides a temporary project for integration and library tests:
//! a source directory, a spec directory and helpers to drop files and a
//! `specrunner.toml` into it.

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

use crate::constants::CONFIG_FILE_NAME;

/// Test environment helper that sets up a temporary JavaScript project
pub struct TestEnvironment {
    pub temp_dir: TempDir,
    pub project_dir: PathBuf,
    pub source_dir: PathBuf,
    pub spec_dir: PathBuf,
}

impl TestEnvironment {
    /// Create a new test environment with empty source and spec directories
    pub fn new() -> Result<Self> {
        super::init_test_logging(None);

        let temp_dir = TempDir::new()?;
        let project_dir = temp_dir.path().join("project");
        let source_dir = project_dir.join("src/main/javascript");
        let spec_dir = project_dir.join("src/test/javascript");

        fs::create_dir_all(&source_dir)?;
        fs::create_dir_all(&spec_dir)?;

        Ok(Self {
            temp_dir,
            project_dir,
            source_dir,
            spec_dir,
        })
    }

    /// Create a test environment with a few sources, specs and a basic config
    pub fn with_basic_project() -> Result<Self> {
        let env = Self::new()?;
        env.create_file("src/main/javascript/player.js", "function Player() {}")?;
        env.create_file("src/main/javascript/song.js", "function Song() {}")?;
        env.create_file("src/test/javascript/PlayerSpec.js", "describe('Player', function() {});")?;
        env.create_file("src/test/javascript/helpers/SpecHelper.js", "beforeEach(function() {});")?;
        env.write_config(Self::basic_config())?;
        Ok(env)
    }

    /// Config pointing at the environment's source and spec directories
    pub fn basic_config() -> &'static str {
        r#"
source-dir = "src/main/javascript"
spec-dir = "src/test/javascript"
output-dir = "target/jasmine"
"#
    }

    /// Write `specrunner.toml` at the project root
    pub fn write_config(&self, content: &str) -> Result<PathBuf> {
        self.create_file(CONFIG_FILE_NAME, content.trim_start())
    }

    /// Get the project directory path
    pub fn project_path(&self) -> &Path {
        &self.project_dir
    }

    /// Create a file relative to the project directory
    pub fn create_file(&self, path: impl AsRef<Path>, content: &str) -> Result<PathBuf> {
        let full_path = self.project_dir.join(path);
        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&full_path, content)
            .with_context(|| format!("Failed to write {}", full_path.display()))?;
        Ok(full_path)
    }

    /// Read a file relative to the project directory
    pub fn read_file(&self, path: impl AsRef<Path>) -> Result<String> {
        let full_path = self.project_dir.join(path);
        fs::read_to_string(&full_path)
            .with_context(|| format!("Failed to read {}", full_path.display()))
    }

    /// Check if a file exists relative to the project directory
    pub fn file_exists(&self, path: impl AsRef<Path>) -> bool {
        self.project_dir.join(path).exists()
    }
}
