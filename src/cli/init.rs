//! Create a starter `specrunner.toml`.
//!
//! # Examples
//!
//! ```bash
//! specrunner init                   # in the current directory
//! specrunner init --path web/       # somewhere else
//! specrunner init --force           # overwrite an existing file
//! ```

use anyhow::{Context, Result, anyhow};
use clap::Args;
use colored::Colorize;
use std::path::PathBuf;

use crate::constants::CONFIG_FILE_NAME;
use crate::utils::fs::{ensure_dir, safe_write};

/// Every key is present, commented where the default applies, so the file
/// doubles as documentation.
pub const STARTER_CONFIG: &str = r#"# specrunner configuration
# Paths are relative to this file.

source-dir = "src/main/javascript"
spec-dir = "src/test/javascript"
output-dir = "target/jasmine"

# Scripts loaded before anything scanned. Names are looked up in source-dir,
# then spec-dir; anything else (e.g. a CDN URL) is used as written.
load-first = []

# source-encoding = "UTF-8"
# include = "**/*.js"
# exclude = ""
# custom-template = "src/test/resources/SpecRunner.html"

# Reporter used by `specrunner generate --stdout`: "trivial" or "js-api".
reporter = "trivial"

[staging]
# Copy sources and specs into output-dir before scanning.
enabled = false
suffix = ".js"

# Inline a script or stylesheet into every page:
# [[dependencies]]
# type = "js"
# path = "lib/jasmine.js"

# Pages to write. Without any entries, SpecRunner.html (js-api) and
# ManualSpecRunner.html (trivial) are generated.
# [[outputs]]
# file = "SpecRunner.html"
# reporter = "js-api"
"#;

/// Command to write a starter `specrunner.toml`.
#[derive(Args, Debug)]
pub struct InitCommand {
    /// Directory to create the configuration in (defaults to the current directory)
    #[arg(short, long)]
    path: Option<PathBuf>,

    /// Overwrite an existing configuration
    #[arg(short, long)]
    force: bool,
}

impl InitCommand {
    /// Writes the starter configuration.
    ///
    /// # Errors
    ///
    /// Fails if a configuration already exists (without `--force`) or the
    /// file cannot be written.
    pub async fn execute(self) -> Result<()> {
        let target_dir = self.path.unwrap_or_else(|| PathBuf::from("."));
        let config_path = target_dir.join(CONFIG_FILE_NAME);

        if config_path.exists() && !self.force {
            return Err(anyhow!(
                "Configuration already exists at {}. Use --force to overwrite",
                config_path.display()
            ));
        }

        ensure_dir(&target_dir)?;
        safe_write(&config_path, STARTER_CONFIG)
            .with_context(|| format!("Failed to write {}", config_path.display()))?;

        println!("{} Initialized {} at {}", "✓".green(), CONFIG_FILE_NAME, config_path.display());
        println!("\n{}", "Next steps:".cyan());
        println!("  Point source-dir and spec-dir at your scripts, then run:");
        println!("    {}", "specrunner generate".bright_white());

        Ok(())
    }
}
