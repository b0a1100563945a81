//! Command-line interface for specrunner.
//!
//! # Available Commands
//!
//! - `generate` - render runner pages from `specrunner.toml`
//! - `copy` - copy visible files with a suffix between directories
//! - `init` - write a starter `specrunner.toml`
//!
//! # Global Options
//!
//! All commands support these global options:
//! - `--verbose` - Enable debug output
//! - `--quiet` - Suppress all output except errors
//! - `--config` - Path to `specrunner.toml` (also `SPECRUNNER_CONFIG`)
//!
//! # Example
//!
//! ```bash
//! specrunner init
//! specrunner --verbose generate
//! specrunner copy src/main/javascript target/jasmine/src --suffix .js
//! ```

mod copy;
mod generate;
mod init;

pub use copy::CopyCommand;
pub use generate::GenerateCommand;
pub use init::{InitCommand, STARTER_CONFIG};

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use crate::constants::CONFIG_ENV_VAR;

/// Runtime configuration for CLI execution.
///
/// Built from the parsed flags by [`Cli::build_config`], or constructed
/// directly by tests and embedders.
#[derive(Debug, Clone, Default)]
pub struct CliConfig {
    /// Default log filter when `RUST_LOG` is unset (`debug`, `info`, `error`, ...)
    pub log_level: Option<String>,

    /// Explicit configuration file
    pub config_path: Option<PathBuf>,
}

impl CliConfig {
    /// Create a new CLI configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the default log filter.
    #[must_use]
    pub fn with_log_level(mut self, level: impl Into<String>) -> Self {
        self.log_level = Some(level.into());
        self
    }

    /// Set the configuration file path.
    #[must_use]
    pub fn with_config_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config_path = Some(path.into());
        self
    }

    /// Filter used for the log subscriber. `RUST_LOG` always wins.
    pub fn env_filter(&self) -> EnvFilter {
        if std::env::var("RUST_LOG").is_ok() {
            EnvFilter::from_default_env()
        } else {
            EnvFilter::new(self.log_level.as_deref().unwrap_or("info"))
        }
    }

    /// Install the global `tracing` subscriber, writing to stderr.
    ///
    /// A subscriber installed earlier (e.g. by a test harness) is left in place.
    pub fn init_logging(&self) {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(self.env_filter())
            .with_writer(std::io::stderr)
            .with_target(false)
            .try_init();
    }
}

/// Generate Jasmine spec runner pages for a JavaScript project.
#[derive(Parser, Debug)]
#[command(
    name = "specrunner",
    about = "Generate HTML spec runner pages for JavaScript test suites",
    version,
    long_about = "specrunner assembles a project's scripts and specs into a self-contained \
                  Jasmine runner page, ready for a browser or a headless executor."
)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose output (debug logging)
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    verbose: bool,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Path to specrunner.toml (defaults to ./specrunner.toml)
    #[arg(short, long, global = true, env = CONFIG_ENV_VAR)]
    config: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Render runner pages from specrunner.toml
    Generate(GenerateCommand),

    /// Copy visible files ending with a suffix from one directory to another
    Copy(CopyCommand),

    /// Create a starter specrunner.toml
    Init(InitCommand),
}

impl Cli {
    /// Execute the CLI with configuration built from the parsed flags.
    ///
    /// # Errors
    ///
    /// Returns the failing command's error for [`crate::core::user_friendly_error`].
    pub async fn execute(self) -> Result<()> {
        let config = self.build_config();
        self.execute_with_config(config).await
    }

    /// Translate flags into a [`CliConfig`].
    ///
    /// `--verbose` maps to `debug`, `--quiet` to `error`, otherwise `info`.
    #[must_use]
    pub fn build_config(&self) -> CliConfig {
        let log_level = if self.verbose {
            "debug"
        } else if self.quiet {
            "error"
        } else {
            "info"
        };

        CliConfig {
            log_level: Some(log_level.to_string()),
            config_path: self.config.clone(),
        }
    }

    /// Execute with an injected configuration.
    ///
    /// # Errors
    ///
    /// See [`execute`](Self::execute).
    pub async fn execute_with_config(self, config: CliConfig) -> Result<()> {
        config.init_logging();

        match self.command {
            Commands::Generate(cmd) => cmd.execute(config.config_path).await,
            Commands::Copy(cmd) => cmd.execute().await,
            Commands::Init(cmd) => cmd.execute().await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verbose_config() {
        let cli = Cli::try_parse_from(["specrunner", "--verbose", "generate"]).unwrap();

        assert_eq!(cli.build_config().log_level.as_deref(), Some("debug"));
    }

    #[test]
    fn test_quiet_config() {
        let cli = Cli::try_parse_from(["specrunner", "generate", "--quiet"]).unwrap();

        assert_eq!(cli.build_config().log_level.as_deref(), Some("error"));
    }

    #[test]
    fn test_verbose_and_quiet_conflict() {
        assert!(Cli::try_parse_from(["specrunner", "-v", "-q", "generate"]).is_err());
    }

    #[test]
    fn test_config_path_flag() {
        let cli =
            Cli::try_parse_from(["specrunner", "--config", "web/specrunner.toml", "generate"]).unwrap();

        assert_eq!(cli.build_config().config_path, Some(PathBuf::from("web/specrunner.toml")));
    }

    #[test]
    fn test_generate_reporter_values() {
        assert!(Cli::try_parse_from(["specrunner", "generate", "--reporter", "js-api"]).is_ok());
        assert!(Cli::try_parse_from(["specrunner", "generate", "--reporter", "fancy"]).is_err());
    }

    #[test]
    fn test_copy_requires_paths() {
        assert!(Cli::try_parse_from(["specrunner", "copy", "src"]).is_err());
        assert!(Cli::try_parse_from(["specrunner", "copy", "src", "out", "--suffix", ".ts"]).is_ok());
    }

    #[test]
    fn test_cli_config_builder() {
        let config = CliConfig::new().with_log_level("trace").with_config_path("x.toml");

        assert_eq!(config.log_level.as_deref(), Some("trace"));
        assert_eq!(config.config_path, Some(PathBuf::from("x.toml")));
    }
}
