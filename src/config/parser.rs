//! Generic TOML parsing with file path context.
//!
//! Errors carry two levels of context: whether the file could not be read or
//! could not be parsed, and which file it was. The underlying I/O or TOML
//! error is kept as the cause, so the CLI's error chain shows the exact line
//! and column TOML complained about.
//!
//! ```text
//! Failed to parse config file: /project/specrunner.toml
//! Caused by:
//!     TOML parse error at line 3, column 12
//! ```

use anyhow::{Context, Result};
use std::path::Path;

/// Parse a TOML configuration file into `T`.
///
/// Each call performs a fresh read and parse.
///
/// # Examples
///
/// ```rust,no_run
/// use specrunner_cli::config::{ProjectConfig, parse_config};
/// use std::path::Path;
///
/// # fn example() -> anyhow::Result<()> {
/// let config: ProjectConfig = parse_config(Path::new("specrunner.toml"))?;
/// println!("Writing runners to {}", config.output_dir.display());
/// # Ok(())
/// # }
/// ```
///
/// # Errors
///
/// Returns an error if the file cannot be read, is not valid TOML, or does
/// not match the shape of `T`.
pub fn parse_config<T>(path: &Path) -> Result<T>
where
    T: serde::de::DeserializeOwned,
{
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    let config: T = toml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

    Ok(config)
}
