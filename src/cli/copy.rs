//! Run the filtered directory copier from the command line.

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use std::path::PathBuf;

use crate::constants::DEFAULT_COPY_SUFFIX;
use crate::copier::DirectoryCopier;

/// Command to copy visible files with a given suffix between directories.
#[derive(Args, Debug)]
pub struct CopyCommand {
    /// Directory to copy from
    source: PathBuf,

    /// Directory to copy into (created if missing)
    destination: PathBuf,

    /// Only files whose name ends with this suffix are copied
    #[arg(long, default_value = DEFAULT_COPY_SUFFIX)]
    suffix: String,
}

impl CopyCommand {
    /// Copies on a blocking thread.
    ///
    /// # Errors
    ///
    /// Fails if the source is missing or any entry cannot be copied.
    pub async fn execute(self) -> Result<()> {
        let Self {
            source,
            destination,
            suffix,
        } = self;

        let summary =
            format!("{} -> {} ({suffix})", source.display(), destination.display());

        tokio::task::spawn_blocking(move || {
            DirectoryCopier::new().copy_directory(&source, &destination, &suffix)
        })
        .await
        .context("Copy task panicked")?
        .with_context(|| format!("Failed to copy {summary}"))?;

        println!("{} Copied {}", "✓".green(), summary);
        Ok(())
    }
}
