//! Generate runner pages from `specrunner.toml`.
//!
//! # Process
//!
//! 1. Load and validate the configuration
//! 2. Stage sources and specs into the output directory when `[staging]` is
//!    enabled, replacing any earlier staged copy
//! 3. Render every configured output concurrently, each on a blocking thread
//! 4. Encode each page in the configured `source-encoding` and write it
//!    atomically into the output directory
//!
//! With `--stdout` a single page is printed instead, nothing is staged and
//! nothing is written. With `--reporter` only `SpecRunner.html` is written,
//! using that reporter.
//!
//! # Examples
//!
//! ```bash
//! specrunner generate
//! specrunner generate --output-dir build/jasmine
//! specrunner generate --reporter js-api
//! specrunner generate --stdout > runner.html
//! ```

use anyhow::{Context, Result, bail};
use clap::Args;
use colored::Colorize;
use futures::future::try_join_all;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, error, info};

use crate::config::{OutputEntry, ProjectConfig};
use crate::constants::SPEC_RUNNER_FILE;
use crate::copier::DirectoryCopier;
use crate::runner::{Dependency, ReporterKind, SpecRunnerGenerator};
use crate::utils::fs::{FileSystem, LocalFileSystem, encode_text};

/// Command to render runner pages.
#[derive(Args, Debug, Default)]
pub struct GenerateCommand {
    /// Write pages here instead of the configured output directory
    #[arg(long, value_name = "DIR")]
    output_dir: Option<PathBuf>,

    /// Write only SpecRunner.html, with this reporter
    #[arg(long, value_enum)]
    reporter: Option<ReporterKind>,

    /// Print a single page to stdout instead of writing files
    #[arg(long)]
    stdout: bool,
}

impl GenerateCommand {
    /// Loads the configuration found from `config_path` or the current
    /// directory and generates.
    ///
    /// # Errors
    ///
    /// Fails if the configuration is missing or invalid, staging fails, or
    /// any page fails to render or write.
    pub async fn execute(self, config_path: Option<PathBuf>) -> Result<()> {
        let cwd = std::env::current_dir().context("Failed to determine current directory")?;
        let path = ProjectConfig::discover(config_path.as_deref(), &cwd)?;
        let mut project = ProjectConfig::load(&path)?;

        if let Some(dir) = &self.output_dir {
            project.output_dir = std::path::absolute(dir)
                .with_context(|| format!("Failed to resolve {}", dir.display()))?;
        }

        self.execute_with_project(project).await
    }

    /// Generates from an already loaded configuration.
    ///
    /// # Errors
    ///
    /// See [`execute`](Self::execute).
    pub async fn execute_with_project(self, project: ProjectConfig) -> Result<()> {
        let staged = project.staging.enabled && !self.stdout;
        if staged {
            stage(&project).await?;
        }

        let generator = Arc::new(SpecRunnerGenerator::new(project.runner_config(staged)?));
        let dependencies: Arc<[Dependency]> = project.dependencies().into();

        if self.stdout {
            let reporter = self.reporter.unwrap_or(project.reporter);
            let encoding = generator.config().encoding();
            let html = tokio::task::spawn_blocking(move || generator.generate(&dependencies, reporter))
                .await
                .context("Runner generation task panicked")??;

            let mut stdout = std::io::stdout().lock();
            stdout
                .write_all(&encode_text(&html, encoding, Path::new("<stdout>")))
                .and_then(|()| stdout.flush())
                .context("Failed to write runner page to stdout")?;
            return Ok(());
        }

        let outputs = match self.reporter {
            Some(reporter) => vec![OutputEntry::new(SPEC_RUNNER_FILE, reporter)],
            None => project.outputs(),
        };
        let written = render_outputs(generator, dependencies, &project.output_dir(), outputs).await?;

        for path in &written {
            println!("{} Generated {}", "✓".green(), path.display());
        }
        info!("Generated {} runner page(s)", written.len());
        Ok(())
    }
}

/// Copies sources and specs into the output directory, both at once.
async fn stage(project: &ProjectConfig) -> Result<()> {
    let suffix = project.staging.suffix.clone();
    let inputs: Arc<[PathBuf]> =
        [project.source_dir(), project.spec_dir()].into_iter().flatten().collect();
    let pairs = [
        project.source_dir().map(|dir| (dir, project.staged_source_dir())),
        project.spec_dir().map(|dir| (dir, project.staged_spec_dir())),
    ];

    let mut tasks = Vec::new();
    for (source, destination) in pairs.into_iter().flatten() {
        let suffix = suffix.clone();
        let inputs = Arc::clone(&inputs);
        tasks.push(tokio::task::spawn_blocking(move || {
            clear_staged(&destination, &inputs)?;
            debug!("Staging {} into {}", source.display(), destination.display());
            DirectoryCopier::new()
                .copy_directory(&source, &destination, &suffix)
                .with_context(|| format!("Failed to stage {}", source.display()))
        }));
    }

    let results = try_join_all(tasks).await.context("Failed to join staging tasks")?;
    results.into_iter().collect::<Result<Vec<_>>>()?;
    Ok(())
}

/// Removes an earlier staging copy so scripts deleted from the inputs are not
/// staged again. Refuses when the staged directory holds one of the inputs.
fn clear_staged(staged: &Path, inputs: &[PathBuf]) -> Result<()> {
    if !staged.exists() {
        return Ok(());
    }

    let staged_real = staged
        .canonicalize()
        .with_context(|| format!("Failed to resolve {}", staged.display()))?;
    for input in inputs {
        let input_real = input.canonicalize().unwrap_or_else(|_| input.clone());
        if input_real.starts_with(&staged_real) {
            bail!(
                "Refusing to clear staging directory {} because it contains {}; \
                 move output-dir so its src and spec folders hold no inputs",
                staged.display(),
                input.display()
            );
        }
    }

    debug!("Clearing previous staging copy {}", staged.display());
    std::fs::remove_dir_all(staged)
        .with_context(|| format!("Failed to clear staging directory {}", staged.display()))
}

/// Renders and writes every output on its own blocking thread.
///
/// All pages are attempted; the first failure is returned after every
/// failure has been logged.
async fn render_outputs(
    generator: Arc<SpecRunnerGenerator>,
    dependencies: Arc<[Dependency]>,
    output_dir: &Path,
    outputs: Vec<OutputEntry>,
) -> Result<Vec<PathBuf>> {
    let encoding = generator.config().encoding();
    let mut tasks = Vec::new();

    for output in outputs {
        let generator = Arc::clone(&generator);
        let dependencies = Arc::clone(&dependencies);
        let path = output_dir.join(&output.file);

        tasks.push(tokio::task::spawn_blocking(move || {
            debug!("Rendering {} with {}", path.display(), output.reporter);
            let html = generator
                .generate(&dependencies, output.reporter)
                .with_context(|| format!("Failed to generate {}", path.display()))?;
            LocalFileSystem::new()
                .write_text(&path, &html, encoding)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            Ok::<_, anyhow::Error>(path)
        }));
    }

    let results = try_join_all(tasks).await.context("Failed to join runner generation tasks")?;

    let mut written = Vec::new();
    let mut errors = Vec::new();
    for result in results {
        match result {
            Ok(path) => written.push(path),
            Err(e) => errors.push(e),
        }
    }

    if errors.len() > 1 {
        for e in &errors {
            error!("{e:#}");
        }
    }
    if let Some(first) = errors.into_iter().next() {
        return Err(first);
    }

    Ok(written)
}
