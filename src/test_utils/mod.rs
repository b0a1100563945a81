//! Test utilities for specrunner
//!
//! This module provides utilities for writing tests: an in-memory filesystem
//! for exercising the generator and copier without touching disk, a temporary
//! project environment for integration tests, and once-only logging setup.
//!
//! # Example
//!
//! ```rust,no_run
//! use specrunner_cli::runner::{ReporterKind, RunnerConfig, SpecRunnerGenerator};
//! use specrunner_cli::test_utils::MemoryFileSystem;
//!
//! let fs = MemoryFileSystem::new().with_file("/p/src/app.js", "app()");
//! let config = RunnerConfig::builder().source_dir("/p/src").build().unwrap();
//! let html = SpecRunnerGenerator::with_file_system(config, fs.clone())
//!     .generate(&[], ReporterKind::Trivial)
//!     .unwrap();
//! assert!(html.contains("file:///p/src/app.js"));
//! ```

pub mod environment;
pub mod memory;

pub use environment::TestEnvironment;
pub use memory::MemoryFileSystem;

use std::sync::Once;
use tracing::Level;
use tracing_subscriber::EnvFilter;

/// Global flag to ensure logging is only initialized once in tests
static INIT_LOGGING: Once = Once::new();

/// Initialize logging for tests.
///
/// Only the first call has any effect. With `level` set, that level is used;
/// otherwise logging is enabled only when `RUST_LOG` is set.
///
/// # Example
///
/// ```rust,no_run
/// use tracing::Level;
///
/// specrunner_cli::test_utils::init_test_logging(Some(Level::DEBUG));
/// ```
///
/// To enable logging in tests via environment variable:
/// ```bash
/// RUST_LOG=specrunner_cli=trace cargo test
/// ```
pub fn init_test_logging(level: Option<Level>) {
    INIT_LOGGING.call_once(|| {
        let filter = if let Some(level) = level {
            EnvFilter::new(level.to_string())
        } else if std::env::var("RUST_LOG").is_ok() {
            EnvFilter::from_default_env()
        } else {
            return;
        };

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .with_target(true)
            .with_thread_ids(false)
            .try_init();
    });
}
