//! Error handling for specrunner
//!
//! This module provides the strongly-typed error returned by the generator,
//! the copier and the filesystem seam, plus the user-facing error reporting
//! used by the CLI. The design follows two principles:
//! 1. **Strongly-typed errors** ([`RunnerError`]) so library callers can match
//!    on the failure class
//! 2. **User-friendly messages** ([`ErrorContext`]) with details and an
//!    actionable suggestion for CLI users
//!
//! # Error Categories
//!
//! - **I/O**: [`RunnerError::Io`] covers unreadable templates and dependency
//!   files, directories that cannot be created or listed, and failed copies
//! - **Locators**: [`RunnerError::MalformedLocator`] when a resolved path
//!   cannot be expressed as a `file://` URL
//! - **Patterns**: [`RunnerError::InvalidPattern`] for bad include/exclude globs
//! - **Templates**: [`RunnerError::Template`] for Tera parse/render failures
//! - **Configuration**: [`RunnerError::ConfigError`] and
//!   [`RunnerError::ConfigNotFound`]
//!
//! No variant is ever retried or swallowed by the library. Errors bubble to the
//! caller, which decides whether the build aborts.
//!
//! # Examples
//!
//! ```rust,no_run
//! use specrunner_cli::core::{RunnerError, user_friendly_error};
//!
//! let error = RunnerError::MalformedLocator {
//!     path: "relative/path.js".into(),
//! };
//! let ctx = user_friendly_error(anyhow::Error::from(error));
//! ctx.display(); // colored error, details and suggestion on stderr
//! ```

use colored::Colorize;
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Filesystem operation that failed, recorded in [`RunnerError::Io`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FsOperation {
    /// Reading a file to a string
    Read,
    /// Writing a file
    Write,
    /// Creating a directory (with parents)
    CreateDir,
    /// Listing directory contents
    List,
    /// Copying a file or directory tree
    Copy,
    /// Resolving a path to its absolute form
    Resolve,
}

impl fmt::Display for FsOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Read => write!(f, "reading"),
            Self::Write => write!(f, "writing"),
            Self::CreateDir => write!(f, "creating directory"),
            Self::List => write!(f, "listing"),
            Self::Copy => write!(f, "copying"),
            Self::Resolve => write!(f, "resolving path"),
        }
    }
}

/// The main error type for specrunner operations.
///
/// Every failure in the generator, copier, pattern compiler and filesystem
/// seam is one of these variants. The CLI wraps them in [`anyhow::Error`] and
/// turns them into an [`ErrorContext`] through [`user_friendly_error`].
#[derive(Error, Debug)]
pub enum RunnerError {
    /// A filesystem operation failed.
    ///
    /// Covers unreadable template and dependency files, directories that cannot
    /// be created or listed, and failed copies. Always fatal to the enclosing
    /// call.
    #[error("I/O failure while {operation} {}", path.display())]
    Io {
        /// What was being attempted
        operation: FsOperation,
        /// The path involved
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// A resolved file path could not be converted into a `file://` URL.
    ///
    /// This only happens for relative or otherwise non-absolute paths and
    /// points at an environment or programming error.
    #[error("Cannot convert path to a script locator: {}", path.display())]
    MalformedLocator {
        /// The path that failed conversion
        path: PathBuf,
    },

    /// An include or exclude pattern is not valid glob syntax.
    #[error("Invalid file pattern '{pattern}'")]
    InvalidPattern {
        /// The offending pattern
        pattern: String,
        /// The glob parser error
        #[source]
        source: glob::PatternError,
    },

    /// The runner template could not be parsed or rendered.
    #[error("Runner template error: {message}")]
    Template {
        /// Cleaned-up Tera error message
        message: String,
    },

    /// Configuration file content is invalid.
    #[error("Configuration error: {message}")]
    ConfigError {
        /// Description of the configuration error
        message: String,
    },

    /// No configuration file could be found.
    #[error("Configuration file not found: {}", path.display())]
    ConfigNotFound {
        /// Where the configuration was expected
        path: PathBuf,
    },
}

impl RunnerError {
    /// Build an [`RunnerError::Io`] from its parts.
    pub fn io(operation: FsOperation, path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            operation,
            path: path.into(),
            source,
        }
    }
}

/// Convenience alias used across the library.
pub type RunnerResult<T> = std::result::Result<T, RunnerError>;

/// Extension trait attaching [`FsOperation`] context to `std::io::Result`.
pub trait IoResultExt<T> {
    /// Convert an I/O error into [`RunnerError::Io`] for `path`.
    fn with_fs_context(self, operation: FsOperation, path: &std::path::Path) -> RunnerResult<T>;
}

impl<T> IoResultExt<T> for std::io::Result<T> {
    fn with_fs_context(self, operation: FsOperation, path: &std::path::Path) -> RunnerResult<T> {
        self.map_err(|source| RunnerError::io(operation, path, source))
    }
}

/// Error wrapper carrying user-facing details and a suggestion.
///
/// # Examples
///
/// ```rust,no_run
/// use specrunner_cli::core::{ErrorContext, RunnerError};
///
/// let context = ErrorContext::new(RunnerError::ConfigError {
///     message: "unknown reporter 'fancy'".into(),
/// })
/// .with_suggestion("Use one of: trivial, js-api")
/// .with_details("The reporter decides which jasmine reporter the page activates");
///
/// context.display();
/// ```
#[derive(Debug)]
pub struct ErrorContext {
    /// Main error line shown to the user
    pub message: String,
    /// Optional suggestion for resolving the error
    pub suggestion: Option<String>,
    /// Optional additional details about the error
    pub details: Option<String>,
}

impl ErrorContext {
    /// Create a context from a [`RunnerError`] with no details or suggestion.
    #[must_use]
    pub fn new(error: RunnerError) -> Self {
        Self::from_message(error.to_string())
    }

    /// Create a context from a plain message.
    #[must_use]
    pub fn from_message(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            suggestion: None,
            details: None,
        }
    }

    /// Add a suggestion for resolving the error
    #[must_use]
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// Add additional details explaining the error
    #[must_use]
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    /// Display the error context to stderr with terminal colors
    ///
    /// - Error message: red and bold
    /// - Details: yellow
    /// - Suggestion: green
    pub fn display(&self) {
        eprintln!("{}: {}", "error".red().bold(), self.message);

        if let Some(details) = &self.details {
            eprintln!("{}: {}", "details".yellow(), details);
        }

        if let Some(suggestion) = &self.suggestion {
            eprintln!("{}: {}", "suggestion".green(), suggestion);
        }
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)?;

        if let Some(details) = &self.details {
            write!(f, "\nDetails: {details}")?;
        }

        if let Some(suggestion) = &self.suggestion {
            write!(f, "\nSuggestion: {suggestion}")?;
        }

        Ok(())
    }
}

impl std::error::Error for ErrorContext {}

/// Convert any error to a user-friendly [`ErrorContext`].
///
/// [`RunnerError`] variants found anywhere in the chain get tailored
/// suggestions. Everything else is shown with its full cause chain.
#[must_use]
pub fn user_friendly_error(error: anyhow::Error) -> ErrorContext {
    let message = message_with_chain(&error);

    if let Some(runner_error) = error.chain().find_map(|e| e.downcast_ref::<RunnerError>()) {
        return with_suggestions(runner_error, message);
    }

    if let Some(io_error) = error.downcast_ref::<std::io::Error>()
        && io_error.kind() == std::io::ErrorKind::PermissionDenied
    {
        return ErrorContext::from_message(message)
            .with_suggestion("Check file ownership and permissions of the paths involved");
    }

    ErrorContext::from_message(message)
}

fn message_with_chain(error: &anyhow::Error) -> String {
    let mut message = error.to_string();
    let chain: Vec<String> = error.chain().skip(1).map(ToString::to_string).collect();

    if !chain.is_empty() {
        message.push_str("\n\nCaused by:");
        for (i, cause) in chain.iter().enumerate() {
            message.push_str(&format!("\n  {}: {}", i + 1, cause));
        }
    }

    message
}

fn with_suggestions(error: &RunnerError, message: String) -> ErrorContext {
    let ctx = ErrorContext::from_message(message);
    match error {
        RunnerError::Io {
            operation: FsOperation::Read,
            ..
        } => ctx
            .with_suggestion("Check that the template and dependency files exist and are readable")
            .with_details("Templates and dependency files are read in full before rendering"),
        RunnerError::Io {
            operation: FsOperation::CreateDir | FsOperation::Write | FsOperation::Copy,
            ..
        } => ctx
            .with_suggestion("Check that the output directory is writable")
            .with_details(
                "A failed copy can leave the destination partially populated; remove it and retry",
            ),
        RunnerError::Io {
            ..
        } => ctx.with_suggestion("Check that the configured directories exist and are readable"),
        RunnerError::MalformedLocator {
            ..
        } => ctx
            .with_suggestion("Use absolute source and spec directories")
            .with_details("Script locators are file:// URLs built from absolute paths"),
        RunnerError::InvalidPattern {
            ..
        } => ctx
            .with_suggestion("Use comma-separated glob patterns such as '**/*.js, lib/*.js'"),
        RunnerError::Template {
            ..
        } => ctx
            .with_suggestion(
                "Placeholders use Tera syntax: {{ sources }}, {{ javascriptDependencies }}, \
                 {{ cssDependencies }}, {{ reporter }}, {{ sourceEncoding }}",
            )
            .with_details("Custom templates are rendered with Tera and must be valid templates"),
        RunnerError::ConfigError {
            ..
        } => ctx.with_suggestion("Fix the reported key in specrunner.toml"),
        RunnerError::ConfigNotFound {
            ..
        } => ctx.with_suggestion(
            "Run 'specrunner init' to create specrunner.toml, or pass --config <PATH>",
        ),
    }
}
