//! Core types shared by every specrunner component.
//!
//! - [`RunnerError`] - the library error type
//! - [`ErrorContext`] and [`user_friendly_error`] - CLI error presentation
//! - [`FsOperation`] and [`IoResultExt`] - context for filesystem failures

pub mod error;

pub use error::{
    ErrorContext, FsOperation, IoResultExt, RunnerError, RunnerResult, user_friendly_error,
};
