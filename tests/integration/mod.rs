//! Integration test suite for specrunner
//!
//! These tests drive the library against real temporary directories and the
//! `specrunner` binary end to end.
//!
//! # Running Integration Tests
//!
//! ```bash
//! cargo test --test integration
//! ```
//!
//! # Test Organization
//!
//! - **generation**: runner pages built from real source and spec trees
//! - **copying**: filtered directory copy on disk
//! - **commands**: the `specrunner` binary (`generate`, `copy`, `init`, errors)

mod commands;
mod copying;
mod generation;
