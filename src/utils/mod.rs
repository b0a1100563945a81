//! Supporting utilities.
//!
//! - [`fs`] - the [`fs::FileSystem`] seam, directory creation, filtered copy,
//!   script discovery, text encoding and atomic writes

pub mod fs;

pub use fs::{FileSystem, LocalFileSystem, atomic_write, ensure_dir, safe_write};
