//! Driver error types.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors reported by the file driver. Malformed markup is never an error;
/// those lines are copied through unchanged.
#[derive(Debug, Error)]
pub enum ShadeError {
    #[error("{} not found", .0.display())]
    NotFound(PathBuf),

    #[error("failed to read `{}`: {}", .0.display(), .1)]
    Read(PathBuf, #[source] io::Error),

    #[error("`{}` is not valid UTF-8", .0.display())]
    Decode(PathBuf),

    #[error("failed to write `{}`: {}", .0.display(), .1)]
    Write(PathBuf, #[source] io::Error),

    #[error("refusing to overwrite input `{}`, choose a different output path", .0.display())]
    SameFile(PathBuf),
}
