// THEORY:
// Every failure the crate can surface is collected in one `IslandError` enum so
// the binary can tell the user *which* stage went wrong. The island finder itself
// is total over rectangular grids; its only failure is `InvalidGrid`, raised while
// building a `Grid` from ragged rows. Everything else belongs to the I/O layers
// (decoding, writing, prompting) and aborts the workflow before the core runs.

use std::path::PathBuf;
use thiserror::Error;

/// Errors produced while building grids, reading images or writing outputs.
#[derive(Debug, Error)]
pub enum IslandError {
    /// Rows of the input grid do not all have the same length.
    #[error("invalid grid: row {row} has {found} cells, expected {expected}")]
    InvalidGrid {
        row: usize,
        expected: usize,
        found: usize,
    },

    /// The input file could not be decoded as an image.
    #[error("unsupported image format: {0}")]
    UnsupportedFormat(String),

    /// Reading or writing a file failed.
    #[error("i/o failure on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The user refused to overwrite an existing output file.
    #[error("overwrite of {} declined", .0.display())]
    OverwriteDeclined(PathBuf),

    /// Two inputs would write the same output file.
    #[error(
        "{} and {} would both write {}",
        .earlier.display(),
        .input.display(),
        .path.display()
    )]
    OutputCollision {
        input: PathBuf,
        earlier: PathBuf,
        path: PathBuf,
    },

    #[error("failed to serialize report: {0}")]
    Report(#[from] serde_json::Error),

    /// A background worker died before returning its result.
    #[error("worker failed: {0}")]
    WorkerFailed(String),
}

impl IslandError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        IslandError::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T, E = IslandError> = std::result::Result<T, E>;
