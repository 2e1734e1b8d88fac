//! Failures of a single reduce task.
//!
//! Every variant is fatal to the task that raised it. Nothing is retried or
//! downgraded here; the scheduler decides what to do with a failed task.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReduceError {
    /// A shard could not be opened. Usually the map task that owns it has
    /// not finished yet.
    #[error("shard {} is unavailable: {source}", .path.display())]
    ResourceUnavailable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A shard's contents are not a well-formed record stream.
    #[error("failed to decode record {record} of shard {}: {source}", .path.display())]
    Decode {
        path: PathBuf,
        record: usize,
        #[source]
        source: serde_json::Error,
    },

    /// The output file could not be created, written or published.
    #[error("failed to write results to {}: {source}", .path.display())]
    Encode {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The application reduce function returned an error.
    #[error("reduce function failed for key {key:?}: {source}")]
    UserFunction {
        key: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

/// The category of a [`ReduceError`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ErrorKind {
    ResourceUnavailable,
    Decode,
    Encode,
    UserFunction,
}

impl ReduceError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ReduceError::ResourceUnavailable { .. } => ErrorKind::ResourceUnavailable,
            ReduceError::Decode { .. } => ErrorKind::Decode,
            ReduceError::Encode { .. } => ErrorKind::Encode,
            ReduceError::UserFunction { .. } => ErrorKind::UserFunction,
        }
    }

    pub(crate) fn encode(path: impl Into<PathBuf>, source: impl Into<io::Error>) -> Self {
        ReduceError::Encode {
            path: path.into(),
            source: source.into(),
        }
    }
}
