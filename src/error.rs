//! Error taxonomy of the annotation core.
//!
//! Every error is surfaced to the top-level invocation. Nothing is retried
//! and a load that fails on one line invalidates the whole run.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum AnnotError {
    /// The input path does not exist or has an unsupported extension.
    #[error("invalid input path {}: {reason}", path.display())]
    InvalidPath { path: PathBuf, reason: String },

    /// A line could not be parsed into chromosome/start/end, or a numeric
    /// field is not numeric. `line` is 1-based, `path` is empty when a
    /// single line was parsed outside of a file.
    #[error("malformed record at {}:{line}: {message}", path.display())]
    MalformedRecord {
        path:    PathBuf,
        line:    usize,
        message: String,
    },

    #[error("unknown entity type '{0}'")]
    UnknownEntityType(String),

    #[error("unknown feature set '{0}'")]
    UnknownFeatureSet(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to persist or restore annotated structure: {0}")]
    Persist(#[from] bincode::Error),

    #[error("invalid configuration: {0}")]
    Config(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, AnnotError>;

impl AnnotError {
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::MalformedRecord {
            path:    PathBuf::new(),
            line:    0,
            message: message.into(),
        }
    }

    pub fn invalid_path(
        path: impl Into<PathBuf>,
        reason: impl Into<String>,
    ) -> Self {
        Self::InvalidPath {
            path:   path.into(),
            reason: reason.into(),
        }
    }

    /// Attaches the file and line a [`AnnotError::MalformedRecord`] came
    /// from. Other variants are returned unchanged.
    pub fn at_line(
        self,
        file: impl Into<PathBuf>,
        line_no: usize,
    ) -> Self {
        match self {
            Self::MalformedRecord { message, .. } => {
                Self::MalformedRecord {
                    path: file.into(),
                    line: line_no,
                    message,
                }
            },
            other => other,
        }
    }
}
