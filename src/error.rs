use std::path::PathBuf;
use thiserror::Error;

/// Underlying cause of a read or write failure (I/O, UTF-8 or CSV).
pub type Cause = Box<dyn std::error::Error + Send + Sync>;

#[derive(Error, Debug)]
pub enum JoinError {
    #[error("file {path} not found")]
    MissingFile { path: PathBuf },

    #[error("failed to read {path}: {source}")]
    ReadFailure {
        path: PathBuf,
        #[source]
        source: Cause,
    },

    #[error("failed to write {path}: {source}")]
    WriteFailure {
        path: PathBuf,
        #[source]
        source: Cause,
    },

    #[error("no merged rows to write")]
    EmptyResult,

    #[error("detail table {path} is empty or unreadable")]
    EmptyDetails { path: PathBuf },

    #[error("Schema error: {0}")]
    Schema(String),
}

impl JoinError {
    pub(crate) fn read(path: impl Into<PathBuf>, source: impl Into<Cause>) -> Self {
        JoinError::ReadFailure {
            path: path.into(),
            source: source.into(),
        }
    }

    pub(crate) fn write(path: impl Into<PathBuf>, source: impl Into<Cause>) -> Self {
        JoinError::WriteFailure {
            path: path.into(),
            source: source.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, JoinError>;
