//! Error types for pagerlib

use std::path::PathBuf;
use thiserror::Error;

/// Broad classification of a [`PagerError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// A referenced dataset is absent or the registry is empty/malformed
    Configuration,
    /// A collaborator returned a mapping that violates its output contract
    MalformedResult,
    /// A collaborator failed outright
    Computation,
    /// Underlying I/O failure
    Io,
}

/// Errors that can occur while selecting datasets or building impact tables
#[derive(Error, Debug)]
pub enum PagerError {
    /// The population registry has no entries
    #[error("no population datasets configured")]
    EmptyRegistry,

    /// A reference dataset path does not exist
    #[error("reference dataset does not exist: {0}")]
    MissingDataset(PathBuf),

    /// The hazard grid does not exist
    #[error("grid file does not exist: {0}")]
    GridNotFound(PathBuf),

    /// Failed to parse a configuration file
    #[error("failed to parse config '{path}': {message}")]
    ConfigParse { path: PathBuf, message: String },

    /// A collaborator's output violates its contract
    #[error("malformed {table} result: {reason}")]
    MalformedResult { table: &'static str, reason: String },

    /// A collaborator failed
    #[error("error computing {stage} for grid '{grid}': {message}")]
    Computation {
        stage: &'static str,
        grid: PathBuf,
        message: String,
    },

    /// Failed to read a file
    #[error("failed to read file '{path}': {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl PagerError {
    pub(crate) fn malformed(table: &'static str, reason: impl Into<String>) -> Self {
        PagerError::MalformedResult {
            table,
            reason: reason.into(),
        }
    }

    /// Classify this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            PagerError::EmptyRegistry
            | PagerError::MissingDataset(_)
            | PagerError::GridNotFound(_)
            | PagerError::ConfigParse { .. } => ErrorKind::Configuration,
            PagerError::MalformedResult { .. } => ErrorKind::MalformedResult,
            PagerError::Computation { .. } => ErrorKind::Computation,
            PagerError::FileRead { .. } => ErrorKind::Io,
        }
    }
}
