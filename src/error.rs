// Error types for repomap
//
// Only hard failures live here. Everything the pipeline can degrade around
// (unreadable files, missing grammars, odd syntax nodes) is logged and skipped.

use std::path::PathBuf;
use thiserror::Error;

/// Errors surfaced to callers of the library and the CLI.
#[derive(Debug, Error)]
pub enum RepoMapError {
    /// `-l` named a language with no extension mapping
    #[error("unsupported language: {0}")]
    UnsupportedLanguage(String),

    /// Input root missing or not a directory
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Command-line arguments failed validation
    #[error("invalid arguments: {0}")]
    InvalidArguments(String),

    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl RepoMapError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, RepoMapError>;
