use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::vocabulary::UnknownTier;

/// Failures while loading a vocabulary table
#[derive(Debug, Error)]
pub enum VocabularyError {
    #[error("failed to read vocabulary file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("malformed vocabulary json: {0}")]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    UnknownTier(#[from] UnknownTier),
}

/// Input validation errors for sentence logs. These are reported, never retried.
#[derive(Debug, Error)]
pub enum InputError {
    #[error("failed to open sentence log {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("malformed sentence log: {0}")]
    Csv(#[from] csv::Error),
    #[error("sentence log is missing required column `{0}`")]
    MissingColumn(String),
    #[error("invalid user id `{0}`: must be non-empty and free of path separators")]
    InvalidUserId(String),
}

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("chart backend failed: {0}")]
    Backend(String),
    #[error(transparent)]
    Io(#[from] io::Error),
}

/// Top-level error for trend generation
#[derive(Debug, Error)]
pub enum TrendError {
    #[error("failed to create output directory {path}: {source}")]
    OutputDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to write trend summary {path}: {source}")]
    Summary {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error(transparent)]
    SummaryJson(#[from] serde_json::Error),
    #[error(transparent)]
    Input(#[from] InputError),
    #[error(transparent)]
    Render(#[from] RenderError),
}
