// File: crates/timeline-core/src/error.rs
// Summary: Error type for the CSV loading stage (the only fallible part of the core).

use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("failed to open {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
    #[error("missing column '{0}' in header row")]
    MissingColumn(String),
    #[error("row {row}: invalid date '{value}' (expected DD.MM.YYYY)")]
    InvalidDate { row: usize, value: String },
    #[error("row {row}: invalid year '{value}'")]
    InvalidYear { row: usize, value: String },
}
