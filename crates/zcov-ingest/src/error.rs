use std::path::PathBuf;
use thiserror::Error;
use zcov_records::RecordError;

/// Result type for ingestion operations
pub type Result<T> = std::result::Result<T, IngestError>;

/// Errors that can occur while loading coverage data.
///
/// Read and parse failures stay attributable to one source path; the batch
/// they occurred in keeps going.
#[derive(Error, Debug)]
pub enum IngestError {
    /// A source file could not be read
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A source file's content is not a valid zcov document
    #[error("failed to parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: RecordError,
    },

    /// A loader task died before reporting a result
    #[error("loader task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

impl IngestError {
    /// Whether this failure is a content-level parse error (as opposed to an
    /// unreadable file).
    #[must_use]
    pub fn is_parse(&self) -> bool {
        matches!(self, Self::Parse { .. })
    }
}
