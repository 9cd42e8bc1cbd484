use thiserror::Error;

/// Result type for record parsing
pub type Result<T> = std::result::Result<T, RecordError>;

/// Errors that can occur while decoding a zcov document
#[derive(Error, Debug)]
pub enum RecordError {
    /// The content is not valid structured data
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),
}
