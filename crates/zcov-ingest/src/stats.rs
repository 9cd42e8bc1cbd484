use serde::{Deserialize, Serialize};

/// Statistics about one reload operation
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReloadStats {
    /// Source documents discovered (or explicitly requested)
    pub sources_found: usize,

    /// Source documents loaded and merged
    pub sources_loaded: usize,

    /// File identities in the cache
    pub files: usize,

    /// Line records across all cached files
    pub line_records: usize,

    /// Graph payloads in the cache
    pub graphs: usize,

    /// Time taken in milliseconds
    pub time_ms: u64,

    /// Per-source failures, accumulated without aborting the reload
    pub errors: Vec<String>,
}

impl ReloadStats {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_error(&mut self, error: String) {
        self.errors.push(error);
    }
}

/// Outcome of a completed (possibly cancelled) reload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReloadReport {
    pub stats: ReloadStats,

    /// True when cancellation stopped the reload before all units ran.
    /// The cache still holds everything merged up to that point.
    pub cancelled: bool,
}
