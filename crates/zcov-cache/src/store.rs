use crate::graphs::{GraphMerge, GraphStore};
use std::collections::BTreeMap;
use zcov_records::{FileRecord, NamedGraph};

/// In-memory index of everything loaded in one ingestion session.
///
/// Line data is monotonically growing coverage data: merging a second record
/// set for a known file identity appends to the existing sequence. A reload
/// discards the whole cache and starts from an empty one; individual entries
/// are never invalidated.
#[derive(Debug, Clone)]
pub struct CoverageCache {
    data_by_file: BTreeMap<String, FileRecord>,
    graphs: GraphStore,
    loaded_sources: usize,
}

impl CoverageCache {
    #[must_use]
    pub fn new(mode: GraphMerge) -> Self {
        Self {
            data_by_file: BTreeMap::new(),
            graphs: GraphStore::new(mode),
            loaded_sources: 0,
        }
    }

    /// Fold one source document's file records into the cache.
    ///
    /// Duplicate instrumentation events are expected and meaningful, so lines
    /// are appended as-is, never deduplicated.
    pub fn merge(&mut self, files: Vec<FileRecord>) {
        for incoming in files {
            match self.data_by_file.get_mut(&incoming.file) {
                Some(cached) => cached.lines.extend(incoming.lines),
                None => {
                    self.data_by_file.insert(incoming.file.clone(), incoming);
                }
            }
        }
    }

    /// Fold one source document's graphs in, per the session's merge mode.
    pub fn merge_graphs(&mut self, graphs: Vec<NamedGraph>) {
        self.graphs.merge(graphs);
    }

    /// Count one successfully loaded source document.
    pub fn record_loaded_source(&mut self) {
        self.loaded_sources += 1;
    }

    /// Exact-identity lookup.
    #[must_use]
    pub fn query(&self, identity: &str) -> Option<&FileRecord> {
        self.data_by_file.get(identity)
    }

    /// Resolve an externally supplied absolute path to cached data.
    ///
    /// Exact match wins. Otherwise the cached identities are scanned for one
    /// that the query path ends with, covering repository-relative keys
    /// queried by full filesystem path. The scan runs in lexicographic
    /// identity order, so an ambiguous suffix resolves deterministically to
    /// the lexicographically smallest identity.
    #[must_use]
    pub fn find_for_path(&self, absolute_path: &str) -> Option<&FileRecord> {
        if let Some(record) = self.data_by_file.get(absolute_path) {
            return Some(record);
        }
        self.data_by_file
            .iter()
            .find(|(identity, _)| absolute_path.ends_with(identity.as_str()))
            .map(|(_, record)| record)
    }

    /// All cached file identities, sorted lexicographically.
    #[must_use]
    pub fn identities(&self) -> Vec<String> {
        self.data_by_file.keys().cloned().collect()
    }

    #[must_use]
    pub fn graphs(&self) -> &GraphStore {
        &self.graphs
    }

    #[must_use]
    pub fn file_count(&self) -> usize {
        self.data_by_file.len()
    }

    /// Total line records across all cached files.
    #[must_use]
    pub fn line_record_count(&self) -> usize {
        self.data_by_file.values().map(|record| record.lines.len()).sum()
    }

    /// Number of source documents merged so far.
    #[must_use]
    pub fn source_count(&self) -> usize {
        self.loaded_sources
    }

    /// Whether any coverage data has been loaded.
    #[must_use]
    pub fn is_data_loaded(&self) -> bool {
        !self.data_by_file.is_empty()
    }
}

impl Default for CoverageCache {
    fn default() -> Self {
        Self::new(GraphMerge::default())
    }
}
