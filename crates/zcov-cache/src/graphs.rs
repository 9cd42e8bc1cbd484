use std::collections::BTreeMap;
use zcov_records::NamedGraph;

/// How a session folds incoming graph payloads into the cache.
///
/// The instrumentation tool is used in two modes and they disagree here:
/// multi-file coverage sessions key graphs by name and let a later load
/// replace an earlier payload under the same name, while single-file crash
/// sessions treat the graph list as one snapshot and replace it wholesale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GraphMerge {
    /// Insert-or-replace per graph name (last write wins)
    #[default]
    Keyed,

    /// The latest source that carries any graphs replaces the whole list
    Snapshot,
}

/// The session's graph payloads, shaped by its [`GraphMerge`] mode.
#[derive(Debug, Clone, PartialEq)]
pub enum GraphStore {
    Keyed(BTreeMap<String, serde_json::Value>),
    Snapshot(Vec<NamedGraph>),
}

impl GraphStore {
    #[must_use]
    pub fn new(mode: GraphMerge) -> Self {
        match mode {
            GraphMerge::Keyed => Self::Keyed(BTreeMap::new()),
            GraphMerge::Snapshot => Self::Snapshot(Vec::new()),
        }
    }

    /// Fold one source's graphs in, per the store's mode.
    pub fn merge(&mut self, graphs: Vec<NamedGraph>) {
        match self {
            Self::Keyed(named) => {
                for graph in graphs {
                    named.insert(graph.name, graph.data);
                }
            }
            Self::Snapshot(current) => {
                // A source without graphs leaves the previous snapshot alone.
                if !graphs.is_empty() {
                    *current = graphs;
                }
            }
        }
    }

    /// Look up a graph payload by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&serde_json::Value> {
        match self {
            Self::Keyed(named) => named.get(name),
            Self::Snapshot(graphs) => graphs
                .iter()
                .find(|graph| graph.name == name)
                .map(|graph| &graph.data),
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::Keyed(named) => named.len(),
            Self::Snapshot(graphs) => graphs.len(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Graph names in presentation order.
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        match self {
            Self::Keyed(named) => named.keys().map(String::as_str).collect(),
            Self::Snapshot(graphs) => graphs.iter().map(|graph| graph.name.as_str()).collect(),
        }
    }
}
