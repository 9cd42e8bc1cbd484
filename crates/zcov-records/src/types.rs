use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// A dataflow reference to a line in some file.
///
/// Used for both incoming (`data_from`) and outgoing (`data_to`) pointers.
/// Pure value type; `file` is whatever string the instrumentation tool wrote,
/// not necessarily an absolute path.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Edge {
    /// Target file, as recorded by the tool
    pub file: String,

    /// Target line (1-indexed)
    pub line_number: u32,
}

impl Edge {
    #[must_use]
    pub fn new(file: impl Into<String>, line_number: u32) -> Self {
        Self {
            file: file.into(),
            line_number,
        }
    }
}

/// The raw per-line event tag, as a closed enum.
///
/// The wire format carries this as a string. Tags we do not recognize are
/// preserved verbatim in `Other` so a newer tool version never breaks parsing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum LineKind {
    Exec,
    ExecAfterFlowEnd,
    FlowThrough,
    FlowEnd,
    Alloc,
    Other(String),
}

impl LineKind {
    /// The wire spelling of this tag.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Exec => "EXEC",
            Self::ExecAfterFlowEnd => "EXEC_AFTER_FLOW_END",
            Self::FlowThrough => "FLOW_THROUGH",
            Self::FlowEnd => "FLOW_END",
            Self::Alloc => "ALLOC",
            Self::Other(tag) => tag,
        }
    }
}

impl From<String> for LineKind {
    fn from(tag: String) -> Self {
        match tag.as_str() {
            "EXEC" => Self::Exec,
            "EXEC_AFTER_FLOW_END" => Self::ExecAfterFlowEnd,
            "FLOW_THROUGH" => Self::FlowThrough,
            "FLOW_END" => Self::FlowEnd,
            "ALLOC" => Self::Alloc,
            _ => Self::Other(tag),
        }
    }
}

impl From<LineKind> for String {
    fn from(kind: LineKind) -> Self {
        kind.as_str().to_string()
    }
}

/// One instrumentation event on one source line.
///
/// A line can carry several records (one per recorded event), so consumers
/// group by `line_number` before presenting per-line information.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineRecord {
    /// Event tag
    pub kind: LineKind,

    /// Source line (1-indexed)
    pub line_number: u32,

    /// Free-form annotation shown next to the line
    #[serde(default)]
    pub meta: String,

    /// Disassembly attached to the event, when the tool emitted any
    #[serde(default)]
    pub asm: Vec<String>,

    /// Lines this line received data from
    #[serde(default)]
    pub data_from: BTreeSet<Edge>,

    /// Lines this line sent data to
    #[serde(default)]
    pub data_to: BTreeSet<Edge>,
}

/// All records contributed for one file identity by one source document.
///
/// `file` is the cache key, kept exactly as it appears in the input; path
/// normalization only happens at query time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileRecord {
    pub file: String,

    #[serde(default)]
    pub lines: Vec<LineRecord>,
}

/// A named, opaque layout graph attached to a whole load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NamedGraph {
    pub name: String,

    /// Layout payload, passed through untouched
    pub data: serde_json::Value,
}

/// One parsed zcov document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceData {
    #[serde(default)]
    pub files: Vec<FileRecord>,

    #[serde(default)]
    pub graphs: Vec<NamedGraph>,
}

/// Group a file's records by line number for presentation.
///
/// Ordering within a group follows the cached sequence, so the first record
/// of a group is the earliest merged event for that line.
#[must_use]
pub fn group_by_line(lines: &[LineRecord]) -> BTreeMap<u32, Vec<&LineRecord>> {
    let mut grouped: BTreeMap<u32, Vec<&LineRecord>> = BTreeMap::new();
    for record in lines {
        grouped.entry(record.line_number).or_default().push(record);
    }
    grouped
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn record(kind: &str, line_number: u32) -> LineRecord {
        LineRecord {
            kind: LineKind::from(kind.to_string()),
            line_number,
            meta: String::new(),
            asm: Vec::new(),
            data_from: BTreeSet::new(),
            data_to: BTreeSet::new(),
        }
    }

    #[test]
    fn known_tags_round_trip() {
        for tag in ["EXEC", "EXEC_AFTER_FLOW_END", "FLOW_THROUGH", "FLOW_END", "ALLOC"] {
            let kind = LineKind::from(tag.to_string());
            assert!(!matches!(kind, LineKind::Other(_)), "{tag} should be recognized");
            assert_eq!(kind.as_str(), tag);
        }
    }

    #[test]
    fn unknown_tag_is_preserved() {
        let kind = LineKind::from("SOMETHING_NEW".to_string());
        assert_eq!(kind, LineKind::Other("SOMETHING_NEW".to_string()));
        assert_eq!(kind.as_str(), "SOMETHING_NEW");
    }

    #[test]
    fn grouping_keeps_record_order_within_a_line() {
        let lines = vec![
            record("EXEC", 4),
            record("FLOW_THROUGH", 2),
            record("FLOW_END", 4),
            record("EXEC", 2),
        ];

        let grouped = group_by_line(&lines);
        assert_eq!(grouped.len(), 2);
        assert_eq!(
            grouped[&4].iter().map(|r| r.kind.as_str()).collect::<Vec<_>>(),
            vec!["EXEC", "FLOW_END"]
        );
        assert_eq!(
            grouped[&2].iter().map(|r| r.kind.as_str()).collect::<Vec<_>>(),
            vec!["FLOW_THROUGH", "EXEC"]
        );
    }

    #[test]
    fn edge_sets_are_ordered_and_deduplicated() {
        let mut edges = BTreeSet::new();
        edges.insert(Edge::new("b.c", 10));
        edges.insert(Edge::new("a.c", 20));
        edges.insert(Edge::new("b.c", 10));

        let collected: Vec<_> = edges.iter().cloned().collect();
        assert_eq!(collected, vec![Edge::new("a.c", 20), Edge::new("b.c", 10)]);
    }
}
