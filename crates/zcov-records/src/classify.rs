use crate::types::{LineKind, LineRecord};
use std::fmt;

/// Rendering-agnostic semantic bucket for a recorded line.
///
/// Classification is total: every tag maps to exactly one category, with
/// unrecognized tags falling through to `DataflowEdgeCarrier`, the category
/// where the `data_from`/`data_to` edge sets are meaningful.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    /// The line was executed
    Executed,

    /// The line was executed after the crash dataflow already ended
    ExecutedAfterTerminalEvent,

    /// The crash-like event itself (`FLOW_END`)
    TerminalEvent,

    /// An allocation event
    Allocation,

    /// Default bucket: dataflow-through lines and anything unrecognized
    DataflowEdgeCarrier,
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Executed => "executed",
            Self::ExecutedAfterTerminalEvent => "executed-after-flow-end",
            Self::TerminalEvent => "flow-end",
            Self::Allocation => "allocation",
            Self::DataflowEdgeCarrier => "dataflow",
        };
        f.write_str(label)
    }
}

impl LineKind {
    /// Map this tag to its presentation category.
    #[must_use]
    pub fn category(&self) -> Category {
        match self {
            Self::Exec => Category::Executed,
            Self::ExecAfterFlowEnd => Category::ExecutedAfterTerminalEvent,
            Self::FlowEnd => Category::TerminalEvent,
            Self::Alloc => Category::Allocation,
            Self::FlowThrough | Self::Other(_) => Category::DataflowEdgeCarrier,
        }
    }
}

impl LineRecord {
    /// Classification of this record's tag.
    #[must_use]
    pub fn category(&self) -> Category {
        self.kind.category()
    }
}

/// Outcome of asking for a line's dataflow hover content.
///
/// `NotApplicable` is an expected answer for lines without dataflow edges,
/// not an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HoverOutcome {
    Found(String),
    NotApplicable,
}

/// Build the hover summary for one line's grouped records.
///
/// Only dataflow lines (`FLOW_THROUGH` and `FLOW_END`) have a summary; the
/// first record of the group decides, matching how the line is presented.
#[must_use]
pub fn dataflow_summary(records: &[&LineRecord]) -> HoverOutcome {
    let Some(first) = records.first() else {
        return HoverOutcome::NotApplicable;
    };
    if !matches!(first.kind, LineKind::FlowThrough | LineKind::FlowEnd) {
        return HoverOutcome::NotApplicable;
    }

    let mut content = format!("Data from {} locations.\n", first.data_from.len());
    content.push_str(&format!("Data to {} locations.", first.data_to.len()));
    HoverOutcome::Found(content)
}
