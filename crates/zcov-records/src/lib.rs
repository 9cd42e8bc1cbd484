//! # zcov Records
//!
//! Typed model and parser for the structured documents emitted by the zcov
//! instrumentation tool.
//!
//! ## Pipeline
//!
//! ```text
//! .zcov document (JSON)
//!     │
//!     ├──> parse_source
//!     │      └─> SourceData { files, graphs }
//!     │
//!     ├──> LineKind (closed tag enum, unknown tags preserved)
//!     │
//!     └──> Category (rendering-agnostic classification)
//! ```
//!
//! ## Example
//!
//! ```rust
//! use zcov_records::{parse_source, Category};
//!
//! let doc = r#"{
//!     "files": [
//!         { "file": "vulnerable.c",
//!           "lines": [ { "kind": "EXEC", "line_number": 12, "meta": "" } ] }
//!     ]
//! }"#;
//!
//! let data = parse_source(doc).unwrap();
//! let line = &data.files[0].lines[0];
//! assert_eq!(line.kind.category(), Category::Executed);
//! ```

mod classify;
mod error;
mod parse;
mod types;

pub use classify::{dataflow_summary, Category, HoverOutcome};
pub use error::{RecordError, Result};
pub use parse::parse_source;
pub use types::{group_by_line, Edge, FileRecord, LineKind, LineRecord, NamedGraph, SourceData};
