use crate::error::Result;
use crate::types::SourceData;

/// Parse one zcov document's content into typed records.
///
/// Tolerant by design: optional fields default, unknown `kind` tags are kept
/// as [`crate::LineKind::Other`]. Only structurally invalid JSON fails.
pub fn parse_source(content: &str) -> Result<SourceData> {
    Ok(serde_json::from_str(content)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Edge, LineKind};
    use crate::RecordError;
    use pretty_assertions::assert_eq;

    #[test]
    fn parses_full_document() {
        let doc = r#"{
            "files": [
                {
                    "file": "src/vulnerable.c",
                    "lines": [
                        {
                            "kind": "FLOW_THROUGH",
                            "line_number": 12,
                            "meta": "tainted copy",
                            "asm": ["mov rax, rbx"],
                            "data_from": [{"file": "src/input.c", "line_number": 3}],
                            "data_to": [{"file": "src/sink.c", "line_number": 44}]
                        }
                    ]
                }
            ],
            "graphs": [
                {"name": "g", "data": {"nodes": [1, 2]}}
            ]
        }"#;

        let data = parse_source(doc).unwrap();
        assert_eq!(data.files.len(), 1);
        assert_eq!(data.files[0].file, "src/vulnerable.c");

        let line = &data.files[0].lines[0];
        assert_eq!(line.kind, LineKind::FlowThrough);
        assert_eq!(line.line_number, 12);
        assert_eq!(line.meta, "tainted copy");
        assert_eq!(line.asm, vec!["mov rax, rbx".to_string()]);
        assert!(line.data_from.contains(&Edge::new("src/input.c", 3)));
        assert!(line.data_to.contains(&Edge::new("src/sink.c", 44)));

        assert_eq!(data.graphs.len(), 1);
        assert_eq!(data.graphs[0].name, "g");
    }

    #[test]
    fn optional_fields_default() {
        let doc = r#"{
            "files": [
                {
                    "file": "a.c",
                    "lines": [{"kind": "EXEC", "line_number": 1}]
                }
            ]
        }"#;

        let data = parse_source(doc).unwrap();
        let line = &data.files[0].lines[0];
        assert_eq!(line.meta, "");
        assert!(line.asm.is_empty());
        assert!(line.data_from.is_empty());
        assert!(line.data_to.is_empty());
        assert!(data.graphs.is_empty());
    }

    #[test]
    fn unrecognized_kind_does_not_fail() {
        let doc = r#"{
            "files": [
                {
                    "file": "a.c",
                    "lines": [{"kind": "FUTURE_EVENT", "line_number": 9}]
                }
            ]
        }"#;

        let data = parse_source(doc).unwrap();
        assert_eq!(
            data.files[0].lines[0].kind,
            LineKind::Other("FUTURE_EVENT".to_string())
        );
    }

    #[test]
    fn invalid_json_is_a_parse_error() {
        let err = parse_source("{ not json").unwrap_err();
        assert!(matches!(err, RecordError::Parse(_)));
    }
}
