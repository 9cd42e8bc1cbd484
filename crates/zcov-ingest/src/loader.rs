use crate::error::{IngestError, Result};
use std::path::{Path, PathBuf};
use zcov_records::{parse_source, SourceData};

/// One batch entry: the source path and what loading it produced.
///
/// Keeping the path next to the result is what lets the merge step attribute
/// records (and failures) to the file they came from.
#[derive(Debug)]
pub struct LoadedSource {
    pub path: PathBuf,
    pub result: Result<SourceData>,
}

/// Read and parse a single zcov document.
pub async fn load_source(path: &Path) -> Result<SourceData> {
    let content = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| IngestError::Io {
            path: path.to_path_buf(),
            source,
        })?;

    parse_source(&content).map_err(|source| IngestError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Load several documents, preserving per-path attribution.
///
/// A failing file contributes its error and nothing else; sibling files in
/// the same batch are unaffected. An empty path list is a no-op.
pub async fn load_batch(paths: &[PathBuf]) -> Vec<LoadedSource> {
    let mut loaded = Vec::with_capacity(paths.len());
    for path in paths {
        let result = load_source(path).await;
        if let Err(e) = &result {
            log::warn!("{e}");
        }
        loaded.push(LoadedSource {
            path: path.clone(),
            result,
        });
    }
    loaded
}
