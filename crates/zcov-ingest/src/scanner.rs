use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use tokio_util::sync::CancellationToken;
use walkdir::WalkDir;

/// Extension of the data files the instrumentation tool writes
pub const ZCOV_EXTENSION: &str = "zcov";

/// Liveness counters reported while a potentially slow walk is running
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScanProgress {
    /// Directory entries visited so far
    pub scanned: usize,

    /// Matching data files found so far
    pub matched: usize,
}

/// Scanner for finding zcov data files under one or more root directories
pub struct ZcovScanner {
    roots: Vec<PathBuf>,
}

impl ZcovScanner {
    #[must_use]
    pub fn new(roots: impl IntoIterator<Item = impl AsRef<Path>>) -> Self {
        Self {
            roots: roots.into_iter().map(|r| r.as_ref().to_path_buf()).collect(),
        }
    }

    /// Walk all roots and collect the set of absolute `.zcov` paths.
    ///
    /// Coverage data lives in build directories, so the walk deliberately
    /// ignores VCS ignore rules. Unreadable entries are skipped, not fatal.
    /// The cancellation token is polled at every directory-entry step; once
    /// it fires the partial result collected so far is returned.
    ///
    /// The result is a set: the same file can be reachable from more than
    /// one configured root.
    pub fn scan(
        &self,
        token: &CancellationToken,
        mut on_progress: impl FnMut(ScanProgress),
    ) -> BTreeSet<PathBuf> {
        let mut paths = BTreeSet::new();
        let mut progress = ScanProgress::default();

        for root in &self.roots {
            let root = std::fs::canonicalize(root).unwrap_or_else(|_| root.clone());
            for entry in WalkDir::new(&root) {
                if token.is_cancelled() {
                    log::debug!("scan cancelled after {} entries", progress.scanned);
                    return paths;
                }

                progress.scanned += 1;
                match entry {
                    Ok(entry) => {
                        if entry.file_type().is_file() && has_zcov_extension(entry.path()) {
                            paths.insert(entry.path().to_path_buf());
                            progress.matched = paths.len();
                        }
                    }
                    Err(e) => log::warn!("failed to read entry: {e}"),
                }
                on_progress(progress);
            }
        }

        log::info!("found {} zcov files under {} roots", paths.len(), self.roots.len());
        paths
    }
}

fn has_zcov_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case(ZCOV_EXTENSION))
}
