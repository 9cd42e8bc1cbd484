use crate::chunks::{shuffle_paths, split_into_chunks};
use crate::error::Result;
use crate::loader::load_source;
use crate::scanner::{ScanProgress, ZcovScanner};
use crate::stats::{ReloadReport, ReloadStats};
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::Mutex;
use tokio_util::sync::CancellationToken;
use zcov_cache::{CoverageCache, GraphMerge, GraphStore};
use zcov_records::FileRecord;

/// Incremental liveness events emitted while a reload runs
#[derive(Debug, Clone, Copy)]
pub enum ReloadEvent {
    /// The filesystem walk visited another entry
    Scanning(ScanProgress),

    /// Another source document was parsed and merged
    Parsing { loaded: usize, total: usize },
}

/// Callback receiving [`ReloadEvent`]s; shared across the loader tasks
pub type ProgressFn = Arc<dyn Fn(ReloadEvent) + Send + Sync>;

/// Result of a scan-based reload
#[derive(Debug)]
pub enum ReloadOutcome {
    Completed(ReloadReport),

    /// The scan finished normally but discovered no data files at all.
    /// Expected and recoverable; callers should suggest reconfiguring the
    /// scan roots instead of treating this as a failure.
    NothingFound,
}

/// One ingestion session: an explicit cache handle plus the reload engine.
///
/// The session owns the only shared mutable state, the [`CoverageCache`],
/// and funnels every mutation through one mutex. Scanning and parsing run
/// in parallel and touch nothing shared. A reload always rebuilds the cache
/// from empty; queries in between see the previous, complete snapshot of
/// whatever the last reload merged.
pub struct CoverageSession {
    cache: Arc<Mutex<CoverageCache>>,
    graph_merge: GraphMerge,
}

impl CoverageSession {
    #[must_use]
    pub fn new(graph_merge: GraphMerge) -> Self {
        Self {
            cache: Arc::new(Mutex::new(CoverageCache::new(graph_merge))),
            graph_merge,
        }
    }

    /// Full reload: scan the roots for `.zcov` files, then load and merge
    /// them with one worker per processing unit.
    ///
    /// Discovery order correlates with per-file cost, so the path list is
    /// shuffled before chunking to balance the workers.
    pub async fn reload_from_roots(
        &self,
        roots: &[PathBuf],
        token: &CancellationToken,
        progress: ProgressFn,
    ) -> Result<ReloadOutcome> {
        let started = Instant::now();
        self.reset().await;

        let scanner = ZcovScanner::new(roots);
        let scan_token = token.clone();
        let scan_progress = Arc::clone(&progress);
        let found = tokio::task::spawn_blocking(move || {
            scanner.scan(&scan_token, |p| scan_progress(ReloadEvent::Scanning(p)))
        })
        .await?;

        let mut paths: Vec<PathBuf> = found.into_iter().collect();
        if paths.is_empty() {
            if token.is_cancelled() {
                let report = self.finish_report(ReloadStats::new(), started, true).await;
                return Ok(ReloadOutcome::Completed(report));
            }
            return Ok(ReloadOutcome::NothingFound);
        }

        shuffle_paths(&mut paths);
        let report = self.load_and_merge(paths, token, progress, started).await?;
        Ok(ReloadOutcome::Completed(report))
    }

    /// Reload from explicit paths, bypassing the scan.
    ///
    /// Paths are processed in the order given (no shuffle); an empty list
    /// yields an empty report, not an error.
    pub async fn reload_from_paths(
        &self,
        paths: Vec<PathBuf>,
        token: &CancellationToken,
        progress: ProgressFn,
    ) -> Result<ReloadReport> {
        let started = Instant::now();
        self.reset().await;
        self.load_and_merge(paths, token, progress, started).await
    }

    /// Whether the session currently holds any coverage data.
    pub async fn is_data_loaded(&self) -> bool {
        self.cache.lock().await.is_data_loaded()
    }

    /// Exact-identity lookup.
    pub async fn query(&self, identity: &str) -> Option<FileRecord> {
        self.cache.lock().await.query(identity).cloned()
    }

    /// Resolve an absolute path via exact, then suffix matching.
    pub async fn find_for_path(&self, absolute_path: &str) -> Option<FileRecord> {
        self.cache.lock().await.find_for_path(absolute_path).cloned()
    }

    /// The session's graph payloads.
    pub async fn current_graphs(&self) -> GraphStore {
        self.cache.lock().await.graphs().clone()
    }

    /// All cached file identities, sorted lexicographically.
    pub async fn dump_paths(&self) -> Vec<String> {
        self.cache.lock().await.identities()
    }

    /// Discard the previous session's data wholesale.
    async fn reset(&self) {
        *self.cache.lock().await = CoverageCache::new(self.graph_merge);
    }

    async fn load_and_merge(
        &self,
        paths: Vec<PathBuf>,
        token: &CancellationToken,
        progress: ProgressFn,
        started: Instant,
    ) -> Result<ReloadReport> {
        let total = paths.len();
        let mut stats = ReloadStats::new();
        stats.sources_found = total;

        if total == 0 {
            return Ok(self.finish_report(stats, started, token.is_cancelled()).await);
        }

        let workers = std::thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(1);
        let chunks = split_into_chunks(paths, total.div_ceil(workers));

        let loaded_counter = Arc::new(AtomicUsize::new(0));
        let mut tasks = Vec::with_capacity(chunks.len());
        for chunk in chunks {
            let cache = Arc::clone(&self.cache);
            let token = token.clone();
            let progress = Arc::clone(&progress);
            let loaded_counter = Arc::clone(&loaded_counter);

            tasks.push(tokio::spawn(async move {
                let mut errors = Vec::new();
                for path in chunk {
                    // Once cancellation fires no new unit starts; the load
                    // already in flight on this worker finishes normally.
                    if token.is_cancelled() {
                        break;
                    }
                    match load_source(&path).await {
                        Ok(data) => {
                            // The single mutation critical section: within a
                            // chunk, sources merge in the order presented.
                            let mut cache = cache.lock().await;
                            cache.merge(data.files);
                            cache.merge_graphs(data.graphs);
                            cache.record_loaded_source();
                            drop(cache);

                            let loaded = loaded_counter.fetch_add(1, Ordering::Relaxed) + 1;
                            progress(ReloadEvent::Parsing { loaded, total });
                        }
                        Err(e) => errors.push(e.to_string()),
                    }
                }
                errors
            }));
        }

        for task in tasks {
            for error in task.await? {
                stats.add_error(error);
            }
        }

        Ok(self.finish_report(stats, started, token.is_cancelled()).await)
    }

    async fn finish_report(
        &self,
        mut stats: ReloadStats,
        started: Instant,
        cancelled: bool,
    ) -> ReloadReport {
        let cache = self.cache.lock().await;
        stats.sources_loaded = cache.source_count();
        stats.files = cache.file_count();
        stats.line_records = cache.line_record_count();
        stats.graphs = cache.graphs().len();
        drop(cache);

        stats.time_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);
        ReloadReport { stats, cancelled }
    }
}

impl Default for CoverageSession {
    fn default() -> Self {
        Self::new(GraphMerge::default())
    }
}
