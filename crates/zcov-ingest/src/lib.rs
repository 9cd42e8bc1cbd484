//! # zcov Ingest
//!
//! Discovery, parallel loading, and merging of zcov coverage documents.
//!
//! ## Pipeline
//!
//! ```text
//! Root directories
//!     │
//!     ├──> Scanner (recursive, cancellable, progress per entry)
//!     │      └─> deduplicated .zcov paths
//!     │
//!     ├──> shuffle + chunk (one balanced group per processing unit)
//!     │
//!     ├──> parallel loaders (read + parse, per-path attribution)
//!     │
//!     └──> CoverageCache (merges serialized behind one mutex)
//! ```
//!
//! ## Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use tokio_util::sync::CancellationToken;
//! use zcov_cache::GraphMerge;
//! use zcov_ingest::{CoverageSession, ReloadOutcome};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let session = CoverageSession::new(GraphMerge::Keyed);
//!     let token = CancellationToken::new();
//!     let outcome = session
//!         .reload_from_roots(&["./build".into()], &token, Arc::new(|_| {}))
//!         .await?;
//!
//!     if let ReloadOutcome::Completed(report) = outcome {
//!         println!("merged {} files", report.stats.files);
//!     }
//!     Ok(())
//! }
//! ```

mod chunks;
mod error;
mod loader;
mod scanner;
mod session;
mod stats;

pub use chunks::{shuffle_paths, split_into_chunks};
pub use error::{IngestError, Result};
pub use loader::{load_batch, load_source, LoadedSource};
pub use scanner::{ScanProgress, ZcovScanner, ZCOV_EXTENSION};
pub use session::{CoverageSession, ProgressFn, ReloadEvent, ReloadOutcome};
pub use stats::{ReloadReport, ReloadStats};
