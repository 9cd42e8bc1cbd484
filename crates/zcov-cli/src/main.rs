use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use zcov_cache::GraphMerge;
use zcov_ingest::{CoverageSession, ProgressFn, ReloadEvent, ReloadOutcome};

mod config;
mod report;

use config::ZcovConfig;

/// How often scan liveness is logged, in directory entries
const SCAN_LOG_EVERY: usize = 1000;

#[derive(Parser)]
#[command(name = "zcov")]
#[command(about = "Ingest and inspect zcov coverage/dataflow data", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Quiet mode: log only warnings/errors
    #[arg(long, global = true)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Scan roots for .zcov files and rebuild the coverage cache
    Reload {
        /// Directories to scan (config > args > current directory)
        roots: Vec<PathBuf>,

        /// TOML config with build_directories
        #[arg(long)]
        config: Option<PathBuf>,

        /// Print the reload report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Load explicit .zcov files, bypassing the scan
    Load {
        /// Data files to load, in order
        #[arg(required = true)]
        paths: Vec<PathBuf>,

        /// Crash-session graph handling: the latest source with graphs
        /// replaces the whole list instead of merging by name
        #[arg(long)]
        snapshot_graphs: bool,

        /// Print the reload report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Reload, then dump cached file identities sorted lexicographically
    Paths {
        roots: Vec<PathBuf>,

        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Reload, then show per-line categories and dataflow edges for a file
    Inspect {
        /// Source file to resolve (absolute paths match cached relative
        /// identities by suffix)
        file: PathBuf,

        roots: Vec<PathBuf>,

        #[arg(long)]
        config: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli);

    let token = cancellation_token();
    match cli.command {
        Commands::Reload { roots, config, json } => {
            let roots = resolve_roots(roots, config.as_deref())?;
            let session = CoverageSession::new(GraphMerge::Keyed);
            match session
                .reload_from_roots(&roots, &token, logging_progress())
                .await?
            {
                ReloadOutcome::Completed(report) => report::print_report(&report, json)?,
                ReloadOutcome::NothingFound => print_nothing_found(&roots),
            }
        }
        Commands::Load {
            paths,
            snapshot_graphs,
            json,
        } => {
            let mode = if snapshot_graphs {
                GraphMerge::Snapshot
            } else {
                GraphMerge::Keyed
            };
            let session = CoverageSession::new(mode);
            let report = session
                .reload_from_paths(paths, &token, logging_progress())
                .await?;
            report::print_report(&report, json)?;
        }
        Commands::Paths { roots, config } => {
            let roots = resolve_roots(roots, config.as_deref())?;
            let session = CoverageSession::new(GraphMerge::Keyed);
            match session
                .reload_from_roots(&roots, &token, logging_progress())
                .await?
            {
                ReloadOutcome::Completed(_) => {
                    for identity in session.dump_paths().await {
                        println!("{identity}");
                    }
                }
                ReloadOutcome::NothingFound => print_nothing_found(&roots),
            }
        }
        Commands::Inspect { file, roots, config } => {
            let roots = resolve_roots(roots, config.as_deref())?;
            let session = CoverageSession::new(GraphMerge::Keyed);
            match session
                .reload_from_roots(&roots, &token, logging_progress())
                .await?
            {
                ReloadOutcome::Completed(_) => {
                    let queried = file.to_string_lossy();
                    match session.find_for_path(&queried).await {
                        Some(record) => report::print_file(&queried, &record),
                        None => println!("no coverage data for {queried}"),
                    }
                }
                ReloadOutcome::NothingFound => print_nothing_found(&roots),
            }
        }
    }

    Ok(())
}

fn init_logging(cli: &Cli) {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    if cli.quiet {
        builder.filter_level(log::LevelFilter::Warn);
    } else if cli.verbose {
        builder.filter_level(log::LevelFilter::Debug);
    }
    builder.target(env_logger::Target::Stderr).init();
}

/// Ctrl-C cancels the running reload; in-flight loads finish and the partial
/// report is still printed.
fn cancellation_token() -> CancellationToken {
    let token = CancellationToken::new();
    let signal = token.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            log::warn!("cancellation requested; finishing in-flight work");
            signal.cancel();
        }
    });
    token
}

/// Scan roots come from the config file when given, then CLI args, then the
/// current directory.
fn resolve_roots(args: Vec<PathBuf>, config: Option<&Path>) -> Result<Vec<PathBuf>> {
    if let Some(path) = config {
        let cfg = ZcovConfig::load(path)?;
        let workspace = path.parent().unwrap_or_else(|| Path::new("."));
        let configured = cfg.resolved_roots(workspace);
        if !configured.is_empty() {
            return Ok(configured);
        }
    }
    if !args.is_empty() {
        return Ok(args);
    }
    Ok(vec![std::env::current_dir()?])
}

fn logging_progress() -> ProgressFn {
    Arc::new(|event| match event {
        ReloadEvent::Scanning(p) => {
            if p.scanned % SCAN_LOG_EVERY == 0 {
                log::info!("[{}] scanning (found {})", p.scanned, p.matched);
            }
        }
        ReloadEvent::Parsing { loaded, total } => {
            log::info!("[{loaded}/{total}] parsing");
        }
    })
}

fn print_nothing_found(roots: &[PathBuf]) {
    println!("Cannot find any .zcov files.");
    for root in roots {
        println!("  searched {}", root.display());
    }
    println!("Point the scan at your build directories (args, or build_directories in a config file).");
}
