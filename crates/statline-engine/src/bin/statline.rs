//! Statline CLI driver.
//!
//! Runs the three tasks in sequence against a games file:
//! 1. ingest the tab-separated data into the heap file
//! 2. bulk-build the B+ tree index on FT%
//! 3. query FT% in [0.9, 1.0] through the index and by brute force,
//!    delete the matches, and write the result files
//!
//! Usage: `statline [games_file] [output_dir]`
//! (defaults: `data/games.txt`, `output`)

use statline_common::{Result, StorageConfig};
use statline_engine::{ingest, report, QueryEngine};
use statline_index::BPlusTree;
use statline_storage::HeapFile;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Instant;
use tracing::{error, info};

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<()> {
    let mut args = std::env::args().skip(1);
    let games_path = args
        .next()
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("data/games.txt"));
    let data_dir = args
        .next()
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("output"));

    let config = StorageConfig {
        data_dir,
        ..Default::default()
    };
    std::fs::create_dir_all(&config.data_dir)?;

    // Task 1: ingest and store.
    info!(path = %games_path.display(), "parsing games data");
    let records = ingest::load_records(&games_path)?;
    info!("parsed {} valid game rows", records.len());

    let heap = HeapFile::open(config.heap_path())?;
    let index = BPlusTree::open(config.index_path())?;
    let mut engine = QueryEngine::new(heap, index);

    let start = Instant::now();
    let stored = engine.load_heap(&records)?;
    info!(
        "stored {} records in {} blocks ({:.3}s)",
        stored,
        engine.heap().num_blocks(),
        start.elapsed().as_secs_f64()
    );
    report::write_storage_report(&config.data_dir, engine.heap())?;

    // Task 2: bulk-build the index on FT%.
    let start = Instant::now();
    let entries = engine.build_index()?;
    info!(
        "indexed {} entries, {} levels ({:.3}s)",
        entries,
        engine.index().num_levels()?,
        start.elapsed().as_secs_f64()
    );
    report::write_index_report(&config.data_dir, engine.index())?;

    // Task 3: query both ways, then delete the matches.
    let indexed = engine.indexed_range_scan(0.9, 1.0)?;
    info!(
        "index path: {} games, avg FT% {:.4}, {} index I/Os ({} unique), {} block I/Os ({} unique)",
        indexed.matches,
        indexed.avg_key,
        indexed.index_ios.total_ios,
        indexed.index_ios.unique_pages,
        indexed.heap_ios.total_ios,
        indexed.heap_ios.unique_pages
    );

    let brute = engine.full_scan(0.9, 1.0)?;
    info!(
        "brute force: {} games over {} blocks, avg FT% {:.4}",
        brute.matches, brute.blocks_scanned, brute.avg_key
    );

    let deleted = engine.delete_range(0.9, 1.0)?;
    info!(
        "deleted {} index entries, {} heap records",
        deleted.index_removed, deleted.heap_deleted
    );

    report::write_query_report(&config.data_dir, &indexed, &brute, &deleted, engine.index())?;
    report::write_summary_report(&config.data_dir, engine.heap(), engine.index())?;

    engine.close()?;
    info!("done; results in {}", config.data_dir.display());
    Ok(())
}
