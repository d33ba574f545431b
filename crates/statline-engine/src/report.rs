//! Renders the textual result files summarizing a full run.

use crate::query::{DeleteReport, FullScanReport, IndexedScanReport};
use statline_common::{Result, RECORD_SIZE};
use statline_index::BPlusTree;
use statline_storage::{HeapFile, BLOCK_SIZE, RECORDS_PER_BLOCK};
use std::fmt::Write as _;
use std::fs;
use std::path::Path;

fn format_root_keys(keys: &[f32]) -> String {
    keys.iter()
        .map(|k| format!("{:.3}", k))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Writes `task1_results.txt`: storage statistics.
pub fn write_storage_report(dir: &Path, heap: &HeapFile) -> Result<()> {
    let mut out = String::new();
    let _ = writeln!(out, "=== TASK 1: STORAGE COMPONENT RESULTS ===");
    let _ = writeln!(out, "Game statistics:");
    let _ = writeln!(out, "- Total games: {}", heap.num_records());
    let _ = writeln!(out, "- Record size: {} bytes", RECORD_SIZE);
    let _ = writeln!(out, "- Games per block: {}", RECORDS_PER_BLOCK);
    let _ = writeln!(out, "- Total blocks: {}", heap.num_blocks());
    let _ = writeln!(out, "- Block size: {} bytes", BLOCK_SIZE);
    let _ = writeln!(out, "- Database file: {}", heap.path().display());
    fs::write(dir.join("task1_results.txt"), out)?;
    Ok(())
}

/// Writes `task2_results.txt`: index statistics.
pub fn write_index_report(dir: &Path, index: &BPlusTree) -> Result<()> {
    let mut out = String::new();
    let _ = writeln!(out, "=== TASK 2: INDEXING COMPONENT RESULTS ===");
    let _ = writeln!(out, "B+ tree statistics:");
    let _ = writeln!(out, "- Order (n): {}", index.order());
    let _ = writeln!(out, "- Number of nodes: {}", index.num_nodes());
    let _ = writeln!(out, "- Number of levels: {}", index.num_levels()?);
    let _ = writeln!(out, "- Root node id: {}", index.root_id());
    let _ = writeln!(
        out,
        "- Root node keys: {}",
        format_root_keys(&index.root_keys()?)
    );
    let _ = writeln!(out, "- Index file: {}", index.path().display());
    fs::write(dir.join("task2_results.txt"), out)?;
    Ok(())
}

/// Writes `task3_results.txt`: the indexed-versus-brute comparison and the
/// deletion outcome, plus the post-deletion tree shape.
pub fn write_query_report(
    dir: &Path,
    indexed: &IndexedScanReport,
    brute: &FullScanReport,
    deleted: &DeleteReport,
    index: &BPlusTree,
) -> Result<()> {
    let mut out = String::new();
    let _ = writeln!(out, "=== TASK 3: QUERY PROCESSING RESULTS ===");
    let _ = writeln!(out, "Query: find and delete games with FT% in [0.9, 1.0]");
    let _ = writeln!(out);

    let _ = writeln!(out, "B+ tree method:");
    let _ = writeln!(out, "- Games found: {}", indexed.matches);
    let _ = writeln!(out, "- Index node I/Os (total): {}", indexed.index_ios.total_ios);
    let _ = writeln!(
        out,
        "- Index nodes accessed (unique): {}",
        indexed.index_ios.unique_pages
    );
    let _ = writeln!(out, "- Data block I/Os (total): {}", indexed.heap_ios.total_ios);
    let _ = writeln!(
        out,
        "- Data blocks accessed (unique): {}",
        indexed.heap_ios.unique_pages
    );
    let _ = writeln!(out, "- Average FT%: {:.4}", indexed.avg_key);
    let _ = writeln!(out, "- Runtime: {:.6} seconds", indexed.elapsed.as_secs_f64());
    let _ = writeln!(out);

    let _ = writeln!(out, "Brute force method:");
    let _ = writeln!(out, "- Games found: {}", brute.matches);
    let _ = writeln!(out, "- Data blocks scanned: {}", brute.blocks_scanned);
    let _ = writeln!(out, "- Data block I/Os (total): {}", brute.heap_ios.total_ios);
    let _ = writeln!(out, "- Average FT%: {:.4}", brute.avg_key);
    let _ = writeln!(out, "- Runtime: {:.6} seconds", brute.elapsed.as_secs_f64());
    let _ = writeln!(out);

    let _ = writeln!(out, "Deletion:");
    let _ = writeln!(out, "- Entries removed from index: {}", deleted.index_removed);
    let _ = writeln!(out, "- Records deleted from heap: {}", deleted.heap_deleted);
    let _ = writeln!(out);

    let _ = writeln!(out, "B+ tree after deletion:");
    let _ = writeln!(out, "- Number of nodes: {}", index.num_nodes());
    let _ = writeln!(out, "- Number of levels: {}", index.num_levels()?);
    let _ = writeln!(
        out,
        "- Root node keys: {}",
        format_root_keys(&index.root_keys()?)
    );
    fs::write(dir.join("task3_results.txt"), out)?;
    Ok(())
}

/// Writes `summary_results.txt`: a one-page overview of the whole run.
pub fn write_summary_report(dir: &Path, heap: &HeapFile, index: &BPlusTree) -> Result<()> {
    let used = heap.num_records() as f64 * RECORD_SIZE as f64;
    let total = heap.num_blocks().max(1) as f64 * BLOCK_SIZE as f64;

    let mut out = String::new();
    let _ = writeln!(out, "=== STATLINE SUMMARY RESULTS ===");
    let _ = writeln!(out);
    let _ = writeln!(out, "Storage:");
    let _ = writeln!(out, "- Total games: {}", heap.num_records());
    let _ = writeln!(out, "- Total blocks: {}", heap.num_blocks());
    let _ = writeln!(out, "- Storage efficiency: {:.1}%", used * 100.0 / total);
    let _ = writeln!(out);
    let _ = writeln!(out, "Index:");
    let _ = writeln!(out, "- Order: {}", index.order());
    let _ = writeln!(out, "- Height: {} levels", index.num_levels()?);
    let _ = writeln!(out, "- Total nodes: {}", index.num_nodes());
    let _ = writeln!(
        out,
        "- Root node keys: {}",
        format_root_keys(&index.root_keys()?)
    );
    fs::write(dir.join("summary_results.txt"), out)?;
    Ok(())
}
