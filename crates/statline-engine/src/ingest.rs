//! Tab-separated game data ingestion.
//!
//! Input format: a header line, then one row per game with nine
//! tab-separated fields in order
//! `date, team_id, pts, fg_pct, ft_pct, fg3_pct, ast, reb, wins`.
//! Malformed or invalid rows are silently dropped.

use statline_common::{GameRecord, Result, StatlineError};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use tracing::debug;

fn parse_i32(field: &str) -> i32 {
    field.trim().parse().unwrap_or(0)
}

fn parse_f32(field: &str) -> f32 {
    field.trim().parse().unwrap_or(0.0)
}

/// Parses one data row. Returns None when fewer than nine fields are
/// present; numeric fields that fail to parse become zero and are left to
/// validation.
pub fn parse_line(line: &str) -> Option<GameRecord> {
    let fields: Vec<&str> = line.split('\t').collect();
    if fields.len() < 9 {
        return None;
    }

    Some(GameRecord::new(
        fields[0].trim(),
        parse_i32(fields[1]),
        parse_i32(fields[2]),
        parse_f32(fields[3]),
        parse_f32(fields[4]),
        parse_f32(fields[5]),
        parse_i32(fields[6]),
        parse_i32(fields[7]),
        parse_i32(fields[8]),
    ))
}

/// Returns true when a parsed row passes validation: a positive team id,
/// non-negative points, a free-throw percentage inside [0, 1], and a
/// non-empty date.
pub fn is_valid(record: &GameRecord) -> bool {
    record.team_id > 0
        && record.points >= 0
        && record.ft_pct >= 0.0
        && record.ft_pct <= 1.0
        && !record.date().is_empty()
}

/// Reads a games file, skipping the header line and dropping every row
/// that fails to parse or validate.
pub fn load_records(path: &Path) -> Result<Vec<GameRecord>> {
    let file = File::open(path).map_err(|source| StatlineError::OpenFailed {
        path: path.to_path_buf(),
        source,
    })?;
    let reader = BufReader::new(file);

    let mut records = Vec::new();
    let mut dropped = 0usize;
    for line in reader.lines().skip(1) {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        match parse_line(&line) {
            Some(record) if is_valid(&record) => records.push(record),
            _ => dropped += 1,
        }
    }

    if dropped > 0 {
        debug!(dropped, "dropped malformed or invalid rows");
    }
    Ok(records)
}
