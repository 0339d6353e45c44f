pub mod blocks;
pub mod extract;
pub mod normalize;
pub mod sections;

use std::path::{Path, PathBuf};

use rayon::prelude::*;
use tracing::{debug, info};

use crate::db::SdrRecord;
use crate::error::LoadError;

#[derive(Debug)]
pub struct ParsedFile {
    pub path: PathBuf,
    pub blocks: usize,
    pub records: Vec<SdrRecord>,
}

/// Two-pass pipeline: raw dump → report blocks → records.
///
/// Blocks are independent, so they are parsed in parallel; output keeps
/// source order.
pub fn parse_sdr_text(text: &str) -> (usize, Vec<SdrRecord>) {
    let blocks = blocks::split_reports(text);
    let records: Vec<SdrRecord> = blocks
        .par_iter()
        .filter_map(|block| extract::parse_block(block))
        .collect();
    debug!(
        blocks = blocks.len(),
        records = records.len(),
        "discarded {} non-report blocks",
        blocks.len() - records.len()
    );
    (blocks.len(), records)
}

/// Parse one SDR export. Invalid UTF-8 is replaced, not rejected.
pub fn parse_sdr_file(path: &Path) -> Result<ParsedFile, LoadError> {
    if !path.is_file() {
        return Err(LoadError::FileNotFound(path.to_path_buf()));
    }
    let bytes = std::fs::read(path).map_err(|source| LoadError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let text = String::from_utf8_lossy(&bytes);
    let (blocks, records) = parse_sdr_text(&text);
    info!("Parsed {}: {} blocks, {} records", path.display(), blocks, records.len());

    Ok(ParsedFile {
        path: path.to_path_buf(),
        blocks,
        records,
    })
}

/// Parse several exports in argument order. Every path is checked up front
/// so a typo in the last argument fails the run before any parsing starts.
pub fn parse_sdr_files(paths: &[PathBuf]) -> Result<Vec<ParsedFile>, LoadError> {
    if let Some(missing) = paths.iter().find(|p| !p.is_file()) {
        return Err(LoadError::FileNotFound(missing.clone()));
    }
    paths.iter().map(|p| parse_sdr_file(p)).collect()
}

// ── Tests ──
