//! CSV output tables
//!
//! Every table starts with a header row, including empty ones. Null cells
//! are written as empty fields. Existing files are overwritten.

use csv::WriterBuilder;
use serde::Serialize;
use std::fs;
use std::path::Path;
use tracing::info;

use crate::errors::Result;
use crate::pipeline::mappings::{MappingRow, MAPPING_COLUMNS};
use crate::pipeline::overlap::{OverlapRecord, OVERLAP_COLUMNS};
use crate::pipeline::typing::{TypingRow, TYPING_COLUMNS};

/// Write `rows` under an explicit header
pub fn write_table<T: Serialize>(path: &Path, header: &[&str], rows: &[T]) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    let mut writer = WriterBuilder::new().has_headers(false).from_path(path)?;
    writer.write_record(header)?;
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;

    info!("Wrote {} row(s) to {}", rows.len(), path.display());
    Ok(())
}

pub fn write_mappings(path: &Path, rows: &[MappingRow]) -> Result<()> {
    write_table(path, &MAPPING_COLUMNS, rows)
}

pub fn write_typing(path: &Path, rows: &[TypingRow]) -> Result<()> {
    write_table(path, &TYPING_COLUMNS, rows)
}

pub fn write_overlaps(path: &Path, rows: &[OverlapRecord]) -> Result<()> {
    write_table(path, &OVERLAP_COLUMNS, rows)
}
