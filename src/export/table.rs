//! CSV export of the block table.
//!
//! The table starts with a header row, followed by an all-blank row that the
//! viewer uses as its "no block" entry, followed by one row per block state.

use super::BlockRow;
use crate::error::Result;
use std::io::Write;

/// Column names of the block table.
pub const HEADER: [&str; 13] = [
    "name", "r", "g", "b", "a", "r2", "g2", "b2", "a2", "biome", "state", "shape", "waterlogged",
];

/// Write the block table to `writer`.
pub fn write_csv<W: Write>(writer: W, rows: &[BlockRow]) -> Result<()> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);

    writer.write_record(HEADER)?;
    writer.write_record([""; HEADER.len()])?;
    for row in rows {
        writer.serialize(row)?;
    }

    writer.flush()?;
    Ok(())
}

/// Export the block table as CSV bytes.
pub fn export_csv(rows: &[BlockRow]) -> Result<Vec<u8>> {
    let mut bytes = Vec::new();
    write_csv(&mut bytes, rows)?;
    Ok(bytes)
}
