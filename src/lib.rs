//! # Block Tables
//!
//! A Rust library for turning Minecraft block definitions into the flat
//! lookup tables a map viewer renders from.
//!
//! ## Overview
//!
//! Inputs are a list of block names, a set of hand-authored override tables
//! (literal colors, copy-from-block and copy-from-texture color rules, biome
//! tints, per-state shapes, copy-shape rules and waterlog rules), the average
//! color of every block texture and the shape codes decoded from a legend
//! image. The output is one row per block state with the block's colors,
//! biome tag, shape code and waterlogged flag.
//!
//! ## Quick Start
//!
//! ```ignore
//! use block_tables::{load_tables, resolve_blocks, ResolverConfig};
//! use block_tables::export::{export_csv, flatten};
//!
//! // Load every table from a data directory
//! let tables = load_tables("path/to/data")?;
//!
//! // Resolve all blocks, in block list order
//! let blocks = resolve_blocks(&tables, &ResolverConfig::default())?;
//!
//! // Write the viewer table
//! let csv_bytes = export_csv(&flatten(&blocks))?;
//! ```
//!
//! ## Extraction
//!
//! The texture color and shape tables are generated from game assets:
//!
//! ```ignore
//! use block_tables::extract::{extract_texture_colors, decode_shape_legend};
//!
//! // A client jar, a resource pack zip, or a directory of PNGs
//! let colors = extract_texture_colors("path/to/client.jar")?;
//! let shapes = decode_shape_legend("shapes.png", "shapenames.csv")?;
//! ```

pub mod error;
pub mod types;
pub mod tables;
pub mod extract;
pub mod resolver;
pub mod export;

// Re-export main types for convenience
pub use error::{Result, TableError};
pub use types::{ColorSlot, Rgba, ShapeCode, StateString};
pub use tables::{AttributeTables, ColorSource, StateShapeRule, TableFiles, TableKind, WaterlogRule};
pub use resolver::{resolve_blocks, BlockResolver, ResolvedBlock, ResolverConfig, StateShape};
pub use export::{export_csv, export_json, flatten, BlockRow};

/// Load all tables from a data directory using the default file names.
pub fn load_tables<P: AsRef<std::path::Path>>(dir: P) -> Result<AttributeTables> {
    tables::loader::load_from_dir(dir, &TableFiles::default())
}

/// Load, resolve and flatten in one pass.
///
/// Every block is resolved before any row is returned, so a fatal lookup
/// failure yields no rows at all.
pub fn build_block_table<P: AsRef<std::path::Path>>(
    dir: P,
    files: &TableFiles,
    config: &ResolverConfig,
) -> Result<Vec<BlockRow>> {
    let tables = tables::loader::load_from_dir(dir, files)?;
    let blocks = resolve_blocks(&tables, config)?;
    Ok(flatten(&blocks))
}
