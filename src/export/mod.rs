//! Output table export.
//!
//! Resolved blocks are flattened into one [`BlockRow`] per `(block, state)`
//! pair and written either as the CSV table the viewer loads or as JSON.

pub mod json;
pub mod table;

pub use json::export_json;
pub use table::{export_csv, write_csv, HEADER};

use crate::resolver::ResolvedBlock;
use crate::types::Rgba;
use serde::Serialize;

/// One output row: a single state of a single block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BlockRow {
    pub name: String,
    pub r: Option<u8>,
    pub g: Option<u8>,
    pub b: Option<u8>,
    pub a: Option<u8>,
    pub r2: Option<u8>,
    pub g2: Option<u8>,
    pub b2: Option<u8>,
    pub a2: Option<u8>,
    pub biome: Option<String>,
    pub state: String,
    pub shape: String,
    /// `1` for submerged states, `0` otherwise.
    pub waterlogged: u8,
}

fn split_color(color: Option<Rgba>) -> [Option<u8>; 4] {
    match color {
        Some(c) => c.channels().map(Some),
        None => [None; 4],
    }
}

/// Rows for one block, in the order of its resolved states.
pub fn block_rows(block: &ResolvedBlock) -> impl Iterator<Item = BlockRow> + '_ {
    let [r, g, b, a] = split_color(block.primary);
    let [r2, g2, b2, a2] = split_color(block.secondary);

    block.states.iter().map(move |entry| BlockRow {
        name: block.name.clone(),
        r,
        g,
        b,
        a,
        r2,
        g2,
        b2,
        a2,
        biome: block.biome.clone(),
        state: entry.state.to_string(),
        shape: entry.shape.to_string(),
        waterlogged: u8::from(entry.waterlogged),
    })
}

/// Flatten resolved blocks into output rows, keeping block order.
pub fn flatten(blocks: &[ResolvedBlock]) -> Vec<BlockRow> {
    blocks.iter().flat_map(block_rows).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolver::StateShape;
    use crate::types::{ShapeCode, StateString};

    fn seagrass() -> ResolvedBlock {
        let cross = ShapeCode::parse("cross", "0000040000600000").unwrap();
        ResolvedBlock {
            name: "seagrass".to_string(),
            primary: Some(Rgba::new(34, 102, 34, 200)),
            secondary: None,
            biome: Some("water".to_string()),
            states: vec![
                StateShape {
                    state: StateString::empty(),
                    shape: cross.clone(),
                    waterlogged: false,
                },
                StateShape {
                    state: StateString::new("waterlogged=true"),
                    shape: cross,
                    waterlogged: true,
                },
            ],
        }
    }

    #[test]
    fn test_block_rows_share_block_attributes() {
        let block = seagrass();
        let rows: Vec<_> = block_rows(&block).collect();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].state, "");
        assert_eq!(rows[0].waterlogged, 0);
        assert_eq!(rows[1].state, "waterlogged=true");
        assert_eq!(rows[1].waterlogged, 1);
        for row in &rows {
            assert_eq!(row.name, "seagrass");
            assert_eq!((row.r, row.g, row.b, row.a), (Some(34), Some(102), Some(34), Some(200)));
            assert_eq!(row.r2, None);
            assert_eq!(row.biome.as_deref(), Some("water"));
            assert_eq!(row.shape, "0000040000600000");
        }
    }

    #[test]
    fn test_flatten_keeps_block_order() {
        let mut other = seagrass();
        other.name = "tall_seagrass".to_string();

        let rows = flatten(&[seagrass(), other]);
        let names: Vec<_> = rows.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["seagrass", "seagrass", "tall_seagrass", "tall_seagrass"]);
    }
}
