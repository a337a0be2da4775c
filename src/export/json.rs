//! JSON export of the block table, for inspection and debugging.

use super::BlockRow;
use crate::error::Result;

/// Export rows as a pretty-printed JSON array. Unlike the CSV table there is
/// no blank "no block" entry.
pub fn export_json(rows: &[BlockRow]) -> Result<Vec<u8>> {
    Ok(serde_json::to_vec_pretty(rows)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_export_json_fields() {
        let row = BlockRow {
            name: "kelp".to_string(),
            r: Some(34),
            g: Some(102),
            b: Some(34),
            a: Some(200),
            r2: None,
            g2: None,
            b2: None,
            a2: None,
            biome: None,
            state: String::new(),
            shape: "0000040000600000".to_string(),
            waterlogged: 1,
        };

        let bytes = export_json(&[row]).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&bytes).unwrap();

        let first = &value[0];
        assert_eq!(first["name"], "kelp");
        assert_eq!(first["g"], 102);
        assert!(first["r2"].is_null());
        assert_eq!(first["waterlogged"], 1);
        assert_eq!(value.as_array().unwrap().len(), 1);
    }
}
