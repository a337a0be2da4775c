//! Shape codes: 4x4 face-visibility grids.

use crate::error::{Result, TableError};
use serde::Serialize;
use std::fmt;

/// Number of distinct symbols a shape cell can hold (`'0'..='6'`).
pub const SHAPE_SYMBOLS: u8 = 7;

/// Cells per shape (a 4x4 grid, row-major).
const SHAPE_CELLS: usize = 16;

/// A validated 16-character shape code.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct ShapeCode(String);

impl ShapeCode {
    /// Validate a code read from the shape table.
    pub fn parse(shape: &str, code: &str) -> Result<Self> {
        let valid = code.len() == SHAPE_CELLS
            && code
                .bytes()
                .all(|c| c >= b'0' && c < b'0' + SHAPE_SYMBOLS);
        if !valid {
            return Err(TableError::InvalidShapeCode {
                shape: shape.to_string(),
                code: code.to_string(),
            });
        }
        Ok(Self(code.to_string()))
    }

    /// Build a code from decoded cell symbols.
    pub fn from_symbols(shape: &str, symbols: &[u8]) -> Result<Self> {
        let code: String = symbols
            .iter()
            .map(|s| char::from(b'0'.saturating_add(*s)))
            .collect();
        Self::parse(shape, &code)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ShapeCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
