//! Error types for block table generation.

use thiserror::Error;

/// Result type alias using TableError.
pub type Result<T> = std::result::Result<T, TableError>;

/// Main error type for loading, resolving and writing block tables.
#[derive(Error, Debug)]
pub enum TableError {
    /// I/O error during file operations.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Failed to read or write CSV data.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Failed to serialize JSON output.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Failed to read or process an image.
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    /// Failed to read a ZIP archive.
    #[error("ZIP error: {0}")]
    Zip(#[from] zip::result::ZipError),

    /// An input row has the wrong shape or an unparsable field.
    #[error("Malformed row in {table} at line {line} ({reason}): {row}")]
    MalformedRow {
        table: String,
        line: u64,
        row: String,
        reason: String,
    },

    /// A block refers to a shape that is not in the shape table.
    #[error("Shape '{shape}' used by block '{block}' is not in the shape table")]
    ShapeNotFound { block: String, shape: String },

    /// A copy rule targets a block that does not exist.
    #[error("Block '{block}' copies from unknown block '{target}'")]
    BlockNotFound { block: String, target: String },

    /// A chain of copy rules loops back on itself.
    #[error("Circular copy chain: {0}")]
    CopyCycle(String),

    /// A shape code is not 16 symbols from the shape alphabet.
    #[error("Invalid code for shape '{shape}': '{code}'")]
    InvalidShapeCode { shape: String, code: String },

    /// A shape legend pixel is not one of the palette colors.
    #[error("Unknown legend color {rgb:?} at ({x}, {y})")]
    UnknownLegendColor { x: u32, y: u32, rgb: [u8; 3] },

    /// The shape legend has more cells than there are shape names.
    #[error("No shape name for legend cell {0}")]
    MissingShapeName(usize),

    /// The texture source is not a directory or a readable archive.
    #[error("Invalid texture source: {0}")]
    InvalidTextureSource(String),
}

impl TableError {
    pub(crate) fn malformed(
        table: &str,
        line: u64,
        row: &csv::StringRecord,
        reason: impl Into<String>,
    ) -> Self {
        TableError::MalformedRow {
            table: table.to_string(),
            line,
            row: row.iter().collect::<Vec<_>>().join(","),
            reason: reason.into(),
        }
    }
}
