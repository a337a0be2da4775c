//! Loading attribute tables from CSV files.
//!
//! Every input is a headerless, comma-separated table without quoting. Fields
//! are trimmed, blank lines and `#` comment lines are skipped, and trailing
//! blank fields (stray commas) are tolerated.

use super::{AttributeTables, ColorSource, WaterlogRule};
use crate::error::{Result, TableError};
use crate::types::{ColorSlot, Rgba, ShapeCode, StateString};
use csv::{ReaderBuilder, StringRecord, Trim};
use std::io::Read;
use std::path::{Path, PathBuf};

/// The kinds of input table, each with its own row layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableKind {
    /// `block`
    BlockNames,
    /// `block, r1,g1,b1,a1, r2,g2,b2,a2`
    Colors,
    /// `block, copy_target_1, copy_target_2`
    CopyColors,
    /// `block, texture_1, texture_2`
    CopyTextureColors,
    /// `block, biome`
    Biomes,
    /// `block, state, shape_name`
    StateShapes,
    /// `block, copy_target`
    CopyShapes,
    /// `block, variable_name`
    Waterlog,
    /// `texture, r,g,b,a`
    TextureColors,
    /// `shape_name, code`
    Shapes,
}

impl TableKind {
    /// Load order used by [`load_from_dir`].
    pub const ALL: [TableKind; 10] = [
        TableKind::BlockNames,
        TableKind::TextureColors,
        TableKind::Shapes,
        TableKind::Colors,
        TableKind::CopyTextureColors,
        TableKind::CopyColors,
        TableKind::Biomes,
        TableKind::StateShapes,
        TableKind::CopyShapes,
        TableKind::Waterlog,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            TableKind::BlockNames => "block names",
            TableKind::Colors => "colors",
            TableKind::CopyColors => "copy colors",
            TableKind::CopyTextureColors => "copy texture colors",
            TableKind::Biomes => "biomes",
            TableKind::StateShapes => "state shapes",
            TableKind::CopyShapes => "copy shapes",
            TableKind::Waterlog => "waterlog",
            TableKind::TextureColors => "texture colors",
            TableKind::Shapes => "shapes",
        }
    }

    /// Minimum and maximum number of meaningful fields per row.
    fn field_range(&self) -> (usize, usize) {
        match self {
            TableKind::BlockNames => (1, 1),
            TableKind::Colors => (5, 9),
            TableKind::CopyColors | TableKind::CopyTextureColors => (2, 3),
            TableKind::Biomes | TableKind::CopyShapes | TableKind::Shapes => (2, 2),
            TableKind::StateShapes => (3, 3),
            TableKind::Waterlog => (1, 2),
            TableKind::TextureColors => (5, 5),
        }
    }

    /// Whether a run cannot proceed without this table.
    pub fn is_required(&self) -> bool {
        matches!(
            self,
            TableKind::BlockNames | TableKind::TextureColors | TableKind::Shapes
        )
    }
}

/// File names of the input tables, relative to a data directory.
#[derive(Debug, Clone)]
pub struct TableFiles {
    pub block_names: PathBuf,
    pub colors: PathBuf,
    pub copy_colors: PathBuf,
    pub copy_texture_colors: PathBuf,
    pub biomes: PathBuf,
    pub state_shapes: PathBuf,
    pub copy_shapes: PathBuf,
    pub waterlog: PathBuf,
    pub texture_colors: PathBuf,
    pub shapes: PathBuf,
}

impl Default for TableFiles {
    fn default() -> Self {
        Self {
            block_names: "blocknames.csv".into(),
            colors: "colors.csv".into(),
            copy_colors: "copycolors.csv".into(),
            copy_texture_colors: "copytexturecolors.csv".into(),
            biomes: "biomes.csv".into(),
            state_shapes: "stateshapes.csv".into(),
            copy_shapes: "copyshapes.csv".into(),
            waterlog: "waterlog.csv".into(),
            texture_colors: "texturecolors.csv".into(),
            shapes: "shapes.csv".into(),
        }
    }
}

impl TableFiles {
    /// File name for a table kind.
    pub fn path_for(&self, kind: TableKind) -> &Path {
        match kind {
            TableKind::BlockNames => &self.block_names,
            TableKind::Colors => &self.colors,
            TableKind::CopyColors => &self.copy_colors,
            TableKind::CopyTextureColors => &self.copy_texture_colors,
            TableKind::Biomes => &self.biomes,
            TableKind::StateShapes => &self.state_shapes,
            TableKind::CopyShapes => &self.copy_shapes,
            TableKind::Waterlog => &self.waterlog,
            TableKind::TextureColors => &self.texture_colors,
            TableKind::Shapes => &self.shapes,
        }
    }

    /// Use a different texture color table (e.g. one just extracted).
    pub fn with_texture_colors(mut self, path: impl Into<PathBuf>) -> Self {
        self.texture_colors = path.into();
        self
    }

    /// Use a different shape table.
    pub fn with_shapes(mut self, path: impl Into<PathBuf>) -> Self {
        self.shapes = path.into();
        self
    }
}

/// Load every table from a data directory.
///
/// Optional override tables that do not exist are treated as empty.
pub fn load_from_dir<P: AsRef<Path>>(dir: P, files: &TableFiles) -> Result<AttributeTables> {
    let dir = dir.as_ref();
    let mut tables = AttributeTables::new();

    for kind in TableKind::ALL {
        let path = dir.join(files.path_for(kind));
        if !path.exists() && !kind.is_required() {
            log::debug!("No {} table at {}, skipping", kind.name(), path.display());
            continue;
        }

        let file = std::fs::File::open(&path)?;
        load_table(&mut tables, kind, file)?;
        log::debug!("Loaded {} table from {}", kind.name(), path.display());
    }

    log::info!(
        "Loaded {} blocks, {} texture colors, {} shapes",
        tables.block_count(),
        tables.texture_count(),
        tables.shape_count()
    );

    Ok(tables)
}

/// Read one table and merge its rows into `tables`.
pub fn load_table<R: Read>(tables: &mut AttributeTables, kind: TableKind, reader: R) -> Result<()> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .quoting(false)
        .trim(Trim::All)
        .comment(Some(b'#'))
        .from_reader(reader);

    for result in reader.records() {
        let record = result?;
        if record.iter().all(str::is_empty) {
            continue;
        }
        let line = record.position().map(|p| p.line()).unwrap_or(0);
        let row = Row::new(kind, line, &record)?;
        apply_row(tables, kind, &row)?;
    }

    Ok(())
}

/// A validated record: the block/key field is non-empty and the field count
/// is within the table's layout.
struct Row<'r> {
    kind: TableKind,
    line: u64,
    record: &'r StringRecord,
}

impl<'r> Row<'r> {
    fn new(kind: TableKind, line: u64, record: &'r StringRecord) -> Result<Self> {
        let (min, max) = kind.field_range();

        if record.len() < min {
            return Err(TableError::malformed(
                kind.name(),
                line,
                record,
                format!("expected at least {} fields, found {}", min, record.len()),
            ));
        }
        if record.iter().skip(max).any(|f| !f.is_empty()) {
            return Err(TableError::malformed(
                kind.name(),
                line,
                record,
                format!("expected at most {} fields", max),
            ));
        }
        if record[0].is_empty() {
            return Err(TableError::malformed(kind.name(), line, record, "empty name"));
        }

        Ok(Self { kind, line, record })
    }

    /// Field `i`, or `""` if the row is short.
    fn field(&self, i: usize) -> &'r str {
        self.record.get(i).unwrap_or("")
    }

    fn key(&self) -> &'r str {
        self.field(0)
    }

    fn error(&self, reason: impl Into<String>) -> TableError {
        TableError::malformed(self.kind.name(), self.line, self.record, reason)
    }

    /// Parse four channel fields starting at `start`. All blank means no color.
    fn color(&self, start: usize) -> Result<Option<Rgba>> {
        let fields: Vec<&str> = (start..start + 4).map(|i| self.field(i)).collect();
        if fields.iter().all(|f| f.is_empty()) {
            return Ok(None);
        }

        let mut channels = [0u8; 4];
        for (channel, field) in channels.iter_mut().zip(&fields) {
            *channel = field
                .parse::<u8>()
                .map_err(|_| self.error(format!("invalid color channel '{}'", field)))?;
        }
        Ok(Some(Rgba::from(channels)))
    }
}

fn apply_row(tables: &mut AttributeTables, kind: TableKind, row: &Row<'_>) -> Result<()> {
    let key = row.key();

    match kind {
        TableKind::BlockNames => tables.add_block(key),
        TableKind::Colors => {
            for slot in ColorSlot::ALL {
                if let Some(color) = row.color(1 + slot.index() * 4)? {
                    tables.set_color_source(key, slot, ColorSource::Literal(color));
                }
            }
        }
        TableKind::CopyColors => {
            for slot in ColorSlot::ALL {
                let target = row.field(1 + slot.index());
                if !target.is_empty() {
                    tables.set_color_source(key, slot, ColorSource::Block(target.to_string()));
                }
            }
        }
        TableKind::CopyTextureColors => {
            for slot in ColorSlot::ALL {
                let texture = row.field(1 + slot.index());
                if !texture.is_empty() {
                    tables.set_color_source(key, slot, ColorSource::Texture(texture.to_string()));
                }
            }
        }
        TableKind::Biomes => {
            let biome = row.field(1);
            if !biome.is_empty() {
                tables.set_biome(key, biome);
            }
        }
        TableKind::StateShapes => {
            let shape = row.field(2);
            if shape.is_empty() {
                return Err(row.error("empty shape name"));
            }
            tables.add_state_shape(key, StateString::new(row.field(1)), shape);
        }
        TableKind::CopyShapes => {
            let target = row.field(1);
            if target.is_empty() {
                return Err(row.error("empty copy target"));
            }
            tables.set_copy_shape(key, target);
        }
        TableKind::Waterlog => {
            let variable = row.field(1);
            let rule = if variable.is_empty() {
                WaterlogRule::Always
            } else {
                WaterlogRule::Variable(variable.to_string())
            };
            tables.set_waterlog(key, rule);
        }
        TableKind::TextureColors => {
            let color = row.color(1)?.ok_or_else(|| row.error("missing texture color"))?;
            tables.add_texture_color(key, color);
        }
        TableKind::Shapes => {
            tables.add_shape(key, ShapeCode::parse(key, row.field(1))?);
        }
    }

    Ok(())
}
