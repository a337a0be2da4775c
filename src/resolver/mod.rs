//! Block attribute resolution.
//!
//! For every block this determines its primary and secondary colors, biome
//! tag and full set of `(state, shape, waterlogged)` entries by following the
//! override tables. Resolvers only borrow the tables; nothing one block
//! resolves can change how another block resolves.

pub mod color;
pub mod shape;

pub use color::ColorResolver;
pub use shape::{ShapeResolver, StateShape, DEFAULT_SHAPE};

use crate::error::Result;
use crate::tables::AttributeTables;
use crate::types::{ColorSlot, Rgba};

/// Resolver configuration.
#[derive(Debug, Clone)]
pub struct ResolverConfig {
    /// Shape name for blocks without state rules.
    pub default_shape: String,
    /// Use the texture named like the block when its primary color has no
    /// registered source.
    pub texture_fallback: bool,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            default_shape: DEFAULT_SHAPE.to_string(),
            texture_fallback: false,
        }
    }
}

impl ResolverConfig {
    pub fn with_default_shape(mut self, shape: &str) -> Self {
        self.default_shape = shape.to_string();
        self
    }

    pub fn with_texture_fallback(mut self, enabled: bool) -> Self {
        self.texture_fallback = enabled;
        self
    }
}

/// Everything resolved for one block.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedBlock {
    pub name: String,
    pub primary: Option<Rgba>,
    pub secondary: Option<Rgba>,
    pub biome: Option<String>,
    /// States in output order.
    pub states: Vec<StateShape>,
}

/// Resolves blocks against a set of attribute tables.
pub struct BlockResolver<'a> {
    tables: &'a AttributeTables,
    colors: ColorResolver<'a>,
    shapes: ShapeResolver<'a>,
}

impl<'a> BlockResolver<'a> {
    /// Create a resolver with default configuration.
    pub fn new(tables: &'a AttributeTables) -> Self {
        Self::with_config(tables, &ResolverConfig::default())
    }

    pub fn with_config(tables: &'a AttributeTables, config: &ResolverConfig) -> Self {
        Self {
            tables,
            colors: ColorResolver::new(tables).with_texture_fallback(config.texture_fallback),
            shapes: ShapeResolver::with_default_shape(tables, &config.default_shape),
        }
    }

    pub fn tables(&self) -> &'a AttributeTables {
        self.tables
    }

    pub fn resolve_color(&self, block: &str, slot: ColorSlot) -> Result<Option<Rgba>> {
        self.colors.resolve(block, slot)
    }

    pub fn resolve_states(&self, block: &str) -> Result<Vec<StateShape>> {
        self.shapes.resolve(block)
    }

    /// Biome tint tag of a block, if any. There is no fallback chain.
    pub fn resolve_biome(&self, block: &str) -> Option<&'a str> {
        self.tables.biome(block)
    }

    /// Resolve all attributes of one block.
    ///
    /// A block without a primary color is logged as a warning and still
    /// resolved.
    pub fn resolve_block(&self, block: &str) -> Result<ResolvedBlock> {
        let primary = self.resolve_color(block, ColorSlot::Primary)?;
        if primary.is_none() {
            log::warn!("No texture for block {}", block);
        }

        Ok(ResolvedBlock {
            name: block.to_string(),
            primary,
            secondary: self.resolve_color(block, ColorSlot::Secondary)?,
            biome: self.resolve_biome(block).map(str::to_string),
            states: self.resolve_states(block)?,
        })
    }

    /// Resolve every block of the master list, in list order.
    pub fn resolve_all(&self) -> Result<Vec<ResolvedBlock>> {
        let resolved = self
            .tables
            .blocks()
            .iter()
            .map(|block| self.resolve_block(block))
            .collect::<Result<Vec<_>>>()?;

        log::info!(
            "Resolved {} blocks into {} states",
            resolved.len(),
            resolved.iter().map(|b| b.states.len()).sum::<usize>()
        );

        Ok(resolved)
    }
}

/// Resolve every block in `tables`.
pub fn resolve_blocks(tables: &AttributeTables, config: &ResolverConfig) -> Result<Vec<ResolvedBlock>> {
    BlockResolver::with_config(tables, config).resolve_all()
}
