//! Attribute tables: the static inputs of block resolution.
//!
//! This module holds the hand-authored override tables (colors, copy rules,
//! biomes, state shapes, waterlog rules) together with the two lookup tables
//! produced by the extractors (texture colors and shape codes). Tables are
//! built once by the [`loader`] and only read afterwards.

pub mod loader;

pub use loader::{TableFiles, TableKind};

use crate::types::{ColorSlot, Rgba, ShapeCode, StateString};
use std::collections::{HashMap, HashSet};

/// Where a block's color for one slot comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColorSource {
    /// A color written directly in the color table.
    Literal(Rgba),
    /// The average color of a named texture.
    Texture(String),
    /// The primary color of another block.
    Block(String),
}

impl ColorSource {
    /// Later override tables refine earlier ones: block copies beat texture
    /// references, which beat literals.
    fn precedence(&self) -> u8 {
        match self {
            ColorSource::Literal(_) => 0,
            ColorSource::Texture(_) => 1,
            ColorSource::Block(_) => 2,
        }
    }
}

/// How a block's state-to-shape mapping is defined.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StateShapeRule<'a> {
    /// Explicit `(state, shape name)` pairs in declaration order.
    Explicit(&'a [(StateString, String)]),
    /// Reuse another block's fully resolved mapping.
    CopyFrom(&'a str),
}

/// How the waterlogged variants of a block are derived.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WaterlogRule {
    /// Each state gets a wet twin with this fragment joined on.
    Variable(String),
    /// The block is always submerged; states are kept and all marked wet.
    Always,
}

/// All static tables needed to resolve blocks.
#[derive(Debug, Default, Clone)]
pub struct AttributeTables {
    /// Master block list, in output order.
    blocks: Vec<String>,
    block_set: HashSet<String>,

    /// Average texture colors by texture name.
    texture_colors: HashMap<String, Rgba>,
    /// Shape codes by shape name.
    shapes: HashMap<String, ShapeCode>,

    /// Color sources by block, indexed by [`ColorSlot::index`].
    color_sources: HashMap<String, [Option<ColorSource>; 2]>,
    biomes: HashMap<String, String>,
    state_shapes: HashMap<String, Vec<(StateString, String)>>,
    copy_shapes: HashMap<String, String>,
    waterlog: HashMap<String, WaterlogRule>,
}

impl AttributeTables {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a block to the master list. Repeated names are ignored.
    pub fn add_block(&mut self, name: &str) {
        if self.block_set.insert(name.to_string()) {
            self.blocks.push(name.to_string());
        } else {
            log::debug!("Ignoring repeated block name {}", name);
        }
    }

    /// Blocks in declaration order.
    pub fn blocks(&self) -> &[String] {
        &self.blocks
    }

    pub fn is_known_block(&self, name: &str) -> bool {
        self.block_set.contains(name)
    }

    pub fn add_texture_color(&mut self, texture: &str, color: Rgba) {
        self.texture_colors.insert(texture.to_string(), color);
    }

    pub fn texture_color(&self, texture: &str) -> Option<Rgba> {
        self.texture_colors.get(texture).copied()
    }

    pub fn add_shape(&mut self, name: &str, code: ShapeCode) {
        self.shapes.insert(name.to_string(), code);
    }

    pub fn shape(&self, name: &str) -> Option<&ShapeCode> {
        self.shapes.get(name)
    }

    /// Register a color source for one slot of a block.
    ///
    /// If the slot already has a source, the one with higher precedence is
    /// kept; on a tie the newer source wins.
    pub fn set_color_source(&mut self, block: &str, slot: ColorSlot, source: ColorSource) {
        let slots = self.color_sources.entry(block.to_string()).or_default();
        let current = &mut slots[slot.index()];
        if let Some(existing) = current.as_ref() {
            if existing.precedence() > source.precedence() {
                log::debug!("Keeping {:?} for {} {} over {:?}", existing, block, slot, source);
                return;
            }
            log::debug!("Overriding {:?} for {} {} with {:?}", existing, block, slot, source);
        }
        *current = Some(source);
    }

    pub fn color_source(&self, block: &str, slot: ColorSlot) -> Option<&ColorSource> {
        self.color_sources
            .get(block)
            .and_then(|slots| slots[slot.index()].as_ref())
    }

    pub fn set_biome(&mut self, block: &str, biome: &str) {
        self.biomes.insert(block.to_string(), biome.to_string());
    }

    pub fn biome(&self, block: &str) -> Option<&str> {
        self.biomes.get(block).map(|b| b.as_str())
    }

    /// Add one `(state, shape name)` entry. The first entry for a state wins.
    pub fn add_state_shape(&mut self, block: &str, state: StateString, shape: &str) {
        let entries = self.state_shapes.entry(block.to_string()).or_default();
        if entries.iter().any(|(s, _)| *s == state) {
            log::debug!("Ignoring repeated state '{}' for {}", state, block);
            return;
        }
        entries.push((state, shape.to_string()));
    }

    pub fn set_copy_shape(&mut self, block: &str, target: &str) {
        self.copy_shapes.insert(block.to_string(), target.to_string());
    }

    /// The state-shape rule of a block. A copy rule takes priority over
    /// explicit states.
    pub fn state_shape_rule(&self, block: &str) -> Option<StateShapeRule<'_>> {
        if let Some(target) = self.copy_shapes.get(block) {
            return Some(StateShapeRule::CopyFrom(target));
        }
        self.state_shapes
            .get(block)
            .map(|entries| StateShapeRule::Explicit(entries.as_slice()))
    }

    pub fn set_waterlog(&mut self, block: &str, rule: WaterlogRule) {
        self.waterlog.insert(block.to_string(), rule);
    }

    pub fn waterlog_rule(&self, block: &str) -> Option<&WaterlogRule> {
        self.waterlog.get(block)
    }

    pub fn block_count(&self) -> usize {
        self.blocks.len()
    }

    pub fn texture_count(&self) -> usize {
        self.texture_colors.len()
    }

    pub fn shape_count(&self) -> usize {
        self.shapes.len()
    }

    /// Number of blocks with at least one color source.
    pub fn colored_block_count(&self) -> usize {
        self.color_sources.len()
    }

    /// Number of blocks with explicit or copied state shapes.
    pub fn shaped_block_count(&self) -> usize {
        self.state_shapes
            .keys()
            .chain(self.copy_shapes.keys())
            .collect::<HashSet<_>>()
            .len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_block_order_and_dedup() {
        let mut tables = AttributeTables::new();
        tables.add_block("stone");
        tables.add_block("dirt");
        tables.add_block("stone");

        assert_eq!(tables.blocks(), &["stone".to_string(), "dirt".to_string()]);
        assert!(tables.is_known_block("dirt"));
        assert!(!tables.is_known_block("air"));
    }

    #[test]
    fn test_color_source_precedence() {
        let mut tables = AttributeTables::new();
        tables.set_color_source("kelp", ColorSlot::Primary, ColorSource::Texture("kelp_plant".into()));
        tables.set_color_source("kelp", ColorSlot::Primary, ColorSource::Literal(Rgba::new(1, 2, 3, 4)));

        assert_eq!(
            tables.color_source("kelp", ColorSlot::Primary),
            Some(&ColorSource::Texture("kelp_plant".into()))
        );

        tables.set_color_source("kelp", ColorSlot::Primary, ColorSource::Block("seagrass".into()));
        assert_eq!(
            tables.color_source("kelp", ColorSlot::Primary),
            Some(&ColorSource::Block("seagrass".into()))
        );
        assert_eq!(tables.color_source("kelp", ColorSlot::Secondary), None);
    }

    #[test]
    fn test_copy_shape_overrides_explicit_states() {
        let mut tables = AttributeTables::new();
        tables.add_state_shape("oak_stairs", StateString::new("half=top"), "stairs_top");
        tables.add_state_shape("oak_stairs", StateString::new("half=top"), "ignored");

        match tables.state_shape_rule("oak_stairs") {
            Some(StateShapeRule::Explicit(entries)) => {
                assert_eq!(entries.len(), 1);
                assert_eq!(entries[0].1, "stairs_top");
            }
            other => panic!("unexpected rule {:?}", other),
        }

        tables.set_copy_shape("oak_stairs", "stone_stairs");
        assert_eq!(
            tables.state_shape_rule("oak_stairs"),
            Some(StateShapeRule::CopyFrom("stone_stairs"))
        );
        assert_eq!(tables.state_shape_rule("stone"), None);
        assert_eq!(tables.shaped_block_count(), 1);
    }
}
