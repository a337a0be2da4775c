//! Block color resolution.

use crate::error::{Result, TableError};
use crate::tables::{AttributeTables, ColorSource};
use crate::types::{ColorSlot, Rgba};

/// Resolves a block's color slots through literal, texture and copy rules.
pub struct ColorResolver<'a> {
    tables: &'a AttributeTables,
    texture_fallback: bool,
}

impl<'a> ColorResolver<'a> {
    pub fn new(tables: &'a AttributeTables) -> Self {
        Self {
            tables,
            texture_fallback: false,
        }
    }

    /// Fall back to the texture named like the block when its primary slot
    /// has no registered source.
    pub fn with_texture_fallback(mut self, enabled: bool) -> Self {
        self.texture_fallback = enabled;
        self
    }

    /// Resolve one color slot of a block. `Ok(None)` means the block has no
    /// color for this slot.
    ///
    /// Copy rules always read the *primary* slot of the target block,
    /// whichever slot is being resolved.
    pub fn resolve(&self, block: &str, slot: ColorSlot) -> Result<Option<Rgba>> {
        let mut chain = Vec::new();
        self.resolve_internal(block, slot, &mut chain)
    }

    /// `chain` holds the `(block, slot)` pairs being resolved. A block may
    /// appear twice through different slots without looping.
    fn resolve_internal<'s>(
        &self,
        block: &'s str,
        slot: ColorSlot,
        chain: &mut Vec<(&'s str, ColorSlot)>,
    ) -> Result<Option<Rgba>>
    where
        'a: 's,
    {
        if chain.contains(&(block, slot)) {
            return Err(TableError::CopyCycle(describe_slot_chain(chain, block, slot)));
        }

        let tables: &'a AttributeTables = self.tables;
        match tables.color_source(block, slot) {
            Some(ColorSource::Literal(color)) => Ok(Some(*color)),
            Some(ColorSource::Texture(texture)) => {
                let color = tables.texture_color(texture);
                if color.is_none() {
                    log::debug!("Unknown texture {} for {} {}", texture, block, slot);
                }
                Ok(color)
            }
            Some(ColorSource::Block(target)) => {
                chain.push((block, slot));
                let color = self.resolve_internal(target, ColorSlot::Primary, chain)?;
                chain.pop();
                Ok(color)
            }
            None if self.texture_fallback && slot == ColorSlot::Primary => {
                Ok(tables.texture_color(block))
            }
            None => Ok(None),
        }
    }
}

/// Render a copy chain that loops back to `block`, e.g. `a -> b -> a`.
pub(crate) fn describe_chain(chain: &[&str], block: &str) -> String {
    chain
        .iter()
        .copied()
        .chain(std::iter::once(block))
        .collect::<Vec<_>>()
        .join(" -> ")
}

/// Render a slot copy chain, e.g. `a.secondary -> a.primary -> b.primary -> a.primary`.
fn describe_slot_chain(chain: &[(&str, ColorSlot)], block: &str, slot: ColorSlot) -> String {
    chain
        .iter()
        .chain(std::iter::once(&(block, slot)))
        .map(|(b, s)| format!("{}.{}", b, s))
        .collect::<Vec<_>>()
        .join(" -> ")
}
