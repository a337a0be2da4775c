//! Shared types used throughout the library.

mod shape;
mod state;

pub use shape::{ShapeCode, SHAPE_SYMBOLS};
pub use state::StateString;

use serde::Serialize;
use std::fmt;

/// An RGBA color with 8-bit channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Fully transparent black, used for textures with no visible pixels.
    pub const TRANSPARENT: Rgba = Rgba::new(0, 0, 0, 0);

    /// Channels in `r, g, b, a` order.
    pub fn channels(&self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

impl From<[u8; 4]> for Rgba {
    fn from(c: [u8; 4]) -> Self {
        Self::new(c[0], c[1], c[2], c[3])
    }
}

impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{},{},{}", self.r, self.g, self.b, self.a)
    }
}

/// One of the two independent color slots a block can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorSlot {
    Primary,
    Secondary,
}

impl ColorSlot {
    /// Both slots, in output column order.
    pub const ALL: [ColorSlot; 2] = [ColorSlot::Primary, ColorSlot::Secondary];

    /// Position of this slot in the override tables' column groups.
    pub fn index(&self) -> usize {
        match self {
            ColorSlot::Primary => 0,
            ColorSlot::Secondary => 1,
        }
    }
}

impl fmt::Display for ColorSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColorSlot::Primary => f.write_str("primary"),
            ColorSlot::Secondary => f.write_str("secondary"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rgba_display() {
        assert_eq!(Rgba::new(100, 80, 60, 255).to_string(), "100,80,60,255");
        assert_eq!(Rgba::TRANSPARENT.channels(), [0, 0, 0, 0]);
    }

    #[test]
    fn test_slot_index() {
        assert_eq!(ColorSlot::Primary.index(), 0);
        assert_eq!(ColorSlot::Secondary.index(), 1);
        assert_eq!(ColorSlot::ALL.len(), 2);
    }
}
