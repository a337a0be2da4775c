//! Extraction of lookup tables from game assets.
//!
//! These produce the two tables the resolver consumes but does not author:
//! average texture colors and shape codes.

pub mod shapes;
pub mod texture;

pub use shapes::{decode_shape_legend, decode_shapes, write_shapes};
pub use texture::{average_color, extract_texture_colors, write_texture_colors};
