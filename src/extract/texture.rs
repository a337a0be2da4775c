//! Average colors of block textures.

use crate::error::{Result, TableError};
use crate::types::Rgba;
use image::{ColorType, DynamicImage};
use std::collections::BTreeMap;
use std::io::{Read, Write};
use std::path::Path;

/// Location of block textures inside a client jar or resource pack.
const BLOCK_TEXTURE_PREFIX: &str = "assets/minecraft/textures/block/";

/// Running per-channel sums over the pixels that count towards the average.
#[derive(Default)]
struct ChannelSums {
    r: u64,
    g: u64,
    b: u64,
    a: u64,
    count: u64,
}

impl ChannelSums {
    fn add(&mut self, r: u8, g: u8, b: u8, a: u8) {
        self.r += u64::from(r);
        self.g += u64::from(g);
        self.b += u64::from(b);
        self.a += u64::from(a);
        self.count += 1;
    }

    fn mean(&self) -> Rgba {
        if self.count == 0 {
            return Rgba::TRANSPARENT;
        }
        // Means of u8 values always fit in u8.
        let avg = |sum: u64| (sum / self.count) as u8;
        Rgba::new(avg(self.r), avg(self.g), avg(self.b), avg(self.a))
    }
}

/// Average the visible pixels of a texture.
///
/// Images with alpha only count pixels with alpha > 0; opaque images count
/// every pixel with alpha 255. Gray images spread luma over all three color
/// channels. A texture with no visible pixels averages to transparent black.
pub fn average_color(img: &DynamicImage) -> Rgba {
    let mut sums = ChannelSums::default();

    match img.color() {
        ColorType::Rgb8 | ColorType::Rgb16 | ColorType::Rgb32F => {
            for p in img.to_rgb8().pixels() {
                sums.add(p[0], p[1], p[2], 255);
            }
        }
        ColorType::La8 | ColorType::La16 => {
            for p in img.to_luma_alpha8().pixels() {
                if p[1] > 0 {
                    sums.add(p[0], p[0], p[0], p[1]);
                }
            }
        }
        ColorType::L8 | ColorType::L16 => {
            for p in img.to_luma8().pixels() {
                sums.add(p[0], p[0], p[0], 255);
            }
        }
        _ => {
            for p in img.to_rgba8().pixels() {
                if p[3] > 0 {
                    sums.add(p[0], p[1], p[2], p[3]);
                }
            }
        }
    }

    sums.mean()
}

/// Average a PNG texture given as bytes.
pub fn average_color_from_bytes(data: &[u8]) -> Result<Rgba> {
    let img = image::load_from_memory(data)?;
    Ok(average_color(&img))
}

/// Extract average colors for every block texture in `path`.
///
/// `path` is either a directory of `*.png` textures or a ZIP archive (a
/// client jar or resource pack) with textures under
/// `assets/minecraft/textures/block/`. Textures that fail to decode are
/// skipped with a warning.
pub fn extract_texture_colors<P: AsRef<Path>>(path: P) -> Result<BTreeMap<String, Rgba>> {
    let path = path.as_ref();

    let colors = if path.is_dir() {
        extract_from_directory(path)?
    } else if path.is_file() {
        let data = std::fs::read(path)?;
        extract_from_zip_bytes(&data)?
    } else {
        return Err(TableError::InvalidTextureSource(path.display().to_string()));
    };

    log::info!("Extracted {} texture colors from {}", colors.len(), path.display());
    Ok(colors)
}

/// Extract texture colors from ZIP archive bytes.
pub fn extract_from_zip_bytes(data: &[u8]) -> Result<BTreeMap<String, Rgba>> {
    let cursor = std::io::Cursor::new(data);
    let mut archive = zip::ZipArchive::new(cursor)?;
    let mut colors = BTreeMap::new();

    for i in 0..archive.len() {
        let mut file = archive.by_index(i)?;
        if file.is_dir() {
            continue;
        }

        let Some(texture) = block_texture_name(file.name()) else {
            continue;
        };
        let texture = texture.to_string();

        let mut bytes = Vec::new();
        file.read_to_end(&mut bytes)?;
        add_texture(&mut colors, texture, &bytes);
    }

    Ok(colors)
}

fn extract_from_directory(dir: &Path) -> Result<BTreeMap<String, Rgba>> {
    let mut colors = BTreeMap::new();

    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        if !path.is_file() || path.extension().map(|e| e != "png").unwrap_or(true) {
            continue;
        }
        let Some(texture) = path.file_stem().map(|s| s.to_string_lossy().to_string()) else {
            continue;
        };

        let bytes = std::fs::read(&path)?;
        add_texture(&mut colors, texture, &bytes);
    }

    Ok(colors)
}

fn add_texture(colors: &mut BTreeMap<String, Rgba>, texture: String, bytes: &[u8]) {
    match average_color_from_bytes(bytes) {
        Ok(color) => {
            colors.insert(texture, color);
        }
        Err(e) => {
            log::warn!("Skipping texture {}: {}", texture, e);
        }
    }
}

/// The texture name of a block texture entry, e.g.
/// `assets/minecraft/textures/block/stone.png` -> `stone`.
/// Entries in subdirectories of the block folder are ignored.
fn block_texture_name(entry: &str) -> Option<&str> {
    let name = entry
        .strip_prefix(BLOCK_TEXTURE_PREFIX)?
        .strip_suffix(".png")?;
    if name.is_empty() || name.contains('/') {
        None
    } else {
        Some(name)
    }
}

/// Write `texture,r,g,b,a` rows, ordered by texture name.
pub fn write_texture_colors<W: Write>(writer: W, colors: &BTreeMap<String, Rgba>) -> Result<()> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);

    for (texture, color) in colors {
        let [r, g, b, a] = color.channels().map(|c| c.to_string());
        writer.write_record([texture.as_str(), &r, &g, &b, &a])?;
    }

    writer.flush()?;
    Ok(())
}
