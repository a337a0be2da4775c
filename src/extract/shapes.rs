//! Decoding the shape legend image.
//!
//! The legend is a grid of 4x4 pixel cells separated by one-pixel borders.
//! Each cell pixel is one of seven palette colors; its palette index is the
//! cell's symbol in the shape code. Unused cells are black.

use crate::error::{Result, TableError};
use crate::types::ShapeCode;
use image::RgbImage;
use std::io::{BufRead, Write};
use std::path::Path;

/// Palette colors in symbol order.
const PALETTE: [[u8; 3]; 7] = [
    [255, 255, 255], // white
    [255, 0, 0],     // red
    [255, 128, 128], // light red
    [128, 0, 0],     // dark red
    [0, 0, 255],     // blue
    [128, 128, 255], // light blue
    [0, 0, 128],     // dark blue
];

const EMPTY_CELL: [u8; 3] = [0, 0, 0];

/// Offset of the first cell from the image edge.
const CELL_ORIGIN: u32 = 1;
/// Distance between the top-left pixels of neighboring cells.
const CELL_STRIDE: u32 = 5;
const CELL_SIZE: u32 = 4;

/// Decode every non-empty legend cell, naming shapes in legend order.
pub fn decode_shapes(legend: &RgbImage, names: &[String]) -> Result<Vec<(String, ShapeCode)>> {
    let mut shapes = Vec::new();

    let mut y = CELL_ORIGIN;
    while y + CELL_SIZE <= legend.height() {
        let mut x = CELL_ORIGIN;
        while x + CELL_SIZE <= legend.width() {
            if legend.get_pixel(x, y).0 != EMPTY_CELL {
                let index = shapes.len();
                let name = names.get(index).ok_or(TableError::MissingShapeName(index))?;
                let code = decode_cell(legend, x, y, name)?;
                shapes.push((name.clone(), code));
            }
            x += CELL_STRIDE;
        }
        y += CELL_STRIDE;
    }

    if shapes.len() < names.len() {
        log::warn!(
            "Shape legend has {} cells but {} names were given",
            shapes.len(),
            names.len()
        );
    }

    Ok(shapes)
}

fn decode_cell(legend: &RgbImage, x0: u32, y0: u32, name: &str) -> Result<ShapeCode> {
    let mut symbols = Vec::with_capacity((CELL_SIZE * CELL_SIZE) as usize);

    for y in y0..y0 + CELL_SIZE {
        for x in x0..x0 + CELL_SIZE {
            let rgb = legend.get_pixel(x, y).0;
            let symbol = PALETTE
                .iter()
                .position(|c| *c == rgb)
                .ok_or(TableError::UnknownLegendColor { x, y, rgb })?;
            symbols.push(symbol as u8);
        }
    }

    ShapeCode::from_symbols(name, &symbols)
}

/// Read shape names, one per line, ignoring blank lines.
pub fn read_shape_names<R: BufRead>(reader: R) -> Result<Vec<String>> {
    let mut names = Vec::new();
    for line in reader.lines() {
        let line = line?;
        let name = line.trim();
        if !name.is_empty() {
            names.push(name.to_string());
        }
    }
    Ok(names)
}

/// Decode a legend PNG using a shape-name file.
pub fn decode_shape_legend<P: AsRef<Path>, Q: AsRef<Path>>(
    legend_path: P,
    names_path: Q,
) -> Result<Vec<(String, ShapeCode)>> {
    let legend = image::open(legend_path.as_ref())?.to_rgb8();
    let names_file = std::fs::File::open(names_path.as_ref())?;
    let names = read_shape_names(std::io::BufReader::new(names_file))?;

    let shapes = decode_shapes(&legend, &names)?;
    log::info!(
        "Decoded {} shapes from {}",
        shapes.len(),
        legend_path.as_ref().display()
    );
    Ok(shapes)
}

/// Write `shape_name,code` rows in legend order.
pub fn write_shapes<W: Write>(writer: W, shapes: &[(String, ShapeCode)]) -> Result<()> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);

    for (name, code) in shapes {
        writer.write_record([name.as_str(), code.as_str()])?;
    }

    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    /// Build a legend with `cells` laid out left to right in one row,
    /// plus a trailing black (empty) cell.
    fn create_legend(cells: &[[u8; 16]]) -> RgbImage {
        let width = CELL_ORIGIN + CELL_STRIDE * (cells.len() as u32 + 1);
        let mut img = RgbImage::from_pixel(width, CELL_ORIGIN + CELL_STRIDE, Rgb([0, 0, 0]));

        for (i, cell) in cells.iter().enumerate() {
            let x0 = CELL_ORIGIN + CELL_STRIDE * i as u32;
            for (j, symbol) in cell.iter().enumerate() {
                let x = x0 + j as u32 % CELL_SIZE;
                let y = CELL_ORIGIN + j as u32 / CELL_SIZE;
                img.put_pixel(x, y, Rgb(PALETTE[*symbol as usize]));
            }
        }
        img
    }

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_decode_single_row() {
        let solid = [1u8; 16];
        let mut cross = [0u8; 16];
        cross[5] = 4;
        cross[10] = 6;

        let legend = create_legend(&[solid, cross]);
        let shapes = decode_shapes(&legend, &names(&["solid_shadows", "cross"])).unwrap();

        assert_eq!(shapes.len(), 2);
        assert_eq!(shapes[0].0, "solid_shadows");
        assert_eq!(shapes[0].1.as_str(), "1111111111111111");
        assert_eq!(shapes[1].0, "cross");
        assert_eq!(shapes[1].1.as_str(), "0000040000600000");
    }

    #[test]
    fn test_too_few_names() {
        let legend = create_legend(&[[0u8; 16], [2u8; 16]]);
        let result = decode_shapes(&legend, &names(&["only_one"]));
        assert!(matches!(result, Err(TableError::MissingShapeName(1))));
    }

    #[test]
    fn test_unknown_color() {
        let mut legend = create_legend(&[[0u8; 16]]);
        legend.put_pixel(2, 2, Rgb([1, 2, 3]));

        match decode_shapes(&legend, &names(&["bad"])) {
            Err(TableError::UnknownLegendColor { x, y, rgb }) => {
                assert_eq!((x, y), (2, 2));
                assert_eq!(rgb, [1, 2, 3]);
            }
            other => panic!("unexpected result {:?}", other),
        }
    }

    #[test]
    fn test_read_shape_names() {
        let text = "solid_shadows\n\n  cross  \n";
        assert_eq!(
            read_shape_names(text.as_bytes()).unwrap(),
            vec!["solid_shadows", "cross"]
        );
    }

    #[test]
    fn test_write_shapes() {
        let shapes = vec![(
            "solid_shadows".to_string(),
            ShapeCode::parse("solid_shadows", "1111111111111111").unwrap(),
        )];
        let mut out = Vec::new();
        write_shapes(&mut out, &shapes).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "solid_shadows,1111111111111111\n");
    }
}
