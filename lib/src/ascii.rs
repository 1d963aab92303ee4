use std::fmt;

use image::{Rgb, RgbImage, imageops};
use rayon::prelude::*;

use crate::config::AsciiConfig;
use crate::error::{AsciiError, Result};
use crate::filters::BrightnessImage;
use crate::font::{CellSize, GlyphRenderer};
use crate::lut::{Palette, palette_index};

/// Number of whole character cells that fit in an image
///
/// Remainder pixels at the right and bottom edges are not covered.
///
/// # Returns
/// (cols, rows)
pub fn grid_dimensions(width: u32, height: u32, cell: CellSize) -> (u32, u32) {
    (width / cell.width, height / cell.height)
}

/// Downscale image brightness to character cells by averaging
///
/// Only whole cells are averaged; pixels beyond `cols * cell.width` or
/// `rows * cell.height` are dropped.
///
/// # Arguments
/// * `lum` - Per-pixel brightness
/// * `cell` - Character cell size in pixels
///
/// # Returns
/// Row-major vec of average brightness values, one per cell
pub fn downscale_to_blocks(lum: &BrightnessImage, cell: CellSize) -> Vec<f32> {
    let (width, height) = lum.dimensions();
    let (cols, rows) = grid_dimensions(width, height, cell);
    let num_blocks = (cols * rows) as usize;
    let block_area = (cell.width * cell.height) as f64;

    // Parallelize block averaging
    (0..num_blocks)
        .into_par_iter()
        .map(|block_idx| {
            let block_x = (block_idx as u32) % cols;
            let block_y = (block_idx as u32) / cols;
            let mut sum = 0.0f64;

            for local_y in 0..cell.height {
                for local_x in 0..cell.width {
                    let px = block_x * cell.width + local_x;
                    let py = block_y * cell.height + local_y;
                    sum += lum.get_pixel(px, py)[0] as f64;
                }
            }

            (sum / block_area) as f32
        })
        .collect()
}

/// Grid of palette characters, one per character cell
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CharGrid {
    cols: u32,
    rows: u32,
    indices: Vec<usize>,
    palette: Palette,
}

impl CharGrid {
    pub fn cols(&self) -> u32 {
        self.cols
    }

    pub fn rows(&self) -> u32 {
        self.rows
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    /// Palette indices in row-major order
    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    pub fn index_at(&self, col: u32, row: u32) -> usize {
        assert!(col < self.cols && row < self.rows, "cell ({col}, {row}) outside grid");
        self.indices[(row * self.cols + col) as usize]
    }

    pub fn char_at(&self, col: u32, row: u32) -> char {
        self.palette.glyph(self.index_at(col, row))
    }

    /// Characters of each row, rows in order
    ///
    /// Always `rows()` lines; they are empty when no column fits.
    pub fn lines(&self) -> Vec<String> {
        if self.cols == 0 {
            return vec![String::new(); self.rows as usize];
        }
        self.indices
            .chunks(self.cols as usize)
            .map(|row| row.iter().map(|&i| self.palette.glyph(i)).collect())
            .collect()
    }

    /// Lines joined with `\n`, without a trailing newline
    pub fn to_text(&self) -> String {
        self.lines().join("\n")
    }
}

impl fmt::Display for CharGrid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_text())
    }
}

/// Select palette characters for all cells
///
/// # Arguments
/// * `block_lum` - Row-major average brightness, one per cell
/// * `cols` - Number of cells horizontally
/// * `rows` - Number of cells vertically
/// * `palette` - Glyphs ordered darkest first
pub fn select_ascii_chars(block_lum: &[f32], cols: u32, rows: u32, palette: &Palette) -> CharGrid {
    assert_eq!(block_lum.len(), (cols * rows) as usize);

    let len = palette.len();
    let indices = block_lum
        .par_iter()
        .map(|&lum| palette_index(lum, len))
        .collect();

    CharGrid {
        cols,
        rows,
        indices,
        palette: palette.clone(),
    }
}

/// Render a character grid as a colored image
///
/// Each glyph takes the color of the source image downsampled to one pixel
/// per cell. Glyphs are drawn on a solid background, then the canvas is
/// scaled back to the source dimensions when `config.restore_size` is set.
///
/// # Arguments
/// * `source` - The image the grid was computed from
/// * `grid` - Character grid
/// * `glyphs` - Glyph renderer used for drawing
/// * `cell` - Character cell size in pixels
/// * `config` - Configuration with background color and resize behavior
///
/// # Returns
/// RGB image with rendered ASCII art
pub fn render_colored_ascii(
    source: &RgbImage,
    grid: &CharGrid,
    glyphs: &GlyphRenderer,
    cell: CellSize,
    config: &AsciiConfig,
) -> Result<RgbImage> {
    let (src_width, src_height) = source.dimensions();
    if grid.is_empty() {
        return Err(AsciiError::EmptyGrid {
            width: src_width,
            height: src_height,
            cell_width: cell.width,
            cell_height: cell.height,
        });
    }

    let (cols, rows) = (grid.cols(), grid.rows());

    // One representative color per cell
    let colors = imageops::resize(source, cols, rows, imageops::FilterType::Lanczos3);

    let mut output = RgbImage::from_pixel(cols * cell.width, rows * cell.height, Rgb(config.bg_color));

    for row in 0..rows {
        for col in 0..cols {
            let x = (col * cell.width) as i32;
            let y = (row * cell.height) as i32;
            glyphs.draw_glyph(&mut output, grid.char_at(col, row), x, y, *colors.get_pixel(col, row));
        }
    }

    if config.restore_size && output.dimensions() != (src_width, src_height) {
        output = imageops::resize(&output, src_width, src_height, imageops::FilterType::Lanczos3);
    }

    Ok(output)
}
