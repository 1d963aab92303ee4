//! Glyph rendering and character cell measurement
//!
//! A scalable font is used when one is configured and loads. Otherwise glyphs
//! come from a small built-in 8×8 bitmap set that covers the ASCII ramp and
//! the whole Braille block.

use std::fs;
use std::path::Path;

use ab_glyph::{Font, FontArc, PxScale};
use image::{Rgb, RgbImage};
use imageproc::drawing::{draw_filled_rect_mut, draw_text_mut};
use imageproc::rect::Rect;
use log::{debug, warn};

use crate::error::{AsciiError, Result};

/// Font size (pixels per em) used when none is given
pub const DEFAULT_FONT_SIZE: u32 = 6;

/// Side of the built-in bitmap glyph grid
const BITMAP_GLYPH_SIZE: u32 = 8;

const BRAILLE_BLOCK: std::ops::RangeInclusive<char> = '\u{2800}'..='\u{28FF}';

/// What to do when a configured font cannot be loaded
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum FontPolicy {
    /// Log a warning and use the built-in bitmap glyphs
    #[default]
    Fallback,
    /// Fail with `AsciiError::FontLoad`
    Strict,
}

/// Pixel extent of one character cell, both dimensions at least 1
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct CellSize {
    pub width: u32,
    pub height: u32,
}

impl CellSize {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width: width.max(1),
            height: height.max(1),
        }
    }
}

/// Draws single glyphs and measures their ink
#[derive(Clone, Debug)]
pub enum GlyphRenderer {
    /// Scalable font rasterized through `ab_glyph`
    Outline { font: FontArc, scale: PxScale },
    /// Built-in bitmap glyphs, each bitmap pixel drawn as a `pixel_size` square
    Bitmap { pixel_size: u32 },
}

impl GlyphRenderer {
    /// Load the glyph renderer for a run
    ///
    /// # Arguments
    /// * `font_path` - Optional path to a TTF/OTF file
    /// * `font_size` - Size in pixels per em
    /// * `policy` - Whether a broken font is fatal or falls back to bitmap glyphs
    pub fn load(font_path: Option<&Path>, font_size: u32, policy: FontPolicy) -> Result<Self> {
        let Some(path) = font_path else {
            debug!("no font configured, using built-in bitmap glyphs");
            return Ok(Self::bitmap(font_size));
        };

        match Self::load_outline(path, font_size) {
            Ok(renderer) => Ok(renderer),
            Err(err) if policy == FontPolicy::Strict => Err(err),
            Err(err) => {
                warn!("{err}; falling back to built-in bitmap glyphs");
                Ok(Self::bitmap(font_size))
            }
        }
    }

    /// Load a scalable font, failing on a missing or malformed file
    pub fn load_outline(path: &Path, font_size: u32) -> Result<Self> {
        if !path.is_file() {
            return Err(AsciiError::font_load(path, "not a readable file"));
        }
        let data = fs::read(path).map_err(|e| AsciiError::font_load(path, e.to_string()))?;
        let font = FontArc::try_from_vec(data).map_err(|e| AsciiError::font_load(path, e.to_string()))?;

        let scale = em_scale(&font, font_size);
        debug!("loaded font {} at {}px/em ({:.2}px line)", path.display(), font_size, scale.y);

        Ok(Self::Outline { font, scale })
    }

    /// Built-in bitmap renderer, scaled by whole multiples of 8px
    pub fn bitmap(font_size: u32) -> Self {
        Self::Bitmap {
            pixel_size: (font_size / BITMAP_GLYPH_SIZE).max(1),
        }
    }

    pub fn is_bitmap(&self) -> bool {
        matches!(self, Self::Bitmap { .. })
    }

    /// Measure the ink bounding box of a glyph
    ///
    /// Glyphs without ink measure 1×1.
    pub fn cell_size(&self, ch: char) -> CellSize {
        match self {
            Self::Outline { font, scale } => {
                let glyph = font.glyph_id(ch).with_scale(*scale);
                match font.outline_glyph(glyph) {
                    Some(outlined) => {
                        let bounds = outlined.px_bounds();
                        CellSize::new(bounds.width().ceil() as u32, bounds.height().ceil() as u32)
                    }
                    None => CellSize::new(1, 1),
                }
            }
            Self::Bitmap { pixel_size } => match bitmap_ink_bounds(ch) {
                Some((min_x, min_y, max_x, max_y)) => CellSize::new(
                    (max_x - min_x + 1) * pixel_size,
                    (max_y - min_y + 1) * pixel_size,
                ),
                None => CellSize::new(1, 1),
            },
        }
    }

    /// Draw a glyph with its layout origin at (x, y)
    ///
    /// Pixels falling outside the canvas are clipped.
    pub fn draw_glyph(&self, canvas: &mut RgbImage, ch: char, x: i32, y: i32, color: Rgb<u8>) {
        match self {
            Self::Outline { font, scale } => {
                let mut buf = [0u8; 4];
                draw_text_mut(canvas, color, x, y, *scale, font, ch.encode_utf8(&mut buf));
            }
            Self::Bitmap { pixel_size } => {
                let step = *pixel_size as i32;
                for gy in 0..BITMAP_GLYPH_SIZE {
                    for gx in 0..BITMAP_GLYPH_SIZE {
                        if should_draw_pixel(ch, gx, gy) {
                            let rect = Rect::at(x + gx as i32 * step, y + gy as i32 * step)
                                .of_size(*pixel_size, *pixel_size);
                            draw_filled_rect_mut(canvas, rect, color);
                        }
                    }
                }
            }
        }
    }
}

/// Scale for a font size given in pixels per em
///
/// `PxScale` measures ascent to descent, so the em size is stretched by the
/// font's line height over its units per em. No dpi factor is applied.
pub fn em_scale(font: &impl Font, font_size: u32) -> PxScale {
    let size = font_size as f32;
    match font.units_per_em() {
        Some(units_per_em) => PxScale::from(size * font.height_unscaled() / units_per_em),
        None => PxScale::from(size),
    }
}

/// Inclusive ink bounds (min_x, min_y, max_x, max_y) of a bitmap glyph
fn bitmap_ink_bounds(ch: char) -> Option<(u32, u32, u32, u32)> {
    let mut bounds: Option<(u32, u32, u32, u32)> = None;

    for y in 0..BITMAP_GLYPH_SIZE {
        for x in 0..BITMAP_GLYPH_SIZE {
            if should_draw_pixel(ch, x, y) {
                bounds = Some(match bounds {
                    None => (x, y, x, y),
                    Some((x0, y0, x1, y1)) => (x0.min(x), y0.min(y), x1.max(x), y1.max(y)),
                });
            }
        }
    }

    bounds
}

/// Whether a Braille cell has a raised dot at a position of the 8×8 grid
///
/// Dot columns sit at x 1-2 and 5-6, dot rows are 2 pixels tall.
fn braille_dot(ch: char, x: u32, y: u32) -> bool {
    let bits = ch as u32 - *BRAILLE_BLOCK.start() as u32;
    let col = match x {
        1 | 2 => 0,
        5 | 6 => 1,
        _ => return false,
    };
    let row = y / 2;

    // Dots 1-6 run down the left column then the right; dots 7 and 8 form the bottom row
    let bit = if row == 3 { 6 + col } else { col * 3 + row };
    bits & (1 << bit) != 0
}

/// Determine if a pixel should be drawn for a character at a given position
///
/// # Arguments
/// * `ch` - The character
/// * `x` - X position within 8x8 grid (0-7)
/// * `y` - Y position within 8x8 grid (0-7)
///
/// # Returns
/// true if pixel should be drawn (foreground color), false for background
fn should_draw_pixel(ch: char, x: u32, y: u32) -> bool {
    let mid = (3..=4).contains(&x);

    match ch {
        ' ' => false,

        c if BRAILLE_BLOCK.contains(&c) => braille_dot(c, x, y),

        '.' => mid && y >= 6,

        ',' => (mid && y == 6) || (x == 3 && y == 7),

        ';' => (mid && (2..=3).contains(&y)) || (mid && y == 6) || (x == 3 && y == 7),

        '!' => mid && (y <= 4 || y >= 6),

        'v' => {
            // Two strokes converging on the baseline
            y >= 2 && {
                let d = (y - 2) / 2;
                x == 1 + d || x == 6 - d
            }
        }

        'l' => mid,

        'L' => (1..=2).contains(&x) || (y >= 6 && (1..=6).contains(&x)),

        'F' => {
            (1..=2).contains(&x)
                || (y <= 1 && (1..=6).contains(&x))
                || (y == 3 && (1..=5).contains(&x))
        }

        'E' => {
            (1..=2).contains(&x)
                || ((y <= 1 || y >= 6) && (1..=6).contains(&x))
                || (y == 3 && (1..=5).contains(&x))
        }

        '$' => {
            // S curve crossed by a vertical stroke
            mid || ((y == 1 || y == 4 || y == 6) && (1..=6).contains(&x))
                || ((2..=3).contains(&y) && x == 1)
                || (y == 5 && x == 6)
        }

        // Unknown character: filled square
        _ => true,
    }
}
