//! Character palettes and brightness quantization
//!
//! Both ramps are ordered darkest first: index 0 is drawn for black blocks,
//! the last glyph for white ones.

use crate::error::{AsciiError, Result};

/// 10-level ASCII ramp, darkest (`.`) to lightest (`$`)
pub const ASCII_RAMP: &str = ".,;!vlLFE$";

/// 33-level Braille ramp, darkest to lightest
pub const BRAILLE_RAMP: &str = "⠁⠗⠃⠎⠉⠞⠙⠥⠑⠧⠋⠺⠛⠭⠓⠽⠊⠵⠚⠠⠅⠼⠇⠲⠍⠂⠝⠢⠕⠆⠏⠤⠟";

/// Built-in character sets
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum Charset {
    #[default]
    Ascii,
    Braille,
}

impl Charset {
    pub fn ramp(self) -> &'static str {
        match self {
            Charset::Ascii => ASCII_RAMP,
            Charset::Braille => BRAILLE_RAMP,
        }
    }
}

/// Ordered, non-empty list of glyphs used to represent brightness levels
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Palette {
    glyphs: Vec<char>,
}

impl Palette {
    /// Build a palette from glyphs ordered darkest first
    pub fn new(glyphs: impl IntoIterator<Item = char>) -> Result<Self> {
        let glyphs: Vec<char> = glyphs.into_iter().collect();
        if glyphs.is_empty() {
            return Err(AsciiError::EmptyPalette);
        }
        Ok(Self { glyphs })
    }

    pub fn from_charset(charset: Charset) -> Self {
        Self {
            glyphs: charset.ramp().chars().collect(),
        }
    }

    pub fn ascii() -> Self {
        Self::from_charset(Charset::Ascii)
    }

    pub fn braille() -> Self {
        Self::from_charset(Charset::Braille)
    }

    pub fn len(&self) -> usize {
        self.glyphs.len()
    }

    /// Always false: construction rejects empty glyph lists
    pub fn is_empty(&self) -> bool {
        self.glyphs.is_empty()
    }

    pub fn glyphs(&self) -> &[char] {
        &self.glyphs
    }

    /// The lightest glyph, used to measure the character cell
    pub fn last(&self) -> char {
        self.glyphs[self.glyphs.len() - 1]
    }

    pub fn glyph(&self, index: usize) -> char {
        self.glyphs[index.min(self.glyphs.len() - 1)]
    }

    pub fn contains(&self, ch: char) -> bool {
        self.glyphs.contains(&ch)
    }

    /// Get the glyph for a normalized brightness value
    pub fn glyph_for(&self, brightness: f32) -> char {
        self.glyphs[palette_index(brightness, self.glyphs.len())]
    }
}

/// Quantize a brightness value to a palette index
///
/// `floor(brightness * (len - 1))`, clamped to `[0, len - 1]`. NaN maps to 0.
///
/// # Arguments
/// * `brightness` - Normalized brightness [0.0, 1.0]
/// * `len` - Palette length (must be non-zero)
pub fn palette_index(brightness: f32, len: usize) -> usize {
    debug_assert!(len > 0, "palette length must be non-zero");
    let max_index = len.saturating_sub(1);

    // `as usize` saturates negatives and NaN to 0
    let index = (brightness * max_index as f32).floor() as usize;
    index.min(max_index)
}
