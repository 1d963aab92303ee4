use std::io::Write;
use std::path::Path;
use std::time::Instant;

use image::RgbImage;
use log::debug;

use crate::ascii::{CharGrid, downscale_to_blocks, grid_dimensions, render_colored_ascii, select_ascii_chars};
use crate::config::AsciiConfig;
use crate::error::Result;
use crate::filters::calculate_brightness;
use crate::font::{CellSize, GlyphRenderer};
use crate::loader::{load_image, resize_input};
use crate::lut::Palette;
use crate::output::{Outputs, print_text, save_image, write_text};

/// Converts images to ASCII art with a fixed palette and glyph renderer
///
/// The character cell is measured once, from the palette's last glyph.
#[derive(Debug, Clone)]
pub struct Converter {
    config: AsciiConfig,
    palette: Palette,
    glyphs: GlyphRenderer,
    cell: CellSize,
}

impl Converter {
    /// Validate the configuration and load the glyph renderer
    ///
    /// Fails with `AsciiError::FontLoad` only under `FontPolicy::Strict`.
    pub fn new(config: AsciiConfig) -> Result<Self> {
        config.validate()?;

        let palette = Palette::from_charset(config.charset);
        let glyphs = GlyphRenderer::load(
            config.font_path.as_deref(),
            config.font_size,
            config.font_policy,
        )?;

        Ok(Self::with_parts(config, palette, glyphs))
    }

    /// Build a converter from an explicit palette and glyph renderer
    pub fn with_parts(config: AsciiConfig, palette: Palette, glyphs: GlyphRenderer) -> Self {
        let cell = glyphs.cell_size(palette.last());
        debug!(
            "palette of {} glyphs, cell {}x{} from '{}'",
            palette.len(),
            cell.width,
            cell.height,
            palette.last()
        );

        Self {
            config,
            palette,
            glyphs,
            cell,
        }
    }

    pub fn config(&self) -> &AsciiConfig {
        &self.config
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    pub fn glyphs(&self) -> &GlyphRenderer {
        &self.glyphs
    }

    pub fn cell_size(&self) -> CellSize {
        self.cell
    }

    /// Apply the configured pre-processing resize, if any
    pub fn prepare(&self, input: RgbImage) -> RgbImage {
        match self.config.resize {
            Some((width, height)) => resize_input(input, width, height),
            None => input,
        }
    }

    /// Converts an image to a character grid
    ///
    /// 1. Compute per-pixel brightness
    /// 2. Average brightness over whole character cells (edge remainders dropped)
    /// 3. Quantize each average to a palette glyph
    pub fn convert(&self, input: &RgbImage) -> CharGrid {
        let start = Instant::now();
        let (width, height) = input.dimensions();

        // Step 1: Per-pixel brightness
        let lum = calculate_brightness(input);

        // Step 2: Average over character cells
        let block_lum = downscale_to_blocks(&lum, self.cell);

        // Step 3: Select a glyph for each cell
        let (cols, rows) = grid_dimensions(width, height, self.cell);
        let grid = select_ascii_chars(&block_lum, cols, rows, &self.palette);

        debug!(
            "converted {}x{} image to {}x{} grid in {:.2}ms",
            width,
            height,
            cols,
            rows,
            start.elapsed().as_secs_f64() * 1000.0
        );
        grid
    }

    /// Render a grid as a colored image using the source image's colors
    pub fn render(&self, source: &RgbImage, grid: &CharGrid) -> Result<RgbImage> {
        let start = Instant::now();
        let output = render_colored_ascii(source, grid, &self.glyphs, self.cell, &self.config)?;
        debug!(
            "rendered {}x{} image in {:.2}ms",
            output.width(),
            output.height(),
            start.elapsed().as_secs_f64() * 1000.0
        );
        Ok(output)
    }

    /// Load, convert and write one image
    ///
    /// Text goes to `outputs.text`, the rendered image to `outputs.image`.
    /// With neither set the text is printed to `stdout`.
    pub fn run<W: Write>(&self, input_path: &Path, outputs: &Outputs, stdout: &mut W) -> Result<CharGrid> {
        let source = self.prepare(load_image(input_path)?);
        let grid = self.convert(&source);

        if let Some(path) = &outputs.text {
            write_text(path, &grid)?;
        }

        if let Some(path) = &outputs.image {
            let rendered = self.render(&source, &grid)?;
            save_image(path, &rendered)?;
        }

        if outputs.is_empty() {
            print_text(stdout, &grid)?;
        }

        Ok(grid)
    }
}

/// Converts an image to a character grid in one call
///
/// # Arguments
/// * `input` - The input RGB image
/// * `config` - Configuration parameters for the conversion
pub fn process_image(input: &RgbImage, config: &AsciiConfig) -> Result<CharGrid> {
    let converter = Converter::new(config.clone())?;
    let source = converter.prepare(input.clone());
    Ok(converter.convert(&source))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AsciiError;
    use crate::lut::Charset;
    use image::Rgb;

    #[test]
    fn test_default_cell_size() {
        let converter = Converter::new(AsciiConfig::default()).unwrap();
        assert_eq!(converter.cell_size(), CellSize::new(6, 8));
    }

    #[test]
    fn test_braille_changes_cell_size_only() {
        let config = AsciiConfig {
            charset: Charset::Braille,
            ..Default::default()
        };
        let converter = Converter::new(config).unwrap();
        assert_eq!(converter.cell_size(), CellSize::new(6, 6));
        assert_eq!(converter.palette().len(), 33);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = AsciiConfig {
            font_size: 0,
            ..Default::default()
        };
        assert!(matches!(
            Converter::new(config),
            Err(AsciiError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_process_valid_dimensions() {
        let img = RgbImage::new(60, 80);
        let grid = process_image(&img, &AsciiConfig::default()).unwrap();
        assert_eq!((grid.cols(), grid.rows()), (10, 10));
    }

    #[test]
    fn test_process_truncates_edges() {
        let img = RgbImage::new(100, 100);
        let grid = process_image(&img, &AsciiConfig::default()).unwrap();
        assert_eq!((grid.cols(), grid.rows()), (16, 12));
    }

    #[test]
    fn test_process_with_resize() {
        let img = RgbImage::new(100, 100);
        let config = AsciiConfig {
            resize: Some((120, 160)),
            ..Default::default()
        };
        let grid = process_image(&img, &config).unwrap();
        assert_eq!((grid.cols(), grid.rows()), (20, 20));
    }

    #[test]
    fn test_process_image_smaller_than_cell() {
        let img = RgbImage::from_pixel(3, 3, Rgb([255, 255, 255]));
        let grid = process_image(&img, &AsciiConfig::default()).unwrap();
        assert!(grid.is_empty());
        assert_eq!(grid.to_text(), "");
    }

    #[test]
    fn test_custom_palette() {
        let palette = Palette::new(['a', 'b', 'c']).unwrap();
        let converter =
            Converter::with_parts(AsciiConfig::default(), palette, GlyphRenderer::bitmap(6));
        // 'c' is unknown to the bitmap set and measures as a full 8x8 square
        assert_eq!(converter.cell_size(), CellSize::new(8, 8));

        let grid = converter.convert(&RgbImage::from_pixel(16, 8, Rgb([255, 255, 255])));
        assert_eq!(grid.to_text(), "cc");
    }
}
