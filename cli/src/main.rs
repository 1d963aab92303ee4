use std::io;
use std::path::PathBuf;

use anyhow::Context as _;
use asciifer::font::DEFAULT_FONT_SIZE;
use asciifer::{AsciiConfig, Charset, Converter, FontPolicy, Outputs};
use clap::Parser;
use log::info;

/// Convert an image to ASCII art.
///
/// Without --output-text or --output-image the text grid is printed to stdout.
#[derive(Parser, Debug)]
#[command(name = "asciifer", version)]
struct Cli {
    /// Path to the input image file
    input_image: PathBuf,

    /// Path to save ASCII as text
    #[arg(long, value_name = "PATH")]
    output_text: Option<PathBuf>,

    /// Path to save ASCII as an image
    #[arg(long, value_name = "PATH")]
    output_image: Option<PathBuf>,

    /// Path to a .ttf/.otf font file (built-in bitmap glyphs if omitted)
    #[arg(long, value_name = "PATH")]
    font: Option<PathBuf>,

    /// Font size in pixels per em
    #[arg(long, default_value_t = DEFAULT_FONT_SIZE, value_parser = clap::value_parser!(u32).range(1..=512))]
    font_size: u32,

    /// Use Braille Unicode characters
    #[arg(long)]
    use_braille: bool,

    /// Fail instead of falling back to bitmap glyphs when --font cannot be loaded
    #[arg(long)]
    strict_font: bool,

    /// Resize the input to WIDTHxHEIGHT before conversion (e.g. 850x850)
    #[arg(long, value_name = "WxH", value_parser = parse_resolution)]
    resize: Option<(u32, u32)>,

    /// Keep the rendered image at its cell-grid size instead of scaling it to the input size
    #[arg(long)]
    keep_canvas_size: bool,
}

impl Cli {
    fn config(&self) -> AsciiConfig {
        AsciiConfig {
            charset: if self.use_braille {
                Charset::Braille
            } else {
                Charset::Ascii
            },
            font_path: self.font.clone(),
            font_size: self.font_size,
            font_policy: if self.strict_font {
                FontPolicy::Strict
            } else {
                FontPolicy::Fallback
            },
            resize: self.resize,
            restore_size: !self.keep_canvas_size,
            ..Default::default()
        }
    }

    fn outputs(&self) -> Outputs {
        Outputs {
            text: self.output_text.clone(),
            image: self.output_image.clone(),
        }
    }
}

/// Parse and validate resolution (WIDTHxHEIGHT format)
fn parse_resolution(s: &str) -> Result<(u32, u32), String> {
    let (width, height) = s
        .split_once(['x', 'X'])
        .ok_or_else(|| format!("Invalid size '{s}'. Use WIDTHxHEIGHT (e.g., 850x850)"))?;

    let width: u32 = width
        .parse()
        .map_err(|_| format!("Invalid width '{width}' in size"))?;
    let height: u32 = height
        .parse()
        .map_err(|_| format!("Invalid height '{height}' in size"))?;

    if width == 0 || height == 0 {
        return Err(format!("Size must be non-zero, got {width}x{height}"));
    }
    Ok((width, height))
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let converter = Converter::new(cli.config()).context("failed to set up converter")?;

    let mut stdout = io::stdout().lock();
    let grid = converter
        .run(&cli.input_image, &cli.outputs(), &mut stdout)
        .with_context(|| format!("failed to convert '{}'", cli.input_image.display()))?;

    info!("done: {}x{} characters", grid.cols(), grid.rows());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn defaults_match_library() {
        let cli = Cli::try_parse_from(["asciifer", "photo.jpg"]).unwrap();
        let config = cli.config();

        assert_eq!(config.font_size, 6);
        assert_eq!(config.charset, Charset::Ascii);
        assert_eq!(config.font_policy, FontPolicy::Fallback);
        assert!(config.restore_size);
        assert!(config.resize.is_none());
        assert!(cli.outputs().is_empty());
    }

    #[test]
    fn all_flags() {
        let cli = Cli::try_parse_from([
            "asciifer",
            "photo.jpg",
            "--output-text",
            "art.txt",
            "--output-image",
            "art.png",
            "--font",
            "mono.ttf",
            "--font-size",
            "10",
            "--use-braille",
            "--strict-font",
            "--resize",
            "850x850",
            "--keep-canvas-size",
        ])
        .unwrap();
        let config = cli.config();

        assert_eq!(config.charset, Charset::Braille);
        assert_eq!(config.font_path, Some(PathBuf::from("mono.ttf")));
        assert_eq!(config.font_size, 10);
        assert_eq!(config.font_policy, FontPolicy::Strict);
        assert_eq!(config.resize, Some((850, 850)));
        assert!(!config.restore_size);
        assert_eq!(
            cli.outputs(),
            Outputs {
                text: Some(PathBuf::from("art.txt")),
                image: Some(PathBuf::from("art.png")),
            }
        );
    }

    #[test]
    fn input_is_required() {
        assert!(Cli::try_parse_from(["asciifer"]).is_err());
    }

    #[test]
    fn font_size_range() {
        assert!(Cli::try_parse_from(["asciifer", "a.png", "--font-size", "0"]).is_err());
        assert!(Cli::try_parse_from(["asciifer", "a.png", "--font-size", "12"]).is_ok());
    }

    #[test]
    fn resolution_parsing() {
        assert_eq!(parse_resolution("850x850"), Ok((850, 850)));
        assert_eq!(parse_resolution("640X480"), Ok((640, 480)));
        assert!(parse_resolution("850").is_err());
        assert!(parse_resolution("axb").is_err());
        assert!(parse_resolution("0x10").is_err());
    }
}
