//! asciifer - image to ASCII art converter
//!
//! Maps every block of pixels to one character from a brightness ramp, then
//! writes the grid as text or re-renders it as a colored image.
//!
//! # Example
//! ```no_run
//! use asciifer::{AsciiConfig, Converter, load_image};
//! use std::path::Path;
//!
//! let converter = Converter::new(AsciiConfig::default()).unwrap();
//! let input = load_image(Path::new("photo.jpg")).unwrap();
//! let grid = converter.convert(&input);
//! println!("{grid}");
//!
//! let output = converter.render(&input, &grid).unwrap();
//! output.save("ascii_art.png").unwrap();
//! ```

pub mod ascii;
pub mod config;
pub mod error;
pub mod filters;
pub mod font;
pub mod loader;
pub mod lut;
pub mod output;
pub mod processor;

// Re-export main types for convenience
pub use ascii::CharGrid;
pub use config::AsciiConfig;
pub use error::{AsciiError, Result};
pub use font::{CellSize, FontPolicy, GlyphRenderer};
pub use loader::load_image;
pub use lut::{Charset, Palette};
pub use output::Outputs;
pub use processor::{Converter, process_image};
