use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use image::RgbImage;
use log::info;

use crate::ascii::CharGrid;
use crate::error::{AsciiError, Result};

/// Where the results of a run go
///
/// With neither path set, the text grid is printed to standard output.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Outputs {
    pub text: Option<PathBuf>,
    pub image: Option<PathBuf>,
}

impl Outputs {
    pub fn is_empty(&self) -> bool {
        self.text.is_none() && self.image.is_none()
    }
}

/// Write the grid as UTF-8 text, lines joined with `\n`
pub fn write_text(path: &Path, grid: &CharGrid) -> Result<()> {
    fs::write(path, grid.to_text()).map_err(|source| AsciiError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    info!(
        "wrote {}x{} text grid to {}",
        grid.cols(),
        grid.rows(),
        path.display()
    );
    Ok(())
}

/// Print the grid followed by a newline
pub fn print_text<W: Write>(out: &mut W, grid: &CharGrid) -> Result<()> {
    writeln!(out, "{grid}")
        .and_then(|()| out.flush())
        .map_err(|source| AsciiError::Io {
            path: PathBuf::from("<stdout>"),
            source,
        })
}

/// Save a rendered image, format taken from the path extension
pub fn save_image(path: &Path, image: &RgbImage) -> Result<()> {
    image.save(path).map_err(|source| AsciiError::Encode {
        path: path.to_path_buf(),
        source,
    })?;

    info!(
        "wrote {}x{} image to {}",
        image.width(),
        image.height(),
        path.display()
    );
    Ok(())
}
