use std::path::Path;

use image::{ImageError, ImageReader, RgbImage, imageops};
use log::debug;

use crate::error::{AsciiError, Result};

/// Decode an image file into RGB
///
/// The format is sniffed from the file contents, so a misnamed file still
/// loads. Alpha is dropped.
pub fn load_image(path: &Path) -> Result<RgbImage> {
    let decode_err = |source: ImageError| AsciiError::Decode {
        path: path.to_path_buf(),
        source,
    };

    let image = ImageReader::open(path)
        .map_err(|e| decode_err(ImageError::IoError(e)))?
        .with_guessed_format()
        .map_err(|e| decode_err(ImageError::IoError(e)))?
        .decode()
        .map_err(decode_err)?
        .to_rgb8();

    debug!(
        "decoded {} ({}x{})",
        path.display(),
        image.width(),
        image.height()
    );
    Ok(image)
}

/// Resize an image to exact dimensions, ignoring aspect ratio
///
/// Uses Lanczos3 filtering. Returns the input unchanged if it already has
/// the requested size.
pub fn resize_input(input: RgbImage, width: u32, height: u32) -> RgbImage {
    if input.dimensions() == (width, height) {
        return input;
    }

    debug!(
        "resizing input {}x{} -> {}x{}",
        input.width(),
        input.height(),
        width,
        height
    );
    imageops::resize(&input, width, height, imageops::FilterType::Lanczos3)
}
