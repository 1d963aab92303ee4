use image::{ImageBuffer, Luma, RgbImage};
use rayon::prelude::*;

/// Single-channel image of normalized brightness values in [0.0, 1.0]
pub type BrightnessImage = ImageBuffer<Luma<f32>, Vec<f32>>;

/// Brightness of one RGB pixel
///
/// Formula: sqrt(0.299*R² + 0.587*G² + 0.114*B²) / 255
///
/// The squares are weighted before the root, so bright channels count
/// superlinearly. This is not the linear luma formula.
///
/// # Arguments
/// * `r`, `g`, `b` - Channel values in the 0-255 domain
///
/// # Returns
/// Brightness in [0.0, 1.0]
pub fn pixel_brightness(r: u8, g: u8, b: u8) -> f32 {
    let (r, g, b) = (r as u32, g as u32, b as u32);

    // Integer weights (per mille) keep the grey axis exact: white is 1.0, not 0.99999994
    let weighted = 299 * r * r + 587 * g * g + 114 * b * b;
    let brightness = (weighted as f64 / 1000.0).sqrt() / 255.0;

    brightness.clamp(0.0, 1.0) as f32
}

/// Calculate per-pixel brightness for an RGB image
///
/// # Arguments
/// * `img` - Input RGB image
///
/// # Returns
/// Brightness image with the same dimensions as the input
pub fn calculate_brightness(img: &RgbImage) -> BrightnessImage {
    let (width, height) = img.dimensions();
    let mut output = BrightnessImage::new(width, height);

    let values: &mut [f32] = &mut output;
    values
        .par_iter_mut()
        .zip(img.as_raw().par_chunks_exact(3))
        .for_each(|(value, px)| *value = pixel_brightness(px[0], px[1], px[2]));

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    #[test]
    fn test_brightness_black() {
        let img = RgbImage::from_pixel(10, 10, Rgb([0, 0, 0]));
        let lum = calculate_brightness(&img);
        assert!(lum.pixels().all(|p| p[0] == 0.0));
    }

    #[test]
    fn test_brightness_white_is_exactly_one() {
        let img = RgbImage::from_pixel(10, 10, Rgb([255, 255, 255]));
        let lum = calculate_brightness(&img);
        assert!(lum.pixels().all(|p| p[0] == 1.0));
    }

    #[test]
    fn test_brightness_gray() {
        assert_eq!(pixel_brightness(128, 128, 128), 128.0 / 255.0);
    }

    #[test]
    fn test_brightness_weights_squares() {
        // Pure red: sqrt(0.299) ≈ 0.5468, where linear luma would give 0.299
        let red = pixel_brightness(255, 0, 0);
        assert!((red - 0.299f32.sqrt()).abs() < 1e-6);

        let green = pixel_brightness(0, 255, 0);
        assert!((green - 0.587f32.sqrt()).abs() < 1e-6);

        let blue = pixel_brightness(0, 0, 255);
        assert!((blue - 0.114f32.sqrt()).abs() < 1e-6);
    }

    #[test]
    fn test_brightness_matches_float_formula() {
        for &(r, g, b) in &[(12u8, 200u8, 77u8), (250, 3, 128), (64, 64, 190)] {
            let (rf, gf, bf) = (r as f64, g as f64, b as f64);
            let expected =
                (0.299 * rf * rf + 0.587 * gf * gf + 0.114 * bf * bf).sqrt() / 255.0;
            assert!((pixel_brightness(r, g, b) as f64 - expected).abs() < 1e-6);
        }
    }

    #[test]
    fn test_brightness_preserves_dimensions_and_layout() {
        let mut img = RgbImage::from_pixel(7, 3, Rgb([0, 0, 0]));
        img.put_pixel(6, 2, Rgb([255, 255, 255]));

        let lum = calculate_brightness(&img);
        assert_eq!(lum.dimensions(), (7, 3));
        assert_eq!(lum.get_pixel(6, 2)[0], 1.0);
        assert_eq!(lum.get_pixel(5, 2)[0], 0.0);
    }

    #[test]
    fn test_brightness_in_unit_range() {
        let mut img = RgbImage::new(16, 16);
        for (x, y, px) in img.enumerate_pixels_mut() {
            *px = Rgb([(x * 16) as u8, (y * 16) as u8, ((x + y) * 8) as u8]);
        }
        let lum = calculate_brightness(&img);
        assert!(lum.pixels().all(|p| (0.0..=1.0).contains(&p[0])));
    }
}
