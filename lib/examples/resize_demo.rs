use asciifer::{AsciiConfig, Converter};
use image::{Rgb, RgbImage};

fn main() -> asciifer::Result<()> {
    println!("asciifer - Pre-resize Demo");
    println!("==========================\n");

    // Create test images with various dimensions
    let test_cases = vec![
        (100, 100, "100x100 (edges truncated)"),
        (127, 85, "127x85 (both edges truncated)"),
        (1920, 1080, "1920x1080 (Full HD)"),
        (96, 96, "96x96 (whole cells only)"),
    ];

    let plain = Converter::new(AsciiConfig::default())?;
    let squared = Converter::new(AsciiConfig {
        resize: Some((850, 850)),
        ..Default::default()
    })?;
    let cell = plain.cell_size();

    for (width, height, description) in test_cases {
        println!("Testing: {}", description);

        // Create a test image with a gradient pattern
        let img = RgbImage::from_fn(width, height, |x, y| {
            let gray = ((x + y) % 256) as u8;
            Rgb([gray, gray, gray])
        });

        let grid = plain.convert(&img);
        let dropped_x = width - grid.cols() * cell.width;
        let dropped_y = height - grid.rows() * cell.height;

        println!("  Input:  {}x{}", width, height);
        println!("  Grid:   {}x{} characters", grid.cols(), grid.rows());
        println!("  Dropped edge pixels: {} right, {} bottom", dropped_x, dropped_y);

        let resized = squared.prepare(img);
        let grid = squared.convert(&resized);
        println!("  With --resize 850x850: {}x{} characters", grid.cols(), grid.rows());
        println!();
    }

    println!("Cell size: {}x{} pixels", cell.width, cell.height);
    println!("Remainder pixels at the right and bottom edges are discarded.");
    Ok(())
}
