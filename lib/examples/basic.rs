/// Basic example: Convert a simple test image to ASCII art
///
/// This creates a test image with a few shapes, prints it as ASCII and
/// Braille text and saves the colored rendering
use asciifer::{AsciiConfig, Charset, Converter};
use image::{Rgb, RgbImage};

fn main() -> asciifer::Result<()> {
    println!("asciifer - Basic Example");
    println!("========================\n");

    let width = 240;
    let height = 160;

    // Dark blue background with a horizontal brightness ramp
    let mut img = RgbImage::from_fn(width, height, |x, _| {
        let v = (x * 120 / width) as u8;
        Rgb([v / 4, v / 4, 40 + v])
    });

    // Draw a warm circle in the center
    let center_x = width as f32 / 2.0;
    let center_y = height as f32 / 2.0;
    let radius = 50.0;

    for y in 0..height {
        for x in 0..width {
            let dx = x as f32 - center_x;
            let dy = y as f32 - center_y;
            let dist = (dx * dx + dy * dy).sqrt();

            if dist < radius {
                let falloff = 1.0 - dist / radius;
                let v = (155.0 + 100.0 * falloff) as u8;
                img.put_pixel(x, y, Rgb([v, v / 2 + 60, 30]));
            }
        }
    }

    println!("Created test image: {}x{}\n", width, height);

    for charset in [Charset::Ascii, Charset::Braille] {
        let config = AsciiConfig {
            charset,
            ..Default::default()
        };
        let converter = Converter::new(config)?;
        let cell = converter.cell_size();
        let grid = converter.convert(&img);

        println!(
            "{:?}: {} glyphs, cell {}x{}, grid {}x{}",
            charset,
            converter.palette().len(),
            cell.width,
            cell.height,
            grid.cols(),
            grid.rows()
        );
        println!("{grid}\n");

        let output = converter.render(&img, &grid)?;
        let path = format!("basic_{charset:?}.png").to_lowercase();
        output.save(&path).expect("Failed to save output");
        println!("✓ Saved rendering to: {path}\n");
    }

    img.save("basic_input.png").expect("Failed to save input");
    println!("✓ Saved input to:  basic_input.png");
    Ok(())
}
