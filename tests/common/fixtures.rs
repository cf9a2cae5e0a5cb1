use image::{Rgb, RgbImage};
use symtally::{Document, Section, SectionRect, SourceFormat};

/// Paper and ink shades used by the synthetic drawings.
pub const PAPER: Rgb<u8> = Rgb([235, 235, 235]);
pub const INK: Rgb<u8> = Rgb([20, 20, 20]);

/// Creates a blank drawing filled with paper.
pub fn blank_drawing(width: u32, height: u32) -> RgbImage {
    RgbImage::from_pixel(width, height, PAPER)
}

/// Stamps a filled ink disk of the given radius, clipped to the drawing.
pub fn stamp_disk(img: &mut RgbImage, cx: i64, cy: i64, radius: i64) {
    for y in (cy - radius)..=(cy + radius) {
        for x in (cx - radius)..=(cx + radius) {
            if x < 0 || y < 0 || x >= img.width() as i64 || y >= img.height() as i64 {
                continue;
            }
            let (dx, dy) = (x - cx, y - cy);
            if dx * dx + dy * dy <= radius * radius {
                img.put_pixel(x as u32, y as u32, INK);
            }
        }
    }
}

/// Stamps a filled ink rectangle, clipped to the drawing.
pub fn stamp_rect(img: &mut RgbImage, x: u32, y: u32, width: u32, height: u32) {
    for py in y..(y + height).min(img.height()) {
        for px in x..(x + width).min(img.width()) {
            img.put_pixel(px, py, INK);
        }
    }
}

/// Wraps a raster as an already-decoded document.
pub fn as_document(raster: RgbImage) -> Document {
    Document::from_raster(raster, SourceFormat::Png)
}

/// Creates a section against the given document's dimensions.
pub fn make_section(
    name: &str,
    x: i64,
    y: i64,
    width: i64,
    height: i64,
    doc: &Document,
) -> Section {
    Section::new(
        name,
        SectionRect::new(x, y, width, height),
        doc.width(),
        doc.height(),
    )
}

/// Encodes a raster as PNG bytes in memory.
pub fn png_bytes(img: &RgbImage) -> Vec<u8> {
    let mut cursor = std::io::Cursor::new(Vec::new());
    img.write_to(&mut cursor, image::ImageFormat::Png)
        .expect("Failed to encode test image");
    cursor.into_inner()
}
