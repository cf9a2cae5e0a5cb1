use image::{Rgb, RgbImage};
use std::fs;

const PAPER: Rgb<u8> = Rgb([235, 235, 235]);
const INK: Rgb<u8> = Rgb([20, 20, 20]);

fn disk(img: &mut RgbImage, cx: i32, cy: i32, radius: i32) {
    for y in (cy - radius)..=(cy + radius) {
        for x in (cx - radius)..=(cx + radius) {
            let (dx, dy) = (x - cx, y - cy);
            if dx * dx + dy * dy <= radius * radius {
                img.put_pixel(x as u32, y as u32, INK);
            }
        }
    }
}

fn block(img: &mut RgbImage, x0: u32, y0: u32, width: u32, height: u32) {
    for y in y0..y0 + height {
        for x in x0..x0 + width {
            img.put_pixel(x, y, INK);
        }
    }
}

fn triangle(img: &mut RgbImage, apex_x: i32, apex_y: i32, height: i32) {
    for dy in 0..height {
        for dx in -dy..=dy {
            img.put_pixel((apex_x + dx) as u32, (apex_y + dy) as u32, INK);
        }
    }
}

fn main() {
    let mut img = RgbImage::from_pixel(1000, 800, PAPER);

    // Ceiling lights in the top-left quadrant
    disk(&mut img, 100, 100, 20);
    disk(&mut img, 220, 140, 20);
    disk(&mut img, 340, 90, 20);

    // Outlets and a panel in the top-right quadrant
    block(&mut img, 600, 80, 30, 30);
    block(&mut img, 700, 150, 80, 20);

    // A vent mark and a small light on the floor plan half
    triangle(&mut img, 200, 500, 30);
    disk(&mut img, 650, 550, 15);

    img.save("drawing.png").unwrap();
    println!("Created drawing.png (1000x800, 7 symbols)");

    let sections = r#"[
  {"name": "lighting", "x": 0, "y": 0, "width": 500, "height": 400},
  {"name": "power", "x": 500, "y": 0, "width": 500, "height": 400},
  {"name": "floor", "x": 0, "y": 400, "width": 1000, "height": 400}
]
"#;
    fs::write("sections.json", sections).unwrap();
    println!("Created sections.json (3 sections)");
    println!();
    println!("Try: cargo run -- drawing.png --sections sections.json --annotate overlay.png");
}
