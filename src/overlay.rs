use std::collections::BTreeMap;

use image::{Rgb, RgbImage};
use imageproc::drawing::{draw_cross_mut, draw_hollow_rect_mut};
use imageproc::rect::Rect;

use crate::document::Document;
use crate::models::DetectionResult;
use crate::section::Section;

const SECTION_OUTLINE: Rgb<u8> = Rgb([66, 135, 245]);
const SYMBOL_OUTLINE: Rgb<u8> = Rgb([220, 40, 40]);
const CENTER_MARK: Rgb<u8> = Rgb([30, 160, 60]);

/// Render the document with section rectangles, symbol bounding boxes and
/// centroid marks drawn on top.
///
/// Sections are drawn at their clamped bounds, the same pixels detection
/// actually ran on. Symbol geometry is in absolute document coordinates and
/// is clipped to the canvas before drawing.
pub fn render_overlay(
    document: &Document,
    sections: &[Section],
    results: &BTreeMap<String, DetectionResult>,
) -> RgbImage {
    let mut canvas = document.raster().clone();
    let (doc_width, doc_height) = (document.width(), document.height());

    for section in sections {
        if let Some((x, y, x2, y2)) = section.clamped_bounds(doc_width, doc_height) {
            let rect = Rect::at(x as i32, y as i32).of_size(x2 - x, y2 - y);
            draw_hollow_rect_mut(&mut canvas, rect, SECTION_OUTLINE);
        }
    }

    for result in results.values() {
        for symbol in &result.symbols {
            if let Some(rect) = clip_to_canvas(symbol.bounding_box, doc_width, doc_height) {
                draw_hollow_rect_mut(&mut canvas, rect, SYMBOL_OUTLINE);
            }
            let [cx, cy] = symbol.center;
            if (0..doc_width as i64).contains(&cx) && (0..doc_height as i64).contains(&cy) {
                draw_cross_mut(&mut canvas, CENTER_MARK, cx as i32, cy as i32);
            }
        }
    }

    canvas
}

/// Clamp an `[x, y, width, height]` box to the canvas; `None` when nothing
/// of it is visible.
fn clip_to_canvas(bounding_box: [i64; 4], width: u32, height: u32) -> Option<Rect> {
    let [bx, by, bw, bh] = bounding_box;
    let x = bx.max(0).min(width as i64);
    let y = by.max(0).min(height as i64);
    let x2 = bx.saturating_add(bw).max(0).min(width as i64);
    let y2 = by.saturating_add(bh).max(0).min(height as i64);
    if x2 <= x || y2 <= y {
        return None;
    }
    Some(Rect::at(x as i32, y as i32).of_size((x2 - x) as u32, (y2 - y) as u32))
}
