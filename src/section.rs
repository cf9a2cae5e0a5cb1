use image::{GrayImage, Luma, RgbImage, imageops};
use serde::{Deserialize, Serialize};

use crate::document::Document;
use crate::error::DetectError;
use crate::models::{FractionalRect, SectionDescriptor, SectionRect};

/// Side length of the placeholder raster returned when a section clamps to
/// nothing (only possible against a document with no pixels).
pub const PLACEHOLDER_SIZE: u32 = 10;

/// A named rectangular region of a document targeted for symbol counting.
///
/// Creation never validates: a section may carry an out-of-range rectangle
/// until `validate` is consulted. ROI extraction is deliberately the opposite
/// and clamps instead of rejecting; both behaviors are part of the contract.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Section {
    pub name: String,
    pub rect: SectionRect,
    /// `rect` as fractions of the document dimensions at creation time.
    pub fractional: FractionalRect,
}

impl Section {
    /// Create a section against a document of the given dimensions.
    pub fn new(name: impl Into<String>, rect: SectionRect, doc_width: u32, doc_height: u32) -> Self {
        let frac = |value: i64, dim: u32| {
            if dim == 0 { 0.0 } else { value as f64 / dim as f64 }
        };
        let fractional = FractionalRect {
            x: frac(rect.x, doc_width),
            y: frac(rect.y, doc_height),
            width: frac(rect.width, doc_width),
            height: frac(rect.height, doc_height),
        };
        Self {
            name: name.into(),
            rect,
            fractional,
        }
    }

    pub fn from_descriptor(descriptor: &SectionDescriptor, doc_width: u32, doc_height: u32) -> Self {
        Self::new(
            descriptor.name.clone(),
            SectionRect::new(descriptor.x, descriptor.y, descriptor.width, descriptor.height),
            doc_width,
            doc_height,
        )
    }

    /// Rectangle area in pixels.
    pub fn area(&self) -> i64 {
        self.rect.area()
    }

    /// Strict containment check, no clamping. False for any rectangle that is
    /// not fully inside the document bounds.
    pub fn validate(&self, doc_width: u32, doc_height: u32) -> bool {
        let SectionRect { x, y, width, height } = self.rect;
        let (dw, dh) = (doc_width as i64, doc_height as i64);

        if x < 0 || y < 0 || x >= dw || y >= dh {
            return false;
        }
        if width <= 0 || height <= 0 {
            return false;
        }
        if x.saturating_add(width) > dw || y.saturating_add(height) > dh {
            return false;
        }
        true
    }

    /// `validate` as a Result, for callers that isolate failures per section.
    pub fn require_valid(&self, doc_width: u32, doc_height: u32) -> Result<(), DetectError> {
        if self.validate(doc_width, doc_height) {
            Ok(())
        } else {
            Err(DetectError::InvalidSection {
                name: self.name.clone(),
                reason: format!(
                    "rectangle {}x{} at ({}, {}) does not fit a {}x{} document",
                    self.rect.width, self.rect.height, self.rect.x, self.rect.y, doc_width, doc_height
                ),
            })
        }
    }

    /// Clamped pixel bounds `(x, y, x2, y2)` shared by ROI and mask
    /// extraction. `None` when the document has no pixels to clamp into.
    pub(crate) fn clamped_bounds(&self, doc_width: u32, doc_height: u32) -> Option<(u32, u32, u32, u32)> {
        if doc_width == 0 || doc_height == 0 {
            return None;
        }
        let (dw, dh) = (doc_width as i64, doc_height as i64);
        let x = self.rect.x.min(dw - 1).max(0);
        let y = self.rect.y.min(dh - 1).max(0);
        // The far edge starts from the clamped origin, so a rectangle hanging
        // off the left keeps its full width where the document allows it.
        let x2 = x.saturating_add(self.rect.width).min(dw).max(x + 1);
        let y2 = y.saturating_add(self.rect.height).min(dh).max(y + 1);
        if x2 <= x || y2 <= y {
            return None;
        }
        Some((x as u32, y as u32, x2 as u32, y2 as u32))
    }

    /// Extract the section's pixels from the document, clamping out-of-range
    /// rectangles instead of failing. A region that clamps to nothing yields
    /// a `PLACEHOLDER_SIZE` square raster of the same channel depth.
    pub fn roi(&self, document: &Document) -> RgbImage {
        match self.clamped_bounds(document.width(), document.height()) {
            Some((x, y, x2, y2)) => {
                imageops::crop_imm(document.raster(), x, y, x2 - x, y2 - y).to_image()
            }
            None => RgbImage::new(PLACEHOLDER_SIZE, PLACEHOLDER_SIZE),
        }
    }

    /// Document-sized binary mask: 1 inside the clamped rectangle, 0
    /// elsewhere.
    pub fn mask(&self, doc_width: u32, doc_height: u32) -> GrayImage {
        let mut mask = GrayImage::new(doc_width, doc_height);
        if let Some((x, y, x2, y2)) = self.clamped_bounds(doc_width, doc_height) {
            for py in y..y2 {
                for px in x..x2 {
                    mask.put_pixel(px, py, Luma([1]));
                }
            }
        }
        mask
    }

    /// One-line description for section listings.
    pub fn summary(&self) -> String {
        let SectionRect { x, y, width, height } = self.rect;
        format!(
            "{}: {}x{} at ({}, {}), center ({}, {}), area {} px",
            self.name,
            width,
            height,
            x,
            y,
            x + width / 2,
            y + height / 2,
            self.area()
        )
    }
}

/// Summaries for a section list, in input order.
pub fn section_summaries(sections: &[Section]) -> Vec<String> {
    sections.iter().map(Section::summary).collect()
}
