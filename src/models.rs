use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::error::DetectError;

/// Absolute pixel rectangle of a section, as supplied by the caller.
///
/// Signed on purpose: out-of-range rectangles stay representable until
/// `Section::validate` decides their fate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionRect {
    pub x: i64,
    pub y: i64,
    pub width: i64,
    pub height: i64,
}

impl SectionRect {
    pub fn new(x: i64, y: i64, width: i64, height: i64) -> Self {
        Self { x, y, width, height }
    }

    pub fn area(&self) -> i64 {
        self.width * self.height
    }
}

/// Section rectangle expressed as fractions of the document dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FractionalRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// Wire shape of a section as found in a sections file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionDescriptor {
    pub name: String,
    pub x: i64,
    pub y: i64,
    pub width: i64,
    pub height: i64,
}

/// Detection thresholds, passed explicitly on every engine call.
///
/// The engine keeps no mutable copy of these, so detection over sections of
/// the same document can run in parallel without locking.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DetectionConfig {
    /// Smallest accepted contour area in pixels.
    pub min_area: u32,
    /// Largest accepted contour area in pixels.
    pub max_area: u32,
    /// Minimum solidity for a candidate.
    pub solidity_threshold: f64,
    /// Lower aspect-ratio bound; the upper bound is its reciprocal.
    pub aspect_ratio_threshold: f64,
    /// Minimum extent for a candidate.
    pub extent_threshold: f64,
}

impl Default for DetectionConfig {
    fn default() -> Self {
        Self {
            min_area: 50,
            max_area: 5000,
            solidity_threshold: 0.3,
            aspect_ratio_threshold: 0.1,
            extent_threshold: 0.2,
        }
    }
}

/// Geometric descriptors of one contour candidate, derived once.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeometricProperties {
    pub area: f64,
    pub perimeter: f64,
    /// Bounding-box width over height; 0 when the box has no height.
    pub aspect_ratio: f64,
    /// Area over bounding-box area; 0 when the box is degenerate.
    pub extent: f64,
    /// Area over convex-hull area; 0 when the hull is degenerate.
    pub solidity: f64,
    pub equiv_diameter: f64,
    /// `4π·area/perimeter²`; 1.0 for a perfect circle.
    pub circularity: f64,
    /// Bounding-box width in pixels.
    pub width: u32,
    /// Bounding-box height in pixels.
    pub height: u32,
}

/// Classification label assigned to a detected symbol.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum SymbolClass {
    Circular,
    Square,
    Rectangle,
    Triangle,
    Complex,
    Other,
}

impl SymbolClass {
    pub fn as_str(&self) -> &'static str {
        match self {
            SymbolClass::Circular => "Circular",
            SymbolClass::Square => "Square",
            SymbolClass::Rectangle => "Rectangle",
            SymbolClass::Triangle => "Triangle",
            SymbolClass::Complex => "Complex",
            SymbolClass::Other => "Other",
        }
    }
}

impl fmt::Display for SymbolClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One detected symbol, located in absolute document coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Symbol {
    /// 1-based id, scoped to the section that produced it.
    pub id: u32,
    pub area: f64,
    /// Centroid `[x, y]` in absolute document pixels.
    pub center: [i64; 2],
    pub class: SymbolClass,
    pub properties: GeometricProperties,
    /// `[x, y, width, height]` in absolute document pixels.
    pub bounding_box: [i64; 4],
    pub section_name: String,
}

/// Outcome of detecting one section. Never cached; recomputed per call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetectionResult {
    pub section_name: String,
    pub symbols: Vec<Symbol>,
    /// ROI `[height, width]` that detection actually ran on.
    pub roi_shape: [u32; 2],
    pub total_symbols: usize,
    /// Marker for an isolated section failure; `None` on success.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl DetectionResult {
    /// Successful result over the symbols found in `section_name`.
    pub fn finished(section_name: &str, symbols: Vec<Symbol>, roi_shape: [u32; 2]) -> Self {
        let total_symbols = symbols.len();
        Self {
            section_name: section_name.to_string(),
            symbols,
            roi_shape,
            total_symbols,
            error: None,
        }
    }

    /// Error-flagged result for a section failure that must not abort the
    /// batch. `roi_shape` is `[0, 0]` when no region was ever extracted.
    pub fn flagged(section_name: &str, roi_shape: [u32; 2], error: &DetectError) -> Self {
        Self {
            section_name: section_name.to_string(),
            symbols: Vec::new(),
            roi_shape,
            total_symbols: 0,
            error: Some(error.marker().to_string()),
        }
    }

    pub fn count(&self) -> usize {
        self.total_symbols
    }

    pub fn is_flagged(&self) -> bool {
        self.error.is_some()
    }
}

/// Takeoff summary across all sections.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregateReport {
    pub total: usize,
    /// Count per classification label.
    pub types: BTreeMap<SymbolClass, usize>,
    pub average_area: f64,
    pub total_area: f64,
}

impl AggregateReport {
    /// Share of `class` in the total count, in `[0, 1]`. 0 when nothing was
    /// counted.
    pub fn class_share(&self, class: SymbolClass) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        self.types.get(&class).copied().unwrap_or(0) as f64 / self.total as f64
    }
}
