use crate::models::{DetectionConfig, GeometricProperties, SymbolClass};

/// Classification rules, checked in order; the first match wins.
///
/// The cascade leans on circularity first, then solidity paired with how far
/// the bounding box is from square. Order matters: a highly circular blob is
/// Circular even when its solidity would also satisfy the Square rule.
const RULES: [(fn(&GeometricProperties) -> bool, SymbolClass); 5] = [
    (
        |p| p.circularity > 0.7 && (p.aspect_ratio - 1.0).abs() < 0.3,
        SymbolClass::Circular,
    ),
    (
        |p| p.solidity > 0.8 && (p.aspect_ratio - 1.0).abs() < 0.2,
        SymbolClass::Square,
    ),
    (
        |p| p.solidity > 0.8 && (p.aspect_ratio - 1.0).abs() > 0.5,
        SymbolClass::Rectangle,
    ),
    (
        |p| p.solidity < 0.7 && p.circularity < 0.6,
        SymbolClass::Triangle,
    ),
    (|p| p.solidity < 0.8, SymbolClass::Complex),
];

/// Assign a symbol class from shape descriptors.
pub fn classify(properties: &GeometricProperties) -> SymbolClass {
    for (matches, class) in RULES {
        if matches(properties) {
            return class;
        }
    }
    SymbolClass::Other
}

/// Shape plausibility gate applied before classification.
///
/// Rejects blobs that are too hollow, too elongated, or too sparse in their
/// bounding box to be a drawn symbol. All three bounds are inclusive.
pub fn is_valid_symbol(properties: &GeometricProperties, config: &DetectionConfig) -> bool {
    if properties.solidity < config.solidity_threshold {
        return false;
    }
    let aspect_ratio = properties.aspect_ratio;
    if aspect_ratio < config.aspect_ratio_threshold
        || aspect_ratio > 1.0 / config.aspect_ratio_threshold
    {
        return false;
    }
    if properties.extent < config.extent_threshold {
        return false;
    }
    true
}
