pub mod classify;
pub mod contours;
pub mod preprocessing;

use std::collections::BTreeMap;

use rayon::prelude::*;
use tracing::{debug, warn};

use crate::document::Document;
use crate::error::DetectError;
use crate::models::{DetectionConfig, DetectionResult, Symbol};
use crate::section::Section;

/// Detect and classify symbols in one section of a document.
///
/// The section rectangle is clamped into the document, never rejected; pass
/// sections through [`detect_all`] to get strict validation first. Thresholds
/// come in with `config` and are read-only for the whole call, so concurrent
/// detections over the same document need no coordination.
pub fn detect(document: &Document, section: &Section, config: &DetectionConfig) -> DetectionResult {
    let roi = section.roi(document);
    let roi_shape = [roi.height(), roi.width()];
    if roi.width() == 0 || roi.height() == 0 {
        warn!(section = %section.name, "region clamped to nothing, flagging");
        let error = DetectError::EmptyRoi {
            name: section.name.clone(),
        };
        return DetectionResult::flagged(&section.name, [0, 0], &error);
    }
    debug!(
        section = %section.name,
        width = roi.width(),
        height = roi.height(),
        "detecting symbols"
    );

    // Binarize ink against paper, then knock out single-pixel noise.
    let gray = preprocessing::to_grayscale(&roi);
    let binary = preprocessing::binarize(&gray);
    let closed = preprocessing::close_2x2(&binary);
    let cleaned = preprocessing::open_2x2(&closed);

    let candidates = contours::external_contours(&cleaned);
    debug!(section = %section.name, contours = candidates.len(), "traced outer contours");

    let mut symbols: Vec<Symbol> = Vec::new();
    for points in candidates {
        let area = contours::contour_area(&points);
        if area < config.min_area as f64 || area > config.max_area as f64 {
            continue;
        }

        let properties = contours::geometric_properties(&points, area);
        if !classify::is_valid_symbol(&properties, config) {
            continue;
        }

        let (cx, cy) = contours::centroid(&points);
        let (bx, by, bw, bh) = contours::bounding_box(&points);
        symbols.push(Symbol {
            id: symbols.len() as u32 + 1,
            area,
            center: [cx + section.rect.x, cy + section.rect.y],
            class: classify::classify(&properties),
            properties,
            bounding_box: [
                bx as i64 + section.rect.x,
                by as i64 + section.rect.y,
                bw as i64,
                bh as i64,
            ],
            section_name: section.name.clone(),
        });
    }

    debug!(section = %section.name, symbols = symbols.len(), "section finished");
    DetectionResult::finished(&section.name, symbols, roi_shape)
}

/// Detect symbols in every section, in parallel, keyed by section name.
///
/// Unlike [`detect`], each section is validated strictly first; sections that
/// fail validation come back error-flagged instead of silently clamped. A bad
/// section never aborts the batch.
pub fn detect_all(
    document: &Document,
    sections: &[Section],
    config: &DetectionConfig,
) -> BTreeMap<String, DetectionResult> {
    sections
        .par_iter()
        .map(|section| {
            let result = match section.require_valid(document.width(), document.height()) {
                Ok(()) => detect(document, section, config),
                Err(error) => {
                    warn!(section = %section.name, %error, "skipping section");
                    DetectionResult::flagged(&section.name, [0, 0], &error)
                }
            };
            (section.name.clone(), result)
        })
        .collect()
}
