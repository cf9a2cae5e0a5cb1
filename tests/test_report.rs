//! Integration tests for result aggregation and the JSON wire shape.
//!
//! Tests cover:
//! - Aggregate identities over real detection results
//! - Flagged results and their failure markers
//! - Serialized field layout consumed by downstream tooling

mod common;

use common::*;

#[test]
fn test_aggregate_identities_hold() {
    // 1. Detect a mixed drawing
    let mut drawing = blank_drawing(800, 600);
    stamp_disk(&mut drawing, 100, 100, 20);
    stamp_disk(&mut drawing, 300, 200, 15);
    stamp_rect(&mut drawing, 500, 100, 80, 20);
    let doc = as_document(drawing);
    let sections = vec![make_section("all", 0, 0, 800, 600, &doc)];
    let results = detect_all(&doc, &sections, &DetectionConfig::default());

    // 2. Aggregate
    let report = aggregate(results.values());

    // 3. Histogram totals match the overall count
    assert_eq!(report.total, 3);
    assert_eq!(report.types.values().sum::<usize>(), report.total);
    assert_eq!(report.types[&SymbolClass::Circular], 2);
    assert_eq!(report.types[&SymbolClass::Rectangle], 1);

    // 4. Average times count equals the area sum
    assert!(report.total_area > 0.0);
    assert!((report.average_area * report.total as f64 - report.total_area).abs() < 1e-9);

    // 5. Shares sum to one over the present classes
    let share_sum: f64 = report
        .types
        .keys()
        .map(|class| report.class_share(*class))
        .sum();
    assert!((share_sum - 1.0).abs() < 1e-12);
}

#[test]
fn test_empty_input_aggregates_to_zeros() {
    let report = aggregate(std::iter::empty());

    assert_eq!(report.total, 0);
    assert!(report.types.is_empty());
    assert_eq!(report.average_area, 0.0);
    assert_eq!(report.total_area, 0.0);
    assert_eq!(report.class_share(SymbolClass::Circular), 0.0);
}

#[test]
fn test_flagged_results_contribute_nothing() {
    let error = DetectError::InvalidSection {
        name: "broken".to_string(),
        reason: "does not fit".to_string(),
    };
    let flagged = DetectionResult::flagged("broken", [0, 0], &error);

    let report = aggregate([&flagged]);

    assert_eq!(report.total, 0);
    assert_eq!(report.total_area, 0.0);
}

#[test]
fn test_every_error_carries_its_marker() {
    let cases = [
        (
            DetectError::UnsupportedFormat {
                extension: "gif".to_string(),
            },
            "Unsupported format",
        ),
        (
            DetectError::Decode {
                message: "bad header".to_string(),
            },
            "Decode error",
        ),
        (
            DetectError::InvalidSection {
                name: "a".to_string(),
                reason: "b".to_string(),
            },
            "Invalid section",
        ),
        (
            DetectError::EmptyRoi {
                name: "a".to_string(),
            },
            "Empty ROI",
        ),
    ];

    for (error, marker) in cases {
        assert_eq!(error.marker(), marker);
        let result = DetectionResult::flagged("probe", [0, 0], &error);
        assert_eq!(result.error.as_deref(), Some(marker));
        assert!(result.is_flagged());
        assert_eq!(result.count(), 0);
    }
}

#[test]
fn test_symbol_class_labels_are_stable() {
    assert_eq!(SymbolClass::Circular.to_string(), "Circular");
    assert_eq!(SymbolClass::Square.as_str(), "Square");
    assert_eq!(SymbolClass::Other.as_str(), "Other");
}

#[test]
fn test_result_json_omits_the_error_field_on_success() -> anyhow::Result<()> {
    let mut drawing = blank_drawing(400, 300);
    stamp_disk(&mut drawing, 100, 100, 20);
    let doc = as_document(drawing);
    let section = make_section("lighting", 0, 0, 400, 300, &doc);

    let finished = serde_json::to_value(detect(&doc, &section, &DetectionConfig::default()))?;
    assert!(finished.get("error").is_none());
    assert_eq!(finished["section_name"], "lighting");
    assert_eq!(finished["total_symbols"], 1);
    assert_eq!(finished["roi_shape"], serde_json::json!([300, 400]));
    assert_eq!(finished["symbols"][0]["class"], "Circular");

    let error = DetectError::EmptyRoi {
        name: "lighting".to_string(),
    };
    let flagged = serde_json::to_value(DetectionResult::flagged("lighting", [0, 0], &error))?;
    assert_eq!(flagged["error"], "Empty ROI");
    Ok(())
}

#[test]
fn test_report_json_keys_the_histogram_by_label() -> anyhow::Result<()> {
    let mut drawing = blank_drawing(400, 300);
    stamp_disk(&mut drawing, 100, 100, 20);
    let doc = as_document(drawing);
    let sections = vec![make_section("lighting", 0, 0, 400, 300, &doc)];
    let results = detect_all(&doc, &sections, &DetectionConfig::default());

    let value = serde_json::to_value(aggregate(results.values()))?;

    assert_eq!(value["total"], 1);
    assert_eq!(value["types"]["Circular"], 1);
    assert_eq!(value["total_area"], value["average_area"]);
    Ok(())
}
