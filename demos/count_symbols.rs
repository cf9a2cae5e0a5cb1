use std::fs;

use symtally::{DetectionConfig, Section, SectionRect, aggregate, detect_all, normalize};

fn main() -> anyhow::Result<()> {
    let bytes = fs::read("drawing.png").map_err(|e| {
        anyhow::anyhow!("Failed to read drawing.png (run the make_drawing example first): {}", e)
    })?;
    let document = normalize(&bytes, "png")?;

    println!("Counting symbols through the library API...\n");
    println!("Document: {}x{} px", document.width(), document.height());

    // Same split the make_drawing example writes to sections.json
    let sections = vec![
        Section::new(
            "lighting",
            SectionRect::new(0, 0, 500, 400),
            document.width(),
            document.height(),
        ),
        Section::new(
            "power",
            SectionRect::new(500, 0, 500, 400),
            document.width(),
            document.height(),
        ),
        Section::new(
            "floor",
            SectionRect::new(0, 400, 1000, 400),
            document.width(),
            document.height(),
        ),
    ];

    println!("\n=== Detecting with Default Thresholds ===");
    let results = detect_all(&document, &sections, &DetectionConfig::default());

    println!("\n✓ Detection completed!");
    for (name, result) in &results {
        println!(
            "  {}: {} symbols in a {}x{} region",
            name,
            result.count(),
            result.roi_shape[1],
            result.roi_shape[0]
        );
        for symbol in result.symbols.iter().take(5) {
            println!(
                "    #{} {}: area={:.0}, circularity={:.2}, center=({}, {})",
                symbol.id,
                symbol.class,
                symbol.area,
                symbol.properties.circularity,
                symbol.center[0],
                symbol.center[1]
            );
        }
    }

    let report = aggregate(results.values());
    println!("\nTakeoff totals: {} symbols, {:.0} px covered", report.total, report.total_area);
    for (class, count) in &report.types {
        println!("  {}: {} ({:.0}%)", class, count, report.class_share(*class) * 100.0);
    }

    // Thresholds are per call, so the same document can be re-counted with a
    // tighter band and the small marks drop out
    println!("\n\n=== Detecting with Stricter Thresholds ===");
    let strict = DetectionConfig {
        min_area: 800,           // Larger minimum
        solidity_threshold: 0.5, // More convex
        ..DetectionConfig::default()
    };
    let strict_results = detect_all(&document, &sections, &strict);

    println!("✓ Strict detection completed!");
    for (name, result) in &strict_results {
        println!(
            "  {}: {} symbols (was {})",
            name,
            result.count(),
            results.get(name).map_or(0, |r| r.count())
        );
    }

    Ok(())
}
