use std::fs;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;

use symtally::{
    DetectionConfig, Section, SectionDescriptor, aggregate, detect_all, enhance_for_detection,
    normalize, render_overlay, section_summaries,
};

#[derive(Parser)]
#[command(name = "symtally")]
#[command(about = "Count and classify symbols in sections of technical drawings")]
struct Cli {
    /// Path to input document (pdf, png, jpg)
    #[arg(value_name = "DOCUMENT")]
    document_path: PathBuf,

    /// JSON file listing the sections to scan
    #[arg(long, value_name = "FILE")]
    sections: PathBuf,

    /// Smallest accepted symbol area in pixels
    #[arg(long, default_value_t = 50)]
    min_area: u32,

    /// Largest accepted symbol area in pixels
    #[arg(long, default_value_t = 5000)]
    max_area: u32,

    /// Minimum solidity for a candidate symbol
    #[arg(long, default_value_t = 0.3)]
    solidity: f64,

    /// Lower aspect-ratio bound; the upper bound is its reciprocal
    #[arg(long, default_value_t = 0.1)]
    aspect_ratio: f64,

    /// Minimum extent for a candidate symbol
    #[arg(long, default_value_t = 0.2)]
    extent: f64,

    /// Write per-section results and the aggregate as JSON
    #[arg(long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Save the document with sections and detected symbols drawn on top
    #[arg(long, value_name = "FILE")]
    annotate: Option<PathBuf>,

    /// Save the adaptive-threshold preview of the whole document
    #[arg(long, value_name = "FILE")]
    enhance: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Cli::parse();

    let level = if args.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()),
        )
        .init();

    // Load and normalize the document
    let bytes = fs::read(&args.document_path)
        .with_context(|| format!("Failed to read document {:?}", args.document_path))?;
    let extension = args
        .document_path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("");
    let document = normalize(&bytes, extension)?;

    if args.verbose {
        println!(
            "Document loaded: {}x{} ({:?})",
            document.width(),
            document.height(),
            document.format()
        );
    }

    // Parse sections
    let sections_json = fs::read_to_string(&args.sections)
        .with_context(|| format!("Failed to read sections file {:?}", args.sections))?;
    let descriptors: Vec<SectionDescriptor> = serde_json::from_str(&sections_json)
        .with_context(|| format!("Failed to parse sections file {:?}", args.sections))?;
    let sections: Vec<Section> = descriptors
        .iter()
        .map(|d| Section::from_descriptor(d, document.width(), document.height()))
        .collect();

    if args.verbose {
        println!("\nSections:");
        for line in section_summaries(&sections) {
            println!("  {line}");
        }
    }

    let config = DetectionConfig {
        min_area: args.min_area,
        max_area: args.max_area,
        solidity_threshold: args.solidity,
        aspect_ratio_threshold: args.aspect_ratio,
        extent_threshold: args.extent,
    };

    // Detect over all sections and aggregate
    let results = detect_all(&document, &sections, &config);
    let report = aggregate(results.values());

    // Print results
    println!("\n=== Symbol Count Summary ===");
    for (name, result) in &results {
        match &result.error {
            Some(marker) => println!("  {}: skipped ({})", name, marker),
            None => println!("  {}: {} symbols", name, result.count()),
        }
    }
    println!("\nTotal symbols: {}", report.total);
    if report.total > 0 {
        println!("Average area: {:.1} px", report.average_area);
        println!("\nBy type:");
        for (class, count) in &report.types {
            println!(
                "  {}: {} ({:.0}%)",
                class,
                count,
                report.class_share(*class) * 100.0
            );
        }
    }

    if let Some(path) = &args.output {
        let payload = serde_json::json!({
            "sections": results,
            "aggregate": report,
        });
        fs::write(path, serde_json::to_string_pretty(&payload)?)
            .with_context(|| format!("Failed to write results to {:?}", path))?;
        println!("\nResults written to {}", path.display());
    }

    if let Some(path) = &args.annotate {
        render_overlay(&document, &sections, &results).save(path)?;
        println!("Annotated document written to {}", path.display());
    }

    if let Some(path) = &args.enhance {
        enhance_for_detection(&document).save(path)?;
        println!("Enhanced document written to {}", path.display());
    }

    Ok(())
}
