use std::collections::BTreeMap;

use crate::models::{AggregateReport, DetectionResult, SymbolClass};

/// Fold per-section results into one takeoff summary.
///
/// Pure over its input: error-flagged results carry no symbols and therefore
/// contribute nothing, and aggregating the same results twice gives the same
/// report.
pub fn aggregate<'a, I>(results: I) -> AggregateReport
where
    I: IntoIterator<Item = &'a DetectionResult>,
{
    let mut total = 0usize;
    let mut types: BTreeMap<SymbolClass, usize> = BTreeMap::new();
    let mut total_area = 0.0f64;

    for result in results {
        for symbol in &result.symbols {
            total += 1;
            *types.entry(symbol.class).or_insert(0) += 1;
            total_area += symbol.area;
        }
    }

    let average_area = if total > 0 {
        total_area / total as f64
    } else {
        0.0
    };

    AggregateReport {
        total,
        types,
        average_area,
        total_area,
    }
}
