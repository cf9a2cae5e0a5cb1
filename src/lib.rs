pub mod detection;
pub mod document;
pub mod error;
pub mod models;
pub mod overlay;
pub mod report;
pub mod section;

pub use detection::{detect, detect_all};
pub use document::{Document, SourceFormat, enhance_for_detection, normalize};
pub use error::DetectError;
pub use models::{
    AggregateReport, DetectionConfig, DetectionResult, FractionalRect, GeometricProperties,
    SectionDescriptor, SectionRect, Symbol, SymbolClass,
};
pub use overlay::render_overlay;
pub use report::aggregate;
pub use section::{PLACEHOLDER_SIZE, Section, section_summaries};
