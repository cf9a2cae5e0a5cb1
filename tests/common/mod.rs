mod fixtures;
pub use fixtures::*;

// Re-export commonly used types from symtally for tests
pub use symtally::{
    DetectError, DetectionConfig, DetectionResult, Document, Section, SectionRect, SymbolClass,
    aggregate, detect, detect_all, normalize,
};
