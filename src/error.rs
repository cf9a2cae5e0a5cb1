use thiserror::Error;

/// Errors produced while loading documents and detecting symbols.
///
/// Document-level errors (`UnsupportedFormat`, `Decode`) are terminal for the
/// load that raised them. Section-level errors (`InvalidSection`, `EmptyRoi`)
/// are isolated per section: batch detection records them on the affected
/// result and keeps going.
#[derive(Debug, Error)]
pub enum DetectError {
    #[error("unsupported format: .{extension}")]
    UnsupportedFormat { extension: String },

    #[error("failed to decode document: {message}")]
    Decode { message: String },

    #[error("invalid section '{name}': {reason}")]
    InvalidSection { name: String, reason: String },

    #[error("empty ROI for section '{name}'")]
    EmptyRoi { name: String },
}

impl DetectError {
    /// Short marker recorded on an error-flagged detection result.
    pub fn marker(&self) -> &'static str {
        match self {
            DetectError::UnsupportedFormat { .. } => "Unsupported format",
            DetectError::Decode { .. } => "Decode error",
            DetectError::InvalidSection { .. } => "Invalid section",
            DetectError::EmptyRoi { .. } => "Empty ROI",
        }
    }
}
