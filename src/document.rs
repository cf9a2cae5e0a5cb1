use image::{GrayImage, RgbImage, imageops, imageops::FilterType};
use pdfium_render::prelude::*;
use serde::{Deserialize, Serialize};

use crate::detection::preprocessing;
use crate::error::DetectError;

/// Decoded rasters never exceed this box.
pub const MAX_RASTER_WIDTH: u32 = 1920;
pub const MAX_RASTER_HEIGHT: u32 = 1080;

/// PDF pages are never upscaled past this factor.
const MAX_PDF_SCALE: f32 = 2.0;

/// Source format of a document, derived from the declared file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SourceFormat {
    Pdf,
    Png,
    Jpeg,
}

impl SourceFormat {
    /// Map a file extension onto a supported format, case-insensitively.
    pub fn from_extension(extension: &str) -> Result<Self, DetectError> {
        match extension.trim_start_matches('.').to_ascii_lowercase().as_str() {
            "pdf" => Ok(SourceFormat::Pdf),
            "png" => Ok(SourceFormat::Png),
            "jpg" | "jpeg" => Ok(SourceFormat::Jpeg),
            other => Err(DetectError::UnsupportedFormat {
                extension: other.to_string(),
            }),
        }
    }
}

/// A decoded document: canonical RGB raster plus its source format.
///
/// Immutable once produced; detection only ever reads it, so one document can
/// back any number of concurrent section detections.
#[derive(Debug, Clone)]
pub struct Document {
    raster: RgbImage,
    format: SourceFormat,
}

impl Document {
    /// Wrap an already-decoded raster (synthetic documents, tests).
    pub fn from_raster(raster: RgbImage, format: SourceFormat) -> Self {
        Self { raster, format }
    }

    pub fn raster(&self) -> &RgbImage {
        &self.raster
    }

    pub fn format(&self) -> SourceFormat {
        self.format
    }

    pub fn width(&self) -> u32 {
        self.raster.width()
    }

    pub fn height(&self) -> u32 {
        self.raster.height()
    }
}

/// Decode raw document bytes into a canonical raster.
///
/// PDF input renders the first page only; png/jpg/jpeg decode directly and
/// are downscaled so the longer edge never exceeds `MAX_RASTER_WIDTH`. No
/// decoder state is retained once the document is produced.
pub fn normalize(bytes: &[u8], declared_extension: &str) -> Result<Document, DetectError> {
    match SourceFormat::from_extension(declared_extension)? {
        SourceFormat::Pdf => render_pdf_first_page(bytes),
        format => decode_raster(bytes, format),
    }
}

/// Adaptive-threshold preview of the whole document, used to eyeball how
/// strokes separate from background before counting anything.
pub fn enhance_for_detection(document: &Document) -> GrayImage {
    let gray = preprocessing::to_grayscale(document.raster());
    preprocessing::enhance(&gray)
}

fn decode_raster(bytes: &[u8], format: SourceFormat) -> Result<Document, DetectError> {
    let decoded = image::load_from_memory(bytes).map_err(|e| DetectError::Decode {
        message: e.to_string(),
    })?;
    Ok(Document {
        raster: shrink_to_limit(decoded.to_rgb8()),
        format,
    })
}

/// Downscale so the longer edge equals `MAX_RASTER_WIDTH`, preserving aspect
/// ratio. Triangle filtering averages source areas on downscale. Images
/// already inside the limit pass through untouched.
fn shrink_to_limit(raster: RgbImage) -> RgbImage {
    let (width, height) = raster.dimensions();
    let longest = width.max(height);
    if longest <= MAX_RASTER_WIDTH {
        return raster;
    }
    let new_width = ((width as u64 * MAX_RASTER_WIDTH as u64) / longest as u64).max(1) as u32;
    let new_height = ((height as u64 * MAX_RASTER_WIDTH as u64) / longest as u64).max(1) as u32;
    imageops::resize(&raster, new_width, new_height, FilterType::Triangle)
}

fn render_pdf_first_page(bytes: &[u8]) -> Result<Document, DetectError> {
    let pdfium = bind_pdfium()?;
    let document = pdfium
        .load_pdf_from_byte_slice(bytes, None)
        .map_err(|e| DetectError::Decode {
            message: e.to_string(),
        })?;

    let pages = document.pages();
    if pages.len() == 0 {
        return Err(DetectError::Decode {
            message: "PDF has no pages".to_string(),
        });
    }
    let page = pages.iter().next().ok_or_else(|| DetectError::Decode {
        message: "PDF has no pages".to_string(),
    })?;

    let width_points = page.width().value;
    let height_points = page.height().value;
    let scale = (MAX_RASTER_WIDTH as f32 / width_points)
        .min(MAX_RASTER_HEIGHT as f32 / height_points)
        .min(MAX_PDF_SCALE);
    let target_width = ((width_points * scale) as i32).max(1);
    let target_height = ((height_points * scale) as i32).max(1);

    let render_config = PdfRenderConfig::new()
        .set_target_width(target_width)
        .set_target_height(target_height)
        .render_form_data(true)
        .render_annotations(true);

    let bitmap = page
        .render_with_config(&render_config)
        .map_err(|e| DetectError::Decode {
            message: e.to_string(),
        })?;

    Ok(Document {
        raster: bitmap.as_image().to_rgb8(),
        format: SourceFormat::Pdf,
    })
}

/// Bind the Pdfium library, preferring a copy next to the binary, then the
/// usual system locations.
fn bind_pdfium() -> Result<Pdfium, DetectError> {
    Pdfium::bind_to_library(Pdfium::pdfium_platform_library_name_at_path("./"))
        .or_else(|_| Pdfium::bind_to_library(Pdfium::pdfium_platform_library_name_at_path("/usr/lib")))
        .or_else(|_| Pdfium::bind_to_library(Pdfium::pdfium_platform_library_name_at_path("/usr/local/lib")))
        .or_else(|_| Pdfium::bind_to_system_library())
        .map(Pdfium::new)
        .map_err(|e| DetectError::Decode {
            message: format!("could not bind PDFium: {e}"),
        })
}
