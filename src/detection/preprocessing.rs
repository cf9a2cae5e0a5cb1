use image::{GrayImage, RgbImage};
use imageproc::filter::gaussian_blur_f32;

/// Which side of the local mean counts as foreground.
///
/// `Inverted` marks pixels darker than their neighbourhood, which is what
/// symbol detection wants on dark-ink-on-light-paper scans. `Normal` keeps
/// the bright side and is used for the enhancement preview.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThresholdPolarity {
    Normal,
    Inverted,
}

/// Sigma matching a 3x3 Gaussian kernel.
const DENOISE_SIGMA: f32 = 0.8;

/// Sigma matching an 11x11 Gaussian neighbourhood for the local mean.
const LOCAL_MEAN_SIGMA: f32 = 2.0;

/// Offset subtracted from the local mean before comparing.
const THRESHOLD_OFFSET: f32 = 2.0;

/// Convert an RGB raster to grayscale.
pub fn to_grayscale(img: &RgbImage) -> GrayImage {
    image::imageops::grayscale(img)
}

/// Light Gaussian blur to suppress single-pixel noise before thresholding.
pub fn denoise(img: &GrayImage) -> GrayImage {
    gaussian_blur_f32(img, DENOISE_SIGMA)
}

/// Gaussian-weighted adaptive threshold.
///
/// Each pixel is compared against the Gaussian-blurred mean of its
/// neighbourhood minus `offset`; `polarity` picks which side becomes
/// foreground (255). Robust to uneven lighting where a global threshold
/// would lose one side of the page.
pub fn adaptive_threshold(img: &GrayImage, offset: f32, polarity: ThresholdPolarity) -> GrayImage {
    let local_mean = gaussian_blur_f32(img, LOCAL_MEAN_SIGMA);
    let mut out = GrayImage::new(img.width(), img.height());
    for (x, y, pixel) in img.enumerate_pixels() {
        let threshold = local_mean.get_pixel(x, y)[0] as f32 - offset;
        let above = pixel[0] as f32 > threshold;
        let foreground = match polarity {
            ThresholdPolarity::Normal => above,
            ThresholdPolarity::Inverted => !above,
        };
        out.put_pixel(x, y, image::Luma([if foreground { 255 } else { 0 }]));
    }
    out
}

/// Binarize for symbol detection: denoise, then adaptive threshold with
/// inverted polarity so ink becomes foreground.
pub fn binarize(img: &GrayImage) -> GrayImage {
    let blurred = denoise(img);
    adaptive_threshold(&blurred, THRESHOLD_OFFSET, ThresholdPolarity::Inverted)
}

/// Same denoise-and-threshold pass with normal polarity, for the
/// document-level enhancement preview.
pub fn enhance(img: &GrayImage) -> GrayImage {
    let blurred = denoise(img);
    adaptive_threshold(&blurred, THRESHOLD_OFFSET, ThresholdPolarity::Normal)
}

/// Anchor corner for the 2x2 structuring element.
#[derive(Clone, Copy)]
enum Corner {
    TopLeft,
    BottomRight,
}

/// Fold a 2x2 window over every pixel. `TopLeft` reads (x..x+1, y..y+1),
/// `BottomRight` reads (x-1..x, y-1..y); out-of-bounds taps are skipped.
fn morph_2x2(img: &GrayImage, corner: Corner, init: u8, fold: fn(u8, u8) -> u8) -> GrayImage {
    let (width, height) = img.dimensions();
    let offsets: [i64; 2] = match corner {
        Corner::TopLeft => [0, 1],
        Corner::BottomRight => [-1, 0],
    };
    let mut out = GrayImage::new(width, height);
    for y in 0..height as i64 {
        for x in 0..width as i64 {
            let mut value = init;
            for dy in offsets {
                for dx in offsets {
                    let (sx, sy) = (x + dx, y + dy);
                    if sx >= 0 && sy >= 0 && sx < width as i64 && sy < height as i64 {
                        value = fold(value, img.get_pixel(sx as u32, sy as u32)[0]);
                    }
                }
            }
            out.put_pixel(x as u32, y as u32, image::Luma([value]));
        }
    }
    out
}

/// Morphological closing with a 2x2 structuring element: dilate then erode.
///
/// The erosion anchors on the opposite corner so the pair cancels out and
/// the blob does not drift. Fills single-pixel gaps in strokes.
pub fn close_2x2(img: &GrayImage) -> GrayImage {
    let dilated = morph_2x2(img, Corner::TopLeft, 0, u8::max);
    morph_2x2(&dilated, Corner::BottomRight, 255, u8::min)
}

/// Morphological opening with a 2x2 structuring element: erode then dilate.
///
/// Anchored like [`close_2x2`] so the result stays in place. Removes
/// isolated foreground pixels smaller than the element.
pub fn open_2x2(img: &GrayImage) -> GrayImage {
    let eroded = morph_2x2(img, Corner::TopLeft, 255, u8::min);
    morph_2x2(&eroded, Corner::BottomRight, 0, u8::max)
}
