//! OCR: the text-recognition seam used by intake, plus the bundled engine.

#[cfg(feature = "native")]
mod pure_engine;

#[cfg(feature = "native")]
pub use pure_engine::PureOcrEngine;

use image::DynamicImage;
use serde::{Deserialize, Serialize};

use crate::error::OcrError;

/// Vertical bucket size, in pixels, for grouping boxes into rows.
const ROW_HEIGHT: f32 = 20.0;

/// Turns a page image into text.
///
/// Engines may keep interior caches, so this is used from one thread at a time.
pub trait TextRecognizer {
    fn recognize(&self, image: &DynamicImage) -> Result<String, OcrError>;
}

/// A detected text box with its coordinates and content.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TextBox {
    /// Quadrilateral corners as `[x1, y1, x2, y2, x3, y3, x4, y4]`.
    pub bbox: [f32; 8],

    pub text: String,

    /// Confidence score (0.0 - 1.0).
    pub confidence: f32,
}

impl TextBox {
    /// Axis-aligned bounding rectangle `(min_x, min_y, max_x, max_y)`.
    pub fn rect(&self) -> (f32, f32, f32, f32) {
        let xs = [self.bbox[0], self.bbox[2], self.bbox[4], self.bbox[6]];
        let ys = [self.bbox[1], self.bbox[3], self.bbox[5], self.bbox[7]];

        let min_x = xs.iter().cloned().fold(f32::INFINITY, f32::min);
        let max_x = xs.iter().cloned().fold(f32::NEG_INFINITY, f32::max);
        let min_y = ys.iter().cloned().fold(f32::INFINITY, f32::min);
        let max_y = ys.iter().cloned().fold(f32::NEG_INFINITY, f32::max);

        (min_x, min_y, max_x, max_y)
    }
}

/// Result of OCR on one image.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OcrResult {
    pub boxes: Vec<TextBox>,

    /// Box texts in reading order, one row per line.
    pub text: String,

    pub processing_time_ms: u64,

    /// Image dimensions (width, height).
    pub image_size: (u32, u32),
}

impl OcrResult {
    /// Build a result from unordered boxes.
    pub fn from_boxes(mut boxes: Vec<TextBox>, image_size: (u32, u32), processing_time_ms: u64) -> Self {
        sort_by_reading_order(&mut boxes);
        let text = join_rows(&boxes);
        Self {
            boxes,
            text,
            processing_time_ms,
            image_size,
        }
    }
}

/// Sort boxes top-to-bottom, then left-to-right within a row.
pub fn sort_by_reading_order(boxes: &mut [TextBox]) {
    boxes.sort_by(|a, b| {
        let (ax, ay, _, _) = a.rect();
        let (bx, by, _, _) = b.rect();
        let row_a = (ay / ROW_HEIGHT) as i32;
        let row_b = (by / ROW_HEIGHT) as i32;

        row_a
            .cmp(&row_b)
            .then(ax.partial_cmp(&bx).unwrap_or(std::cmp::Ordering::Equal))
    });
}

/// Join sorted boxes into text: boxes in one row are separated by three
/// spaces so payroll columns survive, rows by newlines.
fn join_rows(boxes: &[TextBox]) -> String {
    let mut text = String::new();
    let mut current_row = None;

    for b in boxes {
        let (_, y, _, _) = b.rect();
        let row = (y / ROW_HEIGHT) as i32;
        match current_row {
            Some(r) if r == row => text.push_str("   "),
            Some(_) => text.push('\n'),
            None => {}
        }
        text.push_str(b.text.trim());
        current_row = Some(row);
    }

    text
}
