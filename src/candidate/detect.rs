//! Scored rectangles collected from correlation responses.

use crate::candidate::rect::Rect;
use crate::image::{Image, Size};

/// A scored window in image coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Detection {
    /// Response value at the window.
    pub score: f64,
    /// Window covered by the filter.
    pub rect: Rect,
}

impl Detection {
    /// Creates a detection.
    pub fn new(score: f64, rect: Rect) -> Self {
        Self { score, rect }
    }
}

/// Collects every response position scoring at least `min_score`.
///
/// Position `(i, j)` of a response computed with `stride` maps to the window
/// `[i*stride, i*stride + window.width) x [j*stride, j*stride + window.height)`.
/// Non-finite scores are skipped. Detections are returned in row-major order.
pub fn detections_from_response(
    response: &Image,
    window: Size,
    stride: usize,
    min_score: f64,
) -> Vec<Detection> {
    let mut out = Vec::new();
    for j in 0..response.height() {
        for i in 0..response.width() {
            let score = response.at(i, j);
            if !score.is_finite() || score < min_score {
                continue;
            }
            let x0 = (i * stride) as i64;
            let y0 = (j * stride) as i64;
            let rect = Rect::new(x0, y0, x0 + window.width as i64, y0 + window.height as i64);
            out.push(Detection::new(score, rect));
        }
    }
    out
}
