//! Greedy non-maximum suppression over scored rectangles.

use std::cmp::Ordering;

use crate::candidate::detect::Detection;

/// Descending score; NaN scores sort last and `-0.0` ties with `0.0`.
fn score_cmp_desc(a: &Detection, b: &Detection) -> Ordering {
    match (a.score.is_nan(), b.score.is_nan()) {
        (false, false) => b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal),
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
    }
}

/// Keeps the highest-scoring detections that do not conflict with each other.
///
/// Detections are stably sorted by descending score. Each candidate is then
/// compared against the detections kept so far and dropped if
/// `exceeds(candidate, kept)` is true for any of them; otherwise it is kept.
/// Traversal stops once `max_count` detections are kept. The result is in
/// descending score order.
///
/// The predicate receives the candidate first and the already kept detection
/// second and need not be symmetric.
pub fn suppress<F>(detections: &[Detection], max_count: usize, mut exceeds: F) -> Vec<Detection>
where
    F: FnMut(&Detection, &Detection) -> bool,
{
    let mut order = detections.to_vec();
    // `sort_by` is stable, so equal scores keep their input order.
    order.sort_by(score_cmp_desc);

    let mut kept: Vec<Detection> = Vec::new();
    for candidate in order {
        if kept.len() >= max_count {
            break;
        }
        if kept.iter().any(|k| exceeds(&candidate, k)) {
            continue;
        }
        kept.push(candidate);
    }
    kept
}

/// Predicate that rejects a candidate overlapping more than `max_cover` of a
/// kept detection's area: `kept.rect.cover(&candidate.rect) > max_cover`.
pub fn cover_exceeds(max_cover: f64) -> impl Fn(&Detection, &Detection) -> bool {
    move |candidate, kept| kept.rect.cover(&candidate.rect) > max_cover
}

/// Predicate that rejects a candidate whose IoU with a kept detection exceeds `max_iou`.
pub fn iou_exceeds(max_iou: f64) -> impl Fn(&Detection, &Detection) -> bool {
    move |candidate, kept| candidate.rect.iou(&kept.rect) > max_iou
}
