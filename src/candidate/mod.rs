//! Detections and greedy non-maximum suppression.
//!
//! Responses become scored rectangles ([`Detection`]) which are then pruned
//! by [`suppress`] with a caller-supplied overlap predicate.

pub mod detect;
pub mod rect;
pub mod suppress;

pub use detect::{detections_from_response, Detection};
pub use rect::Rect;
pub use suppress::{cover_exceeds, iou_exceeds, suppress};
