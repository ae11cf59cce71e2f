//! Slidecorr computes sliding-window correlation of 2D multi-channel signals
//! and prunes the resulting detections with greedy non-maximum suppression.
//!
//! Three strategies compute the same valid, optionally strided correlation:
//! direct summation, frequency-domain multiplication (`rustfft`) and patch
//! unrolling with a dense matrix product (`ndarray`). A cost model picks
//! between direct and frequency-domain by default. Optional features add
//! rayon parallelism, SIMD dot products, tracing and image loading.

pub mod bank;
pub mod candidate;
pub mod image;
pub mod kernel;
pub mod lowlevel;
pub mod slide;
mod trace;
pub mod util;

#[cfg(feature = "image-io")]
pub use image::io;

pub use bank::Bank;
pub use candidate::{
    cover_exceeds, detections_from_response, iou_exceeds, suppress, Detection, Rect,
};
pub use image::{Image, ImageView, MultiImage, Size};
pub use kernel::Strategy;
pub use slide::{
    corr, corr_bank, corr_multi, corr_multi_bank, valid_size, valid_size_stride, Algo,
    CorrConfig, Correlator,
};
pub use util::{SlideError, SlideResult};
