//! Correlation strategies.
//!
//! Every strategy computes the same valid, strided, multi-channel
//! correlation
//!
//! ```text
//! h[i, j] = sum_{u, v, k} image[i*stride + u, j*stride + v, k] * filter[u, v, k]
//! ```
//!
//! and differs only in cost: [`scalar::Direct`] sums directly,
//! [`fourier::Fourier`] multiplies in the frequency domain, and
//! [`matmul::MatMul`] unrolls patches into a dense matrix product.
//!
//! Kernels assume their inputs were validated by the public entry points:
//! positive stride, non-empty filter and matching channel counts.

use crate::bank::Bank;
use crate::image::{Image, ImageView, MultiImage};
use crate::util::SlideResult;

/// A concrete correlation strategy selected for one call.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Strategy {
    /// Nested summation over every output pixel and filter tap.
    Direct,
    /// Convolution theorem with a stride phase decomposition.
    Fourier,
    /// Patch unrolling followed by a dense matrix product.
    MatMul,
}

impl Strategy {
    /// Short lowercase name used in logs and configs.
    pub fn name(self) -> &'static str {
        match self {
            Strategy::Direct => "direct",
            Strategy::Fourier => "fourier",
            Strategy::MatMul => "matmul",
        }
    }
}

/// Kernel trait implemented by each strategy.
pub trait Kernel {
    /// Strided correlation of an image with one filter of equal channel count.
    fn corr(image: ImageView<'_>, filter: ImageView<'_>, stride: usize) -> SlideResult<Image>;

    /// Strided correlation with every filter of a bank.
    ///
    /// Channel `b` of the result is the response to filter `b`.
    fn corr_bank(image: ImageView<'_>, bank: &Bank, stride: usize) -> SlideResult<MultiImage>;
}

pub mod fourier;
pub mod matmul;
pub mod scalar;

#[cfg(feature = "simd")]
pub mod simd;

#[cfg(feature = "rayon")]
pub mod rayon;
