//! Low-level building blocks for custom correlation pipelines.
//!
//! These items expose the individual strategies, the FFT plan and the cost
//! model for callers that want to bypass [`Correlator`](crate::Correlator).
//! Kernels skip the validation done by the facade; callers must pass a
//! positive stride, a non-empty filter and matching channel counts.

pub use crate::kernel::fourier::{FftPlan2, Fourier};
pub use crate::kernel::matmul::MatMul;
#[cfg(feature = "rayon")]
pub use crate::kernel::rayon::{direct_corr_bank_par, direct_corr_par};
pub use crate::kernel::scalar::Direct;
pub use crate::kernel::{Kernel, Strategy};
pub use crate::slide::select::{use_fourier, CallShape};
pub use crate::slide::size::padded_transform_size;
