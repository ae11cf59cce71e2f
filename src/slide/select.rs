//! Cost model choosing between the direct and frequency-domain strategies.
//!
//! For one single-channel filter without stride, with image size `f`, filter
//! size `g` and output size `h = valid_size(f, g)`:
//!
//! ```text
//! direct  = h.x * h.y * g.x * g.y          (one multiply-add per tap)
//! fourier = 3 * f.x * f.y * log2(f.x * f.y) (two forward, one inverse FFT)
//! ```
//!
//! The frequency-domain strategy wins when `fourier < direct`. Channels,
//! bank filters and stride phases scale the two terms by the number of
//! dot products and transforms each strategy performs. Matrix
//! multiplication is only run when requested explicitly.

use crate::image::Size;
use crate::kernel::Strategy;
use crate::slide::size::{phase_grid, valid_size, valid_size_stride};
use crate::util::math::{ceil_div, n_log2_n};

/// Shape of one correlation call as seen by the cost model.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CallShape {
    /// Image size.
    pub image: Size,
    /// Filter size.
    pub filter: Size,
    /// Channels shared by image and filters.
    pub channels: usize,
    /// Stride along both axes (at least one).
    pub stride: usize,
    /// Number of filters (one unless correlating a bank).
    pub filters: usize,
}

impl CallShape {
    /// Shape of a plain single-channel, single-filter, unstrided call.
    pub fn plain(image: Size, filter: Size) -> Self {
        Self {
            image,
            filter,
            channels: 1,
            stride: 1,
            filters: 1,
        }
    }

    fn output(&self) -> Size {
        valid_size_stride(self.image, self.filter, self.stride.max(1))
            .unwrap_or_else(|_| valid_size(self.image, self.filter))
    }

    /// Multiply-adds performed by the direct strategy.
    pub fn direct_cost(&self) -> f64 {
        let out = self.output();
        out.area() as f64 * self.filter.area() as f64 * self.channels as f64 * self.filters as f64
    }

    /// Approximate FFT work performed by the frequency-domain strategy.
    pub fn fourier_cost(&self) -> f64 {
        let stride = self.stride.max(1);
        let out = self.output();
        if out.is_empty() {
            return 0.0;
        }
        let grid = phase_grid(self.filter, stride);
        let gsub = Size::new(
            ceil_div(self.filter.width, grid.width),
            ceil_div(self.filter.height, grid.height),
        );
        let n = (out.width + gsub.width - 1) * (out.height + gsub.height - 1);
        let filters = self.filters as f64;
        let transforms = self.channels as f64 * grid.area() as f64 * (1.0 + filters) + filters;
        transforms * n_log2_n(n)
    }

    /// Picks the cheaper of the direct and frequency-domain strategies.
    pub fn select(&self) -> Strategy {
        if self.output().is_empty() {
            return Strategy::Direct;
        }
        if self.fourier_cost() < self.direct_cost() {
            Strategy::Fourier
        } else {
            Strategy::Direct
        }
    }
}

/// Returns true if the frequency-domain strategy is cheaper for a plain call.
pub fn use_fourier(image: Size, filter: Size) -> bool {
    CallShape::plain(image, filter).select() == Strategy::Fourier
}
