//! Frequency-domain correlation via the convolution theorem.
//!
//! For real signals, `corr(f, g) = IFFT(FFT(f) * conj(FFT(g))) / N` where `N`
//! is the transform area (the `rustfft` transforms are unnormalized).
//!
//! Stride is handled by splitting the filter and image into a grid of stride
//! phases. Phase `(p, q)` takes the samples `stride * (u, v) + (p, q)` of both
//! operands; the strided correlation is the sum of the plain correlations of
//! all phase pairs. The products of every channel and phase are accumulated
//! in one frequency-domain buffer per filter, so each response costs a single
//! inverse transform.

use std::sync::Arc;

use rustfft::num_complex::Complex;
use rustfft::{Fft, FftPlanner};

use crate::bank::Bank;
use crate::image::{Image, ImageView, MultiImage, Size};
use crate::kernel::Kernel;
use crate::slide::size::{padded_transform_size, phase_grid, valid_size_stride};
use crate::trace::trace_event;
use crate::util::math::ceil_div;
use crate::util::SlideResult;

type C64 = Complex<f64>;

/// Frequency-domain strategy.
pub struct Fourier;

/// Forward and inverse 2D FFT plans bound to one transform size.
///
/// Buffers are row-major with `size.height` rows of `size.width` samples.
/// Plans and scratch space are released when the value is dropped.
pub struct FftPlan2 {
    size: Size,
    row_fwd: Arc<dyn Fft<f64>>,
    col_fwd: Arc<dyn Fft<f64>>,
    row_inv: Arc<dyn Fft<f64>>,
    col_inv: Arc<dyn Fft<f64>>,
    scratch: Vec<C64>,
    column: Vec<C64>,
}

impl FftPlan2 {
    /// Plans transforms for buffers of `size`; both extents must be positive.
    pub fn new(size: Size) -> Self {
        debug_assert!(!size.is_empty());
        let mut planner = FftPlanner::<f64>::new();
        let row_fwd = planner.plan_fft_forward(size.width);
        let col_fwd = planner.plan_fft_forward(size.height);
        let row_inv = planner.plan_fft_inverse(size.width);
        let col_inv = planner.plan_fft_inverse(size.height);
        let scratch_len = [&row_fwd, &col_fwd, &row_inv, &col_inv]
            .iter()
            .map(|plan| plan.get_inplace_scratch_len())
            .max()
            .unwrap_or(0);
        Self {
            size,
            row_fwd,
            col_fwd,
            row_inv,
            col_inv,
            scratch: vec![C64::default(); scratch_len],
            column: vec![C64::default(); size.height],
        }
    }

    /// Transform size.
    pub fn size(&self) -> Size {
        self.size
    }

    /// Unnormalized forward transform in place.
    pub fn forward(&mut self, buf: &mut [C64]) {
        transform_2d(
            buf,
            self.size,
            self.row_fwd.as_ref(),
            self.col_fwd.as_ref(),
            &mut self.scratch,
            &mut self.column,
        );
    }

    /// Unnormalized inverse transform in place.
    pub fn inverse(&mut self, buf: &mut [C64]) {
        transform_2d(
            buf,
            self.size,
            self.row_inv.as_ref(),
            self.col_inv.as_ref(),
            &mut self.scratch,
            &mut self.column,
        );
    }
}

fn transform_2d(
    buf: &mut [C64],
    size: Size,
    rows: &dyn Fft<f64>,
    cols: &dyn Fft<f64>,
    scratch: &mut [C64],
    column: &mut [C64],
) {
    assert_eq!(buf.len(), size.area(), "buffer does not match plan size");
    // All rows at once: rustfft processes consecutive chunks of its length.
    rows.process_with_scratch(buf, scratch);
    for x in 0..size.width {
        for (y, c) in column.iter_mut().enumerate() {
            *c = buf[y * size.width + x];
        }
        cols.process_with_scratch(column, scratch);
        for (y, c) in column.iter().enumerate() {
            buf[y * size.width + x] = *c;
        }
    }
}

/// Zero-fills `dst` and copies phase `(p, q)` of channel `k` into its top-left corner.
fn copy_phase(
    dst: &mut [C64],
    work: Size,
    src: ImageView<'_>,
    k: usize,
    stride: usize,
    p: usize,
    q: usize,
) {
    dst.fill(C64::default());
    let w = ceil_div(src.width().saturating_sub(p), stride).min(work.width);
    let h = ceil_div(src.height().saturating_sub(q), stride).min(work.height);
    for v in 0..h {
        let row = &mut dst[v * work.width..v * work.width + w];
        for (u, c) in row.iter_mut().enumerate() {
            *c = C64::new(src.at(stride * u + p, stride * v + q, k), 0.0);
        }
    }
}

/// Correlates `image` with each filter; every filter must share one shape.
fn fourier_responses(
    image: ImageView<'_>,
    filters: &[ImageView<'_>],
    stride: usize,
) -> SlideResult<Vec<Image>> {
    let Some(first) = filters.first() else {
        return Ok(Vec::new());
    };
    let filter = first.size();
    let out = valid_size_stride(image.size(), filter, stride)?;
    if out.is_empty() {
        return Ok(filters.iter().map(|_| Image::new(out.width, out.height)).collect());
    }

    let grid = phase_grid(filter, stride);
    // Size of each sub-sampled filter and the image extent it needs.
    let gsub = Size::new(
        ceil_div(filter.width, grid.width),
        ceil_div(filter.height, grid.height),
    );
    let fsub = Size::new(out.width + gsub.width - 1, out.height + gsub.height - 1);
    let work = padded_transform_size(fsub);
    let n = work.area();
    trace_event!(
        "fourier_plan",
        work_width = work.width,
        work_height = work.height,
        phases = grid.area(),
        filters = filters.len()
    );

    let mut plan = FftPlan2::new(work);
    let mut fhat = vec![C64::default(); n];
    let mut ghat = vec![C64::default(); n];
    let mut hhat = vec![vec![C64::default(); n]; filters.len()];

    for k in 0..image.channels() {
        for q in 0..grid.height {
            for p in 0..grid.width {
                copy_phase(&mut fhat, work, image, k, stride, p, q);
                plan.forward(&mut fhat);
                for (g, acc) in filters.iter().zip(hhat.iter_mut()) {
                    copy_phase(&mut ghat, work, *g, k, stride, p, q);
                    plan.forward(&mut ghat);
                    for ((h, a), b) in acc.iter_mut().zip(&fhat).zip(&ghat) {
                        *h += a * b.conj();
                    }
                }
            }
        }
    }

    let alpha = 1.0 / n as f64;
    let mut responses = Vec::with_capacity(filters.len());
    for mut acc in hhat {
        plan.inverse(&mut acc);
        let mut h = Image::new(out.width, out.height);
        for (y, row) in h.data_mut().chunks_mut(out.width).enumerate() {
            for (x, value) in row.iter_mut().enumerate() {
                *value = acc[y * work.width + x].re * alpha;
            }
        }
        responses.push(h);
    }
    Ok(responses)
}

impl Kernel for Fourier {
    fn corr(image: ImageView<'_>, filter: ImageView<'_>, stride: usize) -> SlideResult<Image> {
        let mut responses = fourier_responses(image, &[filter], stride)?;
        Ok(responses.pop().unwrap_or_else(|| Image::new(0, 0)))
    }

    fn corr_bank(image: ImageView<'_>, bank: &Bank, stride: usize) -> SlideResult<MultiImage> {
        let responses = fourier_responses(image, &bank.views(), stride)?;
        MultiImage::from_channels(&responses)
    }
}
