//! Direct summation kernel; the reference every other strategy must match.

use crate::bank::Bank;
use crate::image::{Image, ImageView, MultiImage};
use crate::kernel::Kernel;
use crate::slide::size::valid_size_stride;
use crate::trace::trace_event;
use crate::util::SlideResult;

#[cfg(feature = "simd")]
use crate::kernel::simd::dot_f64x4 as dot;

/// Direct summation strategy. Cost is `out.area * filter.area * channels`.
pub struct Direct;

/// Plain dot product of two equally long slices.
#[cfg(not(feature = "simd"))]
#[inline]
fn dot(a: &[f64], b: &[f64]) -> f64 {
    debug_assert_eq!(a.len(), b.len());
    a.iter().zip(b).map(|(x, y)| x * y).sum()
}

/// Fills output row `j` of a strided correlation.
///
/// With interleaved channels a filter row and the image samples under it are
/// both contiguous, so each filter row contributes one dot product.
pub(crate) fn direct_row(
    out_row: &mut [f64],
    image: ImageView<'_>,
    filter: ImageView<'_>,
    stride: usize,
    j: usize,
) {
    let channels = image.channels();
    let row_len = filter.width() * channels;
    for (i, out) in out_row.iter_mut().enumerate() {
        let start = i * stride * channels;
        let mut total = 0.0;
        for v in 0..filter.height() {
            let img_row = image.row(j * stride + v);
            total += dot(&img_row[start..start + row_len], filter.row(v));
        }
        *out = total;
    }
}

pub(crate) fn direct_corr(
    image: ImageView<'_>,
    filter: ImageView<'_>,
    stride: usize,
) -> SlideResult<Image> {
    debug_assert_eq!(image.channels(), filter.channels());
    let out = valid_size_stride(image.size(), filter.size(), stride)?;
    let mut h = Image::new(out.width, out.height);
    if out.is_empty() {
        return Ok(h);
    }
    for (j, row) in h.data_mut().chunks_mut(out.width).enumerate() {
        direct_row(row, image, filter, stride, j);
    }
    Ok(h)
}

impl Kernel for Direct {
    fn corr(image: ImageView<'_>, filter: ImageView<'_>, stride: usize) -> SlideResult<Image> {
        trace_event!(
            "direct",
            taps = filter.width() * filter.height(),
            channels = filter.channels()
        );
        direct_corr(image, filter, stride)
    }

    fn corr_bank(image: ImageView<'_>, bank: &Bank, stride: usize) -> SlideResult<MultiImage> {
        trace_event!("direct_bank", filters = bank.len());
        let planes = bank
            .iter()
            .map(|filter| direct_corr(image, filter, stride))
            .collect::<SlideResult<Vec<_>>>()?;
        MultiImage::from_channels(&planes)
    }
}
