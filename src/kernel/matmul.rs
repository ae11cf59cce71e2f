//! Patch unrolling ("im2col") followed by a dense matrix product.
//!
//! The correlation is written as `Y = A X`:
//!
//! - `A` has one row per output position (row-major over the output) holding
//!   the receptive field of that position, flattened as `(v, u, k)`;
//! - `X` has one column per filter, flattened in the same order;
//! - `Y[r, b]` is the response of filter `b` at output position `r`.
//!
//! Because `Y` is row-major with one column per filter, its buffer is exactly
//! the interleaved layout of a `MultiImage` with one channel per filter.
//! Memory grows as `out.area * filter.area * channels`; this strategy is
//! never chosen automatically.

use ndarray::Array2;

use crate::bank::Bank;
use crate::image::{Image, ImageView, MultiImage, Size};
use crate::kernel::Kernel;
use crate::slide::size::valid_size_stride;
use crate::trace::trace_event;
use crate::util::{SlideError, SlideResult};

/// Dense matrix-multiplication strategy.
pub struct MatMul;

/// Builds the unrolled patch matrix `A` for an output of size `out`.
pub(crate) fn unroll_patches(
    image: ImageView<'_>,
    filter: Size,
    stride: usize,
    out: Size,
) -> SlideResult<Array2<f64>> {
    let channels = image.channels();
    let row_len = filter.width * channels;
    let cols = row_len * filter.height;
    let rows = out.area();
    let mut data = Vec::with_capacity(rows * cols);
    for j in 0..out.height {
        for i in 0..out.width {
            let start = i * stride * channels;
            for v in 0..filter.height {
                let img_row = image.row(j * stride + v);
                data.extend_from_slice(&img_row[start..start + row_len]);
            }
        }
    }
    Array2::from_shape_vec((rows, cols), data).map_err(|_| SlideError::InvalidDimensions {
        width: cols,
        height: rows,
    })
}

/// Stacks flattened filters as the columns of `X`.
fn filter_matrix(filters: &[ImageView<'_>]) -> SlideResult<Array2<f64>> {
    let len = filters.first().map_or(0, |g| g.as_slice().len());
    let count = filters.len();
    let mut data = vec![0.0; len * count];
    for (b, g) in filters.iter().enumerate() {
        for (s, &value) in g.as_slice().iter().enumerate() {
            data[s * count + b] = value;
        }
    }
    Array2::from_shape_vec((len, count), data).map_err(|_| SlideError::InvalidDimensions {
        width: count,
        height: len,
    })
}

fn matmul_responses(
    image: ImageView<'_>,
    filters: &[ImageView<'_>],
    stride: usize,
) -> SlideResult<MultiImage> {
    let Some(first) = filters.first() else {
        return MultiImage::new(0, 0, 1);
    };
    let out = valid_size_stride(image.size(), first.size(), stride)?;
    let count = filters.len();
    if out.is_empty() {
        return MultiImage::new(out.width, out.height, count);
    }
    let a = unroll_patches(image, first.size(), stride, out)?;
    let x = filter_matrix(filters)?;
    trace_event!(
        "matmul",
        rows = a.nrows(),
        cols = a.ncols(),
        filters = count
    );
    let y = a.dot(&x);
    MultiImage::from_vec(y.iter().copied().collect(), out.width, out.height, count)
}

impl Kernel for MatMul {
    fn corr(image: ImageView<'_>, filter: ImageView<'_>, stride: usize) -> SlideResult<Image> {
        let y = matmul_responses(image, &[filter], stride)?;
        Image::from_vec(y.data().to_vec(), y.width(), y.height())
    }

    fn corr_bank(image: ImageView<'_>, bank: &Bank, stride: usize) -> SlideResult<MultiImage> {
        matmul_responses(image, &bank.views(), stride)
    }
}
