//! Rayon-parallel direct kernels (feature-gated).
//!
//! Output rows are distributed across the pool; every pixel is still summed
//! in the same order as the sequential kernel, so results are identical.

use crate::bank::Bank;
use crate::image::{Image, ImageView, MultiImage};
use crate::kernel::scalar::direct_row;
use crate::slide::size::valid_size_stride;
use crate::util::SlideResult;
use rayon::prelude::*;

/// Row-parallel strided direct correlation.
pub fn direct_corr_par(
    image: ImageView<'_>,
    filter: ImageView<'_>,
    stride: usize,
) -> SlideResult<Image> {
    let out = valid_size_stride(image.size(), filter.size(), stride)?;
    let mut h = Image::new(out.width, out.height);
    if out.is_empty() {
        return Ok(h);
    }
    h.data_mut()
        .par_chunks_mut(out.width)
        .enumerate()
        .for_each(|(j, row)| direct_row(row, image, filter, stride, j));
    Ok(h)
}

/// Filter-parallel direct correlation against a bank.
pub fn direct_corr_bank_par(
    image: ImageView<'_>,
    bank: &Bank,
    stride: usize,
) -> SlideResult<MultiImage> {
    let planes = bank
        .views()
        .into_par_iter()
        .map(|filter| direct_corr_par(image, filter, stride))
        .collect::<SlideResult<Vec<_>>>()?;
    MultiImage::from_channels(&planes)
}
