//! Output and transform sizing.

use crate::image::Size;
use crate::util::math::{ceil_div, fast_fft_len};
use crate::util::{SlideError, SlideResult};

/// Number of placements such that `filter` lies entirely inside `image`.
///
/// Each axis is `max(image - filter + 1, 0)`; a filter larger than the image
/// gives an empty size rather than an error.
pub fn valid_size(image: Size, filter: Size) -> Size {
    Size::new(
        (image.width + 1).saturating_sub(filter.width),
        (image.height + 1).saturating_sub(filter.height),
    )
}

/// Number of strided placements: `ceil(valid / stride)` per axis.
pub fn valid_size_stride(image: Size, filter: Size, stride: usize) -> SlideResult<Size> {
    if stride == 0 {
        return Err(SlideError::InvalidStride { stride });
    }
    let valid = valid_size(image, filter);
    Ok(Size::new(
        ceil_div(valid.width, stride),
        ceil_div(valid.height, stride),
    ))
}

/// Rounds each axis up to a length the FFT handles efficiently.
///
/// The result is never smaller than the input, so a transform of this size
/// holds the linear correlation support without wrap-around.
pub fn padded_transform_size(size: Size) -> Size {
    Size::new(fast_fft_len(size.width), fast_fft_len(size.height))
}

/// Stride phase grid used by the frequency-domain strategy.
///
/// The grid is `stride x stride`, capped by the filter extent: phases beyond
/// the filter never touch a filter tap.
pub(crate) fn phase_grid(filter: Size, stride: usize) -> Size {
    Size::new(stride.min(filter.width), stride.min(filter.height))
}
