//! Dense real-valued images and borrowed views.
//!
//! Samples are `f64` and stored row-major with interleaved channels: the
//! sample `(x, y, k)` lives at `((y * width) + x) * channels + k`. A
//! single-channel [`Image`] and a one-channel [`MultiImage`] therefore share
//! the same layout, and both hand out the same [`ImageView`] type to the
//! correlation kernels. Zero width or height is a valid (empty) image.

use crate::util::{SlideError, SlideResult};

#[cfg(feature = "image-io")]
pub mod io;
mod multi;

pub use multi::MultiImage;

/// Width and height of an image, filter or response.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Size {
    /// Extent along x (columns).
    pub width: usize,
    /// Extent along y (rows).
    pub height: usize,
}

impl Size {
    /// Creates a size from its two extents.
    pub const fn new(width: usize, height: usize) -> Self {
        Self { width, height }
    }

    /// Number of pixels covered.
    pub fn area(&self) -> usize {
        self.width * self.height
    }

    /// Returns true if either extent is zero.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// Borrowed multi-channel view over an interleaved sample buffer.
#[derive(Copy, Clone, Debug)]
pub struct ImageView<'a> {
    data: &'a [f64],
    width: usize,
    height: usize,
    channels: usize,
}

impl<'a> ImageView<'a> {
    /// Creates a view over `data`; only the first `width * height * channels`
    /// samples are addressed.
    pub fn new(data: &'a [f64], width: usize, height: usize, channels: usize) -> SlideResult<Self> {
        let needed = required_len(width, height, channels)?;
        if data.len() < needed {
            return Err(SlideError::BufferTooSmall {
                needed,
                got: data.len(),
            });
        }
        Ok(Self {
            data: &data[..needed],
            width,
            height,
            channels,
        })
    }

    /// Returns the width in pixels.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Returns the height in pixels.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Returns the number of interleaved channels.
    pub fn channels(&self) -> usize {
        self.channels
    }

    /// Returns width and height.
    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// Returns the samples in storage order.
    pub fn as_slice(&self) -> &'a [f64] {
        self.data
    }

    /// Returns the sample at `(x, y, k)`.
    ///
    /// # Panics
    ///
    /// Panics if the coordinate is out of bounds.
    #[inline]
    pub fn at(&self, x: usize, y: usize, k: usize) -> f64 {
        debug_assert!(x < self.width && y < self.height && k < self.channels);
        self.data[(y * self.width + x) * self.channels + k]
    }

    /// Returns the sample at `(x, y, k)` if it is within bounds.
    pub fn get(&self, x: usize, y: usize, k: usize) -> Option<f64> {
        if x >= self.width || y >= self.height || k >= self.channels {
            return None;
        }
        self.data
            .get((y * self.width + x) * self.channels + k)
            .copied()
    }

    /// Returns the `width * channels` samples of row `y`.
    ///
    /// # Panics
    ///
    /// Panics if `y >= height`.
    #[inline]
    pub fn row(&self, y: usize) -> &'a [f64] {
        let len = self.width * self.channels;
        &self.data[y * len..(y + 1) * len]
    }

    /// Copies the view into an owned multi-channel image.
    pub fn to_multi(&self) -> MultiImage {
        MultiImage::from_parts(self.data.to_vec(), self.width, self.height, self.channels)
    }
}

/// Owned single-channel image.
#[derive(Clone, Debug, PartialEq)]
pub struct Image {
    data: Vec<f64>,
    width: usize,
    height: usize,
}

impl Image {
    /// Creates a zero-filled image.
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            data: vec![0.0; width * height],
            width,
            height,
        }
    }

    /// Wraps a row-major buffer of exactly `width * height` samples.
    pub fn from_vec(data: Vec<f64>, width: usize, height: usize) -> SlideResult<Self> {
        let expected = required_len(width, height, 1)?;
        check_exact_len(expected, data.len())?;
        Ok(Self {
            data,
            width,
            height,
        })
    }

    /// Builds an image from rows (`rows[y][x]`). All rows must have equal length.
    pub fn from_rows<R: AsRef<[f64]>>(rows: &[R]) -> SlideResult<Self> {
        let height = rows.len();
        let width = rows.first().map_or(0, |row| row.as_ref().len());
        let mut data = Vec::with_capacity(width * height);
        for row in rows {
            let row = row.as_ref();
            if row.len() != width {
                return Err(SlideError::InvalidDimensions {
                    width: row.len(),
                    height,
                });
            }
            data.extend_from_slice(row);
        }
        Ok(Self {
            data,
            width,
            height,
        })
    }

    pub(crate) fn from_parts(data: Vec<f64>, width: usize, height: usize) -> Self {
        debug_assert_eq!(data.len(), width * height);
        Self {
            data,
            width,
            height,
        }
    }

    /// Returns the width in pixels.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Returns the height in pixels.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Returns width and height.
    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// Returns true if the image has zero area.
    pub fn is_empty(&self) -> bool {
        self.size().is_empty()
    }

    /// Returns the pixel at `(x, y)`.
    ///
    /// # Panics
    ///
    /// Panics if the coordinate is out of bounds.
    #[inline]
    pub fn at(&self, x: usize, y: usize) -> f64 {
        debug_assert!(x < self.width && y < self.height);
        self.data[y * self.width + x]
    }

    /// Returns the pixel at `(x, y)` if it is within bounds.
    pub fn get(&self, x: usize, y: usize) -> Option<f64> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.data.get(y * self.width + x).copied()
    }

    /// Writes the pixel at `(x, y)`.
    ///
    /// # Panics
    ///
    /// Panics if the coordinate is out of bounds.
    #[inline]
    pub fn set(&mut self, x: usize, y: usize, value: f64) {
        debug_assert!(x < self.width && y < self.height);
        self.data[y * self.width + x] = value;
    }

    /// Returns the samples in row-major order.
    pub fn data(&self) -> &[f64] {
        &self.data
    }

    /// Returns the samples in row-major order, mutably.
    pub fn data_mut(&mut self) -> &mut [f64] {
        &mut self.data
    }

    /// Returns a borrowed one-channel view.
    pub fn view(&self) -> ImageView<'_> {
        ImageView {
            data: &self.data,
            width: self.width,
            height: self.height,
            channels: 1,
        }
    }

    pub(crate) fn into_vec(self) -> Vec<f64> {
        self.data
    }
}

pub(crate) fn required_len(width: usize, height: usize, channels: usize) -> SlideResult<usize> {
    if channels == 0 {
        return Err(SlideError::InvalidChannels { channels });
    }
    width
        .checked_mul(height)
        .and_then(|v| v.checked_mul(channels))
        .ok_or(SlideError::InvalidDimensions { width, height })
}

pub(crate) fn check_exact_len(expected: usize, got: usize) -> SlideResult<()> {
    if got < expected {
        return Err(SlideError::BufferTooSmall {
            needed: expected,
            got,
        });
    }
    if got > expected {
        return Err(SlideError::BufferLengthMismatch { expected, got });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{Image, ImageView, Size};
    use crate::util::SlideError;

    #[test]
    fn from_rows_is_row_major() {
        let img = Image::from_rows(&[[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]]).unwrap();
        assert_eq!(img.size(), Size::new(3, 2));
        assert_eq!(img.at(2, 0), 3.0);
        assert_eq!(img.at(0, 1), 4.0);
        assert_eq!(img.view().row(1), &[4.0, 5.0, 6.0]);
    }

    #[test]
    fn from_rows_rejects_ragged_rows() {
        let rows: Vec<Vec<f64>> = vec![vec![1.0, 2.0], vec![3.0]];
        assert_eq!(
            Image::from_rows(&rows).err(),
            Some(SlideError::InvalidDimensions {
                width: 1,
                height: 2
            })
        );
    }

    #[test]
    fn view_checks_buffer_length() {
        let data = [0.0; 5];
        let err = ImageView::new(&data, 2, 2, 2).err().unwrap();
        assert_eq!(err, SlideError::BufferTooSmall { needed: 8, got: 5 });
        let err = ImageView::new(&data, 2, 2, 0).err().unwrap();
        assert_eq!(err, SlideError::InvalidChannels { channels: 0 });
    }

    #[test]
    fn empty_images_are_valid() {
        let img = Image::new(0, 4);
        assert!(img.is_empty());
        assert!(img.view().as_slice().is_empty());
        assert_eq!(img.get(0, 0), None);
    }
}
