//! Owned multi-channel images.

use crate::image::{check_exact_len, required_len, Image, ImageView, Size};
use crate::util::{SlideError, SlideResult};

/// Owned image with interleaved channels.
///
/// Filter-bank responses use this type as well: channel `b` holds the
/// response of bank filter `b`.
#[derive(Clone, Debug, PartialEq)]
pub struct MultiImage {
    data: Vec<f64>,
    width: usize,
    height: usize,
    channels: usize,
}

impl MultiImage {
    /// Creates a zero-filled image with `channels >= 1`.
    pub fn new(width: usize, height: usize, channels: usize) -> SlideResult<Self> {
        let len = required_len(width, height, channels)?;
        Ok(Self {
            data: vec![0.0; len],
            width,
            height,
            channels,
        })
    }

    /// Wraps an interleaved buffer of exactly `width * height * channels` samples.
    pub fn from_vec(
        data: Vec<f64>,
        width: usize,
        height: usize,
        channels: usize,
    ) -> SlideResult<Self> {
        let expected = required_len(width, height, channels)?;
        check_exact_len(expected, data.len())?;
        Ok(Self {
            data,
            width,
            height,
            channels,
        })
    }

    /// Interleaves equally sized planes into one image; plane `k` becomes channel `k`.
    pub fn from_channels(planes: &[Image]) -> SlideResult<Self> {
        let first = planes.first().ok_or(SlideError::InvalidChannels { channels: 0 })?;
        let (width, height) = (first.width(), first.height());
        let channels = planes.len();
        for plane in planes {
            if plane.width() != width || plane.height() != height {
                return Err(SlideError::InvalidDimensions {
                    width: plane.width(),
                    height: plane.height(),
                });
            }
        }
        let mut data = vec![0.0; width * height * channels];
        for (k, plane) in planes.iter().enumerate() {
            for (idx, &value) in plane.data().iter().enumerate() {
                data[idx * channels + k] = value;
            }
        }
        Ok(Self {
            data,
            width,
            height,
            channels,
        })
    }

    pub(crate) fn from_parts(data: Vec<f64>, width: usize, height: usize, channels: usize) -> Self {
        debug_assert_eq!(data.len(), width * height * channels);
        Self {
            data,
            width,
            height,
            channels,
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

    /// Returns the number of channels.
    pub fn channels(&self) -> usize {
        self.channels
    }

    /// Returns width and height.
    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// Returns true if the image has zero area.
    pub fn is_empty(&self) -> bool {
        self.size().is_empty()
    }

    /// Returns the sample at `(x, y, k)`.
    ///
    /// # Panics
    ///
    /// Panics if the coordinate is out of bounds.
    #[inline]
    pub fn at(&self, x: usize, y: usize, k: usize) -> f64 {
        self.view().at(x, y, k)
    }

    /// Writes the sample at `(x, y, k)`.
    ///
    /// # Panics
    ///
    /// Panics if the coordinate is out of bounds.
    #[inline]
    pub fn set(&mut self, x: usize, y: usize, k: usize, value: f64) {
        debug_assert!(x < self.width && y < self.height && k < self.channels);
        self.data[(y * self.width + x) * self.channels + k] = value;
    }

    /// Returns the `channels` samples of pixel `(x, y)`.
    pub fn pixel(&self, x: usize, y: usize) -> &[f64] {
        let start = (y * self.width + x) * self.channels;
        &self.data[start..start + self.channels]
    }

    /// Copies channel `k` into a single-channel image.
    pub fn channel(&self, k: usize) -> Option<Image> {
        if k >= self.channels {
            return None;
        }
        let data = self
            .data
            .iter()
            .skip(k)
            .step_by(self.channels)
            .copied()
            .collect();
        Some(Image::from_parts(data, self.width, self.height))
    }

    /// Splits the image into its channel planes.
    pub fn into_channels(self) -> Vec<Image> {
        (0..self.channels).filter_map(|k| self.channel(k)).collect()
    }

    /// Returns the samples in storage order.
    pub fn data(&self) -> &[f64] {
        &self.data
    }

    /// Returns a borrowed view.
    pub fn view(&self) -> ImageView<'_> {
        ImageView {
            data: &self.data,
            width: self.width,
            height: self.height,
            channels: self.channels,
        }
    }
}

impl From<Image> for MultiImage {
    fn from(img: Image) -> Self {
        let (width, height) = (img.width(), img.height());
        Self::from_parts(img.into_vec(), width, height, 1)
    }
}

#[cfg(test)]
mod tests {
    use super::MultiImage;
    use crate::image::Image;
    use crate::util::SlideError;

    #[test]
    fn channels_round_trip_through_interleaving() {
        let a = Image::from_rows(&[[1.0, 2.0], [3.0, 4.0]]).unwrap();
        let b = Image::from_rows(&[[5.0, 6.0], [7.0, 8.0]]).unwrap();
        let multi = MultiImage::from_channels(&[a.clone(), b.clone()]).unwrap();
        assert_eq!(multi.channels(), 2);
        assert_eq!(multi.pixel(1, 0), &[2.0, 6.0]);
        assert_eq!(multi.at(0, 1, 1), 7.0);
        assert_eq!(multi.channel(0), Some(a));
        assert_eq!(multi.channel(1), Some(b));
        assert_eq!(multi.channel(2), None);
    }

    #[test]
    fn from_channels_rejects_mixed_sizes() {
        let a = Image::new(2, 2);
        let b = Image::new(3, 2);
        assert_eq!(
            MultiImage::from_channels(&[a, b]).err(),
            Some(SlideError::InvalidDimensions {
                width: 3,
                height: 2
            })
        );
    }

    #[test]
    fn from_vec_requires_exact_length() {
        let err = MultiImage::from_vec(vec![0.0; 13], 2, 2, 3).err().unwrap();
        assert_eq!(
            err,
            SlideError::BufferLengthMismatch {
                expected: 12,
                got: 13
            }
        );
        assert_eq!(
            MultiImage::new(2, 2, 0).err(),
            Some(SlideError::InvalidChannels { channels: 0 })
        );
    }

    #[test]
    fn single_channel_conversion_keeps_layout() {
        let img = Image::from_rows(&[[1.0, 2.0, 3.0]]).unwrap();
        let multi = MultiImage::from(img.clone());
        assert_eq!(multi.channels(), 1);
        assert_eq!(multi.data(), img.data());
    }
}
