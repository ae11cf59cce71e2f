//! Filter banks: ordered sets of equally shaped filters.
//!
//! A bank is correlated against one image in a single call. Strategies use
//! the shared shape to amortize work across filters: the frequency-domain
//! strategy transforms each image phase once, and the matrix strategy
//! unrolls the image patches once for all filters.

use crate::image::{Image, ImageView, MultiImage, Size};
use crate::util::{SlideError, SlideResult};

/// Ordered, non-empty collection of filters sharing width, height and channels.
#[derive(Clone, Debug)]
pub struct Bank {
    filters: Vec<MultiImage>,
}

impl Bank {
    /// Builds a bank, validating that every filter matches the first one.
    pub fn new(filters: Vec<MultiImage>) -> SlideResult<Self> {
        let first = filters.first().ok_or(SlideError::EmptyBank)?;
        let (width, height, channels) = (first.width(), first.height(), first.channels());
        if width == 0 || height == 0 {
            return Err(SlideError::InvalidDimensions { width, height });
        }
        for (index, filter) in filters.iter().enumerate().skip(1) {
            if filter.width() != width || filter.height() != height || filter.channels() != channels
            {
                return Err(SlideError::BankShapeMismatch {
                    index,
                    width: filter.width(),
                    height: filter.height(),
                    channels: filter.channels(),
                    expected_width: width,
                    expected_height: height,
                    expected_channels: channels,
                });
            }
        }
        Ok(Self { filters })
    }

    /// Builds a bank of single-channel filters.
    pub fn from_images(filters: Vec<Image>) -> SlideResult<Self> {
        Self::new(filters.into_iter().map(MultiImage::from).collect())
    }

    /// Number of filters.
    pub fn len(&self) -> usize {
        self.filters.len()
    }

    /// Returns true if the bank holds no filters. [`Bank::new`] rejects
    /// empty banks, so a constructed bank is never empty.
    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }

    /// Shared filter size.
    pub fn size(&self) -> Size {
        self.filters[0].size()
    }

    /// Shared channel count.
    pub fn channels(&self) -> usize {
        self.filters[0].channels()
    }

    /// Returns a view of filter `index`.
    pub fn filter(&self, index: usize) -> Option<ImageView<'_>> {
        self.filters.get(index).map(MultiImage::view)
    }

    /// Iterates over filter views in bank order.
    pub fn iter(&self) -> impl Iterator<Item = ImageView<'_>> + '_ {
        self.filters.iter().map(MultiImage::view)
    }

    pub(crate) fn views(&self) -> Vec<ImageView<'_>> {
        self.iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::Bank;
    use crate::image::{Image, MultiImage, Size};
    use crate::util::SlideError;

    #[test]
    fn bank_rejects_empty_and_mismatched_filters() {
        assert_eq!(Bank::new(Vec::new()).err(), Some(SlideError::EmptyBank));

        let err = Bank::from_images(vec![Image::new(3, 2), Image::new(3, 3)])
            .err()
            .unwrap();
        assert_eq!(
            err,
            SlideError::BankShapeMismatch {
                index: 1,
                width: 3,
                height: 3,
                channels: 1,
                expected_width: 3,
                expected_height: 2,
                expected_channels: 1,
            }
        );

        let err = Bank::new(vec![
            MultiImage::new(2, 2, 3).unwrap(),
            MultiImage::new(2, 2, 2).unwrap(),
        ])
        .err()
        .unwrap();
        assert!(matches!(err, SlideError::BankShapeMismatch { index: 1, .. }));
    }

    #[test]
    fn bank_rejects_zero_area_filters() {
        let err = Bank::from_images(vec![Image::new(0, 2)]).err().unwrap();
        assert_eq!(
            err,
            SlideError::InvalidDimensions {
                width: 0,
                height: 2
            }
        );
    }

    #[test]
    fn bank_exposes_shared_shape() {
        let bank = Bank::new(vec![
            MultiImage::new(4, 3, 2).unwrap(),
            MultiImage::new(4, 3, 2).unwrap(),
        ])
        .unwrap();
        assert_eq!(bank.len(), 2);
        assert!(!bank.is_empty());
        assert_eq!(bank.size(), Size::new(4, 3));
        assert_eq!(bank.channels(), 2);
        assert_eq!(bank.iter().count(), 2);
        assert!(bank.filter(2).is_none());
    }
}
