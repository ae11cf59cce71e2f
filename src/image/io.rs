//! Convenience helpers for loading images via the `image` crate.
//!
//! Available when the `image-io` feature is enabled. Samples are converted to
//! 8-bit luma and scaled to `[0, 1]`.

use crate::image::Image;
use crate::util::{SlideError, SlideResult};
use std::path::Path;

/// Converts a grayscale buffer into an `f64` image scaled to `[0, 1]`.
pub fn image_from_gray(img: &image::GrayImage) -> SlideResult<Image> {
    let width = img.width() as usize;
    let height = img.height() as usize;
    let data = img.as_raw().iter().map(|&v| v as f64 / 255.0).collect();
    Image::from_vec(data, width, height)
}

/// Converts any decoded image to grayscale and then to an `f64` image.
pub fn image_from_dynamic(img: &image::DynamicImage) -> SlideResult<Image> {
    image_from_gray(&img.to_luma8())
}

/// Loads an image from disk as a grayscale `f64` image.
pub fn load_gray_image<P: AsRef<Path>>(path: P) -> SlideResult<Image> {
    let img = image::open(path).map_err(|err| SlideError::ImageIo {
        reason: err.to_string(),
    })?;
    image_from_dynamic(&img)
}
