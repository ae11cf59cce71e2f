//! Cosine similarity between a filter and every image patch.
//!
//! `cos[i, j] = <patch, filter> / (|patch| * |filter|)`. Patch energies come
//! from correlating the squared image with an all-ones filter, using the same
//! configuration (and so the same strategy) as the numerator.

use crate::image::{Image, ImageView, MultiImage};
use crate::slide::Correlator;
use crate::util::SlideResult;

/// Energies at or below this value are treated as zero.
const MIN_ENERGY: f64 = 1e-12;

pub(crate) fn cos_corr(
    correlator: &Correlator,
    image: ImageView<'_>,
    filter: ImageView<'_>,
) -> SlideResult<Image> {
    let mut dots = correlator.corr_view(image, filter)?;
    if dots.is_empty() {
        return Ok(dots);
    }

    let filter_energy: f64 = filter.as_slice().iter().map(|v| v * v).sum();
    if filter_energy <= MIN_ENERGY {
        dots.data_mut().fill(0.0);
        return Ok(dots);
    }
    let filter_norm = filter_energy.sqrt();

    let squared = MultiImage::from_vec(
        image.as_slice().iter().map(|v| v * v).collect(),
        image.width(),
        image.height(),
        image.channels(),
    )?;
    let ones = MultiImage::from_vec(
        vec![1.0; filter.as_slice().len()],
        filter.width(),
        filter.height(),
        filter.channels(),
    )?;
    let energy = correlator.corr_view(squared.view(), ones.view())?;

    for (value, &e) in dots.data_mut().iter_mut().zip(energy.data()) {
        *value = if e <= MIN_ENERGY {
            0.0
        } else {
            *value / (e.sqrt() * filter_norm)
        };
    }
    Ok(dots)
}

#[cfg(test)]
mod tests {
    use crate::image::Image;
    use crate::slide::{Algo, Correlator};

    #[test]
    fn identical_patch_scores_one() {
        let f = Image::from_rows(&[[0.0, 1.0, 2.0, 0.0], [0.0, 3.0, 4.0, 0.0]]).unwrap();
        let g = Image::from_rows(&[[2.0, 4.0], [6.0, 8.0]]).unwrap();
        for algo in [Algo::Direct, Algo::Fourier, Algo::MatMul] {
            let h = Correlator::new().with_algo(algo).cos_corr(&f, &g).unwrap();
            assert!((h.at(1, 0) - 1.0).abs() < 1e-9);
            assert!(h.data().iter().all(|v| *v <= 1.0 + 1e-9));
        }
    }

    #[test]
    fn zero_patches_score_zero() {
        let f = Image::new(5, 5);
        let g = Image::from_rows(&[[1.0, 2.0]]).unwrap();
        let h = Correlator::new().cos_corr(&f, &g).unwrap();
        assert!(h.data().iter().all(|v| *v == 0.0));
    }
}
