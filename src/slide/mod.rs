//! Public correlation entry points.
//!
//! [`Correlator`] validates a call, picks a strategy (or runs the one the
//! caller named) and dispatches to the matching [`Kernel`]. All contract
//! checks happen here, before any work: zero stride, zero-area filters and
//! channel mismatches are errors, while a filter larger than the image is a
//! valid call with an empty response.

use std::fmt;
use std::str::FromStr;

use crate::bank::Bank;
use crate::image::{Image, ImageView, MultiImage, Size};
use crate::kernel::fourier::Fourier;
use crate::kernel::matmul::MatMul;
use crate::kernel::scalar::Direct;
use crate::kernel::{Kernel, Strategy};
use crate::trace::{trace_event, trace_span};
use crate::util::{SlideError, SlideResult};

mod cos;
pub mod select;
pub mod size;

pub use select::{use_fourier, CallShape};
pub use size::{padded_transform_size, valid_size, valid_size_stride};

/// Algorithm requested by the caller.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Algo {
    /// Let the cost model decide between direct and frequency-domain.
    #[default]
    Auto,
    /// Direct summation.
    Direct,
    /// Frequency-domain correlation.
    Fourier,
    /// Patch unrolling and matrix multiplication.
    MatMul,
}

impl Algo {
    /// Resolves the request to a concrete strategy for `shape`.
    pub fn resolve(self, shape: &CallShape) -> Strategy {
        match self {
            Algo::Auto => shape.select(),
            Algo::Direct => Strategy::Direct,
            Algo::Fourier => Strategy::Fourier,
            Algo::MatMul => Strategy::MatMul,
        }
    }
}

impl FromStr for Algo {
    type Err = SlideError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "auto" => Ok(Algo::Auto),
            "direct" | "naive" => Ok(Algo::Direct),
            "fourier" | "fft" => Ok(Algo::Fourier),
            "matmul" | "blas" => Ok(Algo::MatMul),
            _ => Err(SlideError::UnknownAlgorithm(s.to_string())),
        }
    }
}

impl fmt::Display for Algo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Algo::Auto => "auto",
            Algo::Direct => "direct",
            Algo::Fourier => "fourier",
            Algo::MatMul => "matmul",
        };
        f.write_str(name)
    }
}

/// Configuration for correlation calls.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CorrConfig {
    /// Step between evaluated placements along both axes.
    pub stride: usize,
    /// Algorithm to run.
    pub algo: Algo,
    /// Run the direct strategy on the rayon pool (requires the `rayon` feature).
    pub parallel: bool,
}

impl Default for CorrConfig {
    fn default() -> Self {
        Self {
            stride: 1,
            algo: Algo::Auto,
            parallel: false,
        }
    }
}

/// Correlation facade holding a [`CorrConfig`].
#[derive(Clone, Copy, Debug, Default)]
pub struct Correlator {
    cfg: CorrConfig,
}

impl Correlator {
    /// Creates a correlator with the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Overrides the configuration.
    pub fn with_config(mut self, cfg: CorrConfig) -> Self {
        self.cfg = cfg;
        self
    }

    /// Sets the stride.
    pub fn with_stride(mut self, stride: usize) -> Self {
        self.cfg.stride = stride;
        self
    }

    /// Sets the algorithm.
    pub fn with_algo(mut self, algo: Algo) -> Self {
        self.cfg.algo = algo;
        self
    }

    /// Returns the configuration.
    pub fn config(&self) -> &CorrConfig {
        &self.cfg
    }

    /// Correlates a single-channel image with a single-channel filter.
    pub fn corr(&self, image: &Image, filter: &Image) -> SlideResult<Image> {
        self.corr_view(image.view(), filter.view())
    }

    /// Correlates a multi-channel image with a filter of equal channel count,
    /// summing the per-channel responses.
    pub fn corr_multi(&self, image: &MultiImage, filter: &MultiImage) -> SlideResult<Image> {
        self.corr_view(image.view(), filter.view())
    }

    /// Correlates a single-channel image with every filter of a single-channel bank.
    pub fn corr_bank(&self, image: &Image, bank: &Bank) -> SlideResult<MultiImage> {
        self.corr_bank_view(image.view(), bank)
    }

    /// Correlates a multi-channel image with every filter of a bank.
    pub fn corr_multi_bank(&self, image: &MultiImage, bank: &Bank) -> SlideResult<MultiImage> {
        self.corr_bank_view(image.view(), bank)
    }

    /// Cosine similarity between the filter and every (strided) patch.
    pub fn cos_corr(&self, image: &Image, filter: &Image) -> SlideResult<Image> {
        cos::cos_corr(self, image.view(), filter.view())
    }

    /// Multi-channel cosine similarity.
    pub fn cos_corr_multi(&self, image: &MultiImage, filter: &MultiImage) -> SlideResult<Image> {
        cos::cos_corr(self, image.view(), filter.view())
    }

    /// Strategy that a call with these views would run.
    pub fn strategy_for(
        &self,
        image: ImageView<'_>,
        filter: ImageView<'_>,
    ) -> SlideResult<Strategy> {
        check_call(image, filter.size(), filter.channels(), self.cfg.stride)?;
        Ok(self.cfg.algo.resolve(&self.shape(image, filter.size(), 1)))
    }

    /// Correlation over borrowed views; the general form of the entry points above.
    pub fn corr_view(&self, image: ImageView<'_>, filter: ImageView<'_>) -> SlideResult<Image> {
        let stride = self.cfg.stride;
        let _span = trace_span!(
            "corr",
            width = image.width(),
            height = image.height(),
            filter_width = filter.width(),
            filter_height = filter.height(),
            channels = image.channels(),
            stride = stride
        )
        .entered();
        check_call(image, filter.size(), filter.channels(), stride)?;

        let out = valid_size_stride(image.size(), filter.size(), stride)?;
        if out.is_empty() {
            return Ok(Image::new(out.width, out.height));
        }

        let strategy = self.cfg.algo.resolve(&self.shape(image, filter.size(), 1));
        trace_event!("strategy", name = strategy.name());
        match strategy {
            Strategy::Direct => self.direct(image, filter, stride),
            Strategy::Fourier => Fourier::corr(image, filter, stride),
            Strategy::MatMul => MatMul::corr(image, filter, stride),
        }
    }

    /// Bank correlation over a borrowed image view.
    pub fn corr_bank_view(&self, image: ImageView<'_>, bank: &Bank) -> SlideResult<MultiImage> {
        let stride = self.cfg.stride;
        let _span = trace_span!(
            "corr_bank",
            width = image.width(),
            height = image.height(),
            filters = bank.len(),
            channels = image.channels(),
            stride = stride
        )
        .entered();
        check_call(image, bank.size(), bank.channels(), stride)?;

        let out = valid_size_stride(image.size(), bank.size(), stride)?;
        if out.is_empty() {
            return MultiImage::new(out.width, out.height, bank.len());
        }

        let strategy = self
            .cfg
            .algo
            .resolve(&self.shape(image, bank.size(), bank.len()));
        trace_event!("strategy", name = strategy.name());
        match strategy {
            Strategy::Direct => self.direct_bank(image, bank, stride),
            Strategy::Fourier => Fourier::corr_bank(image, bank, stride),
            Strategy::MatMul => MatMul::corr_bank(image, bank, stride),
        }
    }

    fn shape(&self, image: ImageView<'_>, filter: Size, filters: usize) -> CallShape {
        CallShape {
            image: image.size(),
            filter,
            channels: image.channels(),
            stride: self.cfg.stride,
            filters,
        }
    }

    fn direct(
        &self,
        image: ImageView<'_>,
        filter: ImageView<'_>,
        stride: usize,
    ) -> SlideResult<Image> {
        #[cfg(feature = "rayon")]
        if self.cfg.parallel {
            return crate::kernel::rayon::direct_corr_par(image, filter, stride);
        }
        Direct::corr(image, filter, stride)
    }

    fn direct_bank(
        &self,
        image: ImageView<'_>,
        bank: &Bank,
        stride: usize,
    ) -> SlideResult<MultiImage> {
        #[cfg(feature = "rayon")]
        if self.cfg.parallel {
            return crate::kernel::rayon::direct_corr_bank_par(image, bank, stride);
        }
        Direct::corr_bank(image, bank, stride)
    }
}

/// Validates stride, filter extent and channel agreement.
fn check_call(
    image: ImageView<'_>,
    filter: Size,
    channels: usize,
    stride: usize,
) -> SlideResult<()> {
    if stride == 0 {
        return Err(SlideError::InvalidStride { stride });
    }
    if filter.is_empty() {
        return Err(SlideError::InvalidDimensions {
            width: filter.width,
            height: filter.height,
        });
    }
    if image.channels() != channels {
        return Err(SlideError::ChannelMismatch {
            image: image.channels(),
            filter: channels,
        });
    }
    Ok(())
}

/// Single-channel correlation with the default configuration.
pub fn corr(image: &Image, filter: &Image) -> SlideResult<Image> {
    Correlator::new().corr(image, filter)
}

/// Multi-channel correlation with the default configuration.
pub fn corr_multi(image: &MultiImage, filter: &MultiImage) -> SlideResult<Image> {
    Correlator::new().corr_multi(image, filter)
}

/// Single-channel bank correlation with the default configuration.
pub fn corr_bank(image: &Image, bank: &Bank) -> SlideResult<MultiImage> {
    Correlator::new().corr_bank(image, bank)
}

/// Multi-channel bank correlation with the default configuration.
pub fn corr_multi_bank(image: &MultiImage, bank: &Bank) -> SlideResult<MultiImage> {
    Correlator::new().corr_multi_bank(image, bank)
}

#[cfg(test)]
mod tests {
    use super::{Algo, CorrConfig, Correlator};
    use crate::bank::Bank;
    use crate::image::{Image, MultiImage, Size};
    use crate::kernel::Strategy;
    use crate::util::SlideError;

    #[test]
    fn algo_parses_names_and_aliases() {
        assert_eq!("auto".parse::<Algo>(), Ok(Algo::Auto));
        assert_eq!("FFT".parse::<Algo>(), Ok(Algo::Fourier));
        assert_eq!("naive".parse::<Algo>(), Ok(Algo::Direct));
        assert_eq!("blas".parse::<Algo>(), Ok(Algo::MatMul));
        assert_eq!(
            "winograd".parse::<Algo>(),
            Err(SlideError::UnknownAlgorithm("winograd".to_string()))
        );
        assert_eq!(Algo::MatMul.to_string().parse::<Algo>(), Ok(Algo::MatMul));
    }

    #[test]
    fn contract_violations_are_reported_before_work() {
        let image = Image::new(8, 8);
        let filter = Image::new(3, 3);
        let err = Correlator::new()
            .with_stride(0)
            .corr(&image, &filter)
            .err()
            .unwrap();
        assert_eq!(err, SlideError::InvalidStride { stride: 0 });

        let err = Correlator::new()
            .corr(&image, &Image::new(0, 3))
            .err()
            .unwrap();
        assert_eq!(
            err,
            SlideError::InvalidDimensions {
                width: 0,
                height: 3
            }
        );

        let multi = MultiImage::new(8, 8, 3).unwrap();
        let multi_filter = MultiImage::new(2, 2, 2).unwrap();
        let err = Correlator::new()
            .corr_multi(&multi, &multi_filter)
            .err()
            .unwrap();
        assert_eq!(err, SlideError::ChannelMismatch { image: 3, filter: 2 });

        let bank = Bank::new(vec![multi_filter]).unwrap();
        let err = Correlator::new().corr_bank(&image, &bank).err().unwrap();
        assert_eq!(err, SlideError::ChannelMismatch { image: 1, filter: 2 });
    }

    #[test]
    fn oversized_filter_yields_empty_response_for_every_algo() {
        let image = Image::new(4, 10);
        let filter = Image::new(5, 2);
        for algo in [Algo::Auto, Algo::Direct, Algo::Fourier, Algo::MatMul] {
            let h = Correlator::new().with_algo(algo).corr(&image, &filter).unwrap();
            assert!(h.is_empty());
            assert_eq!(h.size(), Size::new(0, 9));
        }
        let bank = Bank::from_images(vec![filter.clone(), filter]).unwrap();
        let h = Correlator::new().corr_bank(&image, &bank).unwrap();
        assert!(h.is_empty());
        assert_eq!(h.channels(), 2);
    }

    #[test]
    fn explicit_algo_bypasses_cost_model() {
        let image = Image::new(128, 128);
        let filter = Image::new(3, 3);
        let auto = Correlator::new();
        assert_eq!(
            auto.strategy_for(image.view(), filter.view()).unwrap(),
            Strategy::Direct
        );
        let forced = Correlator::new().with_config(CorrConfig {
            algo: Algo::Fourier,
            ..CorrConfig::default()
        });
        assert_eq!(
            forced.strategy_for(image.view(), filter.view()).unwrap(),
            Strategy::Fourier
        );
        let big = Image::new(40, 40);
        assert_eq!(
            auto.strategy_for(image.view(), big.view()).unwrap(),
            Strategy::Fourier
        );
        assert_eq!(
            auto.with_algo(Algo::MatMul)
                .strategy_for(image.view(), big.view())
                .unwrap(),
            Strategy::MatMul
        );
    }
}
