//! Error types for slidecorr.

use thiserror::Error;

/// Result alias for slidecorr operations.
pub type SlideResult<T> = std::result::Result<T, SlideError>;

/// Errors raised when a call violates the correlation or suppression contract.
///
/// Every variant describes a caller bug rather than a transient condition;
/// retrying the same call yields the same error.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum SlideError {
    /// A filter or buffer shape is not usable.
    #[error("invalid dimensions {width}x{height}")]
    InvalidDimensions { width: usize, height: usize },
    /// Images need at least one channel.
    #[error("invalid channel count {channels}")]
    InvalidChannels { channels: usize },
    /// The backing buffer is shorter than the declared shape.
    #[error("buffer too small: needed {needed}, got {got}")]
    BufferTooSmall { needed: usize, got: usize },
    /// The backing buffer is longer than the declared shape.
    #[error("buffer length mismatch: expected {expected}, got {got}")]
    BufferLengthMismatch { expected: usize, got: usize },
    /// Stride must be at least one.
    #[error("invalid stride {stride}")]
    InvalidStride { stride: usize },
    /// Image and filter disagree on the number of channels.
    #[error("channel mismatch: image has {image}, filter has {filter}")]
    ChannelMismatch { image: usize, filter: usize },
    /// A bank must hold at least one filter.
    #[error("filter bank is empty")]
    EmptyBank,
    /// A bank entry differs in shape from the first filter.
    #[error(
        "bank filter {index} is {width}x{height}x{channels}, \
         expected {expected_width}x{expected_height}x{expected_channels}"
    )]
    BankShapeMismatch {
        index: usize,
        width: usize,
        height: usize,
        channels: usize,
        expected_width: usize,
        expected_height: usize,
        expected_channels: usize,
    },
    /// An algorithm name did not parse.
    #[error("unknown algorithm: {0}")]
    UnknownAlgorithm(String),
    /// Image decoding failed.
    #[error("image I/O error: {reason}")]
    ImageIo { reason: String },
}
