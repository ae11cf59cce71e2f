//! Tracing hooks for correlation calls (no-ops without the `tracing` feature).
//!
//! Spans: `corr` and `corr_bank`, opened by [`Correlator`](crate::Correlator)
//! with image, filter and stride sizes.
//!
//! Events: `strategy` (the resolved strategy name), `direct` and
//! `direct_bank` (taps, channels, filters), `fourier_plan` (padded transform
//! size and phase grid) and `matmul` (patch matrix shape).

/// Opens an info-level span such as `corr` or `corr_bank`.
#[cfg(feature = "tracing")]
macro_rules! trace_span {
    ($name:expr $(, $($field:tt)*)?) => {
        tracing::info_span!($name $(, $($field)*)?)
    };
}

#[cfg(not(feature = "tracing"))]
macro_rules! trace_span {
    ($name:expr $(, $($field:tt)*)?) => {
        $crate::trace::NoopSpan
    };
}

/// Emits an info-level event such as `strategy` or `fourier_plan`.
#[cfg(feature = "tracing")]
macro_rules! trace_event {
    ($name:expr, $($key:ident = $value:expr),+ $(,)?) => {
        tracing::info!(name: $name, $($key = $value),+)
    };
    ($name:expr) => {
        tracing::info!(name: $name)
    };
}

#[cfg(not(feature = "tracing"))]
macro_rules! trace_event {
    ($name:expr, $($key:ident = $value:expr),+ $(,)?) => {
        let _ = ($($value,)+);
    };
    ($name:expr) => {};
}

pub(crate) use trace_event;
pub(crate) use trace_span;

/// Span stand-in used when tracing is compiled out.
#[cfg(not(feature = "tracing"))]
pub struct NoopSpan;

#[cfg(not(feature = "tracing"))]
impl NoopSpan {
    /// Returns self so `let _guard = trace_span!(..).entered();` compiles.
    #[inline]
    pub fn entered(self) -> Self {
        self
    }
}
