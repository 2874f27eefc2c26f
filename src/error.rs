//! Error taxonomy for the annealing driver and estimator.

use thiserror::Error;

/// Errors surfaced by [`Annealer`](crate::Annealer) entry points.
///
/// Configuration errors are detected before any move is attempted; a run
/// that starts either completes or fails on trace-file I/O. There are no
/// retries and no partial results.
#[derive(Debug, Error)]
pub enum AnnealError {
    /// Exponential cooling is undefined for a non-positive minimum
    /// temperature.
    #[error("exponential cooling requires tmin > 0, got {0}")]
    NonPositiveTmin(f64),

    /// The schedule must cool, so `tmax` has to exceed `tmin`.
    #[error("tmax must be greater than tmin, got tmax {tmax} <= tmin {tmin}")]
    InvertedRange { tmax: f64, tmin: f64 },

    /// A run of zero steps has no defined schedule.
    #[error("steps must be at least 1")]
    ZeroSteps,

    /// The estimator needs at least one move per probe.
    #[error("probe steps must be at least 1")]
    ZeroProbeSteps,

    /// Opening or writing the per-step trace file failed.
    #[error("trace file: {0}")]
    Trace(#[from] std::io::Error),
}
