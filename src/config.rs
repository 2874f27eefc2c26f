//! Annealing run parameters.

use crate::error::AnnealError;
use std::path::PathBuf;

/// Parameters for a single annealing run.
///
/// Passed to [`Annealer::anneal`](crate::Annealer::anneal) per invocation;
/// the driver never stores or mutates them.
///
/// # Examples
///
/// ```
/// use anneal::AnnealParams;
///
/// let params = AnnealParams::default()
///     .with_steps(100_000)
///     .with_tmax(10.0)
///     .with_tmin(0.01)
///     .with_updates(50);
/// assert!(params.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AnnealParams {
    /// Total number of moves to attempt.
    pub steps: usize,

    /// Starting temperature. Higher values accept more worsening moves.
    pub tmax: f64,

    /// Final temperature. Must be positive; the exponential schedule
    /// reaches it exactly at the last step.
    pub tmin: f64,

    /// Number of progress updates to emit over the run.
    ///
    /// `0` disables updates entirely; `1` emits only the initial update.
    pub updates: usize,

    /// Optional path for a per-step CSV trace of the run.
    pub trace_path: Option<PathBuf>,
}

impl Default for AnnealParams {
    fn default() -> Self {
        Self {
            steps: 50_000,
            tmax: 25_000.0,
            tmin: 2.5,
            updates: 100,
            trace_path: None,
        }
    }
}

impl AnnealParams {
    pub fn with_steps(mut self, steps: usize) -> Self {
        self.steps = steps;
        self
    }

    pub fn with_tmax(mut self, tmax: f64) -> Self {
        self.tmax = tmax;
        self
    }

    pub fn with_tmin(mut self, tmin: f64) -> Self {
        self.tmin = tmin;
        self
    }

    pub fn with_updates(mut self, updates: usize) -> Self {
        self.updates = updates;
        self
    }

    pub fn with_trace_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.trace_path = Some(path.into());
        self
    }

    /// Validates the parameters.
    pub fn validate(&self) -> Result<(), AnnealError> {
        if self.tmin <= 0.0 {
            return Err(AnnealError::NonPositiveTmin(self.tmin));
        }
        if self.tmax <= self.tmin {
            return Err(AnnealError::InvertedRange {
                tmax: self.tmax,
                tmin: self.tmin,
            });
        }
        if self.steps == 0 {
            return Err(AnnealError::ZeroSteps);
        }
        Ok(())
    }
}
