//! Progress reporting for annealing runs.

use crate::util::time_string;
use std::time::Duration;

/// A progress snapshot handed to the update handler.
///
/// Emitted once at step 0 (before any move) and then whenever the run
/// crosses an update-window boundary. `acceptance` and `improvement` are
/// the rates over the window since the previous update, as fractions in
/// `[0, 1]`; both are `None` for the initial update, which has no window
/// behind it.
#[derive(Debug, Clone)]
pub struct Progress {
    /// Move attempts completed so far.
    pub step: usize,
    /// Current temperature.
    pub temperature: f64,
    /// Current running energy.
    pub energy: f64,
    /// Fraction of moves accepted since the last update.
    pub acceptance: Option<f64>,
    /// Fraction of moves that strictly decreased energy since the last
    /// update.
    pub improvement: Option<f64>,
    /// Wall-clock time since the run started.
    pub elapsed: Duration,
    /// Estimated time to completion, linearly extrapolated from
    /// `elapsed / step`. `None` when the total step count is unknown
    /// (estimator probes) or at step 0.
    pub remaining: Option<Duration>,
}

/// Default update handler: emits one formatted line per update via
/// `tracing::info!`.
///
/// The line carries temperature, energy, acceptance and improvement
/// percentages, elapsed time, and estimated remaining time. The initial
/// step-0 update is skipped. Custom handlers installed with
/// [`Annealer::with_update_handler`](crate::Annealer::with_update_handler)
/// may delegate back here.
pub fn default_update(progress: &Progress) {
    if progress.step == 0 {
        return;
    }
    let remaining = match progress.remaining {
        Some(r) => time_string(r.as_secs_f64()),
        None => "   -:--:--".to_string(),
    };
    tracing::info!(
        "{:12.5}  {:12.2}  {:7.2}%  {:7.2}%  {}  {}",
        progress.temperature,
        progress.energy,
        100.0 * progress.acceptance.unwrap_or(0.0),
        100.0 * progress.improvement.unwrap_or(0.0),
        time_string(progress.elapsed.as_secs_f64()),
        remaining
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_update_tolerates_initial_snapshot() {
        // Step 0 carries no rates; the handler must not panic on it.
        default_update(&Progress {
            step: 0,
            temperature: 25_000.0,
            energy: 42.0,
            acceptance: None,
            improvement: None,
            elapsed: Duration::ZERO,
            remaining: None,
        });
    }

    #[test]
    fn test_default_update_tolerates_missing_remaining() {
        default_update(&Progress {
            step: 2000,
            temperature: 12.5,
            energy: -3.0,
            acceptance: Some(0.97),
            improvement: Some(0.12),
            elapsed: Duration::from_secs(5),
            remaining: None,
        });
    }
}
