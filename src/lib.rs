//! Generic simulated annealing.
//!
//! A single-solution stochastic local-search metaheuristic: the driver
//! proposes randomized in-place perturbations of a caller-defined state
//! and accepts or rejects them by the Metropolis criterion under an
//! exponential cooling schedule, tracking the best state seen.
//!
//! The caller supplies the problem as a [`Problem`] implementation (move
//! and energy functions over an opaque state); the crate supplies:
//!
//! - **[`Annealer::anneal`]**: the annealing driver — fixed-length
//!   exponential cooling, checkpoint/restore on rejection, windowed
//!   progress reporting, optional per-step CSV trace.
//! - **[`Annealer::auto`]**: empirical schedule estimation — constant
//!   temperature probes that discover a temperature range giving ~98%
//!   acceptance at the hot end and 0% improvement at the cold end, plus
//!   a step budget for a target wall-clock duration.
//!
//! Execution is single-threaded and synchronous; driver and estimator
//! share one seedable pseudorandom stream per [`Annealer`].
//!
//! # References
//!
//! - Kirkpatrick, Gelatt & Vecchi (1983), "Optimization by Simulated Annealing"
//! - Cerny (1985), "Thermodynamical Approach to the Travelling Salesman Problem"

mod annealer;
mod config;
mod error;
mod progress;
mod trace;
mod types;
mod util;

pub use annealer::Annealer;
pub use config::AnnealParams;
pub use error::AnnealError;
pub use progress::{default_update, Progress};
pub use types::Problem;
pub use util::{round_figures, time_string};
