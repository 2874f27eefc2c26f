//! Core trait for the annealing driver.

use rand::Rng;

/// Defines a simulated annealing problem.
///
/// The user implements the move and energy functions; the driver handles
/// temperature scheduling, the acceptance criterion, checkpointing, and
/// best-state tracking.
///
/// # Minimization
///
/// The driver minimizes energy. For maximization, negate the energy.
///
/// # State and checkpointing
///
/// Moves mutate the state in place. The driver snapshots the state before
/// each trial and restores the snapshot on rejection, so `State::clone`
/// (or a [`copy_state`](Problem::copy_state) override) must yield a value
/// that can be mutated without aliasing the original.
///
/// # Examples
///
/// ```ignore
/// struct Tsp { distances: Vec<Vec<f64>> }
///
/// impl Problem for Tsp {
///     type State = Vec<usize>;
///
///     fn energy(&mut self, tour: &Vec<usize>) -> f64 {
///         tour.windows(2).map(|w| self.distances[w[0]][w[1]]).sum()
///     }
///
///     fn make_move<R: Rng>(&mut self, tour: &mut Vec<usize>, rng: &mut R) -> Option<f64> {
///         let i = rng.random_range(0..tour.len());
///         let j = rng.random_range(0..tour.len());
///         tour.swap(i, j);
///         None // have the driver recompute the energy
///     }
/// }
/// ```
///
/// # References
///
/// Kirkpatrick et al. (1983), Cerny (1985)
pub trait Problem {
    /// The state representation type.
    type State: Clone;

    /// Computes the absolute energy of a state. Lower is better.
    fn energy(&mut self, state: &Self::State) -> f64;

    /// Perturbs the state in place.
    ///
    /// Returns `Some(delta)` with the energy change caused by the move, or
    /// `None` to have the driver recompute the absolute energy. Returned
    /// deltas must be consistent with [`energy`](Problem::energy), or the
    /// driver's running energy will drift silently.
    ///
    /// The move should be a small perturbation, but the neighborhood must
    /// be connected (any state reachable from any other via a sequence of
    /// moves). A move that never changes the energy will hang the
    /// schedule estimator.
    fn make_move<R: Rng>(&mut self, state: &mut Self::State, rng: &mut R) -> Option<f64>;

    /// Undoes move side effects held outside the state object.
    ///
    /// Called after a rejected move, once the state itself has been
    /// restored from the last accepted snapshot. Default: no-op.
    fn revert(&mut self) {}

    /// Duplicates a state for checkpointing.
    ///
    /// Default: `state.clone()`. Override when a cheaper or more precise
    /// copy exists (e.g. copying only the mutable portion of a large
    /// state).
    fn copy_state(&self, state: &Self::State) -> Self::State {
        state.clone()
    }
}
