//! Annealing execution loop and schedule estimator.

use crate::config::AnnealParams;
use crate::error::AnnealError;
use crate::progress::{default_update, Progress};
use crate::trace::TraceWriter;
use crate::types::Problem;
use crate::util::round_figures;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::time::Instant;

/// Target acceptance rate at the hot end of an estimated schedule.
const HOT_ACCEPTANCE: f64 = 0.98;

/// Metropolis criterion: a worsening move survives when the uniform draw
/// `u` falls below `exp(-delta / temperature)`; any non-worsening move
/// passes unconditionally.
fn metropolis(delta: f64, temperature: f64, u: f64) -> bool {
    delta <= 0.0 || (-delta / temperature).exp() >= u
}

/// Exponential cooling: `tmax` at step 0 decaying to `tmin` at the final
/// step, with `t_factor = -ln(tmax / tmin)` precomputed once per run.
fn cool(tmax: f64, t_factor: f64, step: usize, steps: usize) -> f64 {
    tmax * (t_factor * step as f64 / steps as f64).exp()
}

/// Minimizes the energy of a system by simulated annealing.
///
/// Owns the caller's [`Problem`], the working state, the best state seen
/// across runs, and the single pseudorandom stream shared by the driver
/// and the estimator. Single-threaded; concurrent use of one `Annealer`
/// is not supported.
///
/// # Examples
///
/// ```
/// use anneal::{Annealer, AnnealParams, Problem};
/// use rand::Rng;
///
/// struct Quadratic;
///
/// impl Problem for Quadratic {
///     type State = f64;
///
///     fn energy(&mut self, x: &f64) -> f64 {
///         x * x
///     }
///
///     fn make_move<R: Rng>(&mut self, x: &mut f64, rng: &mut R) -> Option<f64> {
///         let step = if rng.random::<bool>() { 1.0 } else { -1.0 };
///         let before = *x * *x;
///         *x += step;
///         Some(*x * *x - before)
///     }
/// }
///
/// let mut annealer = Annealer::new(Quadratic, 8.0).with_seed(42);
/// let params = AnnealParams::default()
///     .with_steps(1000)
///     .with_tmax(10.0)
///     .with_tmin(0.1)
///     .with_updates(0);
/// let (best, best_energy) = annealer.anneal(&params).unwrap();
/// assert!(best_energy <= 64.0);
/// assert_eq!(best * best, best_energy);
/// ```
pub struct Annealer<P: Problem> {
    problem: P,
    state: P::State,
    best_state: Option<P::State>,
    best_energy: Option<f64>,
    rng: StdRng,
    update: Option<Box<dyn FnMut(&Progress)>>,
}

impl<P: Problem> Annealer<P> {
    /// Creates an annealer over `problem` starting from `initial_state`,
    /// with an entropy-seeded random stream.
    pub fn new(problem: P, initial_state: P::State) -> Self {
        Self {
            problem,
            state: initial_state,
            best_state: None,
            best_energy: None,
            rng: StdRng::seed_from_u64(rand::random()),
            update: None,
        }
    }

    /// Reseeds the random stream for reproducible runs.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    /// Installs a progress handler replacing [`default_update`].
    ///
    /// The handler may delegate back to `default_update` for the standard
    /// formatted line.
    pub fn with_update_handler(mut self, handler: impl FnMut(&Progress) + 'static) -> Self {
        self.update = Some(Box::new(handler));
        self
    }

    /// The current working state. After a completed run this is the best
    /// state found.
    pub fn state(&self) -> &P::State {
        &self.state
    }

    /// The best state seen by any completed run, if one has finished.
    pub fn best_state(&self) -> Option<&P::State> {
        self.best_state.as_ref()
    }

    /// The energy of [`best_state`](Annealer::best_state).
    pub fn best_energy(&self) -> Option<f64> {
        self.best_energy
    }

    pub fn problem(&self) -> &P {
        &self.problem
    }

    pub fn problem_mut(&mut self) -> &mut P {
        &mut self.problem
    }

    fn emit_update(&mut self, progress: &Progress) {
        match self.update.as_mut() {
            Some(handler) => handler(progress),
            None => default_update(progress),
        }
    }

    /// Runs the annealing schedule and returns the best (state, energy)
    /// pair found, the initial state included.
    ///
    /// Performs exactly `params.steps` move attempts under exponential
    /// cooling from `tmax` to `tmin`, accepting or rejecting each by the
    /// Metropolis criterion and restoring the last accepted snapshot on
    /// rejection. The working state is left at the best state found, so
    /// a later run resumes from it.
    ///
    /// # Errors
    ///
    /// Fails before any move on invalid parameters, and mid-run on trace
    /// file I/O errors. Panics from the problem's hooks propagate; the
    /// trace file is still flushed and closed on unwind.
    pub fn anneal(&mut self, params: &AnnealParams) -> Result<(P::State, f64), AnnealError> {
        params.validate()?;

        let mut trace = match &params.trace_path {
            Some(path) => Some(TraceWriter::create(path)?),
            None => None,
        };

        let start = Instant::now();
        let t_factor = -(params.tmax / params.tmin).ln();

        let mut temperature = params.tmax;
        let mut energy = self.problem.energy(&self.state);
        tracing::debug!("start energy: {energy:.2}");

        let mut prev_state = self.problem.copy_state(&self.state);
        let mut prev_energy = energy;
        let mut best_state = self.problem.copy_state(&self.state);
        let mut best_energy = energy;

        let (mut trials, mut accepts, mut improves) = (0u64, 0u64, 0u64);
        let wavelength = params.steps as f64 / params.updates.max(1) as f64;
        if params.updates > 0 {
            self.emit_update(&Progress {
                step: 0,
                temperature,
                energy,
                acceptance: None,
                improvement: None,
                elapsed: start.elapsed(),
                remaining: None,
            });
        }

        tracing::debug!("{:>5} {:>6} {:>6}", "step", "cur", "new");
        for step in 1..=params.steps {
            temperature = cool(params.tmax, t_factor, step, params.steps);

            let delta = match self.problem.make_move(&mut self.state, &mut self.rng) {
                Some(delta) => {
                    energy += delta;
                    delta
                }
                None => {
                    // Move could not report a delta; fall back to an
                    // absolute recomputation.
                    let new_energy = self.problem.energy(&self.state);
                    let delta = new_energy - prev_energy;
                    energy = new_energy;
                    delta
                }
            };
            trials += 1;

            let accepted = metropolis(delta, temperature, self.rng.random::<f64>());
            if let Some(trace) = trace.as_mut() {
                trace.record(step, temperature, prev_energy, energy, best_energy, accepted)?;
            }

            if accepted {
                tracing::debug!("{step:5} {prev_energy:6.2} {energy:6.2} ACC");
                accepts += 1;
                if delta < 0.0 {
                    improves += 1;
                }
                prev_state = self.problem.copy_state(&self.state);
                prev_energy = energy;
                if energy < best_energy {
                    best_state = self.problem.copy_state(&self.state);
                    best_energy = energy;
                }
            } else {
                tracing::debug!("{step:5} {prev_energy:6.2} {energy:6.2} REJ");
                self.state = self.problem.copy_state(&prev_state);
                self.problem.revert();
                energy = prev_energy;
            }

            if params.updates > 1 {
                let crossed =
                    (step as f64 / wavelength).floor() > ((step - 1) as f64 / wavelength).floor();
                if crossed {
                    let elapsed = start.elapsed();
                    let remaining =
                        elapsed.mul_f64((params.steps - step) as f64 / step as f64);
                    self.emit_update(&Progress {
                        step,
                        temperature,
                        energy,
                        acceptance: Some(accepts as f64 / trials as f64),
                        improvement: Some(improves as f64 / trials as f64),
                        elapsed,
                        remaining: Some(remaining),
                    });
                    trials = 0;
                    accepts = 0;
                    improves = 0;
                }
            }
        }

        if let Some(trace) = trace {
            trace.finish()?;
        }

        self.state = self.problem.copy_state(&best_state);
        self.best_energy = Some(best_energy);
        let returned = self.problem.copy_state(&best_state);
        self.best_state = Some(best_state);
        Ok((returned, best_energy))
    }

    /// Explores the annealing landscape and estimates a serviceable
    /// schedule for a run of roughly `minutes` of wall-clock time.
    ///
    /// Seeds a temperature from the first move with a nonzero energy
    /// change, then runs constant-temperature probes of `probe_steps`
    /// moves each: scaling by 1.5 toward ~98% acceptance for `tmax`,
    /// then down to 0% improvement for `tmin`. The step budget is
    /// extrapolated from the probes' wall-clock throughput. The
    /// customary probe length is 2000 moves.
    ///
    /// Returns ready-to-use parameters (default update count, no trace
    /// path). Does not perform the anneal itself.
    ///
    /// Never terminates if the problem's moves cannot change the energy;
    /// that guarantee is the caller's.
    pub fn auto(&mut self, minutes: f64, probe_steps: usize) -> Result<AnnealParams, AnnealError> {
        if probe_steps == 0 {
            return Err(AnnealError::ZeroProbeSteps);
        }

        let start = Instant::now();
        let mut total_steps = 0usize;

        // Seed temperature: magnitude of the first nonzero energy change.
        let mut temperature = 0.0;
        let initial_energy = self.problem.energy(&self.state);
        self.emit_update(&Progress {
            step: 0,
            temperature,
            energy: initial_energy,
            acceptance: None,
            improvement: None,
            elapsed: start.elapsed(),
            remaining: None,
        });
        while temperature == 0.0 {
            total_steps += 1;
            self.problem.make_move(&mut self.state, &mut self.rng);
            temperature = (self.problem.energy(&self.state) - initial_energy).abs();
        }

        // Search for tmax: a temperature giving ~98% acceptance.
        let (_, mut acceptance, mut improvement) = self.probe(temperature, probe_steps);
        total_steps += probe_steps;
        while acceptance > HOT_ACCEPTANCE {
            temperature = round_figures(temperature / 1.5, 2);
            let (energy, a, i) = self.probe(temperature, probe_steps);
            (acceptance, improvement) = (a, i);
            total_steps += probe_steps;
            self.emit_probe_update(total_steps, temperature, energy, a, i, &start);
        }
        while acceptance < HOT_ACCEPTANCE {
            temperature = round_figures(temperature * 1.5, 2);
            let (energy, a, i) = self.probe(temperature, probe_steps);
            (acceptance, improvement) = (a, i);
            total_steps += probe_steps;
            self.emit_probe_update(total_steps, temperature, energy, a, i, &start);
        }
        let tmax = temperature;

        // Search for tmin: a temperature giving 0% improvement.
        while improvement > 0.0 {
            temperature = round_figures(temperature / 1.5, 2);
            let (energy, a, i) = self.probe(temperature, probe_steps);
            improvement = i;
            total_steps += probe_steps;
            self.emit_probe_update(total_steps, temperature, energy, a, i, &start);
        }
        let tmin = temperature;

        // Step budget achievable in the requested wall-clock time.
        let elapsed = start.elapsed().as_secs_f64();
        let steps =
            round_figures(60.0 * minutes * total_steps as f64 / elapsed, 2).max(1.0) as usize;

        Ok(AnnealParams::default()
            .with_tmax(tmax)
            .with_tmin(tmin)
            .with_steps(steps))
    }

    /// Anneals at constant temperature, returning the final energy and
    /// the observed acceptance and improvement rates.
    ///
    /// Unlike the driver, recomputes the absolute energy after every
    /// move; probes have no running trace to keep consistent.
    fn probe(&mut self, temperature: f64, steps: usize) -> (f64, f64, f64) {
        let mut energy = self.problem.energy(&self.state);
        let mut prev_state = self.problem.copy_state(&self.state);
        let mut prev_energy = energy;
        let (mut accepts, mut improves) = (0usize, 0usize);

        for _ in 0..steps {
            self.problem.make_move(&mut self.state, &mut self.rng);
            energy = self.problem.energy(&self.state);
            let delta = energy - prev_energy;
            if metropolis(delta, temperature, self.rng.random::<f64>()) {
                accepts += 1;
                if delta < 0.0 {
                    improves += 1;
                }
                prev_state = self.problem.copy_state(&self.state);
                prev_energy = energy;
            } else {
                self.state = self.problem.copy_state(&prev_state);
                self.problem.revert();
                energy = prev_energy;
            }
        }

        (
            energy,
            accepts as f64 / steps as f64,
            improves as f64 / steps as f64,
        )
    }

    fn emit_probe_update(
        &mut self,
        step: usize,
        temperature: f64,
        energy: f64,
        acceptance: f64,
        improvement: f64,
        start: &Instant,
    ) {
        self.emit_update(&Progress {
            step,
            temperature,
            energy,
            acceptance: Some(acceptance),
            improvement: Some(improvement),
            elapsed: start.elapsed(),
            remaining: None,
        });
    }
}
