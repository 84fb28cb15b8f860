//! SA execution loop.

use super::config::SaConfig;
use super::types::SaProblem;
use crate::error::{Error, Result};
use rand::Rng;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use u_numflow::random::create_rng;

/// Result of a Simulated Annealing run.
///
/// `solution` is the state the walk ended in, not the best state it
/// visited. Keeping the best of several runs is the caller's job (see
/// [`crate::search`]).
#[derive(Debug, Clone)]
pub struct SaResult<S: Clone> {
    /// The final current solution.
    pub solution: S,

    /// Cost of `solution`.
    pub cost: f64,

    /// Cost of the starting solution.
    pub initial_cost: f64,

    /// Total number of candidate evaluations.
    pub iterations: usize,

    /// Number of completed temperature bands.
    pub temperature_bands: usize,

    /// Temperature when the loop stopped.
    pub final_temperature: f64,

    /// Number of accepted moves (including improvements).
    pub accepted_moves: usize,

    /// Number of accepted moves that strictly lowered the cost.
    pub improving_moves: usize,

    /// Whether cancelled externally.
    pub cancelled: bool,

    /// Current cost at the end of each temperature band.
    pub cost_history: Vec<f64>,
}

/// Metropolis acceptance probability for moving from `current` to
/// `candidate` at `temperature`.
///
/// Strict improvements are always accepted; otherwise the probability is
/// `exp((current - candidate) / temperature)`, which is 1 for equal costs.
pub fn acceptance_probability(current: f64, candidate: f64, temperature: f64) -> f64 {
    if candidate < current {
        1.0
    } else {
        ((current - candidate) / temperature).exp()
    }
}

/// Executes the Simulated Annealing algorithm.
pub struct SaRunner;

impl SaRunner {
    /// Anneals from `initial`, seeding the RNG from `config.seed`.
    pub fn run<P: SaProblem>(
        problem: &P,
        initial: P::Solution,
        config: &SaConfig,
    ) -> Result<SaResult<P::Solution>> {
        Self::run_with_cancel(problem, initial, config, None)
    }

    /// Runs SA with an optional cancellation token.
    ///
    /// The flag is checked between temperature bands, so a band that has
    /// started always completes.
    pub fn run_with_cancel<P: SaProblem>(
        problem: &P,
        initial: P::Solution,
        config: &SaConfig,
        cancel: Option<Arc<AtomicBool>>,
    ) -> Result<SaResult<P::Solution>> {
        let mut rng = match config.seed {
            Some(seed) => create_rng(seed),
            None => create_rng(rand::random()),
        };
        Self::run_with_rng(problem, initial, config, &mut rng, cancel.as_deref())
    }

    /// Runs SA drawing from a caller-owned RNG. `config.seed` is ignored.
    pub fn run_with_rng<P: SaProblem, R: Rng>(
        problem: &P,
        initial: P::Solution,
        config: &SaConfig,
        rng: &mut R,
        cancel: Option<&AtomicBool>,
    ) -> Result<SaResult<P::Solution>> {
        config.validate().map_err(Error::InvalidConfig)?;
        problem.check(&initial)?;

        let mut current = initial;
        let mut current_cost = problem.cost(&current);
        let initial_cost = current_cost;

        let mut temperature = config.initial_temperature;
        let mut iterations = 0usize;
        let mut bands = 0usize;
        let mut accepted_moves = 0usize;
        let mut improving_moves = 0usize;
        let mut cancelled = false;
        let mut cost_history = Vec::with_capacity(config.schedule_len());

        while temperature > config.min_temperature {
            if cancel.is_some_and(|flag| flag.load(Ordering::Relaxed)) {
                cancelled = true;
                log::warn!("SA cancelled after {bands} bands at temp={temperature:.3e}");
                break;
            }

            let mut band_accepted = 0usize;
            for _ in 0..config.iterations_per_temperature {
                let mv = problem.perturb(&mut current, rng);
                let candidate_cost = problem.cost(&current);

                let probability = acceptance_probability(current_cost, candidate_cost, temperature);
                if probability > rng.random::<f64>() {
                    if candidate_cost < current_cost {
                        improving_moves += 1;
                    }
                    current_cost = candidate_cost;
                    band_accepted += 1;
                } else {
                    problem.revert(&mut current, mv);
                }
                iterations += 1;
            }

            accepted_moves += band_accepted;
            bands += 1;
            cost_history.push(current_cost);
            log::trace!(
                "SA band {bands}: temp={temperature:.3e}, cost={current_cost:.6}, accepted={band_accepted}/{}",
                config.iterations_per_temperature
            );

            temperature *= config.cooling_factor;
        }

        log::debug!(
            "SA finished: {bands} bands, {iterations} iterations, cost {initial_cost:.6} -> {current_cost:.6}"
        );

        Ok(SaResult {
            solution: current,
            cost: current_cost,
            initial_cost,
            iterations,
            temperature_bands: bands,
            final_temperature: temperature,
            accepted_moves,
            improving_moves,
            cancelled,
            cost_history,
        })
    }
}
