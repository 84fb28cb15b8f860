//! Best-of-N restart search.
//!
//! # Algorithm
//!
//! 1. Score a baseline: the caller's incumbent, or one random partition
//! 2. Run `restarts` independent anneals, each from its own random start
//! 3. Keep the first result strictly cheaper than the best so far
//!
//! Every restart owns its RNG, seeded from the base seed and its index, so
//! sequential and parallel runs return the same answer.

use super::config::SearchConfig;
use crate::cost::score;
use crate::error::{Error, Result};
use crate::partition::Partition;
use crate::problem::GroupingProblem;
use crate::sa::SaRunner;
#[cfg(feature = "parallel")]
use rayon::prelude::*;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use u_numflow::random::create_rng;

/// Statistics for one restart.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RunSummary {
    /// Restart index (0-based).
    pub index: usize,
    /// Seed the restart's RNG was created from.
    pub seed: u64,
    /// Cost of the random starting partition.
    pub initial_cost: f64,
    /// Cost the anneal ended at.
    pub cost: f64,
    pub iterations: usize,
    pub accepted_moves: usize,
    pub improving_moves: usize,
    pub cancelled: bool,
}

/// Result of a restart search.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SearchResult {
    /// Best partition found, or the baseline if no restart beat it.
    pub partition: Partition,

    /// Cost of `partition`.
    pub cost: f64,

    /// Cost of the baseline the restarts had to beat.
    pub baseline_cost: f64,

    /// Index of the restart that produced `partition`, if any.
    pub best_run: Option<usize>,

    /// Per-restart statistics in index order.
    pub runs: Vec<RunSummary>,

    /// Whether any restart was cancelled.
    pub cancelled: bool,
}

impl SearchResult {
    /// Reported score, `1 - cost`.
    pub fn score(&self) -> f64 {
        score(self.cost)
    }
}

/// Executes restart searches.
pub struct SearchRunner;

impl SearchRunner {
    /// Runs the search against a random baseline.
    pub fn run(problem: &GroupingProblem, config: &SearchConfig) -> Result<SearchResult> {
        Self::run_with_cancel(problem, config, None, None)
    }

    /// Runs the search, optionally against a previously found incumbent,
    /// with an optional cancellation token shared by every restart.
    pub fn run_with_cancel(
        problem: &GroupingProblem,
        config: &SearchConfig,
        incumbent: Option<Partition>,
        cancel: Option<Arc<AtomicBool>>,
    ) -> Result<SearchResult> {
        config.validate().map_err(Error::InvalidConfig)?;
        let base_seed = config.seed.unwrap_or_else(rand::random);

        let baseline = match incumbent {
            Some(partition) => {
                problem.check_partition(&partition)?;
                partition
            }
            None => problem.build_initial(&mut create_rng(base_seed))?,
        };
        let baseline_cost = problem.evaluator().evaluate(&baseline);

        let outcomes = run_restarts(problem, config, base_seed, cancel.as_deref())?;

        let mut best = baseline;
        let mut best_cost = baseline_cost;
        let mut best_run = None;
        let mut runs = Vec::with_capacity(outcomes.len());
        for (summary, partition) in outcomes {
            log::debug!(
                "restart {}: score {:.6} (best so far {:.6})",
                summary.index,
                score(summary.cost),
                score(best_cost.min(summary.cost))
            );
            if summary.cost < best_cost {
                best_cost = summary.cost;
                best = partition;
                best_run = Some(summary.index);
            }
            runs.push(summary);
        }

        let cancelled = runs.iter().any(|r| r.cancelled);
        log::info!(
            "search finished: {} restarts, score {:.6} (baseline {:.6})",
            runs.len(),
            score(best_cost),
            score(baseline_cost)
        );

        Ok(SearchResult {
            partition: best,
            cost: best_cost,
            baseline_cost,
            best_run,
            runs,
            cancelled,
        })
    }
}

/// Seed for restart `index`, decorrelated from the base and the baseline.
fn restart_seed(base: u64, index: usize) -> u64 {
    base ^ (index as u64 + 1).wrapping_mul(0x9E37_79B9_7F4A_7C15)
}

fn run_one(
    problem: &GroupingProblem,
    config: &SearchConfig,
    base_seed: u64,
    index: usize,
    cancel: Option<&AtomicBool>,
) -> Result<(RunSummary, Partition)> {
    let seed = restart_seed(base_seed, index);
    let mut rng = create_rng(seed);
    let initial = problem.build_initial(&mut rng)?;
    let result = SaRunner::run_with_rng(problem, initial, &config.anneal, &mut rng, cancel)?;

    let summary = RunSummary {
        index,
        seed,
        initial_cost: result.initial_cost,
        cost: result.cost,
        iterations: result.iterations,
        accepted_moves: result.accepted_moves,
        improving_moves: result.improving_moves,
        cancelled: result.cancelled,
    };
    Ok((summary, result.solution))
}

#[cfg(feature = "parallel")]
fn run_restarts(
    problem: &GroupingProblem,
    config: &SearchConfig,
    base_seed: u64,
    cancel: Option<&AtomicBool>,
) -> Result<Vec<(RunSummary, Partition)>> {
    if config.parallel {
        (0..config.restarts)
            .into_par_iter()
            .map(|i| run_one(problem, config, base_seed, i, cancel))
            .collect()
    } else {
        (0..config.restarts)
            .map(|i| run_one(problem, config, base_seed, i, cancel))
            .collect()
    }
}

#[cfg(not(feature = "parallel"))]
fn run_restarts(
    problem: &GroupingProblem,
    config: &SearchConfig,
    base_seed: u64,
    cancel: Option<&AtomicBool>,
) -> Result<Vec<(RunSummary, Partition)>> {
    (0..config.restarts)
        .map(|i| run_one(problem, config, base_seed, i, cancel))
        .collect()
}
