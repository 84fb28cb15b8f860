//! Core trait for Simulated Annealing.

use crate::error::Result;
use rand::Rng;

/// Defines a Simulated Annealing problem.
///
/// The user implements cost evaluation and an in-place perturbation with
/// its inverse. The SA framework handles temperature management, the
/// acceptance criterion, and cooling.
///
/// Perturbing in place and reverting rejected moves keeps each trial free
/// of whole-solution clones. An implementation must guarantee that
/// `revert(s, perturb(s, rng))` leaves `s` exactly as it was.
///
/// # Minimization
///
/// SA minimizes the cost function. For maximization, negate the cost.
///
/// # Examples
///
/// ```
/// use rand::Rng;
/// use u_affinity::sa::SaProblem;
///
/// struct Shift;
///
/// impl SaProblem for Shift {
///     type Solution = f64;
///     type Move = f64;
///
///     fn cost(&self, x: &f64) -> f64 {
///         x * x
///     }
///
///     fn perturb<R: Rng>(&self, x: &mut f64, rng: &mut R) -> f64 {
///         let step = rng.random_range(-1.0..1.0);
///         *x += step;
///         step
///     }
///
///     fn revert(&self, x: &mut f64, step: f64) {
///         *x -= step;
///     }
/// }
/// ```
pub trait SaProblem: Send + Sync {
    /// The solution representation type.
    type Solution: Clone + Send;

    /// Undo token returned by [`SaProblem::perturb`].
    type Move;

    /// Computes the cost of a solution. Lower is better.
    fn cost(&self, solution: &Self::Solution) -> f64;

    /// Applies a random neighbor move in place and returns how to undo it.
    fn perturb<R: Rng>(&self, solution: &mut Self::Solution, rng: &mut R) -> Self::Move;

    /// Undoes a move returned by [`SaProblem::perturb`].
    fn revert(&self, solution: &mut Self::Solution, mv: Self::Move);

    /// Rejects a starting solution that `perturb` cannot operate on.
    ///
    /// Called once by [`crate::sa::SaRunner`] before the loop starts.
    fn check(&self, _solution: &Self::Solution) -> Result<()> {
        Ok(())
    }
}
