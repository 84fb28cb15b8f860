//! Partition state, random initialization, and neighbor moves.
//!
//! A [`Partition`] assigns each node of a [`Graph`](crate::graph::Graph)
//! to one of a fixed number of capacity-bounded groups.
//!
//! - [`build_initial`]: random feasible starting partition
//! - [`propose`] / [`apply`] / [`revert`]: in-place perturbation used by
//!   the annealer
//! - [`neighbor`]: the same perturbation as a pure function

mod config;
mod initial;
mod moves;
mod types;

pub use config::GroupingParams;
pub use initial::build_initial;
pub use moves::{apply, neighbor, propose, revert, GroupMove};
pub use types::Partition;
