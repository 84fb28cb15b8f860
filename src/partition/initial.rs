//! Random feasible starting partitions.

use rand::Rng;

use super::config::GroupingParams;
use super::types::Partition;
use crate::error::Result;
use crate::graph::{Graph, NodeId};

/// Builds a random partition that respects capacity and leaves no group
/// empty.
///
/// One distinct random node seeds each group first; every remaining node
/// then joins a uniformly chosen group among those still below capacity.
///
/// # Errors
///
/// [`Error::TooManyGroups`] or [`Error::InsufficientCapacity`] when the
/// parameters cannot fit the graph.
///
/// [`Error::TooManyGroups`]: crate::Error::TooManyGroups
/// [`Error::InsufficientCapacity`]: crate::Error::InsufficientCapacity
pub fn build_initial<R: Rng>(
    graph: &Graph,
    params: &GroupingParams,
    rng: &mut R,
) -> Result<Partition> {
    let n = graph.number_of_nodes();
    params.check_fits(n)?;

    let mut order: Vec<NodeId> = (0..n).collect();
    u_numflow::random::shuffle(&mut order, rng);

    let (seeds, rest) = order.split_at(params.num_groups);
    let mut groups: Vec<Vec<NodeId>> = seeds.iter().map(|&node| vec![node]).collect();

    let mut open: Vec<usize> = (0..params.num_groups)
        .filter(|&g| groups[g].len() < params.capacity)
        .collect();

    for &node in rest {
        // check_fits guarantees a slot remains for every leftover node
        let slot = rng.random_range(0..open.len());
        let g = open[slot];
        groups[g].push(node);
        if groups[g].len() >= params.capacity {
            open.swap_remove(slot);
        }
    }

    Ok(Partition::from_groups_unchecked(groups, n))
}
