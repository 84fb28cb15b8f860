//! Neighbor generation.
//!
//! A move picks two groups (possibly the same one) and one member position
//! in each, then either swaps the two members or relocates the second
//! member into the first group. Relocation only happens when the target
//! group is below capacity and the source group keeps at least one member;
//! otherwise the move degrades to a swap.
//!
//! Moves are applied in place and undone with [`revert`], which restores
//! the exact member order. [`neighbor`] wraps this as a pure function.

use rand::Rng;

use super::types::Partition;

/// One random perturbation of a [`Partition`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupMove {
    /// Exchange `groups[g1][i1]` with `groups[g2][i2]`.
    Swap {
        g1: usize,
        i1: usize,
        g2: usize,
        i2: usize,
    },

    /// Remove `groups[from][index]` and append it to `groups[to]`.
    Relocate { from: usize, index: usize, to: usize },
}

/// Draws a move for `partition` without applying it.
///
/// # Panics
///
/// Panics if the partition has no groups or an empty group.
pub fn propose<R: Rng>(partition: &Partition, capacity: usize, rng: &mut R) -> GroupMove {
    let k = partition.num_groups();
    let g1 = rng.random_range(0..k);
    let g2 = rng.random_range(0..k);
    let i1 = rng.random_range(0..partition.group(g1).len());
    let i2 = rng.random_range(0..partition.group(g2).len());
    let relocate = rng.random_bool(0.5);

    if relocate && partition.group(g1).len() < capacity && partition.group(g2).len() > 1 {
        GroupMove::Relocate {
            from: g2,
            index: i2,
            to: g1,
        }
    } else {
        GroupMove::Swap { g1, i1, g2, i2 }
    }
}

/// Applies a move in place.
pub fn apply(partition: &mut Partition, mv: GroupMove) {
    match mv {
        GroupMove::Swap { g1, i1, g2, i2 } => swap(partition, g1, i1, g2, i2),
        GroupMove::Relocate { from, index, to } => {
            let node = partition.groups_mut()[from].remove(index);
            partition.groups_mut()[to].push(node);
            partition.set_group_of(node, to);
        }
    }
}

/// Undoes a move previously passed to [`apply`] on the same partition.
pub fn revert(partition: &mut Partition, mv: GroupMove) {
    match mv {
        GroupMove::Swap { g1, i1, g2, i2 } => swap(partition, g1, i1, g2, i2),
        GroupMove::Relocate { from, index, to } => {
            if let Some(node) = partition.groups_mut()[to].pop() {
                partition.groups_mut()[from].insert(index, node);
                partition.set_group_of(node, from);
            }
        }
    }
}

fn swap(partition: &mut Partition, g1: usize, i1: usize, g2: usize, i2: usize) {
    let groups = partition.groups_mut();
    let a = groups[g1][i1];
    let b = groups[g2][i2];
    groups[g1][i1] = b;
    groups[g2][i2] = a;
    partition.set_group_of(b, g1);
    partition.set_group_of(a, g2);
}

/// Returns a perturbed copy of `partition`, leaving the input untouched.
pub fn neighbor<R: Rng>(partition: &Partition, capacity: usize, rng: &mut R) -> Partition {
    let mut next = partition.clone();
    let mv = propose(&next, capacity, rng);
    apply(&mut next, mv);
    next
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::Graph;
    use u_numflow::random::create_rng;

    fn graph6() -> Graph {
        Graph::from_edges([("a", "b"), ("c", "d"), ("e", "f")])
    }

    fn sample() -> (Graph, Partition) {
        let graph = graph6();
        let p = Partition::from_labels(&graph, &[vec!["a", "b", "c"], vec!["d", "e"], vec!["f"]])
            .unwrap();
        (graph, p)
    }

    fn assert_consistent(p: &Partition) {
        let mut seen = vec![0usize; p.len()];
        for (g, members) in p.groups().iter().enumerate() {
            for &node in members {
                seen[node] += 1;
                assert_eq!(p.group_of(node), g);
            }
        }
        assert!(seen.iter().all(|&c| c == 1));
    }

    #[test]
    fn test_swap_exchanges_members() {
        let (graph, mut p) = sample();
        apply(
            &mut p,
            GroupMove::Swap {
                g1: 0,
                i1: 0,
                g2: 2,
                i2: 0,
            },
        );
        assert_eq!(
            p.to_labels(&graph),
            vec![vec!["f", "b", "c"], vec!["d", "e"], vec!["a"]]
        );
        assert_consistent(&p);
    }

    #[test]
    fn test_relocate_appends_to_target() {
        let (graph, mut p) = sample();
        apply(
            &mut p,
            GroupMove::Relocate {
                from: 0,
                index: 1,
                to: 2,
            },
        );
        assert_eq!(
            p.to_labels(&graph),
            vec![vec!["a", "c"], vec!["d", "e"], vec!["f", "b"]]
        );
        assert_consistent(&p);
    }

    #[test]
    fn test_revert_restores_exact_order() {
        let (_, original) = sample();
        let mut rng = create_rng(3);
        let mut p = original.clone();
        for _ in 0..500 {
            let mv = propose(&p, 3, &mut rng);
            apply(&mut p, mv);
            assert_consistent(&p);
            revert(&mut p, mv);
            assert_eq!(p, original);
        }
    }

    #[test]
    fn test_relocate_within_same_group_reverts() {
        let (_, original) = sample();
        let mut p = original.clone();
        let mv = GroupMove::Relocate {
            from: 0,
            index: 0,
            to: 0,
        };
        apply(&mut p, mv);
        assert_eq!(p.group(0).len(), 3);
        revert(&mut p, mv);
        assert_eq!(p, original);
    }

    #[test]
    fn test_full_target_forces_swap() {
        let (_, p) = sample();
        let mut rng = create_rng(11);
        // Capacity equals the largest group, so group 0 can never receive.
        for _ in 0..500 {
            if let GroupMove::Relocate { to, from, .. } = propose(&p, 3, &mut rng) {
                assert_ne!(to, 0);
                assert!(p.group(from).len() > 1);
            }
        }
    }

    #[test]
    fn test_singleton_source_never_emptied() {
        let (_, p) = sample();
        let mut rng = create_rng(5);
        for _ in 0..500 {
            if let GroupMove::Relocate { from, .. } = propose(&p, 10, &mut rng) {
                assert_ne!(from, 2, "group 2 has one member and must not be drained");
            }
        }
    }

    #[test]
    fn test_neighbor_is_pure() {
        let (_, p) = sample();
        let before = p.clone();
        let mut rng = create_rng(9);
        let mut changed = false;
        for _ in 0..50 {
            let next = neighbor(&p, 3, &mut rng);
            assert_consistent(&next);
            assert!(next.max_group_size() <= 3);
            changed |= next != p;
        }
        assert_eq!(p, before);
        assert!(changed);
    }
}
