//! Affinity cost with spread-constraint suppression.
//!
//! The cost of a partition is `1 - same_group_edges / total_edges`, where
//! `total_edges` is the edge count of the full graph. Before counting, every
//! constraint whose members all sit in a single group has its members
//! removed from consideration, so edges touching them no longer count as
//! same-group. Confinement is therefore never forbidden, only unrewarded.
//!
//! The evaluator masks suppressed nodes instead of copying the graph; the
//! result equals scoring a copy with [`Graph::remove_node`] applied to each
//! suppressed member.

use crate::error::{Error, Result};
use crate::graph::{Graph, NodeId};
use crate::partition::Partition;

/// A named set of nodes that should not all end up in one group.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Constraint {
    pub name: String,
    pub members: Vec<String>,
}

impl Constraint {
    pub fn new<S: AsRef<str>>(name: impl Into<String>, members: &[S]) -> Self {
        Self {
            name: name.into(),
            members: members.iter().map(|m| m.as_ref().to_string()).collect(),
        }
    }

    /// A constraint named by its position, for inputs that carry no names.
    pub fn unnamed<S: AsRef<str>>(index: usize, members: &[S]) -> Self {
        Self::new(format!("#{index}"), members)
    }
}

/// Scores partitions of one graph against a fixed constraint list.
///
/// Constraint labels are resolved once at construction; evaluation itself
/// cannot fail.
#[derive(Debug, Clone)]
pub struct CostEvaluator {
    edges: Vec<(NodeId, NodeId)>,
    constraints: Vec<Vec<NodeId>>,
    num_nodes: usize,
}

impl CostEvaluator {
    /// Prepares an evaluator.
    ///
    /// # Errors
    ///
    /// - [`Error::NoEdges`] if the graph has no edges
    /// - [`Error::UnknownNode`] if a constraint names a node not in the graph
    pub fn new(graph: &Graph, constraints: &[Constraint]) -> Result<Self> {
        if graph.number_of_edges() == 0 {
            return Err(Error::NoEdges);
        }

        let constraints = constraints
            .iter()
            .map(|c| {
                c.members
                    .iter()
                    .map(|label| {
                        graph.node_id(label).ok_or_else(|| Error::UnknownNode {
                            node: label.clone(),
                            context: format!("constraint {:?}", c.name),
                        })
                    })
                    .collect::<Result<Vec<_>>>()
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            edges: graph.edge_ids().to_vec(),
            constraints,
            num_nodes: graph.number_of_nodes(),
        })
    }

    /// Edge count of the full graph (the cost denominator).
    pub fn total_edges(&self) -> usize {
        self.edges.len()
    }

    /// Number of nodes the evaluator expects partitions to cover.
    pub fn num_nodes(&self) -> usize {
        self.num_nodes
    }

    /// Checks that a partition covers this evaluator's graph.
    pub fn check(&self, partition: &Partition) -> Result<()> {
        if partition.len() != self.num_nodes {
            return Err(Error::GraphMismatch {
                expected: self.num_nodes,
                found: partition.len(),
            });
        }
        Ok(())
    }

    /// Indices of constraints whose members all share one group.
    ///
    /// Empty constraints count as confined but suppress nothing.
    pub fn confined_constraints(&self, partition: &Partition) -> Vec<usize> {
        let assignment = partition.assignment();
        self.constraints
            .iter()
            .enumerate()
            .filter(|(_, members)| is_confined(members, assignment))
            .map(|(i, _)| i)
            .collect()
    }

    /// Same-group edges left after suppressing confined constraints.
    pub fn same_group_edges(&self, partition: &Partition) -> usize {
        let assignment = partition.assignment();
        let mut suppressed = vec![false; self.num_nodes];
        for members in &self.constraints {
            if is_confined(members, assignment) {
                for &node in members {
                    suppressed[node] = true;
                }
            }
        }

        self.edges
            .iter()
            .filter(|&&(u, v)| !suppressed[u] && !suppressed[v] && assignment[u] == assignment[v])
            .count()
    }

    /// Cost in `[0, 1]`; lower is better.
    ///
    /// # Panics
    ///
    /// Panics if the partition was built for a larger graph. Use
    /// [`CostEvaluator::check`] on partitions from untrusted sources.
    pub fn evaluate(&self, partition: &Partition) -> f64 {
        1.0 - self.same_group_edges(partition) as f64 / self.total_edges() as f64
    }
}

fn is_confined(members: &[NodeId], assignment: &[usize]) -> bool {
    let mut groups = members.iter().map(|&node| assignment[node]);
    match groups.next() {
        Some(first) => groups.all(|g| g == first),
        None => true,
    }
}

/// Converts a cost into the reported score (`1 - cost`, higher is better).
pub fn score(cost: f64) -> f64 {
    1.0 - cost
}

/// Scores a single partition.
///
/// Builds a [`CostEvaluator`] per call; prefer the evaluator when scoring
/// many partitions of the same graph.
///
/// # Examples
///
/// ```
/// use u_affinity::cost::{cost, Constraint};
/// use u_affinity::graph::Graph;
/// use u_affinity::partition::Partition;
///
/// let graph = Graph::from_edges([("A", "B"), ("C", "D")]);
/// let p = Partition::from_labels(&graph, &[vec!["A", "B"], vec!["C", "D"]]).unwrap();
/// assert_eq!(cost(&p, &graph, &[]).unwrap(), 0.0);
///
/// let rule = Constraint::new("rowdy", &["A", "B"]);
/// assert_eq!(cost(&p, &graph, &[rule]).unwrap(), 0.5);
/// ```
pub fn cost(partition: &Partition, graph: &Graph, constraints: &[Constraint]) -> Result<f64> {
    let evaluator = CostEvaluator::new(graph, constraints)?;
    evaluator.check(partition)?;
    Ok(evaluator.evaluate(partition))
}
