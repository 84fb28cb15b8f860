//! Error types for problem construction and scoring.
//!
//! Every variant describes a malformed problem instance. None of them can
//! occur inside the annealing loop once a [`GroupingProblem`] has been
//! built, so nothing here is retried.
//!
//! [`GroupingProblem`]: crate::problem::GroupingProblem

use thiserror::Error;

/// Errors raised while validating an instance or a caller-supplied partition.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// A configuration value failed validation.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// More groups were requested than there are nodes to seed them with.
    #[error("cannot seed {groups} groups from only {nodes} nodes")]
    TooManyGroups { groups: usize, nodes: usize },

    /// The groups cannot hold every node.
    #[error("{groups} groups of capacity {capacity} cannot hold {nodes} nodes")]
    InsufficientCapacity {
        groups: usize,
        capacity: usize,
        nodes: usize,
    },

    /// The graph has no edges, so the cost has no denominator.
    #[error("graph has no edges")]
    NoEdges,

    /// A node label was referenced that the graph does not contain.
    #[error("unknown node {node:?} referenced by {context}")]
    UnknownNode { node: String, context: String },

    /// A partition assigns the same node more than once.
    #[error("node {node:?} is assigned to more than one group slot")]
    DuplicateNode { node: String },

    /// A partition leaves a graph node unassigned.
    #[error("node {node:?} is not assigned to any group")]
    MissingNode { node: String },

    /// A partition refers to a node index outside `0..nodes`.
    #[error("node index {node} is out of range for {nodes} nodes")]
    NodeOutOfRange { node: usize, nodes: usize },

    /// A partition contains a group with no members.
    #[error("group {group} is empty")]
    EmptyGroup { group: usize },

    /// A partition has a different number of groups than the problem.
    #[error("expected {expected} groups, found {found}")]
    GroupCountMismatch { expected: usize, found: usize },

    /// A partition was built for a graph of a different size.
    #[error("partition covers {found} nodes but the graph has {expected}")]
    GraphMismatch { expected: usize, found: usize },
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_name_the_offender() {
        let err = Error::UnknownNode {
            node: "x".into(),
            context: "constraint \"rowdy\"".into(),
        };
        assert_eq!(
            err.to_string(),
            "unknown node \"x\" referenced by constraint \"rowdy\""
        );

        let err = Error::InsufficientCapacity {
            groups: 2,
            capacity: 3,
            nodes: 7,
        };
        assert_eq!(
            err.to_string(),
            "2 groups of capacity 3 cannot hold 7 nodes"
        );
    }
}
