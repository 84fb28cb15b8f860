//! Partition state.

use crate::error::{Error, Result};
use crate::graph::{Graph, NodeId};

/// Assignment of every graph node to exactly one group.
///
/// Groups keep their members in insertion order. A flat node → group
/// lookup is maintained alongside the member lists so scoring never has to
/// rebuild it.
///
/// With the `serde` feature only the member lists are serialized; the
/// lookup is rebuilt on deserialization through [`Partition::from_groups`],
/// so malformed input is rejected instead of producing a broken partition.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "PartitionRepr", into = "PartitionRepr")
)]
pub struct Partition {
    groups: Vec<Vec<NodeId>>,
    assignment: Vec<usize>,
}

/// Wire form of a [`Partition`]: member lists only.
#[cfg(feature = "serde")]
#[derive(serde::Serialize, serde::Deserialize)]
struct PartitionRepr {
    groups: Vec<Vec<NodeId>>,
}

#[cfg(feature = "serde")]
impl TryFrom<PartitionRepr> for Partition {
    type Error = Error;

    fn try_from(repr: PartitionRepr) -> Result<Self> {
        Partition::from_groups(repr.groups)
    }
}

#[cfg(feature = "serde")]
impl From<Partition> for PartitionRepr {
    fn from(partition: Partition) -> Self {
        Self {
            groups: partition.groups,
        }
    }
}

impl Partition {
    /// Builds a partition from member lists that are already known to cover
    /// `0..num_nodes` exactly once.
    pub(crate) fn from_groups_unchecked(groups: Vec<Vec<NodeId>>, num_nodes: usize) -> Self {
        let mut assignment = vec![0; num_nodes];
        for (g, members) in groups.iter().enumerate() {
            for &node in members {
                assignment[node] = g;
            }
        }
        Self { groups, assignment }
    }

    /// Builds a partition from member lists of node ids.
    ///
    /// The node count is the total number of members, so the ids must be
    /// exactly `0..n` with each appearing once, and no group may be empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use u_affinity::partition::Partition;
    ///
    /// let p = Partition::from_groups(vec![vec![2, 0], vec![1, 3]]).unwrap();
    /// assert_eq!(p.group_of(3), 1);
    /// assert!(Partition::from_groups(vec![vec![0, 1], vec![]]).is_err());
    /// ```
    pub fn from_groups(groups: Vec<Vec<NodeId>>) -> Result<Self> {
        let n = groups.iter().map(Vec::len).sum();
        let mut seen = vec![false; n];
        for (g, members) in groups.iter().enumerate() {
            if members.is_empty() {
                return Err(Error::EmptyGroup { group: g });
            }
            for &id in members {
                if id >= n {
                    return Err(Error::NodeOutOfRange { node: id, nodes: n });
                }
                if std::mem::replace(&mut seen[id], true) {
                    return Err(Error::DuplicateNode {
                        node: id.to_string(),
                    });
                }
            }
        }
        Ok(Self::from_groups_unchecked(groups, n))
    }

    /// Builds a partition from labeled groups, checking that every graph
    /// node appears exactly once and no group is empty.
    ///
    /// Capacity is not checked here; it is a soft invariant maintained by
    /// the move generator.
    ///
    /// # Examples
    ///
    /// ```
    /// use u_affinity::graph::Graph;
    /// use u_affinity::partition::Partition;
    ///
    /// let graph = Graph::from_edges([("a", "b"), ("c", "d")]);
    /// let p = Partition::from_labels(&graph, &[vec!["a", "b"], vec!["c", "d"]]).unwrap();
    /// assert_eq!(p.group_of(graph.node_id("c").unwrap()), 1);
    /// ```
    pub fn from_labels<S: AsRef<str>>(graph: &Graph, groups: &[Vec<S>]) -> Result<Self> {
        let n = graph.number_of_nodes();
        let mut seen = vec![false; n];
        let mut resolved = Vec::with_capacity(groups.len());

        for (g, members) in groups.iter().enumerate() {
            if members.is_empty() {
                return Err(Error::EmptyGroup { group: g });
            }
            let mut ids = Vec::with_capacity(members.len());
            for label in members {
                let label = label.as_ref();
                let id = graph.node_id(label).ok_or_else(|| Error::UnknownNode {
                    node: label.to_string(),
                    context: format!("group {g}"),
                })?;
                if std::mem::replace(&mut seen[id], true) {
                    return Err(Error::DuplicateNode {
                        node: label.to_string(),
                    });
                }
                ids.push(id);
            }
            resolved.push(ids);
        }

        if let Some(missing) = seen.iter().position(|&s| !s) {
            return Err(Error::MissingNode {
                node: graph.label(missing).to_string(),
            });
        }

        Ok(Self::from_groups_unchecked(resolved, n))
    }

    /// Converts back to labeled groups.
    pub fn to_labels(&self, graph: &Graph) -> Vec<Vec<String>> {
        self.groups
            .iter()
            .map(|members| {
                members
                    .iter()
                    .map(|&id| graph.label(id).to_string())
                    .collect()
            })
            .collect()
    }

    /// Number of groups.
    pub fn num_groups(&self) -> usize {
        self.groups.len()
    }

    /// Number of assigned nodes.
    pub fn len(&self) -> usize {
        self.assignment.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assignment.is_empty()
    }

    /// All groups in index order.
    pub fn groups(&self) -> &[Vec<NodeId>] {
        &self.groups
    }

    /// Members of one group.
    pub fn group(&self, g: usize) -> &[NodeId] {
        &self.groups[g]
    }

    /// Group index of a node.
    pub fn group_of(&self, node: NodeId) -> usize {
        self.assignment[node]
    }

    /// Node → group lookup, indexed by [`NodeId`].
    pub fn assignment(&self) -> &[usize] {
        &self.assignment
    }

    /// Size of the largest group.
    pub fn max_group_size(&self) -> usize {
        self.groups.iter().map(Vec::len).max().unwrap_or(0)
    }

    pub(crate) fn groups_mut(&mut self) -> &mut [Vec<NodeId>] {
        &mut self.groups
    }

    pub(crate) fn set_group_of(&mut self, node: NodeId, g: usize) {
        self.assignment[node] = g;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square() -> Graph {
        Graph::from_edges([("a", "b"), ("c", "d")])
    }

    #[test]
    fn test_from_labels_roundtrip() {
        let graph = square();
        let p = Partition::from_labels(&graph, &[vec!["b", "c"], vec!["a", "d"]]).unwrap();

        assert_eq!(p.num_groups(), 2);
        assert_eq!(p.len(), 4);
        assert_eq!(
            p.to_labels(&graph),
            vec![vec!["b".to_string(), "c".into()], vec!["a".into(), "d".into()]]
        );
        assert_eq!(p.group_of(graph.node_id("a").unwrap()), 1);
        assert_eq!(p.group_of(graph.node_id("c").unwrap()), 0);
    }

    #[test]
    fn test_from_labels_rejects_unknown() {
        let err = Partition::from_labels(&square(), &[vec!["a", "b", "x"], vec!["c", "d"]])
            .unwrap_err();
        assert!(matches!(err, Error::UnknownNode { node, .. } if node == "x"));
    }

    #[test]
    fn test_from_labels_rejects_duplicate() {
        let err =
            Partition::from_labels(&square(), &[vec!["a", "b"], vec!["c", "d", "a"]]).unwrap_err();
        assert_eq!(err, Error::DuplicateNode { node: "a".into() });
    }

    #[test]
    fn test_from_labels_rejects_missing() {
        let err = Partition::from_labels(&square(), &[vec!["a", "b"], vec!["c"]]).unwrap_err();
        assert_eq!(err, Error::MissingNode { node: "d".into() });
    }

    #[test]
    fn test_from_labels_rejects_empty_group() {
        let err = Partition::from_labels(&square(), &[vec!["a", "b", "c", "d"], vec![]])
            .unwrap_err();
        assert_eq!(err, Error::EmptyGroup { group: 1 });
    }

    #[test]
    fn test_from_groups_builds_lookup() {
        let p = Partition::from_groups(vec![vec![3, 1], vec![0], vec![2]]).unwrap();
        assert_eq!(p.len(), 4);
        assert_eq!(p.assignment(), &[1, 0, 2, 0]);
        assert_eq!(p.group(0), &[3, 1]);
    }

    #[test]
    fn test_from_groups_rejects_malformed() {
        assert_eq!(
            Partition::from_groups(vec![vec![0, 1, 2, 3], vec![]]).unwrap_err(),
            Error::EmptyGroup { group: 1 }
        );
        assert_eq!(
            Partition::from_groups(vec![vec![0, 4], vec![1]]).unwrap_err(),
            Error::NodeOutOfRange { node: 4, nodes: 3 }
        );
        assert_eq!(
            Partition::from_groups(vec![vec![0, 1], vec![1]]).unwrap_err(),
            Error::DuplicateNode { node: "1".into() }
        );
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_serde_keeps_only_groups() {
        let p = Partition::from_groups(vec![vec![1, 2], vec![0, 3]]).unwrap();
        let json = serde_json::to_string(&p).unwrap();
        assert_eq!(json, r#"{"groups":[[1,2],[0,3]]}"#);

        let back: Partition = serde_json::from_str(&json).unwrap();
        assert_eq!(back, p);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_serde_rejects_invalid_partition() {
        let empty = serde_json::from_str::<Partition>(r#"{"groups":[[0,1,2,3],[]]}"#);
        assert!(empty.unwrap_err().to_string().contains("group 1 is empty"));

        let duplicate = serde_json::from_str::<Partition>(r#"{"groups":[[0,1],[1]]}"#);
        assert!(duplicate.is_err());

        // A stale lookup field is ignored, never trusted.
        let p: Partition =
            serde_json::from_str(r#"{"groups":[[0,1],[2,3]],"assignment":[0,0,0,0]}"#).unwrap();
        assert_eq!(p.assignment(), &[0, 0, 1, 1]);
    }
}
