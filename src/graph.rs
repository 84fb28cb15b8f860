//! Undirected affinity graph with labeled nodes.
//!
//! Nodes are stored once and addressed by a dense [`NodeId`], so the
//! partition and cost code can work on flat arrays instead of label maps.
//! Edges are unordered pairs; adding the same pair twice keeps one edge.

use std::collections::{HashMap, HashSet};

use crate::error::{Error, Result};

/// Dense index of a node within one [`Graph`].
pub type NodeId = usize;

/// An undirected graph of labeled nodes.
///
/// # Examples
///
/// ```
/// use u_affinity::graph::Graph;
///
/// let graph = Graph::from_edges([("a", "b"), ("c", "d"), ("b", "a")]);
/// assert_eq!(graph.number_of_nodes(), 4);
/// assert_eq!(graph.number_of_edges(), 2);
///
/// let trimmed = graph.remove_node("a");
/// assert_eq!(trimmed.number_of_edges(), 1);
/// assert!(!trimmed.contains_node("a"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct Graph {
    labels: Vec<String>,
    index: HashMap<String, NodeId>,
    /// Canonical `(min, max)` endpoint pairs in insertion order.
    edges: Vec<(NodeId, NodeId)>,
    edge_set: HashSet<(NodeId, NodeId)>,
}

impl Graph {
    /// Creates an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a graph from label pairs, adding endpoints as needed.
    pub fn from_edges<I, S>(edges: I) -> Self
    where
        I: IntoIterator<Item = (S, S)>,
        S: AsRef<str>,
    {
        let mut graph = Self::new();
        for (a, b) in edges {
            graph.add_edge(a.as_ref(), b.as_ref());
        }
        graph
    }

    /// Builds a graph from an explicit node list and edge list.
    ///
    /// Unlike [`Graph::from_edges`], every edge endpoint must already be
    /// declared in `nodes`.
    pub fn from_parts<N, E, S>(nodes: N, edges: E) -> Result<Self>
    where
        N: IntoIterator<Item = S>,
        E: IntoIterator<Item = (S, S)>,
        S: AsRef<str>,
    {
        let mut graph = Self::new();
        for node in nodes {
            graph.add_node(node.as_ref());
        }
        for (a, b) in edges {
            let (a, b) = (a.as_ref(), b.as_ref());
            let u = graph.require(a)?;
            let v = graph.require(b)?;
            graph.insert_edge(u, v);
        }
        Ok(graph)
    }

    fn require(&self, label: &str) -> Result<NodeId> {
        self.node_id(label).ok_or_else(|| Error::UnknownNode {
            node: label.to_string(),
            context: "edge list".to_string(),
        })
    }

    /// Adds a node if absent and returns its id.
    pub fn add_node(&mut self, label: &str) -> NodeId {
        if let Some(&id) = self.index.get(label) {
            return id;
        }
        let id = self.labels.len();
        self.labels.push(label.to_string());
        self.index.insert(label.to_string(), id);
        id
    }

    /// Adds an undirected edge, creating missing endpoints.
    ///
    /// Returns `false` if the edge was already present.
    pub fn add_edge(&mut self, a: &str, b: &str) -> bool {
        let u = self.add_node(a);
        let v = self.add_node(b);
        self.insert_edge(u, v)
    }

    fn insert_edge(&mut self, u: NodeId, v: NodeId) -> bool {
        let key = (u.min(v), u.max(v));
        if self.edge_set.insert(key) {
            self.edges.push(key);
            true
        } else {
            false
        }
    }

    /// Number of nodes.
    pub fn number_of_nodes(&self) -> usize {
        self.labels.len()
    }

    /// Number of undirected edges.
    pub fn number_of_edges(&self) -> usize {
        self.edges.len()
    }

    /// Iterates each undirected edge exactly once as a label pair.
    pub fn edges(&self) -> impl Iterator<Item = (&str, &str)> + '_ {
        self.edges
            .iter()
            .map(|&(u, v)| (self.labels[u].as_str(), self.labels[v].as_str()))
    }

    /// Edge endpoints as node ids.
    pub fn edge_ids(&self) -> &[(NodeId, NodeId)] {
        &self.edges
    }

    /// Whether a node with this label exists.
    pub fn contains_node(&self, label: &str) -> bool {
        self.index.contains_key(label)
    }

    /// Looks up a node id by label.
    pub fn node_id(&self, label: &str) -> Option<NodeId> {
        self.index.get(label).copied()
    }

    /// Label of a node id.
    ///
    /// # Panics
    ///
    /// Panics if `id` is out of range.
    pub fn label(&self, id: NodeId) -> &str {
        &self.labels[id]
    }

    /// Node labels in id order.
    pub fn nodes(&self) -> impl Iterator<Item = &str> + '_ {
        self.labels.iter().map(String::as_str)
    }

    /// Returns a copy without `label` and its incident edges.
    ///
    /// Removing a node that is not present returns an identical copy.
    pub fn remove_node(&self, label: &str) -> Graph {
        let Some(removed) = self.node_id(label) else {
            return self.clone();
        };

        let mut graph = Graph::new();
        for (id, name) in self.labels.iter().enumerate() {
            if id != removed {
                graph.add_node(name);
            }
        }
        for &(u, v) in &self.edges {
            if u != removed && v != removed {
                graph.add_edge(&self.labels[u], &self.labels[v]);
            }
        }
        graph
    }
}
