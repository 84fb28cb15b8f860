//! Affinity grouping by simulated annealing.
//!
//! Assigns the nodes of an undirected graph to a fixed number of
//! fixed-capacity groups so that as many edges as possible stay inside a
//! group, while named constraint sets are discouraged from landing
//! entirely in one group.
//!
//! - **Graph**: [`graph::Graph`], labeled nodes and undirected edges.
//! - **Partition**: [`partition::Partition`], random initialization and
//!   swap/relocate neighbor moves.
//! - **Cost**: [`cost::CostEvaluator`], `1 - same_group_edges / total_edges`
//!   with edges of fully confined constraint sets suppressed.
//! - **Simulated Annealing (SA)**: [`sa::SaRunner`], a Metropolis loop with
//!   geometric cooling, generic over [`sa::SaProblem`].
//! - **Restart search**: [`search::SearchRunner`], best of N independent
//!   anneals, optionally in parallel.
//!
//! # Quick start
//!
//! ```
//! use u_affinity::{Constraint, Graph, GroupingParams, GroupingProblem, SearchConfig, SearchRunner};
//!
//! let graph = Graph::from_edges([("A", "B"), ("C", "D"), ("B", "C")]);
//! let problem = GroupingProblem::new(
//!     graph,
//!     GroupingParams::new(2, 2),
//!     vec![Constraint::new("rowdy", &["C", "D"])],
//! )
//! .unwrap();
//!
//! let result = SearchRunner::run(&problem, &SearchConfig::default().with_seed(42)).unwrap();
//! assert!(result.score() >= 0.0);
//! ```
//!
//! Loading instances from disk and writing results are left to callers.

pub mod cost;
pub mod error;
pub mod graph;
pub mod partition;
pub mod problem;
pub mod sa;
pub mod search;

pub use cost::{cost, Constraint, CostEvaluator};
pub use error::{Error, Result};
pub use graph::{Graph, NodeId};
pub use partition::{build_initial, neighbor, GroupMove, GroupingParams, Partition};
pub use problem::{anneal, GroupingProblem};
pub use sa::{SaConfig, SaResult, SaRunner};
pub use search::{RunSummary, SearchConfig, SearchResult, SearchRunner};
