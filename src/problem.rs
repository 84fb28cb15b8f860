//! The affinity grouping problem as an annealing target.

use rand::Rng;

use crate::cost::{Constraint, CostEvaluator};
use crate::error::{Error, Result};
use crate::graph::Graph;
use crate::partition::{self, GroupMove, GroupingParams, Partition};
use crate::sa::{SaConfig, SaProblem, SaResult, SaRunner};

/// One validated problem instance: graph, grouping parameters, and
/// constraint list.
///
/// Construction rejects every malformed instance up front, so building
/// partitions, scoring, and annealing cannot fail afterwards except on
/// caller-supplied partitions or configs.
///
/// # Examples
///
/// ```
/// use u_affinity::{Constraint, Graph, GroupingParams, GroupingProblem, SaConfig};
/// use u_numflow::random::create_rng;
///
/// let graph = Graph::from_edges([("A", "B"), ("C", "D")]);
/// let problem = GroupingProblem::new(graph, GroupingParams::new(2, 2), vec![]).unwrap();
///
/// let mut rng = create_rng(42);
/// let start = problem.build_initial(&mut rng).unwrap();
/// let result = problem.anneal(start, &SaConfig::default().with_seed(42)).unwrap();
/// assert!(result.cost <= 1.0);
/// ```
#[derive(Debug, Clone)]
pub struct GroupingProblem {
    graph: Graph,
    params: GroupingParams,
    constraints: Vec<Constraint>,
    evaluator: CostEvaluator,
}

impl GroupingProblem {
    /// Validates and bundles an instance.
    ///
    /// # Errors
    ///
    /// Any configuration error: bad parameters, too many groups, not enough
    /// capacity, an edgeless graph, or a constraint naming an unknown node.
    pub fn new(graph: Graph, params: GroupingParams, constraints: Vec<Constraint>) -> Result<Self> {
        params.check_fits(graph.number_of_nodes())?;
        let evaluator = CostEvaluator::new(&graph, &constraints)?;
        Ok(Self {
            graph,
            params,
            constraints,
            evaluator,
        })
    }

    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    pub fn params(&self) -> GroupingParams {
        self.params
    }

    pub fn constraints(&self) -> &[Constraint] {
        &self.constraints
    }

    pub fn evaluator(&self) -> &CostEvaluator {
        &self.evaluator
    }

    /// Random feasible starting partition.
    pub fn build_initial<R: Rng>(&self, rng: &mut R) -> Result<Partition> {
        partition::build_initial(&self.graph, &self.params, rng)
    }

    /// Builds a partition from labeled groups and checks it fits this
    /// instance.
    pub fn partition_from_labels<S: AsRef<str>>(&self, groups: &[Vec<S>]) -> Result<Partition> {
        let partition = Partition::from_labels(&self.graph, groups)?;
        self.check_partition(&partition)?;
        Ok(partition)
    }

    /// Checks that a partition belongs to this instance: same node count,
    /// same group count, and no empty group.
    pub fn check_partition(&self, partition: &Partition) -> Result<()> {
        self.evaluator.check(partition)?;
        if partition.num_groups() != self.params.num_groups {
            return Err(Error::GroupCountMismatch {
                expected: self.params.num_groups,
                found: partition.num_groups(),
            });
        }
        if let Some(group) = partition.groups().iter().position(Vec::is_empty) {
            return Err(Error::EmptyGroup { group });
        }
        Ok(())
    }

    /// Anneals from `initial`, seeding from `config.seed`.
    pub fn anneal(&self, initial: Partition, config: &SaConfig) -> Result<SaResult<Partition>> {
        SaRunner::run(self, initial, config)
    }

    /// Anneals from `initial` using a caller-owned RNG.
    pub fn anneal_with_rng<R: Rng>(
        &self,
        initial: Partition,
        config: &SaConfig,
        rng: &mut R,
    ) -> Result<SaResult<Partition>> {
        SaRunner::run_with_rng(self, initial, config, rng, None)
    }
}

impl SaProblem for GroupingProblem {
    type Solution = Partition;
    type Move = GroupMove;

    fn cost(&self, solution: &Partition) -> f64 {
        self.evaluator.evaluate(solution)
    }

    fn perturb<R: Rng>(&self, solution: &mut Partition, rng: &mut R) -> GroupMove {
        let mv = partition::propose(solution, self.params.capacity, rng);
        partition::apply(solution, mv);
        mv
    }

    fn revert(&self, solution: &mut Partition, mv: GroupMove) {
        partition::revert(solution, mv);
    }

    fn check(&self, solution: &Partition) -> Result<()> {
        self.check_partition(solution)
    }
}

/// Anneals one partition with the default schedule and returns the final
/// partition and its cost.
///
/// Validates the instance on every call; build a [`GroupingProblem`] once
/// when annealing the same instance repeatedly.
pub fn anneal<R: Rng>(
    initial: Partition,
    params: GroupingParams,
    graph: &Graph,
    constraints: &[Constraint],
    rng: &mut R,
) -> Result<(Partition, f64)> {
    let problem = GroupingProblem::new(graph.clone(), params, constraints.to_vec())?;
    let result = problem.anneal_with_rng(initial, &SaConfig::default(), rng)?;
    Ok((result.solution, result.cost))
}

#[cfg(test)]
mod tests {
    use super::*;
    use u_numflow::random::create_rng;

    fn pairs() -> Graph {
        Graph::from_edges([("A", "B"), ("C", "D")])
    }

    #[test]
    fn test_new_rejects_edgeless_graph() {
        let graph = Graph::from_parts(["a", "b"], Vec::<(&str, &str)>::new()).unwrap();
        let err = GroupingProblem::new(graph, GroupingParams::new(1, 2), vec![]).unwrap_err();
        assert_eq!(err, Error::NoEdges);
    }

    #[test]
    fn test_new_rejects_unknown_constraint_member() {
        let err = GroupingProblem::new(
            pairs(),
            GroupingParams::new(2, 2),
            vec![Constraint::new("r", &["A", "E"])],
        )
        .unwrap_err();
        assert!(matches!(err, Error::UnknownNode { node, .. } if node == "E"));
    }

    #[test]
    fn test_new_rejects_bad_params() {
        assert!(matches!(
            GroupingProblem::new(pairs(), GroupingParams::new(2, 1), vec![]),
            Err(Error::InsufficientCapacity { .. })
        ));
        assert!(matches!(
            GroupingProblem::new(pairs(), GroupingParams::new(5, 1), vec![]),
            Err(Error::TooManyGroups { .. })
        ));
        assert!(matches!(
            GroupingProblem::new(pairs(), GroupingParams::new(2, 0), vec![]),
            Err(Error::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_partition_group_count_checked() {
        let problem = GroupingProblem::new(pairs(), GroupingParams::new(2, 4), vec![]).unwrap();
        let err = problem
            .partition_from_labels(&[vec!["A"], vec!["B"], vec!["C", "D"]])
            .unwrap_err();
        assert_eq!(
            err,
            Error::GroupCountMismatch {
                expected: 2,
                found: 3
            }
        );
    }

    #[test]
    fn test_runner_rejects_foreign_partition() {
        let problem = GroupingProblem::new(pairs(), GroupingParams::new(2, 3), vec![]).unwrap();
        let small = Partition::from_groups(vec![vec![0, 1], vec![2]]).unwrap();
        let err = SaRunner::run(&problem, small, &SaConfig::default().with_seed(1)).unwrap_err();
        assert_eq!(
            err,
            Error::GraphMismatch {
                expected: 4,
                found: 3
            }
        );

        let single = Partition::from_groups(vec![vec![0, 1, 2, 3]]).unwrap();
        let err = problem.anneal(single, &SaConfig::default()).unwrap_err();
        assert!(matches!(err, Error::GroupCountMismatch { expected: 2, found: 1 }));
    }

    #[test]
    fn test_anneal_finds_pairing() {
        let problem = GroupingProblem::new(pairs(), GroupingParams::new(2, 2), vec![]).unwrap();
        let mut rng = create_rng(42);
        let start = problem
            .partition_from_labels(&[vec!["A", "C"], vec!["B", "D"]])
            .unwrap();
        let result = problem.anneal_with_rng(start, &SaConfig::default(), &mut rng).unwrap();

        assert_eq!(result.cost, 0.0);
        let a = problem.graph().node_id("A").unwrap();
        let b = problem.graph().node_id("B").unwrap();
        assert_eq!(result.solution.group_of(a), result.solution.group_of(b));
    }

    #[test]
    fn test_perturb_revert_leaves_solution_unchanged() {
        let problem = GroupingProblem::new(pairs(), GroupingParams::new(2, 3), vec![]).unwrap();
        let mut rng = create_rng(8);
        let mut p = problem.build_initial(&mut rng).unwrap();
        let before = p.clone();
        for _ in 0..200 {
            let mv = problem.perturb(&mut p, &mut rng);
            problem.revert(&mut p, mv);
            assert_eq!(p, before);
        }
    }

    #[test]
    fn test_free_anneal_matches_signature() {
        let graph = pairs();
        let params = GroupingParams::new(2, 2);
        let mut rng = create_rng(3);
        let start = partition::build_initial(&graph, &params, &mut rng).unwrap();
        let (solution, cost) = anneal(start, params, &graph, &[], &mut rng).unwrap();
        assert_eq!(solution.len(), 4);
        assert!((0.0..=1.0).contains(&cost));
    }
}
