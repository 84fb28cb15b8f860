//! Criterion benchmarks for u-affinity.
//!
//! Uses synthetic random graphs to measure cost evaluation and a full
//! annealing schedule.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::Rng;
use u_affinity::{Constraint, Graph, GroupingParams, GroupingProblem, SaConfig};
use u_numflow::random::create_rng;

// ===========================================================================
// Synthetic instance: random graph with average degree ~6
// ===========================================================================

fn random_instance(nodes: usize, groups: usize, seed: u64) -> GroupingProblem {
    let mut rng = create_rng(seed);
    let labels: Vec<String> = (0..nodes).map(|i| format!("s{i}")).collect();

    let mut graph = Graph::new();
    for label in &labels {
        graph.add_node(label);
    }
    for _ in 0..nodes * 3 {
        let u = rng.random_range(0..nodes);
        let v = rng.random_range(0..nodes);
        graph.add_edge(&labels[u], &labels[v]);
    }

    let constraints = (0..nodes / 10)
        .map(|i| {
            let members: Vec<&str> = (0..4)
                .map(|_| labels[rng.random_range(0..nodes)].as_str())
                .collect();
            Constraint::unnamed(i, &members)
        })
        .collect();

    let capacity = nodes.div_ceil(groups) + 2;
    GroupingProblem::new(graph, GroupingParams::new(groups, capacity), constraints)
        .expect("valid synthetic instance")
}

// ===========================================================================
// Benchmarks
// ===========================================================================

fn bench_cost(c: &mut Criterion) {
    let mut group = c.benchmark_group("cost_evaluate");

    for &(nodes, groups) in &[(50usize, 5usize), (200, 10), (1000, 25)] {
        let problem = random_instance(nodes, groups, 42);
        let mut rng = create_rng(7);
        let partition = problem.build_initial(&mut rng).expect("initial");
        group.bench_with_input(
            BenchmarkId::from_parameter(nodes),
            &(problem, partition),
            |b, (p, s)| b.iter(|| black_box(p.evaluator().evaluate(black_box(s)))),
        );
    }
    group.finish();
}

fn bench_anneal(c: &mut Criterion) {
    let mut group = c.benchmark_group("anneal");
    group.sample_size(10);

    for &(nodes, groups) in &[(50usize, 5usize), (200, 10)] {
        let problem = random_instance(nodes, groups, 42);
        let config = SaConfig::default().with_seed(42);
        group.bench_with_input(
            BenchmarkId::from_parameter(nodes),
            &(problem, config),
            |b, (p, c)| {
                b.iter(|| {
                    let mut rng = create_rng(1);
                    let start = p.build_initial(&mut rng).expect("initial");
                    let result = p.anneal(black_box(start), black_box(c));
                    black_box(result)
                })
            },
        );
    }
    group.finish();
}

criterion_group!(benches, bench_cost, bench_anneal);
criterion_main!(benches);
