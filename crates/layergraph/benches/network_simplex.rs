use criterion::{black_box, criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion};
use graphlib::{Graph, GraphOptions};
use layergraph::{EdgeLabel, GraphLabel, NodeLabel, Ranker};
use std::time::Duration;

#[derive(Debug, Clone)]
struct GraphSpec {
    node_ids: Vec<String>,
    edges: Vec<(usize, usize, usize, f64)>,
}

impl GraphSpec {
    fn build(&self) -> Graph<NodeLabel, EdgeLabel, GraphLabel> {
        let mut g: Graph<NodeLabel, EdgeLabel, GraphLabel> =
            Graph::new(GraphOptions { directed: true, multigraph: true, compound: false });

        for id in &self.node_ids {
            g.set_node(id.clone(), NodeLabel { width: 1.0, height: 1.0, ..Default::default() });
        }

        for &(from, to, minlen, weight) in &self.edges {
            if from >= self.node_ids.len() || to >= self.node_ids.len() || from == to {
                continue;
            }
            g.set_edge_with_label(self.node_ids[from].clone(), self.node_ids[to].clone(), EdgeLabel { minlen, weight, ..Default::default() });
        }

        g.graph_mut().ranker = Ranker::NetworkSimplex;
        g
    }
}

fn build_dag_spec(name: &str, node_count: usize, fanout: usize) -> GraphSpec {
    let node_ids: Vec<String> = (0..node_count).map(|i| format!("{name}_n{i}")).collect();
    let mut edges: Vec<(usize, usize, usize, f64)> = Vec::new();

    for i in 0..node_count.saturating_sub(1) {
        edges.push((i, i + 1, 1, 2.0));
    }

    for i in 0..node_count {
        for k in 2..=(fanout + 1) {
            let to = i.saturating_add(k);
            if to >= node_count {
                break;
            }
            edges.push((i, to, 1, 1.0));
        }

        let to = i.saturating_add(10);
        if to < node_count {
            edges.push((i, to, 2, 0.5));
        }
    }

    GraphSpec { node_ids, edges }
}

fn bench_network_simplex(c: &mut Criterion) {
    let mut group = c.benchmark_group("network_simplex");
    group.measurement_time(Duration::from_secs(10));

    let cases = [("dag_50_f3", 50usize, 3usize), ("dag_200_f4", 200usize, 4usize), ("dag_400_f4", 400usize, 4usize)];

    for (name, nodes, fanout) in cases {
        let spec = build_dag_spec(name, nodes, fanout);
        group.bench_with_input(BenchmarkId::new("layout::network_simplex", name), &spec, |b, spec| {
            b.iter_batched(
                || spec.build(),
                |mut g| {
                    layergraph::layout(black_box(&mut g)).unwrap();
                    black_box(g.node_count());
                },
                BatchSize::LargeInput,
            )
        });
    }

    group.finish();
}

criterion_group!(benches, bench_network_simplex);
criterion_main!(benches);
