//! Shortest Path Benchmarks
//!
//! Runs Dijkstra on seeded random graphs with both heap implementations.
//!
//! ## Graph families
//!
//! - **Grid**: `side * side` vertices, 4-neighbour arcs with random weights.
//!   Road-network-like, few decrease_key calls per vertex
//! - **Dense**: every vertex has `degree` random out-arcs, many more
//!   decrease_key calls per pop
//!
//! ## Running
//!
//! ```bash
//! cargo bench --bench dijkstra_bench
//! ```

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use fibonacci_sssp::binary::IndexedBinaryHeap;
use fibonacci_sssp::dijkstra::dijkstra_with;
use fibonacci_sssp::fibonacci::FibonacciHeap;
use fibonacci_sssp::graph::AdjacencyGraph;

/// Linear congruential generator for reproducible random numbers
struct Lcg {
    state: u64,
}

impl Lcg {
    fn new(seed: u64) -> Self {
        Lcg { state: seed }
    }

    fn next(&mut self) -> u64 {
        self.state = self.state.wrapping_mul(6364136223846793005).wrapping_add(1);
        self.state >> 33
    }

    fn next_range(&mut self, min: u64, max: u64) -> u64 {
        min + self.next() % (max - min)
    }
}

fn grid_graph(side: u32, seed: u64) -> AdjacencyGraph<u32, u64> {
    let mut rng = Lcg::new(seed);
    let mut graph = AdjacencyGraph::directed();
    for row in 0..side {
        for col in 0..side {
            let v = row * side + col;
            if col + 1 < side {
                graph.add_edge(v, v + 1, rng.next_range(1, 1000));
                graph.add_edge(v + 1, v, rng.next_range(1, 1000));
            }
            if row + 1 < side {
                graph.add_edge(v, v + side, rng.next_range(1, 1000));
                graph.add_edge(v + side, v, rng.next_range(1, 1000));
            }
        }
    }
    graph
}

fn dense_graph(n: u32, degree: u32, seed: u64) -> AdjacencyGraph<u32, u64> {
    let mut rng = Lcg::new(seed);
    let mut graph = AdjacencyGraph::directed();
    for u in 0..n {
        graph.add_vertex(u);
        for _ in 0..degree {
            let v = rng.next_range(0, n as u64) as u32;
            graph.add_edge(u, v, rng.next_range(1, 10_000));
        }
    }
    graph
}

fn bench_grid(c: &mut Criterion) {
    let mut group = c.benchmark_group("dijkstra_grid");
    group.sample_size(20);
    for side in [32u32, 100, 200] {
        let graph = grid_graph(side, 11);
        let label = format!("{side}x{side}");
        group.bench_with_input(BenchmarkId::new("fibonacci", &label), &graph, |b, g| {
            b.iter(|| dijkstra_with::<_, FibonacciHeap<_, _>>(black_box(g), &0).unwrap())
        });
        group.bench_with_input(BenchmarkId::new("binary", &label), &graph, |b, g| {
            b.iter(|| dijkstra_with::<_, IndexedBinaryHeap<_, _>>(black_box(g), &0).unwrap())
        });
    }
    group.finish();
}

fn bench_dense(c: &mut Criterion) {
    let mut group = c.benchmark_group("dijkstra_dense");
    group.sample_size(20);
    for (n, degree) in [(1_000u32, 32u32), (5_000, 64)] {
        let graph = dense_graph(n, degree, 23);
        let label = format!("n={n},d={degree}");
        group.bench_with_input(BenchmarkId::new("fibonacci", &label), &graph, |b, g| {
            b.iter(|| dijkstra_with::<_, FibonacciHeap<_, _>>(black_box(g), &0).unwrap())
        });
        group.bench_with_input(BenchmarkId::new("binary", &label), &graph, |b, g| {
            b.iter(|| dijkstra_with::<_, IndexedBinaryHeap<_, _>>(black_box(g), &0).unwrap())
        });
    }
    group.finish();
}

criterion_group!(benches, bench_grid, bench_dense);
criterion_main!(benches);
