//! 最短路径基准测试
//!
//! 在带权网格上比较 Dijkstra、Bellman-Ford 与 A* 的耗时

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use graphalgo::core::{RootedAlgorithm, RootedSearchAlgorithm};
use graphalgo::graph::{AdjacencyGraph, TaggedEdge};
use graphalgo::services::algorithm::{
    AStarShortestPath, BellmanFordShortestPath, DijkstraShortestPath,
};
use std::hint::black_box;

type Grid = AdjacencyGraph<i32, TaggedEdge<i32, f64>>;

fn grid(side: i32) -> Grid {
    let mut graph = AdjacencyGraph::new();
    graph.add_vertices(0..side * side);
    for row in 0..side {
        for col in 0..side {
            let v = row * side + col;
            if col + 1 < side {
                graph.add_edge(TaggedEdge::new(v, v + 1, f64::from((v % 7) + 1)));
            }
            if row + 1 < side {
                graph.add_edge(TaggedEdge::new(v, v + side, f64::from((v % 5) + 1)));
            }
        }
    }
    graph
}

fn weight(edge: &TaggedEdge<i32, f64>) -> f64 {
    *edge.tag()
}

fn bench_dijkstra(c: &mut Criterion) {
    let mut group = c.benchmark_group("dijkstra_grid");
    for side in [16, 32, 64] {
        let graph = grid(side);
        group.bench_with_input(BenchmarkId::from_parameter(side), &graph, |b, graph| {
            b.iter(|| {
                let mut dijkstra = DijkstraShortestPath::new(graph, weight);
                dijkstra
                    .compute_from(0, &mut ())
                    .expect("dijkstra should succeed");
                black_box(dijkstra.try_get_distance(&(side * side - 1)))
            });
        });
    }
    group.finish();
}

fn bench_bellman_ford(c: &mut Criterion) {
    let mut group = c.benchmark_group("bellman_ford_grid");
    for side in [16, 32] {
        let graph = grid(side);
        group.bench_with_input(BenchmarkId::from_parameter(side), &graph, |b, graph| {
            b.iter(|| {
                let mut bellman_ford = BellmanFordShortestPath::new(graph, weight);
                bellman_ford
                    .compute_from(0, &mut ())
                    .expect("bellman-ford should succeed");
                black_box(bellman_ford.try_get_distance(&(side * side - 1)))
            });
        });
    }
    group.finish();
}

fn bench_astar(c: &mut Criterion) {
    let side = 64;
    let graph = grid(side);
    let target = side * side - 1;
    c.bench_function("astar_grid_64", |b| {
        b.iter(|| {
            let heuristic = |v: &i32| f64::from((side - 1 - v / side) + (side - 1 - v % side));
            let mut astar = AStarShortestPath::new(&graph, weight, heuristic);
            astar
                .compute_between(0, target, &mut ())
                .expect("a* should succeed");
            black_box(astar.try_get_distance(&target))
        });
    });
}

criterion_group!(benches, bench_dijkstra, bench_bellman_ford, bench_astar);
criterion_main!(benches);
