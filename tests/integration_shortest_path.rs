//! 最短路径集成测试
//!
//! 测试范围：
//! - Dijkstra / Bellman-Ford / Floyd-Warshall 在随机图上的相互校验
//! - 重复运行的幂等性
//! - 负权环检测
//! - A* 与 DAG 最短路径

mod common;

use common::assertions::{assert_err_with, assert_same_distances};
use common::data_fixtures::{
    grid, negative_two_cycle, random_graph, weight, weighted, weighted_triangle, WeightedGraph,
};
use common::{Event, EventLog};
use graphalgo::core::{
    Algorithm, ComputationHost, ComputationState, RootedAlgorithm, RootedSearchAlgorithm,
};
use graphalgo::graph::{AdjacencyGraph, Graph, GraphEdge};
use graphalgo::services::algorithm::shortest_path::CRITICAL_DISTANCE;
use graphalgo::services::algorithm::{
    AStarShortestPath, BellmanFordShortestPath, DagShortestPath, DijkstraShortestPath,
    FloydWarshallAllShortestPaths,
};

#[test]
fn test_triangle_dijkstra() {
    let graph = weighted_triangle();
    let mut dijkstra = DijkstraShortestPath::new(&graph, weight);
    let mut log = EventLog::default();
    let state = dijkstra
        .compute_from(1, &mut log)
        .expect("dijkstra should succeed");

    assert_eq!(state, ComputationState::Finished);
    assert_eq!(dijkstra.distance(&3), Ok(2.0));
    assert!(log.events.contains(&Event::Tree(2, 3)));
}

#[test]
fn test_dijkstra_matches_bellman_ford_on_random_graphs() {
    for seed in 0..8 {
        let graph = random_graph(seed, 30, 120, 20);
        let mut dijkstra = DijkstraShortestPath::new(&graph, weight);
        dijkstra.compute_from(0, &mut ()).expect("dijkstra should succeed");
        let mut bellman_ford = BellmanFordShortestPath::new(&graph, weight);
        bellman_ford
            .compute_from(0, &mut ())
            .expect("bellman-ford should succeed");

        assert!(!bellman_ford.found_negative_cycle());
        assert_same_distances(
            bellman_ford.distances().expect("computed"),
            dijkstra.distances().expect("computed"),
            "Dijkstra 与 Bellman-Ford ",
        );
    }
}

#[test]
fn test_floyd_warshall_matches_dijkstra_on_random_graphs() {
    for seed in 100..104 {
        let graph = random_graph(seed, 20, 60, 9);
        let mut floyd = FloydWarshallAllShortestPaths::new(&graph, weight);
        floyd.compute().expect("floyd-warshall should succeed");

        for source in graph.vertices() {
            let mut dijkstra = DijkstraShortestPath::new(&graph, weight);
            dijkstra
                .compute_from(*source, &mut ())
                .expect("dijkstra should succeed");
            for target in graph.vertices() {
                let expected = dijkstra.distance(target).expect("distance");
                let actual = floyd.distance(source, target).expect("distance");
                assert_eq!(
                    expected, actual,
                    "{} -> {} 的距离不一致 (seed {})",
                    source, target, seed
                );
            }
        }
    }
}

#[test]
fn test_floyd_warshall_paths_have_matching_weight() {
    let graph = random_graph(7, 15, 45, 9);
    let mut floyd = FloydWarshallAllShortestPaths::new(&graph, weight);
    floyd.compute().expect("floyd-warshall should succeed");

    for ((source, target), (path, distance)) in floyd.all_paths().expect("computed") {
        let total: f64 = path.iter().map(weight).sum();
        assert_eq!(total, distance);
        assert_eq!(path.first().map(|e| *e.source()), Some(source));
        assert_eq!(path.last().map(|e| *e.target()), Some(target));
        for pair in path.windows(2) {
            assert_eq!(pair[0].target(), pair[1].source());
        }
    }
}

#[test]
fn test_repeated_runs_are_idempotent() {
    let graph = random_graph(42, 25, 80, 15);

    let mut dijkstra = DijkstraShortestPath::new(&graph, weight);
    dijkstra.compute_from(3, &mut ()).expect("dijkstra should succeed");
    let first = dijkstra.distances().expect("computed").clone();
    dijkstra.compute_with(&mut ()).expect("dijkstra should succeed");
    assert_eq!(&first, dijkstra.distances().expect("computed"));

    let mut bellman_ford = BellmanFordShortestPath::new(&graph, weight);
    bellman_ford
        .compute_from(3, &mut ())
        .expect("bellman-ford should succeed");
    let first = bellman_ford.distances().expect("computed").clone();
    bellman_ford
        .compute_with(&mut ())
        .expect("bellman-ford should succeed");
    assert_eq!(&first, bellman_ford.distances().expect("computed"));
}

#[test]
fn test_bellman_ford_negative_cycle() {
    let graph = negative_two_cycle();
    let mut bellman_ford = BellmanFordShortestPath::new(&graph, weight);
    let state = bellman_ford
        .compute_from(1, &mut ())
        .expect("negative cycles are reported as data");

    assert_eq!(state, ComputationState::Finished);
    assert!(bellman_ford.found_negative_cycle());
    let cycle = bellman_ford
        .negative_cycle()
        .expect("computed")
        .expect("cycle is reachable");
    let total: f64 = cycle.iter().map(weight).sum();
    assert!(total < 0.0);
}

#[test]
fn test_bellman_ford_unreachable_negative_cycle() {
    let mut graph = negative_two_cycle();
    graph.add_vertex(9);
    graph.add_edge(weighted(9, 9, 1.0));
    let mut bellman_ford = BellmanFordShortestPath::new(&graph, weight);
    bellman_ford
        .compute_from(9, &mut ())
        .expect("bellman-ford should succeed");
    assert!(!bellman_ford.found_negative_cycle());
}

#[test]
fn test_floyd_warshall_negative_cycle() {
    let graph = negative_two_cycle();
    let mut floyd = FloydWarshallAllShortestPaths::new(&graph, weight);
    assert_err_with(floyd.compute(), "负权环");
}

#[test]
fn test_dijkstra_rejects_negative_weight() {
    let graph = negative_two_cycle();
    let mut dijkstra = DijkstraShortestPath::new(&graph, weight);
    assert_err_with(dijkstra.compute_from(1, &mut ()), "权重为负");
    assert_eq!(dijkstra.state(), ComputationState::NotRunning);
}

#[test]
fn test_astar_on_grid_matches_dijkstra() {
    let side = 12;
    let graph = grid(side);
    let target = side * side - 1;

    let mut dijkstra = DijkstraShortestPath::new(&graph, weight);
    dijkstra.compute_from(0, &mut ()).expect("dijkstra should succeed");

    // 曼哈顿距离，每步权重至少为 1，所以是可采纳的
    let heuristic = |v: &i32| f64::from((side - 1 - v / side) + (side - 1 - v % side));
    let mut astar = AStarShortestPath::new(&graph, weight, heuristic);
    astar
        .compute_between(0, target, &mut ())
        .expect("a* should succeed");

    assert_eq!(astar.try_get_target(), Some(&target));
    assert_eq!(astar.distance(&target), dijkstra.distance(&target));
}

#[test]
fn test_dag_critical_path() {
    let graph: WeightedGraph = AdjacencyGraph::from_edges(vec![
        weighted(1, 2, 3.0),
        weighted(1, 3, 1.0),
        weighted(2, 4, 2.0),
        weighted(3, 4, 7.0),
    ]);
    let mut shortest = DagShortestPath::new(&graph, weight);
    shortest.compute_from(1, &mut ()).expect("dag should succeed");
    assert_eq!(shortest.distance(&4), Ok(5.0));

    let mut critical = DagShortestPath::with_relaxer(&graph, weight, CRITICAL_DISTANCE);
    critical.compute_from(1, &mut ()).expect("dag should succeed");
    assert_eq!(critical.distance(&4), Ok(8.0));
}

#[test]
fn test_grid_edge_count() {
    let graph = grid(4);
    assert_eq!(graph.vertex_count(), 16);
    assert_eq!(graph.edge_count(), 24);
}
