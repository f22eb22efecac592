//! 遍历集成测试
//!
//! 测试范围：
//! - 无向四元环上的广度优先搜索
//! - 有向图上的广度 / 深度优先搜索与边分类
//! - 多连通分量、最大深度、拓扑排序

mod common;

use common::data_fixtures::{undirected_square, DirectedGraph};
use common::{Event, EventLog};
use graphalgo::config::AlgorithmConfig;
use graphalgo::core::{Algorithm, AlgorithmError, ComputationState, RootedAlgorithm};
use graphalgo::graph::{AdjacencyGraph, Edge, Graph, GraphEdge};
use graphalgo::services::algorithm::{
    BreadthFirstSearch, DepthFirstSearch, GraphColor, TopologicalSort,
    UndirectedBreadthFirstSearch,
};

fn diamond() -> DirectedGraph {
    AdjacencyGraph::from_edges(vec![
        Edge::new(1, 2),
        Edge::new(1, 3),
        Edge::new(2, 4),
        Edge::new(3, 4),
    ])
}

// ==================== 无向广度优先 ====================

#[test]
fn test_undirected_square_bfs() {
    let graph = undirected_square();
    let mut bfs = UndirectedBreadthFirstSearch::new(&graph);
    let mut log = EventLog::default();
    let state = bfs.compute_from(1, &mut log).expect("bfs should succeed");

    assert_eq!(state, ComputationState::Finished);
    assert_eq!(log.discovered(), vec![1, 2, 4, 3]);
    assert_eq!(log.count(|e| matches!(e, Event::Tree(..))), 3);
    assert_eq!(log.count(|e| matches!(e, Event::NonTree(..))), 1);
    // 每条边恰好被检查一次
    assert_eq!(log.examined_edges, graph.edge_count());
    for v in 1..=4 {
        assert_eq!(bfs.vertex_color(&v), Some(GraphColor::Black));
    }
}

#[test]
fn test_undirected_bfs_each_vertex_discovered_and_finished_once() {
    let graph = undirected_square();
    let mut bfs = UndirectedBreadthFirstSearch::new(&graph);
    let mut log = EventLog::default();
    bfs.compute_from(3, &mut log).expect("bfs should succeed");

    let mut discovered = log.discovered();
    let mut finished = log.finished_vertices();
    discovered.sort();
    finished.sort();
    assert_eq!(discovered, vec![1, 2, 3, 4]);
    assert_eq!(finished, vec![1, 2, 3, 4]);
}

// ==================== 有向广度优先 ====================

#[test]
fn test_directed_bfs_order() {
    let graph = diamond();
    let mut bfs = BreadthFirstSearch::new(&graph);
    let mut log = EventLog::default();
    bfs.compute_from(1, &mut log).expect("bfs should succeed");

    assert_eq!(log.discovered(), vec![1, 2, 3, 4]);
    assert_eq!(
        log.count(|e| matches!(e, Event::Tree(..))),
        3,
        "四个顶点的生成树有三条边"
    );
    assert_eq!(log.events.iter().filter(|e| **e == Event::NonTree(3, 4)).count(), 1);
}

#[test]
fn test_bfs_unknown_root() {
    let graph = diamond();
    let mut bfs = BreadthFirstSearch::new(&graph);
    let err = bfs.compute_from(42, &mut ()).expect_err("root must exist");
    assert_eq!(err, AlgorithmError::VertexNotFound("42".to_string()));
    assert_eq!(bfs.try_get_root(), None);
}

#[test]
fn test_bfs_all_components_from_config() {
    let mut graph = diamond();
    graph.add_vertices(vec![10, 11]);
    graph.add_edge(Edge::new(10, 11));

    let config = AlgorithmConfig {
        process_all_components: true,
        ..AlgorithmConfig::default()
    };
    let mut bfs = BreadthFirstSearch::new(&graph).with_config(&config);
    assert!(bfs.process_all_components());
    let mut log = EventLog::default();
    bfs.compute_with(&mut log).expect("bfs should succeed");

    assert_eq!(log.discovered(), vec![1, 2, 3, 4, 10, 11]);
    assert!(bfs.colors().values().all(|c| *c == GraphColor::Black));
}

#[test]
fn test_bfs_root_component_only() {
    let mut graph = diamond();
    graph.add_vertex(10);
    let mut bfs = BreadthFirstSearch::new(&graph);
    bfs.compute_from(2, &mut ()).expect("bfs should succeed");

    assert_eq!(bfs.vertex_color(&4), Some(GraphColor::Black));
    assert_eq!(bfs.vertex_color(&1), Some(GraphColor::White));
    assert_eq!(bfs.vertex_color(&10), Some(GraphColor::White));
}

#[test]
fn test_bfs_edge_filter() {
    let graph = diamond();
    let mut bfs = BreadthFirstSearch::new(&graph)
        .with_edge_filter(|edges| edges.into_iter().filter(|e| *e.target() != 3).collect());
    bfs.compute_from(1, &mut ()).expect("bfs should succeed");

    assert_eq!(bfs.vertex_color(&3), Some(GraphColor::White));
    assert_eq!(bfs.vertex_color(&4), Some(GraphColor::Black));
}

// ==================== 深度优先 ====================

#[test]
fn test_dfs_edge_classification() {
    let graph: DirectedGraph = AdjacencyGraph::from_edges(vec![
        Edge::new(1, 2),
        Edge::new(2, 3),
        Edge::new(3, 1),
        Edge::new(1, 3),
    ]);
    let mut dfs = DepthFirstSearch::new(&graph);
    let mut log = EventLog::default();
    dfs.compute_from(1, &mut log).expect("dfs should succeed");

    assert_eq!(log.discovered(), vec![1, 2, 3]);
    assert_eq!(log.finished_vertices(), vec![3, 2, 1]);
    assert!(log.events.contains(&Event::Back(3, 1)));
    assert!(log.events.contains(&Event::ForwardOrCross(1, 3)));
    assert_eq!(log.examined_edges, 4);
}

#[test]
fn test_dfs_max_depth() {
    let graph: DirectedGraph =
        AdjacencyGraph::from_edges((0..5).map(|i| Edge::new(i, i + 1)).collect::<Vec<_>>());
    let mut dfs = DepthFirstSearch::new(&graph);
    dfs.set_max_depth(Some(2));
    let mut log = EventLog::default();
    dfs.compute_from(0, &mut log).expect("dfs should succeed");

    // 3 在深度 3 被发现后立即完成
    assert_eq!(log.discovered(), vec![0, 1, 2, 3]);
    assert_eq!(dfs.vertex_color(&3), Some(GraphColor::Black));
    assert_eq!(dfs.vertex_color(&4), Some(GraphColor::White));
}

#[test]
fn test_dfs_reruns_are_identical() {
    let graph = diamond();
    let mut dfs = DepthFirstSearch::new(&graph);

    let mut first = EventLog::default();
    dfs.compute_from(1, &mut first).expect("dfs should succeed");
    let mut second = EventLog::default();
    dfs.compute_with(&mut second).expect("dfs should succeed");

    assert_eq!(first.events, second.events);
}

// ==================== 拓扑排序 ====================

#[test]
fn test_topological_sort() {
    let graph = diamond();
    let mut sort = TopologicalSort::new(&graph);
    sort.compute().expect("topological sort should succeed");

    let order = sort.sorted_vertices().expect("computed").to_vec();
    let position = |v: i32| order.iter().position(|x| *x == v).expect("vertex in order");
    for edge in graph.edges() {
        assert!(position(*edge.source()) < position(*edge.target()));
    }
}

#[test]
fn test_topological_sort_rejects_cycle() {
    let graph: DirectedGraph = AdjacencyGraph::from_edges(vec![Edge::new(1, 2), Edge::new(2, 1)]);
    let mut sort = TopologicalSort::new(&graph);
    assert_eq!(sort.compute(), Err(AlgorithmError::NonAcyclicGraph));
    assert_eq!(sort.sorted_vertices(), Err(AlgorithmError::NotComputed));
}
