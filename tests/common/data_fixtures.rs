//! 测试数据生成模块
//!
//! 提供各种测试图的生成函数

use graphalgo::graph::{AdjacencyGraph, Edge, TaggedEdge, UndirectedAdjacencyGraph};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

pub type WeightedEdge = TaggedEdge<i32, f64>;
pub type WeightedGraph = AdjacencyGraph<i32, WeightedEdge>;
pub type DirectedGraph = AdjacencyGraph<i32, Edge<i32>>;
pub type UndirectedGraph = UndirectedAdjacencyGraph<i32, Edge<i32>>;

/// 边权
pub fn weight(edge: &WeightedEdge) -> f64 {
    *edge.tag()
}

/// 创建带权边
pub fn weighted(source: i32, target: i32, w: f64) -> WeightedEdge {
    TaggedEdge::new(source, target, w)
}

/// 1-2-3-4-1 的四元环
pub fn undirected_square() -> UndirectedGraph {
    UndirectedAdjacencyGraph::from_edges(vec![
        Edge::new(1, 2),
        Edge::new(2, 3),
        Edge::new(3, 4),
        Edge::new(4, 1),
    ])
}

/// 1→2 (1), 2→3 (1), 1→3 (5)
pub fn weighted_triangle() -> WeightedGraph {
    AdjacencyGraph::from_edges(vec![
        weighted(1, 2, 1.0),
        weighted(2, 3, 1.0),
        weighted(1, 3, 5.0),
    ])
}

/// 由 `1 → 2 → 1` 构成、总权重为负的环
pub fn negative_two_cycle() -> WeightedGraph {
    AdjacencyGraph::from_edges(vec![weighted(1, 2, 1.0), weighted(2, 1, -2.0)])
}

/// `side × side` 网格，边向右和向下，权重由位置决定
pub fn grid(side: i32) -> WeightedGraph {
    let mut graph = AdjacencyGraph::new();
    graph.add_vertices(0..side * side);
    for row in 0..side {
        for col in 0..side {
            let v = row * side + col;
            if col + 1 < side {
                graph.add_edge(weighted(v, v + 1, f64::from((v % 7) + 1)));
            }
            if row + 1 < side {
                graph.add_edge(weighted(v, v + side, f64::from((v % 5) + 1)));
            }
        }
    }
    graph
}

/// 随机有向图，权重为 [1, max_weight] 的整数
pub fn random_graph(seed: u64, vertices: i32, edges: usize, max_weight: u32) -> WeightedGraph {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut graph = AdjacencyGraph::new();
    graph.add_vertices(0..vertices);
    for _ in 0..edges {
        let source = rng.gen_range(0..vertices);
        let target = rng.gen_range(0..vertices);
        let w = f64::from(rng.gen_range(1..=max_weight));
        graph.add_edge(weighted(source, target, w));
    }
    graph
}
