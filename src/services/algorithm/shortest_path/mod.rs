//! 最短路径算法
//!
//! Dijkstra 与 A* 在广度优先引擎上换用优先队列；Bellman-Ford、DAG 最短路径
//! 和 Floyd-Warshall 各自运行松弛循环。所有算法都由松弛器与边权函数参数化。

pub mod astar;
pub mod bellman_ford;
pub mod dag;
pub mod dijkstra;
pub mod floyd_warshall;
pub mod relaxer;
pub mod visitor;

pub use astar::AStarShortestPath;
pub use bellman_ford::BellmanFordShortestPath;
pub use dag::DagShortestPath;
pub use dijkstra::DijkstraShortestPath;
pub use floyd_warshall::{FloydWarshallAllShortestPaths, PathCell, PathStep};
pub use relaxer::{
    relax, CriticalDistanceRelaxer, DistanceRelaxer, EdgeCountRelaxer, PrimRelaxer,
    ShortestDistanceRelaxer, CRITICAL_DISTANCE, EDGE_COUNT, PRIM, SHORTEST_DISTANCE,
};
pub use visitor::ShortestPathVisitor;

use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;

use crate::core::{AlgorithmError, AlgorithmResult};

/// 取边权，负权时报错
pub(crate) fn non_negative_weight<E, W>(weights: &W, edge: &E) -> AlgorithmResult<f64>
where
    E: fmt::Debug,
    W: Fn(&E) -> f64,
{
    let weight = weights(edge);
    if weight < 0.0 {
        return Err(AlgorithmError::NegativeWeight {
            edge: format!("{:?}", edge),
            weight,
        });
    }
    Ok(weight)
}

/// 读取单个顶点的距离；尚未运行时返回 `NotComputed`
pub(crate) fn lookup_distance<V>(
    distances: Option<&HashMap<V, f64>>,
    vertex: &V,
) -> AlgorithmResult<f64>
where
    V: Eq + Hash + fmt::Debug,
{
    distances
        .ok_or(AlgorithmError::NotComputed)?
        .get(vertex)
        .copied()
        .ok_or_else(|| AlgorithmError::vertex_not_found(vertex))
}
