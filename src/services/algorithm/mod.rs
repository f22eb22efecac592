//! 算法模块
//!
//! 遍历、最短路径与欧拉路径算法

pub mod eulerian;
pub mod shortest_path;
pub mod traversal;

pub use eulerian::{
    eulerian_path_count, is_eulerian, odd_vertices, EulerianTrail, EulerianVisitor,
};
pub use shortest_path::{
    AStarShortestPath, BellmanFordShortestPath, DagShortestPath, DijkstraShortestPath,
    DistanceRelaxer, FloydWarshallAllShortestPaths, PathCell, PathStep, ShortestPathVisitor,
};
pub use traversal::{
    BfsVisitor, BidirectionalDepthFirstSearch, BreadthFirstSearch, DepthFirstSearch, DfsVisitor,
    GraphColor, TopologicalSort, UndirectedBfsVisitor, UndirectedBreadthFirstSearch,
    UndirectedDepthFirstSearch, UndirectedDfsVisitor,
};
