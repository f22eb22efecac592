//! 遍历引擎
//!
//! 广度优先、深度优先及其双向 / 无向变体，都由三色标记驱动。

pub mod bfs;
pub mod color;
pub mod dfs;
pub(crate) mod engine;
pub mod frontier;
pub mod topological_sort;
pub mod undirected;
pub mod visitor;

pub use bfs::BreadthFirstSearch;
pub use color::GraphColor;
pub use dfs::DepthFirstSearch;
pub use engine::EdgeFilter;
pub use frontier::{FifoFrontier, Frontier, FrontierUpdate, PriorityFrontier};
pub use topological_sort::TopologicalSort;
pub use undirected::{
    BidirectionalDepthFirstSearch, UndirectedBreadthFirstSearch, UndirectedDepthFirstSearch,
};
pub use visitor::{BfsVisitor, DfsVisitor, UndirectedBfsVisitor, UndirectedDfsVisitor};
