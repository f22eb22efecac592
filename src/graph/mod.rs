//! 图结构契约
//!
//! 算法只通过这里的 trait 读取调用方提供的图，不关心具体存储。
//! 边访问器返回指向图内部存储的引用迭代器：同一条边无论从哪个端点
//! 取到，都必须是同一份存储的引用，无向遍历和欧拉回路依靠引用身份
//! 区分平行边。零大小的边类型所有值共用一个地址，这些算法会拒绝它们。

pub mod adjacency;
pub mod edge;
pub mod undirected;

pub use adjacency::AdjacencyGraph;
pub use edge::{Edge, GraphEdge, TaggedEdge};
pub use undirected::UndirectedAdjacencyGraph;

use std::fmt;
use std::hash::Hash;

use crate::core::{AlgorithmError, AlgorithmResult};

/// 确认边可以按引用区分
pub(crate) fn require_edge_identity<E>() -> AlgorithmResult<()> {
    if std::mem::size_of::<E>() == 0 {
        return Err(AlgorithmError::ZeroSizedEdge(std::any::type_name::<E>()));
    }
    Ok(())
}

/// 边引用迭代器
pub type EdgeIter<'a, E> = Box<dyn Iterator<Item = &'a E> + 'a>;

/// 顶点引用迭代器
pub type VertexIter<'a, V> = Box<dyn Iterator<Item = &'a V> + 'a>;

/// 图的基本访问接口
pub trait Graph {
    type Vertex: Clone + Eq + Hash + fmt::Debug;
    type Edge: GraphEdge<Self::Vertex>;

    /// 按插入顺序枚举顶点
    fn vertices(&self) -> VertexIter<'_, Self::Vertex>;

    fn contains_vertex(&self, vertex: &Self::Vertex) -> bool;

    fn vertex_count(&self) -> usize;

    fn edge_count(&self) -> usize;

    /// 按图顺序枚举所有边
    fn edges(&self) -> EdgeIter<'_, Self::Edge>;

    fn is_directed(&self) -> bool {
        true
    }
}

/// 可以枚举出边的图
pub trait IncidenceGraph: Graph {
    /// 顶点的出边；顶点不在图中时为空
    fn out_edges(&self, vertex: &Self::Vertex) -> EdgeIter<'_, Self::Edge>;

    fn out_degree(&self, vertex: &Self::Vertex) -> usize {
        self.out_edges(vertex).count()
    }

    /// 是否存在 `source -> target` 的边
    fn contains_edge_between(&self, source: &Self::Vertex, target: &Self::Vertex) -> bool {
        self.out_edges(source).any(|edge| edge.target() == target)
    }
}

/// 可以同时枚举入边的有向图
pub trait BidirectionalGraph: IncidenceGraph {
    fn in_edges(&self, vertex: &Self::Vertex) -> EdgeIter<'_, Self::Edge>;

    fn in_degree(&self, vertex: &Self::Vertex) -> usize {
        self.in_edges(vertex).count()
    }

    fn degree(&self, vertex: &Self::Vertex) -> usize {
        self.out_degree(vertex) + self.in_degree(vertex)
    }
}

/// 无向图
pub trait UndirectedGraph: Graph {
    /// 与顶点相邻的边；自环只出现一次
    fn adjacent_edges(&self, vertex: &Self::Vertex) -> EdgeIter<'_, Self::Edge>;

    fn adjacent_degree(&self, vertex: &Self::Vertex) -> usize {
        self.adjacent_edges(vertex).count()
    }
}

/// 可以增删边的有向图
pub trait MutableEdgeGraph: IncidenceGraph {
    /// 添加边；端点不在图中时返回 `false`
    fn add_edge(&mut self, edge: Self::Edge) -> bool;

    /// 删除最近添加的一条相等的边
    fn remove_edge(&mut self, edge: &Self::Edge) -> bool;
}
