//! 无向邻接表

use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;

use super::{EdgeIter, Graph, GraphEdge, UndirectedGraph, VertexIter};

/// 无向邻接表
///
/// 每条边存一份，两个端点的邻接表都指向它；自环只在邻接表中出现一次。
#[derive(Clone)]
pub struct UndirectedAdjacencyGraph<V, E> {
    vertices: Vec<V>,
    index: HashMap<V, usize>,
    edges: Vec<E>,
    adjacent: Vec<Vec<usize>>,
}

impl<V, E> UndirectedAdjacencyGraph<V, E>
where
    V: Clone + Eq + Hash + fmt::Debug,
    E: GraphEdge<V>,
{
    pub fn new() -> Self {
        Self {
            vertices: Vec::new(),
            index: HashMap::new(),
            edges: Vec::new(),
            adjacent: Vec::new(),
        }
    }

    /// 由边列表构建，端点按首次出现的顺序加入
    pub fn from_edges<I>(edges: I) -> Self
    where
        I: IntoIterator<Item = E>,
    {
        let mut graph = Self::new();
        for edge in edges {
            graph.add_vertex(edge.source().clone());
            graph.add_vertex(edge.target().clone());
            graph.add_edge(edge);
        }
        graph
    }

    pub fn add_vertex(&mut self, vertex: V) -> bool {
        if self.index.contains_key(&vertex) {
            return false;
        }
        self.index.insert(vertex.clone(), self.vertices.len());
        self.vertices.push(vertex);
        self.adjacent.push(Vec::new());
        true
    }

    /// 添加边；端点不在图中时返回 `false`
    pub fn add_edge(&mut self, edge: E) -> bool {
        let (source, target) = match (
            self.index.get(edge.source()),
            self.index.get(edge.target()),
        ) {
            (Some(&source), Some(&target)) => (source, target),
            _ => return false,
        };
        let slot = self.edges.len();
        self.edges.push(edge);
        self.adjacent[source].push(slot);
        if target != source {
            self.adjacent[target].push(slot);
        }
        true
    }
}

impl<V, E> Default for UndirectedAdjacencyGraph<V, E>
where
    V: Clone + Eq + Hash + fmt::Debug,
    E: GraphEdge<V>,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<V: fmt::Debug, E: fmt::Debug> fmt::Debug for UndirectedAdjacencyGraph<V, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UndirectedAdjacencyGraph")
            .field("vertices", &self.vertices)
            .field("edges", &self.edges)
            .finish()
    }
}

impl<V, E> Graph for UndirectedAdjacencyGraph<V, E>
where
    V: Clone + Eq + Hash + fmt::Debug,
    E: GraphEdge<V>,
{
    type Vertex = V;
    type Edge = E;

    fn vertices(&self) -> VertexIter<'_, V> {
        Box::new(self.vertices.iter())
    }

    fn contains_vertex(&self, vertex: &V) -> bool {
        self.index.contains_key(vertex)
    }

    fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    fn edge_count(&self) -> usize {
        self.edges.len()
    }

    fn edges(&self) -> EdgeIter<'_, E> {
        Box::new(self.edges.iter())
    }

    fn is_directed(&self) -> bool {
        false
    }
}

impl<V, E> UndirectedGraph for UndirectedAdjacencyGraph<V, E>
where
    V: Clone + Eq + Hash + fmt::Debug,
    E: GraphEdge<V>,
{
    fn adjacent_edges(&self, vertex: &V) -> EdgeIter<'_, E> {
        match self.index.get(vertex) {
            Some(&position) => Box::new(
                self.adjacent[position]
                    .iter()
                    .map(move |&slot| &self.edges[slot]),
            ),
            None => Box::new(std::iter::empty()),
        }
    }

    fn adjacent_degree(&self, vertex: &V) -> usize {
        self.index
            .get(vertex)
            .map_or(0, |&position| self.adjacent[position].len())
    }
}
