//! 有向邻接表

use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;

use super::{
    BidirectionalGraph, EdgeIter, Graph, GraphEdge, IncidenceGraph, MutableEdgeGraph, VertexIter,
};

/// 带入边索引的有向邻接表
///
/// 边只存一份，出边表和入边表保存的是槽位下标，因此 `out_edges` 与
/// `in_edges` 返回的是同一份存储的引用。删除边只清空槽位，不移动其他边；
/// 空出的槽位留给之后添加的边复用。
#[derive(Clone)]
pub struct AdjacencyGraph<V, E> {
    vertices: Vec<V>,
    index: HashMap<V, usize>,
    slots: Vec<Option<E>>,
    free_slots: Vec<usize>,
    out_slots: Vec<Vec<usize>>,
    in_slots: Vec<Vec<usize>>,
    edge_count: usize,
}

impl<V, E> AdjacencyGraph<V, E>
where
    V: Clone + Eq + Hash + fmt::Debug,
    E: GraphEdge<V>,
{
    pub fn new() -> Self {
        Self {
            vertices: Vec::new(),
            index: HashMap::new(),
            slots: Vec::new(),
            free_slots: Vec::new(),
            out_slots: Vec::new(),
            in_slots: Vec::new(),
            edge_count: 0,
        }
    }

    /// 由边列表构建，端点按首次出现的顺序加入
    pub fn from_edges<I>(edges: I) -> Self
    where
        I: IntoIterator<Item = E>,
    {
        let mut graph = Self::new();
        for edge in edges {
            graph.add_vertices_and_edge(edge);
        }
        graph
    }

    /// 添加顶点；已存在时返回 `false`
    pub fn add_vertex(&mut self, vertex: V) -> bool {
        if self.index.contains_key(&vertex) {
            return false;
        }
        self.index.insert(vertex.clone(), self.vertices.len());
        self.vertices.push(vertex);
        self.out_slots.push(Vec::new());
        self.in_slots.push(Vec::new());
        true
    }

    pub fn add_vertices<I>(&mut self, vertices: I)
    where
        I: IntoIterator<Item = V>,
    {
        for vertex in vertices {
            self.add_vertex(vertex);
        }
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
        let slot = match self.free_slots.pop() {
            Some(slot) => {
                self.slots[slot] = Some(edge);
                slot
            }
            None => {
                self.slots.push(Some(edge));
                self.slots.len() - 1
            }
        };
        self.out_slots[source].push(slot);
        self.in_slots[target].push(slot);
        self.edge_count += 1;
        true
    }

    /// 添加边，缺失的端点一并加入
    pub fn add_vertices_and_edge(&mut self, edge: E) -> bool {
        self.add_vertex(edge.source().clone());
        self.add_vertex(edge.target().clone());
        self.add_edge(edge)
    }

    /// 删除最近添加的一条相等的边
    pub fn remove_edge(&mut self, edge: &E) -> bool
    where
        E: PartialEq,
    {
        let (source, target) = match (
            self.index.get(edge.source()),
            self.index.get(edge.target()),
        ) {
            (Some(&source), Some(&target)) => (source, target),
            _ => return false,
        };
        let slots = &self.slots;
        let position = self.out_slots[source]
            .iter()
            .rposition(|&slot| slots[slot].as_ref() == Some(edge));
        let Some(position) = position else {
            return false;
        };
        let slot = self.out_slots[source].remove(position);
        self.in_slots[target].retain(|&s| s != slot);
        self.slots[slot] = None;
        self.free_slots.push(slot);
        self.edge_count -= 1;
        true
    }

    fn position(&self, vertex: &V) -> Option<usize> {
        self.index.get(vertex).copied()
    }

    fn iter_slots<'a>(&'a self, slots: &'a [usize]) -> EdgeIter<'a, E> {
        Box::new(
            slots
                .iter()
                .filter_map(move |&slot| self.slots[slot].as_ref()),
        )
    }
}

impl<V, E> Default for AdjacencyGraph<V, E>
where
    V: Clone + Eq + Hash + fmt::Debug,
    E: GraphEdge<V>,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<V: fmt::Debug, E: fmt::Debug> fmt::Debug for AdjacencyGraph<V, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AdjacencyGraph")
            .field("vertices", &self.vertices)
            .field("edges", &self.slots.iter().flatten().collect::<Vec<_>>())
            .finish()
    }
}

impl<V, E> Graph for AdjacencyGraph<V, E>
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
        self.edge_count
    }

    fn edges(&self) -> EdgeIter<'_, E> {
        Box::new(
            self.out_slots
                .iter()
                .flatten()
                .filter_map(move |&slot| self.slots[slot].as_ref()),
        )
    }
}

impl<V, E> IncidenceGraph for AdjacencyGraph<V, E>
where
    V: Clone + Eq + Hash + fmt::Debug,
    E: GraphEdge<V>,
{
    fn out_edges(&self, vertex: &V) -> EdgeIter<'_, E> {
        match self.position(vertex) {
            Some(position) => self.iter_slots(&self.out_slots[position]),
            None => Box::new(std::iter::empty()),
        }
    }

    fn out_degree(&self, vertex: &V) -> usize {
        self.position(vertex)
            .map_or(0, |position| self.out_slots[position].len())
    }
}

impl<V, E> BidirectionalGraph for AdjacencyGraph<V, E>
where
    V: Clone + Eq + Hash + fmt::Debug,
    E: GraphEdge<V>,
{
    fn in_edges(&self, vertex: &V) -> EdgeIter<'_, E> {
        match self.position(vertex) {
            Some(position) => self.iter_slots(&self.in_slots[position]),
            None => Box::new(std::iter::empty()),
        }
    }

    fn in_degree(&self, vertex: &V) -> usize {
        self.position(vertex)
            .map_or(0, |position| self.in_slots[position].len())
    }
}

impl<V, E> MutableEdgeGraph for AdjacencyGraph<V, E>
where
    V: Clone + Eq + Hash + fmt::Debug,
    E: GraphEdge<V> + PartialEq,
{
    fn add_edge(&mut self, edge: E) -> bool {
        AdjacencyGraph::add_edge(self, edge)
    }

    fn remove_edge(&mut self, edge: &E) -> bool {
        AdjacencyGraph::remove_edge(self, edge)
    }
}
