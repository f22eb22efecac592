//! 遍历引擎核心
//!
//! 广度优先与深度优先各只有一份实现。有向、双向、无向三种变体的区别
//! 只在于从一个顶点取哪些边（[`Adjacency`]），以及是否按无向语义去重：
//! 无向时跳过另一端已完成的边，并跳过一次走到当前顶点的树边，
//! 从而每条边在一次遍历中只被检查一次。

use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;

use super::color::GraphColor;
use super::frontier::{Frontier, FrontierUpdate};
use super::visitor::{BfsVisitor, DfsVisitor, UndirectedBfsVisitor, UndirectedDfsVisitor};
use crate::core::{AlgorithmError, AlgorithmResult, Computation};
use crate::graph::{BidirectionalGraph, Graph, GraphEdge, IncidenceGraph, UndirectedGraph};

/// 边过滤器：接收一个顶点的边，返回保留（并可重新排序）后的边
pub type EdgeFilter<'g, E> = Box<dyn Fn(Vec<&'g E>) -> Vec<&'g E> + 'g>;

/// 取边策略
pub(crate) trait Adjacency<G: Graph> {
    const UNDIRECTED: bool;

    fn edges<'g>(graph: &'g G, vertex: &G::Vertex) -> Vec<&'g G::Edge>;
}

/// 有向出边
pub(crate) struct OutEdges;

/// 出边之后接入边
pub(crate) struct InOutEdges;

/// 无向邻接边
pub(crate) struct AdjacentEdges;

impl<G: IncidenceGraph> Adjacency<G> for OutEdges {
    const UNDIRECTED: bool = false;

    fn edges<'g>(graph: &'g G, vertex: &G::Vertex) -> Vec<&'g G::Edge> {
        graph.out_edges(vertex).collect()
    }
}

impl<G: BidirectionalGraph> Adjacency<G> for InOutEdges {
    const UNDIRECTED: bool = true;

    fn edges<'g>(graph: &'g G, vertex: &G::Vertex) -> Vec<&'g G::Edge> {
        let mut edges: Vec<_> = graph.out_edges(vertex).collect();
        // 自环已经作为出边出现过
        edges.extend(graph.in_edges(vertex).filter(|edge| !edge.is_self_edge()));
        edges
    }
}

impl<G: UndirectedGraph> Adjacency<G> for AdjacentEdges {
    const UNDIRECTED: bool = true;

    fn edges<'g>(graph: &'g G, vertex: &G::Vertex) -> Vec<&'g G::Edge> {
        graph.adjacent_edges(vertex).collect()
    }
}

/// 从 `vertex` 沿 `edge` 走到的顶点，以及是否逆着存储方向
fn step<'g, V, E>(vertex: &V, edge: &'g E) -> (&'g V, bool)
where
    V: PartialEq,
    E: GraphEdge<V>,
{
    if edge.source() == vertex {
        (edge.target(), false)
    } else {
        (edge.source(), true)
    }
}

fn expand<'g, G, A>(
    graph: &'g G,
    vertex: &G::Vertex,
    filter: Option<&EdgeFilter<'g, G::Edge>>,
) -> Vec<&'g G::Edge>
where
    G: Graph,
    A: Adjacency<G>,
{
    let edges = A::edges(graph, vertex);
    match filter {
        Some(filter) => filter(edges),
        None => edges,
    }
}

/// 广度优先引擎的事件接收者
///
/// 所有事件都可以失败，Dijkstra 在检查边时以此报告负权边。
pub(crate) trait BfsHandler<V, E> {
    fn initialize_vertex(&mut self, _vertex: &V) -> AlgorithmResult<()> {
        Ok(())
    }
    fn start_vertex(&mut self, _vertex: &V) -> AlgorithmResult<()> {
        Ok(())
    }
    fn discover_vertex(&mut self, _vertex: &V) -> AlgorithmResult<()> {
        Ok(())
    }
    fn examine_vertex(&mut self, _vertex: &V) -> AlgorithmResult<()> {
        Ok(())
    }
    fn examine_edge(&mut self, _edge: &E, _reversed: bool) -> AlgorithmResult<()> {
        Ok(())
    }
    fn tree_edge(&mut self, _edge: &E, _reversed: bool) -> AlgorithmResult<()> {
        Ok(())
    }
    fn non_tree_edge(&mut self, _edge: &E, _reversed: bool) -> AlgorithmResult<()> {
        Ok(())
    }
    fn gray_target(&mut self, _edge: &E, _reversed: bool) -> AlgorithmResult<FrontierUpdate> {
        Ok(FrontierUpdate::Keep)
    }
    fn black_target(&mut self, _edge: &E, _reversed: bool) -> AlgorithmResult<FrontierUpdate> {
        Ok(FrontierUpdate::Keep)
    }
    fn finish_vertex(&mut self, _vertex: &V) -> AlgorithmResult<()> {
        Ok(())
    }

    /// 顶点入队时的优先级
    fn priority(&self, _vertex: &V) -> f64 {
        0.0
    }

    /// 为真时引擎在检查完当前顶点后停止
    fn is_done(&self) -> bool {
        false
    }
}

/// 深度优先引擎的事件接收者
pub(crate) trait DfsHandler<V, E> {
    fn initialize_vertex(&mut self, _vertex: &V) -> AlgorithmResult<()> {
        Ok(())
    }
    fn start_vertex(&mut self, _vertex: &V) -> AlgorithmResult<()> {
        Ok(())
    }
    fn discover_vertex(&mut self, _vertex: &V) -> AlgorithmResult<()> {
        Ok(())
    }
    fn examine_edge(&mut self, _edge: &E, _reversed: bool) -> AlgorithmResult<()> {
        Ok(())
    }
    fn tree_edge(&mut self, _edge: &E, _reversed: bool) -> AlgorithmResult<()> {
        Ok(())
    }
    fn back_edge(&mut self, _edge: &E, _reversed: bool) -> AlgorithmResult<()> {
        Ok(())
    }
    fn forward_or_cross_edge(&mut self, _edge: &E, _reversed: bool) -> AlgorithmResult<()> {
        Ok(())
    }
    fn finish_vertex(&mut self, _vertex: &V) -> AlgorithmResult<()> {
        Ok(())
    }
}

/// 把有向访问者接到引擎上
pub(crate) struct Directed<'o, O: ?Sized>(pub &'o mut O);

/// 把无向访问者接到引擎上
pub(crate) struct Undirected<'o, O: ?Sized>(pub &'o mut O);

impl<V, E, O> BfsHandler<V, E> for Directed<'_, O>
where
    O: BfsVisitor<V, E> + ?Sized,
{
    fn initialize_vertex(&mut self, vertex: &V) -> AlgorithmResult<()> {
        self.0.initialize_vertex(vertex);
        Ok(())
    }
    fn start_vertex(&mut self, vertex: &V) -> AlgorithmResult<()> {
        self.0.start_vertex(vertex);
        Ok(())
    }
    fn discover_vertex(&mut self, vertex: &V) -> AlgorithmResult<()> {
        self.0.discover_vertex(vertex);
        Ok(())
    }
    fn examine_vertex(&mut self, vertex: &V) -> AlgorithmResult<()> {
        self.0.examine_vertex(vertex);
        Ok(())
    }
    fn examine_edge(&mut self, edge: &E, _reversed: bool) -> AlgorithmResult<()> {
        self.0.examine_edge(edge);
        Ok(())
    }
    fn tree_edge(&mut self, edge: &E, _reversed: bool) -> AlgorithmResult<()> {
        self.0.tree_edge(edge);
        Ok(())
    }
    fn non_tree_edge(&mut self, edge: &E, _reversed: bool) -> AlgorithmResult<()> {
        self.0.non_tree_edge(edge);
        Ok(())
    }
    fn gray_target(&mut self, edge: &E, _reversed: bool) -> AlgorithmResult<FrontierUpdate> {
        self.0.gray_target(edge);
        Ok(FrontierUpdate::Keep)
    }
    fn black_target(&mut self, edge: &E, _reversed: bool) -> AlgorithmResult<FrontierUpdate> {
        self.0.black_target(edge);
        Ok(FrontierUpdate::Keep)
    }
    fn finish_vertex(&mut self, vertex: &V) -> AlgorithmResult<()> {
        self.0.finish_vertex(vertex);
        Ok(())
    }
}

impl<V, E, O> DfsHandler<V, E> for Directed<'_, O>
where
    O: DfsVisitor<V, E> + ?Sized,
{
    fn initialize_vertex(&mut self, vertex: &V) -> AlgorithmResult<()> {
        self.0.initialize_vertex(vertex);
        Ok(())
    }
    fn start_vertex(&mut self, vertex: &V) -> AlgorithmResult<()> {
        self.0.start_vertex(vertex);
        Ok(())
    }
    fn discover_vertex(&mut self, vertex: &V) -> AlgorithmResult<()> {
        self.0.discover_vertex(vertex);
        Ok(())
    }
    fn examine_edge(&mut self, edge: &E, _reversed: bool) -> AlgorithmResult<()> {
        self.0.examine_edge(edge);
        Ok(())
    }
    fn tree_edge(&mut self, edge: &E, _reversed: bool) -> AlgorithmResult<()> {
        self.0.tree_edge(edge);
        Ok(())
    }
    fn back_edge(&mut self, edge: &E, _reversed: bool) -> AlgorithmResult<()> {
        self.0.back_edge(edge);
        Ok(())
    }
    fn forward_or_cross_edge(&mut self, edge: &E, _reversed: bool) -> AlgorithmResult<()> {
        self.0.forward_or_cross_edge(edge);
        Ok(())
    }
    fn finish_vertex(&mut self, vertex: &V) -> AlgorithmResult<()> {
        self.0.finish_vertex(vertex);
        Ok(())
    }
}

impl<V, E, O> BfsHandler<V, E> for Undirected<'_, O>
where
    O: UndirectedBfsVisitor<V, E> + ?Sized,
{
    fn initialize_vertex(&mut self, vertex: &V) -> AlgorithmResult<()> {
        self.0.initialize_vertex(vertex);
        Ok(())
    }
    fn start_vertex(&mut self, vertex: &V) -> AlgorithmResult<()> {
        self.0.start_vertex(vertex);
        Ok(())
    }
    fn discover_vertex(&mut self, vertex: &V) -> AlgorithmResult<()> {
        self.0.discover_vertex(vertex);
        Ok(())
    }
    fn examine_vertex(&mut self, vertex: &V) -> AlgorithmResult<()> {
        self.0.examine_vertex(vertex);
        Ok(())
    }
    fn examine_edge(&mut self, edge: &E, reversed: bool) -> AlgorithmResult<()> {
        self.0.examine_edge(edge, reversed);
        Ok(())
    }
    fn tree_edge(&mut self, edge: &E, reversed: bool) -> AlgorithmResult<()> {
        self.0.tree_edge(edge, reversed);
        Ok(())
    }
    fn non_tree_edge(&mut self, edge: &E, reversed: bool) -> AlgorithmResult<()> {
        self.0.non_tree_edge(edge, reversed);
        Ok(())
    }
    fn gray_target(&mut self, edge: &E, reversed: bool) -> AlgorithmResult<FrontierUpdate> {
        self.0.gray_target(edge, reversed);
        Ok(FrontierUpdate::Keep)
    }
    fn black_target(&mut self, edge: &E, reversed: bool) -> AlgorithmResult<FrontierUpdate> {
        self.0.black_target(edge, reversed);
        Ok(FrontierUpdate::Keep)
    }
    fn finish_vertex(&mut self, vertex: &V) -> AlgorithmResult<()> {
        self.0.finish_vertex(vertex);
        Ok(())
    }
}

impl<V, E, O> DfsHandler<V, E> for Undirected<'_, O>
where
    O: UndirectedDfsVisitor<V, E> + ?Sized,
{
    fn initialize_vertex(&mut self, vertex: &V) -> AlgorithmResult<()> {
        self.0.initialize_vertex(vertex);
        Ok(())
    }
    fn start_vertex(&mut self, vertex: &V) -> AlgorithmResult<()> {
        self.0.start_vertex(vertex);
        Ok(())
    }
    fn discover_vertex(&mut self, vertex: &V) -> AlgorithmResult<()> {
        self.0.discover_vertex(vertex);
        Ok(())
    }
    fn examine_edge(&mut self, edge: &E, reversed: bool) -> AlgorithmResult<()> {
        self.0.examine_edge(edge, reversed);
        Ok(())
    }
    fn tree_edge(&mut self, edge: &E, reversed: bool) -> AlgorithmResult<()> {
        self.0.tree_edge(edge, reversed);
        Ok(())
    }
    fn back_edge(&mut self, edge: &E, reversed: bool) -> AlgorithmResult<()> {
        self.0.back_edge(edge, reversed);
        Ok(())
    }
    fn forward_or_cross_edge(&mut self, edge: &E, reversed: bool) -> AlgorithmResult<()> {
        self.0.forward_or_cross_edge(edge, reversed);
        Ok(())
    }
    fn finish_vertex(&mut self, vertex: &V) -> AlgorithmResult<()> {
        self.0.finish_vertex(vertex);
        Ok(())
    }
}

/// 广度优先引擎：颜色表加一个前沿队列
pub(crate) struct BfsCore<V, F> {
    colors: HashMap<V, GraphColor>,
    frontier: F,
}

impl<V, F> BfsCore<V, F>
where
    V: Clone + Eq + Hash + fmt::Debug,
    F: Frontier<V>,
{
    pub fn new(frontier: F) -> Self {
        Self {
            colors: HashMap::new(),
            frontier,
        }
    }

    pub fn colors(&self) -> &HashMap<V, GraphColor> {
        &self.colors
    }

    pub fn color(&self, vertex: &V) -> GraphColor {
        self.colors.get(vertex).copied().unwrap_or_default()
    }

    /// 把所有顶点染成白色并通知
    pub fn initialize<G, H>(&mut self, graph: &G, handler: &mut H) -> AlgorithmResult<()>
    where
        G: Graph<Vertex = V>,
        H: BfsHandler<V, G::Edge> + ?Sized,
    {
        self.colors.clear();
        self.frontier.clear();
        for vertex in graph.vertices() {
            self.colors.insert(vertex.clone(), GraphColor::White);
            handler.initialize_vertex(vertex)?;
        }
        Ok(())
    }

    /// 从根顶点出发遍历；没有根时依次以每个白色顶点为根
    pub fn run<'g, G, A, H>(
        &mut self,
        graph: &'g G,
        root: Option<&V>,
        process_all_components: bool,
        filter: Option<&EdgeFilter<'g, G::Edge>>,
        handler: &mut H,
        computation: &Computation,
    ) -> AlgorithmResult<()>
    where
        G: Graph<Vertex = V>,
        A: Adjacency<G>,
        H: BfsHandler<V, G::Edge> + ?Sized,
        V: 'g,
    {
        if let Some(root) = root {
            if !graph.contains_vertex(root) {
                return Err(AlgorithmError::vertex_not_found(root));
            }
            self.visit::<G, A, H>(graph, root, filter, handler, computation)?;
            if !process_all_components || handler.is_done() {
                return Ok(());
            }
        }

        let vertices: Vec<&'g V> = graph.vertices().collect();
        for vertex in vertices {
            if self.color(vertex) == GraphColor::White {
                self.visit::<G, A, H>(graph, vertex, filter, handler, computation)?;
                if handler.is_done() {
                    break;
                }
            }
        }
        Ok(())
    }

    fn visit<'g, G, A, H>(
        &mut self,
        graph: &'g G,
        start: &V,
        filter: Option<&EdgeFilter<'g, G::Edge>>,
        handler: &mut H,
        computation: &Computation,
    ) -> AlgorithmResult<()>
    where
        G: Graph<Vertex = V>,
        A: Adjacency<G>,
        H: BfsHandler<V, G::Edge> + ?Sized,
    {
        self.colors.insert(start.clone(), GraphColor::Gray);
        handler.start_vertex(start)?;
        handler.discover_vertex(start)?;
        self.frontier.push(start.clone(), handler.priority(start));

        let mut tree_edges: HashMap<V, &'g G::Edge> = HashMap::new();

        while let Some(vertex) = self.frontier.pop() {
            computation.throw_if_cancellation_requested()?;
            handler.examine_vertex(&vertex)?;
            if handler.is_done() {
                return Ok(());
            }

            let mut via = tree_edges.remove(&vertex);
            for edge in expand::<G, A>(graph, &vertex, filter) {
                let (next, reversed) = step(&vertex, edge);
                let color = self.color(next);
                if A::UNDIRECTED {
                    if color == GraphColor::Black {
                        continue;
                    }
                    if via.is_some_and(|tree| std::ptr::eq(tree, edge)) {
                        via = None;
                        continue;
                    }
                }

                handler.examine_edge(edge, reversed)?;
                match color {
                    GraphColor::White => {
                        handler.tree_edge(edge, reversed)?;
                        self.colors.insert(next.clone(), GraphColor::Gray);
                        if A::UNDIRECTED {
                            tree_edges.insert(next.clone(), edge);
                        }
                        handler.discover_vertex(next)?;
                        self.frontier.push(next.clone(), handler.priority(next));
                    }
                    GraphColor::Gray => {
                        handler.non_tree_edge(edge, reversed)?;
                        let update = handler.gray_target(edge, reversed)?;
                        self.apply(next, update, handler.priority(next));
                    }
                    GraphColor::Black => {
                        handler.non_tree_edge(edge, reversed)?;
                        let update = handler.black_target(edge, reversed)?;
                        self.apply(next, update, handler.priority(next));
                    }
                }
            }

            self.colors.insert(vertex.clone(), GraphColor::Black);
            handler.finish_vertex(&vertex)?;
        }
        Ok(())
    }

    fn apply(&mut self, vertex: &V, update: FrontierUpdate, priority: f64) {
        match update {
            FrontierUpdate::Keep => {}
            FrontierUpdate::Update => self.frontier.update(vertex, priority),
            FrontierUpdate::Reopen => {
                self.colors.insert(vertex.clone(), GraphColor::Gray);
                self.frontier.push(vertex.clone(), priority);
            }
        }
    }
}

/// 深度优先的可恢复帧
struct Frame<'g, V, E> {
    vertex: V,
    edges: Vec<&'g E>,
    cursor: usize,
    depth: usize,
    /// 走到本顶点的树边，无向时跳过一次
    via: Option<&'g E>,
}

/// 深度优先引擎：颜色表加显式栈
pub(crate) struct DfsCore<V> {
    colors: HashMap<V, GraphColor>,
    max_depth: Option<usize>,
}

impl<V> DfsCore<V>
where
    V: Clone + Eq + Hash + fmt::Debug,
{
    pub fn new() -> Self {
        Self {
            colors: HashMap::new(),
            max_depth: None,
        }
    }

    pub fn colors(&self) -> &HashMap<V, GraphColor> {
        &self.colors
    }

    pub fn color(&self, vertex: &V) -> GraphColor {
        self.colors.get(vertex).copied().unwrap_or_default()
    }

    pub fn max_depth(&self) -> Option<usize> {
        self.max_depth
    }

    pub fn set_max_depth(&mut self, max_depth: Option<usize>) {
        self.max_depth = max_depth;
    }

    pub fn initialize<G, H>(&mut self, graph: &G, handler: &mut H) -> AlgorithmResult<()>
    where
        G: Graph<Vertex = V>,
        H: DfsHandler<V, G::Edge> + ?Sized,
    {
        self.colors.clear();
        for vertex in graph.vertices() {
            self.colors.insert(vertex.clone(), GraphColor::White);
            handler.initialize_vertex(vertex)?;
        }
        Ok(())
    }

    /// 从根顶点出发遍历；没有根时依次以每个白色顶点为根
    pub fn run<'g, G, A, H>(
        &mut self,
        graph: &'g G,
        root: Option<&V>,
        process_all_components: bool,
        filter: Option<&EdgeFilter<'g, G::Edge>>,
        handler: &mut H,
        computation: &Computation,
    ) -> AlgorithmResult<()>
    where
        G: Graph<Vertex = V>,
        A: Adjacency<G>,
        H: DfsHandler<V, G::Edge> + ?Sized,
        V: 'g,
    {
        if let Some(root) = root {
            if !graph.contains_vertex(root) {
                return Err(AlgorithmError::vertex_not_found(root));
            }
            self.visit::<G, A, H>(graph, root, filter, handler, computation)?;
            if !process_all_components {
                return Ok(());
            }
        }

        let vertices: Vec<&'g V> = graph.vertices().collect();
        for vertex in vertices {
            if self.color(vertex) == GraphColor::White {
                self.visit::<G, A, H>(graph, vertex, filter, handler, computation)?;
            }
        }
        Ok(())
    }

    fn frame<'g, G, A>(
        &self,
        graph: &'g G,
        vertex: &V,
        depth: usize,
        via: Option<&'g G::Edge>,
        filter: Option<&EdgeFilter<'g, G::Edge>>,
    ) -> Frame<'g, V, G::Edge>
    where
        G: Graph<Vertex = V>,
        A: Adjacency<G>,
    {
        // 超过最大深度的帧不会展开
        let edges = if self.max_depth.is_some_and(|max| depth > max) {
            Vec::new()
        } else {
            expand::<G, A>(graph, vertex, filter)
        };
        Frame {
            vertex: vertex.clone(),
            edges,
            cursor: 0,
            depth,
            via,
        }
    }

    fn visit<'g, G, A, H>(
        &mut self,
        graph: &'g G,
        start: &V,
        filter: Option<&EdgeFilter<'g, G::Edge>>,
        handler: &mut H,
        computation: &Computation,
    ) -> AlgorithmResult<()>
    where
        G: Graph<Vertex = V>,
        A: Adjacency<G>,
        H: DfsHandler<V, G::Edge> + ?Sized,
    {
        self.colors.insert(start.clone(), GraphColor::Gray);
        handler.start_vertex(start)?;
        handler.discover_vertex(start)?;

        let mut stack = vec![self.frame::<G, A>(graph, start, 0, None, filter)];
        while let Some(mut frame) = stack.pop() {
            computation.throw_if_cancellation_requested()?;
            if self.max_depth.is_some_and(|max| frame.depth > max) {
                self.colors.insert(frame.vertex.clone(), GraphColor::Black);
                handler.finish_vertex(&frame.vertex)?;
                continue;
            }

            let mut child = None;
            while frame.cursor < frame.edges.len() {
                let edge = frame.edges[frame.cursor];
                frame.cursor += 1;

                let (next, reversed) = step(&frame.vertex, edge);
                let color = self.color(next);
                if A::UNDIRECTED {
                    if color == GraphColor::Black {
                        continue;
                    }
                    if frame.via.is_some_and(|tree| std::ptr::eq(tree, edge)) {
                        frame.via = None;
                        continue;
                    }
                }

                handler.examine_edge(edge, reversed)?;
                match color {
                    GraphColor::White => {
                        handler.tree_edge(edge, reversed)?;
                        self.colors.insert(next.clone(), GraphColor::Gray);
                        handler.discover_vertex(next)?;
                        child = Some(self.frame::<G, A>(
                            graph,
                            next,
                            frame.depth + 1,
                            Some(edge),
                            filter,
                        ));
                        break;
                    }
                    GraphColor::Gray => handler.back_edge(edge, reversed)?,
                    GraphColor::Black => handler.forward_or_cross_edge(edge, reversed)?,
                }
            }

            match child {
                Some(child) => {
                    stack.push(frame);
                    stack.push(child);
                }
                None => {
                    self.colors.insert(frame.vertex.clone(), GraphColor::Black);
                    handler.finish_vertex(&frame.vertex)?;
                }
            }
        }
        Ok(())
    }
}
