//! 无向与双向遍历
//!
//! 边可以从任一端点走到，访问者会收到 `reversed` 标记。走到某个顶点的树边
//! 不会在该顶点处被再次检查，另一端已完成的边也不再检查，所以每条边在一次
//! 遍历中恰好被分类一次。

use std::collections::HashMap;

use super::color::GraphColor;
use super::engine::{AdjacentEdges, BfsCore, DfsCore, EdgeFilter, InOutEdges, Undirected};
use super::frontier::FifoFrontier;
use super::visitor::{UndirectedBfsVisitor, UndirectedDfsVisitor};
use crate::config::AlgorithmConfig;
use crate::core::{
    Algorithm, AlgorithmResult, Computation, ComputationHost, ComputationState, RootedAlgorithm,
    VertexSlot,
};
use crate::graph::{require_edge_identity, BidirectionalGraph, Graph, UndirectedGraph};

/// 无向图上的广度优先搜索
pub struct UndirectedBreadthFirstSearch<'g, G: Graph> {
    graph: &'g G,
    computation: Computation,
    root: VertexSlot<G::Vertex>,
    core: BfsCore<G::Vertex, FifoFrontier<G::Vertex>>,
    process_all_components: bool,
    edge_filter: Option<EdgeFilter<'g, G::Edge>>,
}

impl<'g, G: UndirectedGraph> UndirectedBreadthFirstSearch<'g, G> {
    pub fn new(graph: &'g G) -> Self {
        Self {
            graph,
            computation: Computation::new(),
            root: VertexSlot::new(),
            core: BfsCore::new(FifoFrontier::new()),
            process_all_components: false,
            edge_filter: None,
        }
    }

    pub fn sharing_cancellation(mut self, host: &Computation) -> Self {
        self.computation = Computation::sharing_cancellation(host);
        self
    }

    pub fn with_config(mut self, config: &AlgorithmConfig) -> Self {
        self.process_all_components = config.process_all_components;
        self
    }

    pub fn with_edge_filter<F>(mut self, filter: F) -> Self
    where
        F: Fn(Vec<&'g G::Edge>) -> Vec<&'g G::Edge> + 'g,
    {
        self.edge_filter = Some(Box::new(filter));
        self
    }

    pub fn set_process_all_components(&mut self, value: bool) {
        self.process_all_components = value;
    }

    pub fn colors(&self) -> &HashMap<G::Vertex, GraphColor> {
        self.core.colors()
    }

    pub fn vertex_color(&self, vertex: &G::Vertex) -> Option<GraphColor> {
        self.core.colors().get(vertex).copied()
    }

    pub fn compute(&mut self) -> AlgorithmResult<ComputationState> {
        self.compute_with(&mut ())
    }
}

impl<G: Graph> ComputationHost for UndirectedBreadthFirstSearch<'_, G> {
    fn computation(&self) -> &Computation {
        &self.computation
    }
}

impl<G: Graph> RootedAlgorithm for UndirectedBreadthFirstSearch<'_, G> {
    type Vertex = G::Vertex;

    fn root_slot(&self) -> &VertexSlot<G::Vertex> {
        &self.root
    }

    fn root_slot_mut(&mut self) -> &mut VertexSlot<G::Vertex> {
        &mut self.root
    }

    fn contains_vertex(&self, vertex: &G::Vertex) -> bool {
        self.graph.contains_vertex(vertex)
    }
}

impl<G, O> Algorithm<O> for UndirectedBreadthFirstSearch<'_, G>
where
    G: UndirectedGraph,
    O: UndirectedBfsVisitor<G::Vertex, G::Edge>,
{
    fn initialize(&mut self, observer: &mut O) -> AlgorithmResult<()> {
        require_edge_identity::<G::Edge>()?;
        self.core.initialize(self.graph, &mut Undirected(observer))
    }

    fn internal_compute(&mut self, observer: &mut O) -> AlgorithmResult<()> {
        let root = self.root.get().cloned();
        log::debug!("无向广度优先搜索开始, 根顶点: {:?}", root);
        self.core.run::<G, AdjacentEdges, _>(
            self.graph,
            root.as_ref(),
            self.process_all_components,
            self.edge_filter.as_ref(),
            &mut Undirected(observer),
            &self.computation,
        )
    }
}

/// 无向图上的深度优先搜索
pub struct UndirectedDepthFirstSearch<'g, G: Graph> {
    graph: &'g G,
    computation: Computation,
    root: VertexSlot<G::Vertex>,
    core: DfsCore<G::Vertex>,
    process_all_components: bool,
    edge_filter: Option<EdgeFilter<'g, G::Edge>>,
}

impl<'g, G: UndirectedGraph> UndirectedDepthFirstSearch<'g, G> {
    pub fn new(graph: &'g G) -> Self {
        Self {
            graph,
            computation: Computation::new(),
            root: VertexSlot::new(),
            core: DfsCore::new(),
            process_all_components: false,
            edge_filter: None,
        }
    }

    pub fn sharing_cancellation(mut self, host: &Computation) -> Self {
        self.computation = Computation::sharing_cancellation(host);
        self
    }

    pub fn with_config(mut self, config: &AlgorithmConfig) -> Self {
        self.process_all_components = config.process_all_components;
        self.core.set_max_depth(config.max_depth);
        self
    }

    pub fn with_edge_filter<F>(mut self, filter: F) -> Self
    where
        F: Fn(Vec<&'g G::Edge>) -> Vec<&'g G::Edge> + 'g,
    {
        self.edge_filter = Some(Box::new(filter));
        self
    }

    pub fn set_max_depth(&mut self, max_depth: Option<usize>) {
        self.core.set_max_depth(max_depth);
    }

    pub fn set_process_all_components(&mut self, value: bool) {
        self.process_all_components = value;
    }

    pub fn colors(&self) -> &HashMap<G::Vertex, GraphColor> {
        self.core.colors()
    }

    pub fn vertex_color(&self, vertex: &G::Vertex) -> Option<GraphColor> {
        self.core.colors().get(vertex).copied()
    }

    pub fn compute(&mut self) -> AlgorithmResult<ComputationState> {
        self.compute_with(&mut ())
    }
}

impl<G: Graph> ComputationHost for UndirectedDepthFirstSearch<'_, G> {
    fn computation(&self) -> &Computation {
        &self.computation
    }
}

impl<G: Graph> RootedAlgorithm for UndirectedDepthFirstSearch<'_, G> {
    type Vertex = G::Vertex;

    fn root_slot(&self) -> &VertexSlot<G::Vertex> {
        &self.root
    }

    fn root_slot_mut(&mut self) -> &mut VertexSlot<G::Vertex> {
        &mut self.root
    }

    fn contains_vertex(&self, vertex: &G::Vertex) -> bool {
        self.graph.contains_vertex(vertex)
    }
}

impl<G, O> Algorithm<O> for UndirectedDepthFirstSearch<'_, G>
where
    G: UndirectedGraph,
    O: UndirectedDfsVisitor<G::Vertex, G::Edge>,
{
    fn initialize(&mut self, observer: &mut O) -> AlgorithmResult<()> {
        require_edge_identity::<G::Edge>()?;
        self.core.initialize(self.graph, &mut Undirected(observer))
    }

    fn internal_compute(&mut self, observer: &mut O) -> AlgorithmResult<()> {
        let root = self.root.get().cloned();
        log::debug!("无向深度优先搜索开始, 根顶点: {:?}", root);
        self.core.run::<G, AdjacentEdges, _>(
            self.graph,
            root.as_ref(),
            self.process_all_components,
            self.edge_filter.as_ref(),
            &mut Undirected(observer),
            &self.computation,
        )
    }
}

/// 有向图上忽略方向的深度优先搜索：先出边，再入边
pub struct BidirectionalDepthFirstSearch<'g, G: Graph> {
    graph: &'g G,
    computation: Computation,
    root: VertexSlot<G::Vertex>,
    core: DfsCore<G::Vertex>,
    process_all_components: bool,
}

impl<'g, G: BidirectionalGraph> BidirectionalDepthFirstSearch<'g, G> {
    pub fn new(graph: &'g G) -> Self {
        Self {
            graph,
            computation: Computation::new(),
            root: VertexSlot::new(),
            core: DfsCore::new(),
            process_all_components: false,
        }
    }

    pub fn sharing_cancellation(mut self, host: &Computation) -> Self {
        self.computation = Computation::sharing_cancellation(host);
        self
    }

    pub fn with_config(mut self, config: &AlgorithmConfig) -> Self {
        self.process_all_components = config.process_all_components;
        self.core.set_max_depth(config.max_depth);
        self
    }

    pub fn set_max_depth(&mut self, max_depth: Option<usize>) {
        self.core.set_max_depth(max_depth);
    }

    pub fn set_process_all_components(&mut self, value: bool) {
        self.process_all_components = value;
    }

    pub fn colors(&self) -> &HashMap<G::Vertex, GraphColor> {
        self.core.colors()
    }

    pub fn vertex_color(&self, vertex: &G::Vertex) -> Option<GraphColor> {
        self.core.colors().get(vertex).copied()
    }

    pub fn compute(&mut self) -> AlgorithmResult<ComputationState> {
        self.compute_with(&mut ())
    }
}

impl<G: Graph> ComputationHost for BidirectionalDepthFirstSearch<'_, G> {
    fn computation(&self) -> &Computation {
        &self.computation
    }
}

impl<G: Graph> RootedAlgorithm for BidirectionalDepthFirstSearch<'_, G> {
    type Vertex = G::Vertex;

    fn root_slot(&self) -> &VertexSlot<G::Vertex> {
        &self.root
    }

    fn root_slot_mut(&mut self) -> &mut VertexSlot<G::Vertex> {
        &mut self.root
    }

    fn contains_vertex(&self, vertex: &G::Vertex) -> bool {
        self.graph.contains_vertex(vertex)
    }
}

impl<G, O> Algorithm<O> for BidirectionalDepthFirstSearch<'_, G>
where
    G: BidirectionalGraph,
    O: UndirectedDfsVisitor<G::Vertex, G::Edge>,
{
    fn initialize(&mut self, observer: &mut O) -> AlgorithmResult<()> {
        require_edge_identity::<G::Edge>()?;
        self.core.initialize(self.graph, &mut Undirected(observer))
    }

    fn internal_compute(&mut self, observer: &mut O) -> AlgorithmResult<()> {
        let root = self.root.get().cloned();
        log::debug!("双向深度优先搜索开始, 根顶点: {:?}", root);
        self.core.run::<G, InOutEdges, _>(
            self.graph,
            root.as_ref(),
            self.process_all_components,
            None,
            &mut Undirected(observer),
            &self.computation,
        )
    }
}
