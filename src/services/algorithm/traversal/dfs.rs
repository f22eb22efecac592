//! 深度优先搜索
//!
//! 使用显式栈保存可恢复的帧（顶点、边游标、深度），深图不会耗尽调用栈。

use std::collections::HashMap;

use super::color::GraphColor;
use super::engine::{DfsCore, Directed, EdgeFilter, OutEdges};
use super::visitor::DfsVisitor;
use crate::config::AlgorithmConfig;
use crate::core::{
    Algorithm, AlgorithmResult, Computation, ComputationHost, ComputationState, RootedAlgorithm,
    VertexSlot,
};
use crate::graph::{Graph, IncidenceGraph};

/// 有向图上的深度优先搜索
///
/// 边被分类为树边、回边、前向或横跨边。深度超过 `max_depth` 的顶点被发现后
/// 直接完成，不再展开。
pub struct DepthFirstSearch<'g, G: Graph> {
    graph: &'g G,
    computation: Computation,
    root: VertexSlot<G::Vertex>,
    core: DfsCore<G::Vertex>,
    process_all_components: bool,
    edge_filter: Option<EdgeFilter<'g, G::Edge>>,
}

impl<'g, G: IncidenceGraph> DepthFirstSearch<'g, G> {
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

    pub fn max_depth(&self) -> Option<usize> {
        self.core.max_depth()
    }

    /// `None` 表示不限深度
    pub fn set_max_depth(&mut self, max_depth: Option<usize>) {
        self.core.set_max_depth(max_depth);
    }

    pub fn set_process_all_components(&mut self, value: bool) {
        self.process_all_components = value;
    }

    pub fn process_all_components(&self) -> bool {
        self.process_all_components
    }

    pub fn graph(&self) -> &'g G {
        self.graph
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

impl<G: Graph> ComputationHost for DepthFirstSearch<'_, G> {
    fn computation(&self) -> &Computation {
        &self.computation
    }
}

impl<G: Graph> RootedAlgorithm for DepthFirstSearch<'_, G> {
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

impl<G, O> Algorithm<O> for DepthFirstSearch<'_, G>
where
    G: IncidenceGraph,
    O: DfsVisitor<G::Vertex, G::Edge>,
{
    fn initialize(&mut self, observer: &mut O) -> AlgorithmResult<()> {
        self.core.initialize(self.graph, &mut Directed(observer))
    }

    fn internal_compute(&mut self, observer: &mut O) -> AlgorithmResult<()> {
        let root = self.root.get().cloned();
        log::debug!(
            "深度优先搜索开始, 根顶点: {:?}, 最大深度: {:?}",
            root,
            self.core.max_depth()
        );
        self.core.run::<G, OutEdges, _>(
            self.graph,
            root.as_ref(),
            self.process_all_components,
            self.edge_filter.as_ref(),
            &mut Directed(observer),
            &self.computation,
        )
    }
}
