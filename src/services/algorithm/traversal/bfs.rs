//! 广度优先搜索

use std::collections::HashMap;

use super::color::GraphColor;
use super::engine::{BfsCore, Directed, EdgeFilter, OutEdges};
use super::frontier::FifoFrontier;
use super::visitor::BfsVisitor;
use crate::config::AlgorithmConfig;
use crate::core::{
    Algorithm, AlgorithmResult, Computation, ComputationHost, ComputationState, RootedAlgorithm,
    VertexSlot,
};
use crate::graph::{Graph, IncidenceGraph};

/// 有向图上的广度优先搜索
///
/// 设置了根顶点时只遍历根所在的部分（除非打开 `process_all_components`），
/// 否则依次从每个仍为白色的顶点出发。
pub struct BreadthFirstSearch<'g, G: Graph> {
    graph: &'g G,
    computation: Computation,
    root: VertexSlot<G::Vertex>,
    core: BfsCore<G::Vertex, FifoFrontier<G::Vertex>>,
    process_all_components: bool,
    edge_filter: Option<EdgeFilter<'g, G::Edge>>,
}

impl<'g, G: IncidenceGraph> BreadthFirstSearch<'g, G> {
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

    /// 与宿主计算共享取消域
    pub fn sharing_cancellation(mut self, host: &Computation) -> Self {
        self.computation = Computation::sharing_cancellation(host);
        self
    }

    pub fn with_config(mut self, config: &AlgorithmConfig) -> Self {
        self.process_all_components = config.process_all_components;
        self
    }

    /// 在遍历一个顶点的出边前过滤或重新排序
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

    pub fn process_all_components(&self) -> bool {
        self.process_all_components
    }

    pub fn graph(&self) -> &'g G {
        self.graph
    }

    /// 最近一次运行的顶点颜色
    pub fn colors(&self) -> &HashMap<G::Vertex, GraphColor> {
        self.core.colors()
    }

    pub fn vertex_color(&self, vertex: &G::Vertex) -> Option<GraphColor> {
        self.core.colors().get(vertex).copied()
    }

    /// 不观察事件地运行
    pub fn compute(&mut self) -> AlgorithmResult<ComputationState> {
        self.compute_with(&mut ())
    }
}

impl<G: Graph> ComputationHost for BreadthFirstSearch<'_, G> {
    fn computation(&self) -> &Computation {
        &self.computation
    }
}

impl<G: Graph> RootedAlgorithm for BreadthFirstSearch<'_, G> {
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

impl<G, O> Algorithm<O> for BreadthFirstSearch<'_, G>
where
    G: IncidenceGraph,
    O: BfsVisitor<G::Vertex, G::Edge>,
{
    fn initialize(&mut self, observer: &mut O) -> AlgorithmResult<()> {
        self.core.initialize(self.graph, &mut Directed(observer))
    }

    fn internal_compute(&mut self, observer: &mut O) -> AlgorithmResult<()> {
        let root = self.root.get().cloned();
        log::debug!("广度优先搜索开始, 根顶点: {:?}", root);
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
