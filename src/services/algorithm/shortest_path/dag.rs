//! 有向无环图上的单源最短路径
//!
//! 按拓扑序逐个顶点松弛出边，每条边只处理一次，允许负权边。

use std::collections::HashMap;

use super::lookup_distance;
use super::relaxer::{relax, DistanceRelaxer, ShortestDistanceRelaxer};
use super::visitor::ShortestPathVisitor;
use crate::core::{
    Algorithm, AlgorithmError, AlgorithmResult, Computation, ComputationHost, ComputationState,
    RootedAlgorithm, VertexSlot,
};
use crate::graph::{Graph, GraphEdge, IncidenceGraph};
use crate::services::algorithm::traversal::topological_sort::topological_order;
use crate::services::algorithm::traversal::GraphColor;

/// DAG 最短路径
///
/// 图中有环时运行失败并返回 `NonAcyclicGraph`。配合 `CriticalDistanceRelaxer`
/// 可以求关键路径。
pub struct DagShortestPath<'g, G: Graph, W, R = ShortestDistanceRelaxer> {
    graph: &'g G,
    computation: Computation,
    root: VertexSlot<G::Vertex>,
    weights: W,
    relaxer: R,
    distances: Option<HashMap<G::Vertex, f64>>,
    colors: HashMap<G::Vertex, GraphColor>,
}

impl<'g, G, W> DagShortestPath<'g, G, W, ShortestDistanceRelaxer>
where
    G: IncidenceGraph,
    W: Fn(&G::Edge) -> f64,
{
    pub fn new(graph: &'g G, weights: W) -> Self {
        Self::with_relaxer(graph, weights, ShortestDistanceRelaxer)
    }
}

impl<'g, G, W, R> DagShortestPath<'g, G, W, R>
where
    G: IncidenceGraph,
    W: Fn(&G::Edge) -> f64,
    R: DistanceRelaxer,
{
    pub fn with_relaxer(graph: &'g G, weights: W, relaxer: R) -> Self {
        Self {
            graph,
            computation: Computation::new(),
            root: VertexSlot::new(),
            weights,
            relaxer,
            distances: None,
            colors: HashMap::new(),
        }
    }

    pub fn sharing_cancellation(mut self, host: &Computation) -> Self {
        self.computation = Computation::sharing_cancellation(host);
        self
    }

    pub fn distance(&self, vertex: &G::Vertex) -> AlgorithmResult<f64> {
        lookup_distance(self.distances.as_ref(), vertex)
    }

    pub fn try_get_distance(&self, vertex: &G::Vertex) -> Option<f64> {
        let initial = self.relaxer.initial_distance();
        self.distance(vertex).ok().filter(|d| *d != initial)
    }

    pub fn distances(&self) -> AlgorithmResult<&HashMap<G::Vertex, f64>> {
        self.distances.as_ref().ok_or(AlgorithmError::NotComputed)
    }

    pub fn vertex_color(&self, vertex: &G::Vertex) -> Option<GraphColor> {
        self.colors.get(vertex).copied()
    }

    pub fn compute(&mut self) -> AlgorithmResult<ComputationState> {
        self.compute_with(&mut ())
    }
}

impl<G: Graph, W, R> ComputationHost for DagShortestPath<'_, G, W, R> {
    fn computation(&self) -> &Computation {
        &self.computation
    }
}

impl<G: Graph, W, R> RootedAlgorithm for DagShortestPath<'_, G, W, R> {
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

impl<G, W, R, O> Algorithm<O> for DagShortestPath<'_, G, W, R>
where
    G: IncidenceGraph,
    W: Fn(&G::Edge) -> f64,
    R: DistanceRelaxer,
    O: ShortestPathVisitor<G::Vertex, G::Edge>,
{
    fn initialize(&mut self, observer: &mut O) -> AlgorithmResult<()> {
        let initial = self.relaxer.initial_distance();
        let distances = self.distances.insert(HashMap::new());
        self.colors.clear();
        for vertex in self.graph.vertices() {
            distances.insert(vertex.clone(), initial);
            self.colors.insert(vertex.clone(), GraphColor::White);
            observer.initialize_vertex(vertex);
        }
        Ok(())
    }

    fn internal_compute(&mut self, observer: &mut O) -> AlgorithmResult<()> {
        let root = self.require_root()?;
        let graph = self.graph;
        let order = topological_order(graph, &self.computation)?;
        log::debug!(
            "DAG 最短路径开始, 根顶点: {:?}, 顶点数: {}",
            root,
            order.len()
        );

        let distances = self.distances.get_or_insert_with(HashMap::new);
        distances.insert(root.clone(), 0.0);
        self.colors.insert(root.clone(), GraphColor::Gray);
        observer.start_vertex(&root);
        observer.discover_vertex(&root);

        for vertex in &order {
            self.computation.throw_if_cancellation_requested()?;
            observer.examine_vertex(vertex);
            for edge in graph.out_edges(vertex) {
                let target = edge.target();
                if self.colors.get(target) == Some(&GraphColor::White) {
                    self.colors.insert(target.clone(), GraphColor::Gray);
                }
                observer.discover_vertex(target);
                let weight = (self.weights)(edge);
                if relax(distances, vertex, target, weight, &self.relaxer) {
                    observer.tree_edge(edge);
                } else {
                    observer.edge_not_relaxed(edge);
                }
            }
            self.colors.insert(vertex.clone(), GraphColor::Black);
            observer.finish_vertex(vertex);
        }
        Ok(())
    }
}
