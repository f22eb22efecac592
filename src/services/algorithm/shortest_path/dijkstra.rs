//! Dijkstra 单源最短路径
//!
//! 复用广度优先引擎，前沿换成按暂定距离排序的优先队列。

use std::collections::HashMap;
use std::hash::Hash;

use super::relaxer::{relax, DistanceRelaxer, ShortestDistanceRelaxer};
use super::visitor::ShortestPathVisitor;
use super::{lookup_distance, non_negative_weight};
use crate::core::{
    Algorithm, AlgorithmError, AlgorithmResult, Computation, ComputationHost, ComputationState, RootedAlgorithm,
    VertexSlot,
};
use crate::graph::{Graph, GraphEdge, IncidenceGraph};
use crate::services::algorithm::traversal::engine::{BfsCore, BfsHandler, OutEdges};
use crate::services::algorithm::traversal::{FrontierUpdate, GraphColor, PriorityFrontier};

/// 把 BFS 事件翻译为松弛操作
struct DijkstraDriver<'a, V, W, R, O: ?Sized> {
    distances: &'a mut HashMap<V, f64>,
    weights: &'a W,
    relaxer: R,
    observer: &'a mut O,
}

impl<V, E, W, R, O> BfsHandler<V, E> for DijkstraDriver<'_, V, W, R, O>
where
    V: Clone + Eq + Hash,
    E: GraphEdge<V>,
    W: Fn(&E) -> f64,
    R: DistanceRelaxer,
    O: ShortestPathVisitor<V, E> + ?Sized,
{
    fn initialize_vertex(&mut self, vertex: &V) -> AlgorithmResult<()> {
        self.distances
            .insert(vertex.clone(), self.relaxer.initial_distance());
        self.observer.initialize_vertex(vertex);
        Ok(())
    }

    fn start_vertex(&mut self, vertex: &V) -> AlgorithmResult<()> {
        self.distances.insert(vertex.clone(), 0.0);
        self.observer.start_vertex(vertex);
        Ok(())
    }

    fn discover_vertex(&mut self, vertex: &V) -> AlgorithmResult<()> {
        self.observer.discover_vertex(vertex);
        Ok(())
    }

    fn examine_vertex(&mut self, vertex: &V) -> AlgorithmResult<()> {
        self.observer.examine_vertex(vertex);
        Ok(())
    }

    fn examine_edge(&mut self, edge: &E, _reversed: bool) -> AlgorithmResult<()> {
        non_negative_weight(self.weights, edge)?;
        self.observer.examine_edge(edge);
        Ok(())
    }

    fn tree_edge(&mut self, edge: &E, _reversed: bool) -> AlgorithmResult<()> {
        let weight = (self.weights)(edge);
        if relax(
            self.distances,
            edge.source(),
            edge.target(),
            weight,
            &self.relaxer,
        ) {
            self.observer.tree_edge(edge);
        } else {
            self.observer.edge_not_relaxed(edge);
        }
        Ok(())
    }

    fn gray_target(&mut self, edge: &E, _reversed: bool) -> AlgorithmResult<FrontierUpdate> {
        let weight = (self.weights)(edge);
        if relax(
            self.distances,
            edge.source(),
            edge.target(),
            weight,
            &self.relaxer,
        ) {
            self.observer.tree_edge(edge);
            Ok(FrontierUpdate::Update)
        } else {
            self.observer.edge_not_relaxed(edge);
            Ok(FrontierUpdate::Keep)
        }
    }

    fn finish_vertex(&mut self, vertex: &V) -> AlgorithmResult<()> {
        self.observer.finish_vertex(vertex);
        Ok(())
    }

    fn priority(&self, vertex: &V) -> f64 {
        self.distances
            .get(vertex)
            .copied()
            .unwrap_or(self.relaxer.initial_distance())
    }
}

/// Dijkstra 最短路径
///
/// 边权必须非负，遇到负权边时运行失败并返回 `NegativeWeight`。
/// 没有根顶点时，每个仍为白色的顶点都作为新的源点，距离从 0 开始。
pub struct DijkstraShortestPath<'g, G: Graph, W, R = ShortestDistanceRelaxer> {
    graph: &'g G,
    computation: Computation,
    root: VertexSlot<G::Vertex>,
    weights: W,
    relaxer: R,
    core: BfsCore<G::Vertex, PriorityFrontier<G::Vertex, R>>,
    distances: Option<HashMap<G::Vertex, f64>>,
}

impl<'g, G, W> DijkstraShortestPath<'g, G, W, ShortestDistanceRelaxer>
where
    G: IncidenceGraph,
    W: Fn(&G::Edge) -> f64,
{
    pub fn new(graph: &'g G, weights: W) -> Self {
        Self::with_relaxer(graph, weights, ShortestDistanceRelaxer)
    }
}

impl<'g, G, W, R> DijkstraShortestPath<'g, G, W, R>
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
            core: BfsCore::new(PriorityFrontier::new(relaxer)),
            distances: None,
        }
    }

    pub fn sharing_cancellation(mut self, host: &Computation) -> Self {
        self.computation = Computation::sharing_cancellation(host);
        self
    }

    pub fn relaxer(&self) -> R {
        self.relaxer
    }

    /// 到顶点的距离；不可达时为松弛器的初始距离
    pub fn distance(&self, vertex: &G::Vertex) -> AlgorithmResult<f64> {
        lookup_distance(self.distances.as_ref(), vertex)
    }

    /// 可达顶点的距离
    pub fn try_get_distance(&self, vertex: &G::Vertex) -> Option<f64> {
        let initial = self.relaxer.initial_distance();
        self.distance(vertex).ok().filter(|d| *d != initial)
    }

    pub fn distances(&self) -> AlgorithmResult<&HashMap<G::Vertex, f64>> {
        self.distances
            .as_ref()
            .ok_or(AlgorithmError::NotComputed)
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

impl<G: Graph, W, R> ComputationHost for DijkstraShortestPath<'_, G, W, R> {
    fn computation(&self) -> &Computation {
        &self.computation
    }
}

impl<G: Graph, W, R> RootedAlgorithm for DijkstraShortestPath<'_, G, W, R> {
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

impl<G, W, R, O> Algorithm<O> for DijkstraShortestPath<'_, G, W, R>
where
    G: IncidenceGraph,
    W: Fn(&G::Edge) -> f64,
    R: DistanceRelaxer,
    O: ShortestPathVisitor<G::Vertex, G::Edge>,
{
    fn initialize(&mut self, observer: &mut O) -> AlgorithmResult<()> {
        let distances = self.distances.insert(HashMap::new());
        let mut driver = DijkstraDriver {
            distances,
            weights: &self.weights,
            relaxer: self.relaxer,
            observer,
        };
        self.core.initialize(self.graph, &mut driver)
    }

    fn internal_compute(&mut self, observer: &mut O) -> AlgorithmResult<()> {
        let root = self.root.get().cloned();
        log::debug!("Dijkstra 开始, 根顶点: {:?}", root);
        let distances = self.distances.get_or_insert_with(HashMap::new);
        let mut driver = DijkstraDriver {
            distances,
            weights: &self.weights,
            relaxer: self.relaxer,
            observer,
        };
        self.core.run::<G, OutEdges, _>(
            self.graph,
            root.as_ref(),
            false,
            None,
            &mut driver,
            &self.computation,
        )
    }
}
