//! A* 启发式最短路径
//!
//! 与 Dijkstra 共用广度优先引擎，队列按 `距离 ⊕ 启发值` 排序。
//! 启发函数不一致时，已完成的顶点在距离变短后会被重新打开。

use std::collections::HashMap;
use std::hash::Hash;

use super::relaxer::{relax, DistanceRelaxer, ShortestDistanceRelaxer};
use super::visitor::ShortestPathVisitor;
use super::{lookup_distance, non_negative_weight};
use crate::core::{
    Algorithm, AlgorithmError, AlgorithmResult, Computation, ComputationHost, ComputationState,
    RootedAlgorithm, RootedSearchAlgorithm, VertexSlot,
};
use crate::graph::{Graph, GraphEdge, IncidenceGraph};
use crate::services::algorithm::traversal::engine::{BfsCore, BfsHandler, OutEdges};
use crate::services::algorithm::traversal::{FrontierUpdate, GraphColor, PriorityFrontier};

struct AStarDriver<'a, V, W, H, R, O: ?Sized> {
    distances: &'a mut HashMap<V, f64>,
    costs: &'a mut HashMap<V, f64>,
    weights: &'a W,
    heuristic: &'a H,
    relaxer: R,
    target: Option<V>,
    reached: bool,
    observer: &'a mut O,
}

impl<V, W, H, R, O: ?Sized> AStarDriver<'_, V, W, H, R, O>
where
    V: Clone + Eq + Hash,
    H: Fn(&V) -> f64,
    R: DistanceRelaxer,
{
    fn update_cost(&mut self, vertex: &V) {
        let distance = self
            .distances
            .get(vertex)
            .copied()
            .unwrap_or(self.relaxer.initial_distance());
        let cost = self.relaxer.combine(distance, (self.heuristic)(vertex));
        self.costs.insert(vertex.clone(), cost);
    }
}

impl<V, E, W, H, R, O> BfsHandler<V, E> for AStarDriver<'_, V, W, H, R, O>
where
    V: Clone + Eq + Hash,
    E: GraphEdge<V>,
    W: Fn(&E) -> f64,
    H: Fn(&V) -> f64,
    R: DistanceRelaxer,
    O: ShortestPathVisitor<V, E> + ?Sized,
{
    fn initialize_vertex(&mut self, vertex: &V) -> AlgorithmResult<()> {
        let initial = self.relaxer.initial_distance();
        self.distances.insert(vertex.clone(), initial);
        self.costs.insert(vertex.clone(), initial);
        self.observer.initialize_vertex(vertex);
        Ok(())
    }

    fn start_vertex(&mut self, vertex: &V) -> AlgorithmResult<()> {
        self.distances.insert(vertex.clone(), 0.0);
        self.update_cost(vertex);
        self.observer.start_vertex(vertex);
        Ok(())
    }

    fn discover_vertex(&mut self, vertex: &V) -> AlgorithmResult<()> {
        self.observer.discover_vertex(vertex);
        Ok(())
    }

    fn examine_vertex(&mut self, vertex: &V) -> AlgorithmResult<()> {
        self.observer.examine_vertex(vertex);
        if !self.reached && self.target.as_ref() == Some(vertex) {
            self.reached = true;
            self.observer.target_reached(vertex);
        }
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
            self.update_cost(edge.target());
            self.observer.tree_edge(edge);
        } else {
            self.observer.edge_not_relaxed(edge);
        }
        Ok(())
    }

    fn gray_target(&mut self, edge: &E, _reversed: bool) -> AlgorithmResult<FrontierUpdate> {
        self.relax_target(edge, FrontierUpdate::Update)
    }

    fn black_target(&mut self, edge: &E, _reversed: bool) -> AlgorithmResult<FrontierUpdate> {
        self.relax_target(edge, FrontierUpdate::Reopen)
    }

    fn finish_vertex(&mut self, vertex: &V) -> AlgorithmResult<()> {
        self.observer.finish_vertex(vertex);
        Ok(())
    }

    fn priority(&self, vertex: &V) -> f64 {
        self.costs
            .get(vertex)
            .copied()
            .unwrap_or(self.relaxer.initial_distance())
    }

    fn is_done(&self) -> bool {
        self.reached
    }
}

impl<V, W, H, R, O> AStarDriver<'_, V, W, H, R, O>
where
    V: Clone + Eq + Hash,
    H: Fn(&V) -> f64,
    R: DistanceRelaxer,
    O: ?Sized,
{
    fn relax_target<E>(&mut self, edge: &E, on_improve: FrontierUpdate) -> AlgorithmResult<FrontierUpdate>
    where
        E: GraphEdge<V>,
        W: Fn(&E) -> f64,
        O: ShortestPathVisitor<V, E>,
    {
        let weight = (self.weights)(edge);
        if relax(
            self.distances,
            edge.source(),
            edge.target(),
            weight,
            &self.relaxer,
        ) {
            self.update_cost(edge.target());
            self.observer.tree_edge(edge);
            Ok(on_improve)
        } else {
            self.observer.edge_not_relaxed(edge);
            Ok(FrontierUpdate::Keep)
        }
    }
}

/// A* 最短路径
///
/// 设置目标后，目标顶点被检查时触发 `target_reached` 并结束搜索。
pub struct AStarShortestPath<'g, G: Graph, W, H, R = ShortestDistanceRelaxer> {
    graph: &'g G,
    computation: Computation,
    root: VertexSlot<G::Vertex>,
    target: VertexSlot<G::Vertex>,
    weights: W,
    heuristic: H,
    relaxer: R,
    core: BfsCore<G::Vertex, PriorityFrontier<G::Vertex, R>>,
    distances: Option<HashMap<G::Vertex, f64>>,
    costs: HashMap<G::Vertex, f64>,
}

impl<'g, G, W, H> AStarShortestPath<'g, G, W, H, ShortestDistanceRelaxer>
where
    G: IncidenceGraph,
    W: Fn(&G::Edge) -> f64,
    H: Fn(&G::Vertex) -> f64,
{
    pub fn new(graph: &'g G, weights: W, heuristic: H) -> Self {
        Self::with_relaxer(graph, weights, heuristic, ShortestDistanceRelaxer)
    }
}

impl<'g, G, W, H, R> AStarShortestPath<'g, G, W, H, R>
where
    G: IncidenceGraph,
    W: Fn(&G::Edge) -> f64,
    H: Fn(&G::Vertex) -> f64,
    R: DistanceRelaxer,
{
    pub fn with_relaxer(graph: &'g G, weights: W, heuristic: H, relaxer: R) -> Self {
        Self {
            graph,
            computation: Computation::new(),
            root: VertexSlot::new(),
            target: VertexSlot::new(),
            weights,
            heuristic,
            relaxer,
            core: BfsCore::new(PriorityFrontier::new(relaxer)),
            distances: None,
            costs: HashMap::new(),
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

    /// 顶点当前的估计总代价
    pub fn cost(&self, vertex: &G::Vertex) -> Option<f64> {
        self.costs.get(vertex).copied()
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

impl<G: Graph, W, H, R> ComputationHost for AStarShortestPath<'_, G, W, H, R> {
    fn computation(&self) -> &Computation {
        &self.computation
    }
}

impl<G: Graph, W, H, R> RootedAlgorithm for AStarShortestPath<'_, G, W, H, R> {
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

impl<G: Graph, W, H, R> RootedSearchAlgorithm for AStarShortestPath<'_, G, W, H, R> {
    fn target_slot(&self) -> &VertexSlot<G::Vertex> {
        &self.target
    }

    fn target_slot_mut(&mut self) -> &mut VertexSlot<G::Vertex> {
        &mut self.target
    }
}

impl<G, W, H, R, O> Algorithm<O> for AStarShortestPath<'_, G, W, H, R>
where
    G: IncidenceGraph,
    W: Fn(&G::Edge) -> f64,
    H: Fn(&G::Vertex) -> f64,
    R: DistanceRelaxer,
    O: ShortestPathVisitor<G::Vertex, G::Edge>,
{
    fn initialize(&mut self, observer: &mut O) -> AlgorithmResult<()> {
        self.costs.clear();
        let mut driver = AStarDriver {
            distances: self.distances.insert(HashMap::new()),
            costs: &mut self.costs,
            weights: &self.weights,
            heuristic: &self.heuristic,
            relaxer: self.relaxer,
            target: None,
            reached: false,
            observer,
        };
        self.core.initialize(self.graph, &mut driver)
    }

    fn internal_compute(&mut self, observer: &mut O) -> AlgorithmResult<()> {
        let root = self.root.get().cloned();
        let target = self.target.get().cloned();
        if let Some(target) = target.as_ref() {
            if !self.graph.contains_vertex(target) {
                return Err(AlgorithmError::vertex_not_found(target));
            }
        }
        log::debug!("A* 开始, 根顶点: {:?}, 目标顶点: {:?}", root, target);

        let mut driver = AStarDriver {
            distances: self.distances.get_or_insert_with(HashMap::new),
            costs: &mut self.costs,
            weights: &self.weights,
            heuristic: &self.heuristic,
            relaxer: self.relaxer,
            target,
            reached: false,
            observer,
        };
        self.core.run::<G, OutEdges, _>(
            self.graph,
            root.as_ref(),
            false,
            None,
            &mut driver,
            &self.computation,
        )?;
        if driver.reached {
            log::debug!("A* 已到达目标顶点");
        }
        Ok(())
    }
}
