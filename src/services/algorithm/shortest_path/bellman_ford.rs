//! Bellman-Ford 单源最短路径
//!
//! 支持负权边。最多 |V| 轮按图顺序松弛所有边，一轮没有改进就提前结束；
//! 之后再扫描一遍，仍能松弛的边说明从根可达一个负权环。
//! 负权环作为结果数据返回，不是错误。

use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};

use super::lookup_distance;
use super::relaxer::{relax, DistanceRelaxer, ShortestDistanceRelaxer};
use super::visitor::ShortestPathVisitor;
use crate::core::{
    Algorithm, AlgorithmError, AlgorithmResult, Computation, ComputationHost, ComputationState,
    RootedAlgorithm, VertexSlot,
};
use crate::graph::{Graph, GraphEdge};

/// Bellman-Ford 最短路径
pub struct BellmanFordShortestPath<'g, G: Graph, W, R = ShortestDistanceRelaxer> {
    graph: &'g G,
    computation: Computation,
    root: VertexSlot<G::Vertex>,
    weights: W,
    relaxer: R,
    distances: Option<HashMap<G::Vertex, f64>>,
    predecessors: HashMap<G::Vertex, G::Edge>,
    found_negative_cycle: bool,
    minimized_edge: Option<G::Edge>,
}

impl<'g, G, W> BellmanFordShortestPath<'g, G, W, ShortestDistanceRelaxer>
where
    G: Graph,
    W: Fn(&G::Edge) -> f64,
{
    pub fn new(graph: &'g G, weights: W) -> Self {
        Self::with_relaxer(graph, weights, ShortestDistanceRelaxer)
    }
}

impl<'g, G, W, R> BellmanFordShortestPath<'g, G, W, R>
where
    G: Graph,
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
            predecessors: HashMap::new(),
            found_negative_cycle: false,
            minimized_edge: None,
        }
    }

    pub fn sharing_cancellation(mut self, host: &Computation) -> Self {
        self.computation = Computation::sharing_cancellation(host);
        self
    }

    /// 最近一次运行是否发现从根可达的负权环
    pub fn found_negative_cycle(&self) -> bool {
        self.found_negative_cycle
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

    /// 最后一次松弛到顶点的边
    pub fn predecessor(&self, vertex: &G::Vertex) -> Option<&G::Edge> {
        self.predecessors.get(vertex)
    }

    /// 取出一个负权环的边，按行走顺序排列
    ///
    /// 从仍可松弛的那条边的终点沿前驱回退 |V| 步，必然落在环上，
    /// 再从该点绕一圈收集环上的边。
    pub fn negative_cycle(&self) -> AlgorithmResult<Option<Vec<G::Edge>>> {
        if self.distances.is_none() {
            return Err(AlgorithmError::NotComputed);
        }
        let Some(edge) = self.minimized_edge.as_ref() else {
            return Ok(None);
        };

        let mut predecessors: HashMap<&G::Vertex, &G::Edge> = self.predecessors.iter().collect();
        predecessors.insert(edge.target(), edge);
        let previous = |vertex: &G::Vertex| {
            predecessors
                .get(vertex)
                .copied()
                .ok_or_else(|| AlgorithmError::PredecessorNotFound(format!("{:?}", vertex)))
        };

        let mut vertex = edge.target();
        for _ in 0..self.graph.vertex_count() {
            vertex = previous(vertex)?.source();
        }

        let start = vertex;
        let mut cycle = Vec::new();
        let mut seen = HashSet::new();
        loop {
            let edge = previous(vertex)?;
            cycle.push(edge.clone());
            vertex = edge.source();
            if vertex == start || !seen.insert(vertex) {
                break;
            }
        }
        cycle.reverse();
        Ok(Some(cycle))
    }

    pub fn compute(&mut self) -> AlgorithmResult<ComputationState> {
        self.compute_with(&mut ())
    }
}

impl<G: Graph, W, R> ComputationHost for BellmanFordShortestPath<'_, G, W, R> {
    fn computation(&self) -> &Computation {
        &self.computation
    }
}

impl<G: Graph, W, R> RootedAlgorithm for BellmanFordShortestPath<'_, G, W, R> {
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

impl<G, W, R, O> Algorithm<O> for BellmanFordShortestPath<'_, G, W, R>
where
    G: Graph,
    W: Fn(&G::Edge) -> f64,
    R: DistanceRelaxer,
    O: ShortestPathVisitor<G::Vertex, G::Edge>,
{
    fn initialize(&mut self, observer: &mut O) -> AlgorithmResult<()> {
        self.found_negative_cycle = false;
        self.minimized_edge = None;
        self.predecessors.clear();
        let initial = self.relaxer.initial_distance();
        let distances = self.distances.insert(HashMap::new());
        for vertex in self.graph.vertices() {
            distances.insert(vertex.clone(), initial);
            observer.initialize_vertex(vertex);
        }
        Ok(())
    }

    fn internal_compute(&mut self, observer: &mut O) -> AlgorithmResult<()> {
        let root = self.require_root()?;
        let graph = self.graph;
        let relaxer = self.relaxer;
        let distances = self.distances.get_or_insert_with(HashMap::new);
        distances.insert(root.clone(), 0.0);
        observer.start_vertex(&root);
        log::debug!("Bellman-Ford 开始, 根顶点: {:?}", root);

        for pass in 0..graph.vertex_count() {
            self.computation.throw_if_cancellation_requested()?;
            let mut improved = false;
            for edge in graph.edges() {
                observer.examine_edge(edge);
                let weight = (self.weights)(edge);
                if relax(distances, edge.source(), edge.target(), weight, &relaxer) {
                    self.predecessors
                        .insert(edge.target().clone(), edge.clone());
                    observer.tree_edge(edge);
                    improved = true;
                } else {
                    observer.edge_not_relaxed(edge);
                }
            }
            log::trace!("Bellman-Ford 第 {} 轮, 有改进: {}", pass + 1, improved);
            if !improved {
                break;
            }
        }

        let initial = relaxer.initial_distance();
        for edge in graph.edges() {
            let du = distances.get(edge.source()).copied().unwrap_or(initial);
            let dv = distances.get(edge.target()).copied().unwrap_or(initial);
            let combined = relaxer.combine(du, (self.weights)(edge));
            if relaxer.compare(combined, dv) == Ordering::Less {
                self.found_negative_cycle = true;
                self.minimized_edge = Some(edge.clone());
                observer.edge_minimized(edge);
                log::warn!("Bellman-Ford 发现负权环, 边: {:?}", edge);
                break;
            }
            observer.edge_not_minimized(edge);
        }
        Ok(())
    }
}
