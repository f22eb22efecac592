//! Floyd-Warshall 全源最短路径
//!
//! 每个顶点对保存一个路径单元：距离，以及直达的边或者中间顶点。
//! 路径重建用显式栈展开中间顶点，直到只剩直达边。

use std::cmp::Ordering;
use std::collections::HashMap;

use super::relaxer::{DistanceRelaxer, ShortestDistanceRelaxer};
use crate::core::{
    Algorithm, AlgorithmError, AlgorithmResult, Computation, ComputationHost, ComputationObserver,
    ComputationState,
};
use crate::graph::{Graph, GraphEdge};

/// 路径单元的来源
#[derive(Debug, Clone, PartialEq)]
pub enum PathStep<V, E> {
    /// 顶点到自身
    Origin,
    /// 直达边
    Edge(E),
    /// 经过中间顶点
    Via(V),
}

/// 一个顶点对的最短路径信息
#[derive(Debug, Clone, PartialEq)]
pub struct PathCell<V, E> {
    pub distance: f64,
    pub step: PathStep<V, E>,
}

/// Floyd-Warshall 全源最短路径
///
/// 任一顶点到自身的距离小于 0 时运行失败并返回 `NegativeCycle`。
pub struct FloydWarshallAllShortestPaths<'g, G: Graph, W, R = ShortestDistanceRelaxer> {
    graph: &'g G,
    computation: Computation,
    weights: W,
    relaxer: R,
    vertices: Vec<G::Vertex>,
    index: HashMap<G::Vertex, usize>,
    cells: Option<Vec<Option<PathCell<G::Vertex, G::Edge>>>>,
}

impl<'g, G, W> FloydWarshallAllShortestPaths<'g, G, W, ShortestDistanceRelaxer>
where
    G: Graph,
    W: Fn(&G::Edge) -> f64,
{
    pub fn new(graph: &'g G, weights: W) -> Self {
        Self::with_relaxer(graph, weights, ShortestDistanceRelaxer)
    }
}

impl<'g, G, W, R> FloydWarshallAllShortestPaths<'g, G, W, R>
where
    G: Graph,
    W: Fn(&G::Edge) -> f64,
    R: DistanceRelaxer,
{
    pub fn with_relaxer(graph: &'g G, weights: W, relaxer: R) -> Self {
        Self {
            graph,
            computation: Computation::new(),
            weights,
            relaxer,
            vertices: Vec::new(),
            index: HashMap::new(),
            cells: None,
        }
    }

    pub fn sharing_cancellation(mut self, host: &Computation) -> Self {
        self.computation = Computation::sharing_cancellation(host);
        self
    }

    pub fn compute(&mut self) -> AlgorithmResult<ComputationState> {
        self.compute_with(&mut ())
    }

    fn computed(&self) -> AlgorithmResult<&[Option<PathCell<G::Vertex, G::Edge>>]> {
        self.cells.as_deref().ok_or(AlgorithmError::NotComputed)
    }

    fn position(&self, vertex: &G::Vertex) -> AlgorithmResult<usize> {
        self.index
            .get(vertex)
            .copied()
            .ok_or_else(|| AlgorithmError::vertex_not_found(vertex))
    }

    fn pair(&self, source: &G::Vertex, target: &G::Vertex) -> AlgorithmResult<usize> {
        Ok(self.position(source)? * self.vertices.len() + self.position(target)?)
    }

    /// 顶点对的路径单元；不可达时为 `None`
    pub fn cell(
        &self,
        source: &G::Vertex,
        target: &G::Vertex,
    ) -> AlgorithmResult<Option<&PathCell<G::Vertex, G::Edge>>> {
        let cells = self.computed()?;
        Ok(cells[self.pair(source, target)?].as_ref())
    }

    /// 最短距离；不可达时为松弛器的初始距离
    pub fn distance(&self, source: &G::Vertex, target: &G::Vertex) -> AlgorithmResult<f64> {
        Ok(self
            .cell(source, target)?
            .map_or(self.relaxer.initial_distance(), |cell| cell.distance))
    }

    pub fn try_get_distance(&self, source: &G::Vertex, target: &G::Vertex) -> Option<f64> {
        self.cell(source, target)
            .ok()
            .flatten()
            .map(|cell| cell.distance)
    }

    /// 重建最短路径上的边；不可达时为 `None`，顶点到自身为空路径
    pub fn try_get_path(
        &self,
        source: &G::Vertex,
        target: &G::Vertex,
    ) -> AlgorithmResult<Option<Vec<G::Edge>>> {
        let cells = self.computed()?;
        let n = self.vertices.len();
        let (s, t) = (self.position(source)?, self.position(target)?);
        if cells[s * n + t].is_none() {
            return Ok(None);
        }

        let mut path = Vec::new();
        let mut stack = vec![(s, t)];
        while let Some((i, j)) = stack.pop() {
            let missing = || {
                AlgorithmError::PredecessorNotFound(format!(
                    "{:?} -> {:?}",
                    self.vertices[i], self.vertices[j]
                ))
            };
            let cell = cells[i * n + j].as_ref().ok_or_else(missing)?;
            match &cell.step {
                PathStep::Edge(edge) => path.push(edge.clone()),
                PathStep::Via(via) => {
                    let k = self.position(via)?;
                    stack.push((k, j));
                    stack.push((i, k));
                }
                PathStep::Origin if i == j => {}
                PathStep::Origin => return Err(missing()),
            }
        }
        Ok(Some(path))
    }

    /// 所有可达的不同顶点对的路径与距离
    pub fn all_paths(
        &self,
    ) -> AlgorithmResult<HashMap<(G::Vertex, G::Vertex), (Vec<G::Edge>, f64)>> {
        let mut paths = HashMap::new();
        for source in &self.vertices {
            for target in &self.vertices {
                if source == target {
                    continue;
                }
                if let Some(path) = self.try_get_path(source, target)? {
                    let distance = self.distance(source, target)?;
                    paths.insert((source.clone(), target.clone()), (path, distance));
                }
            }
        }
        Ok(paths)
    }

    /// 到最远可达顶点的距离；没有其他可达顶点时为 `None`
    pub fn eccentricity(&self, vertex: &G::Vertex) -> AlgorithmResult<Option<f64>> {
        let cells = self.computed()?;
        let n = self.vertices.len();
        let i = self.position(vertex)?;
        Ok((0..n)
            .filter(|&j| j != i)
            .filter_map(|j| cells[i * n + j].as_ref().map(|cell| cell.distance))
            .reduce(f64::max))
    }

    /// 最长的最短路径
    pub fn diameter(&self) -> AlgorithmResult<Option<f64>> {
        let mut diameter: Option<f64> = None;
        for vertex in &self.vertices {
            if let Some(e) = self.eccentricity(vertex)? {
                diameter = Some(diameter.map_or(e, |d| d.max(e)));
            }
        }
        Ok(diameter)
    }

    /// 最小的偏心距
    pub fn radius(&self) -> AlgorithmResult<Option<f64>> {
        Ok(self.center_with_eccentricity()?.map(|(_, e)| e))
    }

    /// 偏心距最小的顶点，相同时取先加入图的
    pub fn center(&self) -> AlgorithmResult<Option<G::Vertex>> {
        Ok(self.center_with_eccentricity()?.map(|(v, _)| v))
    }

    fn center_with_eccentricity(&self) -> AlgorithmResult<Option<(G::Vertex, f64)>> {
        let mut best: Option<(G::Vertex, f64)> = None;
        for vertex in &self.vertices {
            if let Some(e) = self.eccentricity(vertex)? {
                if best.as_ref().map_or(true, |(_, b)| e < *b) {
                    best = Some((vertex.clone(), e));
                }
            }
        }
        Ok(best)
    }
}

impl<G: Graph, W, R> ComputationHost for FloydWarshallAllShortestPaths<'_, G, W, R> {
    fn computation(&self) -> &Computation {
        &self.computation
    }
}

impl<G, W, R, O> Algorithm<O> for FloydWarshallAllShortestPaths<'_, G, W, R>
where
    G: Graph,
    W: Fn(&G::Edge) -> f64,
    R: DistanceRelaxer,
    O: ComputationObserver,
{
    fn initialize(&mut self, _observer: &mut O) -> AlgorithmResult<()> {
        self.vertices = self.graph.vertices().cloned().collect();
        self.index = self
            .vertices
            .iter()
            .enumerate()
            .map(|(i, v)| (v.clone(), i))
            .collect();
        self.cells = None;
        Ok(())
    }

    fn internal_compute(&mut self, _observer: &mut O) -> AlgorithmResult<()> {
        let n = self.vertices.len();
        let relaxer = self.relaxer;
        log::debug!("Floyd-Warshall 开始, 顶点数: {}", n);

        let mut cells: Vec<Option<PathCell<G::Vertex, G::Edge>>> = vec![None; n * n];
        for i in 0..n {
            cells[i * n + i] = Some(PathCell {
                distance: 0.0,
                step: PathStep::Origin,
            });
        }

        // 平行边只保留最优的一条
        for edge in self.graph.edges() {
            let (Some(&s), Some(&t)) = (self.index.get(edge.source()), self.index.get(edge.target()))
            else {
                continue;
            };
            let weight = (self.weights)(edge);
            let better = match &cells[s * n + t] {
                Some(cell) => relaxer.compare(weight, cell.distance) == Ordering::Less,
                None => true,
            };
            if better {
                cells[s * n + t] = Some(PathCell {
                    distance: weight,
                    step: PathStep::Edge(edge.clone()),
                });
            }
        }

        for k in 0..n {
            self.computation.throw_if_cancellation_requested()?;
            for i in 0..n {
                let Some(dik) = cells[i * n + k].as_ref().map(|cell| cell.distance) else {
                    continue;
                };
                for j in 0..n {
                    let Some(dkj) = cells[k * n + j].as_ref().map(|cell| cell.distance) else {
                        continue;
                    };
                    let combined = relaxer.combine(dik, dkj);
                    let better = match &cells[i * n + j] {
                        Some(cell) => relaxer.compare(combined, cell.distance) == Ordering::Less,
                        None => true,
                    };
                    if better {
                        cells[i * n + j] = Some(PathCell {
                            distance: combined,
                            step: PathStep::Via(self.vertices[k].clone()),
                        });
                    }
                }
            }
        }

        for i in 0..n {
            if let Some(cell) = &cells[i * n + i] {
                if relaxer.compare(cell.distance, 0.0) == Ordering::Less {
                    log::warn!("Floyd-Warshall 发现负权环, 顶点: {:?}", self.vertices[i]);
                    return Err(AlgorithmError::NegativeCycle);
                }
            }
        }

        self.cells = Some(cells);
        Ok(())
    }
}
