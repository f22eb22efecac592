//! 拓扑排序
//!
//! 在深度优先引擎上按完成顺序的逆序给出顶点；遇到回边说明图中有环。

use std::hash::Hash;

use super::engine::{DfsCore, DfsHandler, OutEdges};
use crate::core::{
    Algorithm, AlgorithmError, AlgorithmResult, Computation, ComputationHost, ComputationObserver,
    ComputationState,
};
use crate::graph::{Graph, IncidenceGraph};

struct FinishOrder<V> {
    order: Vec<V>,
}

impl<V: Clone, E> DfsHandler<V, E> for FinishOrder<V> {
    fn back_edge(&mut self, _edge: &E, _reversed: bool) -> AlgorithmResult<()> {
        Err(AlgorithmError::NonAcyclicGraph)
    }

    fn finish_vertex(&mut self, vertex: &V) -> AlgorithmResult<()> {
        self.order.push(vertex.clone());
        Ok(())
    }
}

/// 计算拓扑序，供需要拓扑序的算法复用
pub(crate) fn topological_order<G>(
    graph: &G,
    computation: &Computation,
) -> AlgorithmResult<Vec<G::Vertex>>
where
    G: IncidenceGraph,
    G::Vertex: Hash,
{
    let mut core = DfsCore::new();
    let mut handler = FinishOrder {
        order: Vec::with_capacity(graph.vertex_count()),
    };
    core.initialize(graph, &mut handler)?;
    core.run::<G, OutEdges, _>(graph, None, true, None, &mut handler, computation)?;
    handler.order.reverse();
    Ok(handler.order)
}

/// 拓扑排序算法
pub struct TopologicalSort<'g, G: Graph> {
    graph: &'g G,
    computation: Computation,
    order: Option<Vec<G::Vertex>>,
}

impl<'g, G: IncidenceGraph> TopologicalSort<'g, G> {
    pub fn new(graph: &'g G) -> Self {
        Self {
            graph,
            computation: Computation::new(),
            order: None,
        }
    }

    pub fn sharing_cancellation(mut self, host: &Computation) -> Self {
        self.computation = Computation::sharing_cancellation(host);
        self
    }

    /// 排序结果；尚未成功运行时返回 `NotComputed`
    pub fn sorted_vertices(&self) -> AlgorithmResult<&[G::Vertex]> {
        self.order.as_deref().ok_or(AlgorithmError::NotComputed)
    }

    pub fn compute(&mut self) -> AlgorithmResult<ComputationState> {
        self.compute_with(&mut ())
    }
}

impl<G: Graph> ComputationHost for TopologicalSort<'_, G> {
    fn computation(&self) -> &Computation {
        &self.computation
    }
}

impl<G, O> Algorithm<O> for TopologicalSort<'_, G>
where
    G: IncidenceGraph,
    O: ComputationObserver,
{
    fn initialize(&mut self, _observer: &mut O) -> AlgorithmResult<()> {
        self.order = None;
        Ok(())
    }

    fn internal_compute(&mut self, _observer: &mut O) -> AlgorithmResult<()> {
        let order = topological_order(self.graph, &self.computation)?;
        log::debug!("拓扑排序完成, 顶点数: {}", order.len());
        self.order = Some(order);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{AdjacencyGraph, Edge};

    #[test]
    fn test_sort_dag() {
        let graph = AdjacencyGraph::from_edges(vec![
            Edge::new("shirt", "tie"),
            Edge::new("tie", "jacket"),
            Edge::new("trousers", "shoes"),
            Edge::new("trousers", "belt"),
            Edge::new("belt", "jacket"),
        ]);
        let mut sort = TopologicalSort::new(&graph);
        assert_eq!(sort.sorted_vertices(), Err(AlgorithmError::NotComputed));

        sort.compute().expect("dag should sort");
        let order = sort.sorted_vertices().expect("computed");
        assert_eq!(order.len(), 6);
        let position = |v: &str| order.iter().position(|x| *x == v);
        for edge in [
            ("shirt", "tie"),
            ("tie", "jacket"),
            ("trousers", "shoes"),
            ("trousers", "belt"),
            ("belt", "jacket"),
        ] {
            assert!(position(edge.0) < position(edge.1));
        }
    }

    #[test]
    fn test_cycle_is_rejected() {
        let graph = AdjacencyGraph::from_edges(vec![
            Edge::new(1, 2),
            Edge::new(2, 3),
            Edge::new(3, 1),
        ]);
        let mut sort = TopologicalSort::new(&graph);
        assert_eq!(sort.compute(), Err(AlgorithmError::NonAcyclicGraph));
        assert_eq!(sort.state(), ComputationState::NotRunning);
        assert!(sort.sorted_vertices().is_err());
    }
}
