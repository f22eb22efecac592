//! 最短路径访问者

use crate::core::ComputationObserver;

/// 最短路径算法的事件
///
/// 不是每个算法都会触发全部事件：`edge_minimized` / `edge_not_minimized`
/// 只来自 Bellman-Ford 的负权环检查，`target_reached` 只来自设置了目标的 A*。
pub trait ShortestPathVisitor<V, E>: ComputationObserver {
    fn initialize_vertex(&mut self, _vertex: &V) {}
    fn start_vertex(&mut self, _vertex: &V) {}
    fn discover_vertex(&mut self, _vertex: &V) {}
    fn examine_vertex(&mut self, _vertex: &V) {}
    fn examine_edge(&mut self, _edge: &E) {}
    /// 边被松弛，目标距离变短
    fn tree_edge(&mut self, _edge: &E) {}
    fn edge_not_relaxed(&mut self, _edge: &E) {}
    fn finish_vertex(&mut self, _vertex: &V) {}
    fn target_reached(&mut self, _vertex: &V) {}
    fn edge_minimized(&mut self, _edge: &E) {}
    fn edge_not_minimized(&mut self, _edge: &E) {}
}

impl<V, E> ShortestPathVisitor<V, E> for () {}
