//! 遍历访问者
//!
//! 每个遍历引擎的通知都定义为一个 trait，所有方法默认为空实现，
//! 调用方只需覆盖关心的事件。`()` 实现了全部访问者，表示不观察。

use crate::core::ComputationObserver;

/// 广度优先搜索访问者
pub trait BfsVisitor<V, E>: ComputationObserver {
    fn initialize_vertex(&mut self, _vertex: &V) {}
    fn start_vertex(&mut self, _vertex: &V) {}
    fn discover_vertex(&mut self, _vertex: &V) {}
    fn examine_vertex(&mut self, _vertex: &V) {}
    fn examine_edge(&mut self, _edge: &E) {}
    fn tree_edge(&mut self, _edge: &E) {}
    fn non_tree_edge(&mut self, _edge: &E) {}
    fn gray_target(&mut self, _edge: &E) {}
    fn black_target(&mut self, _edge: &E) {}
    fn finish_vertex(&mut self, _vertex: &V) {}
}

/// 深度优先搜索访问者
pub trait DfsVisitor<V, E>: ComputationObserver {
    fn initialize_vertex(&mut self, _vertex: &V) {}
    fn start_vertex(&mut self, _vertex: &V) {}
    fn discover_vertex(&mut self, _vertex: &V) {}
    fn examine_edge(&mut self, _edge: &E) {}
    fn tree_edge(&mut self, _edge: &E) {}
    fn back_edge(&mut self, _edge: &E) {}
    fn forward_or_cross_edge(&mut self, _edge: &E) {}
    fn finish_vertex(&mut self, _vertex: &V) {}
}

/// 无向广度优先搜索访问者
///
/// `reversed` 为真表示边是逆着存储方向走的（从终点走向起点）。
pub trait UndirectedBfsVisitor<V, E>: ComputationObserver {
    fn initialize_vertex(&mut self, _vertex: &V) {}
    fn start_vertex(&mut self, _vertex: &V) {}
    fn discover_vertex(&mut self, _vertex: &V) {}
    fn examine_vertex(&mut self, _vertex: &V) {}
    fn examine_edge(&mut self, _edge: &E, _reversed: bool) {}
    fn tree_edge(&mut self, _edge: &E, _reversed: bool) {}
    fn non_tree_edge(&mut self, _edge: &E, _reversed: bool) {}
    fn gray_target(&mut self, _edge: &E, _reversed: bool) {}
    fn black_target(&mut self, _edge: &E, _reversed: bool) {}
    fn finish_vertex(&mut self, _vertex: &V) {}
}

/// 无向（以及双向）深度优先搜索访问者
pub trait UndirectedDfsVisitor<V, E>: ComputationObserver {
    fn initialize_vertex(&mut self, _vertex: &V) {}
    fn start_vertex(&mut self, _vertex: &V) {}
    fn discover_vertex(&mut self, _vertex: &V) {}
    fn examine_edge(&mut self, _edge: &E, _reversed: bool) {}
    fn tree_edge(&mut self, _edge: &E, _reversed: bool) {}
    fn back_edge(&mut self, _edge: &E, _reversed: bool) {}
    fn forward_or_cross_edge(&mut self, _edge: &E, _reversed: bool) {}
    fn finish_vertex(&mut self, _vertex: &V) {}
}

impl<V, E> BfsVisitor<V, E> for () {}
impl<V, E> DfsVisitor<V, E> for () {}
impl<V, E> UndirectedBfsVisitor<V, E> for () {}
impl<V, E> UndirectedDfsVisitor<V, E> for () {}
