//! 集成测试共享工具模块
//!
//! 提供图数据构造和记录事件的访问者，供所有集成测试使用

#![allow(dead_code)]

pub mod assertions;
pub mod data_fixtures;

use graphalgo::core::{ComputationObserver, ComputationState};
use graphalgo::graph::GraphEdge;
use graphalgo::services::algorithm::{
    BfsVisitor, DfsVisitor, ShortestPathVisitor, UndirectedBfsVisitor,
};

/// 记录的遍历事件
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    Discover(i32),
    Examine(i32),
    Finish(i32),
    Tree(i32, i32),
    NonTree(i32, i32),
    Back(i32, i32),
    ForwardOrCross(i32, i32),
}

/// 记录所有回调的访问者
#[derive(Debug, Default)]
pub struct EventLog {
    pub events: Vec<Event>,
    pub states: Vec<(ComputationState, ComputationState)>,
    pub started: usize,
    pub finished: usize,
    pub aborted: usize,
    pub examined_edges: usize,
}

impl EventLog {
    pub fn discovered(&self) -> Vec<i32> {
        self.events
            .iter()
            .filter_map(|e| match e {
                Event::Discover(v) => Some(*v),
                _ => None,
            })
            .collect()
    }

    pub fn finished_vertices(&self) -> Vec<i32> {
        self.events
            .iter()
            .filter_map(|e| match e {
                Event::Finish(v) => Some(*v),
                _ => None,
            })
            .collect()
    }

    pub fn count(&self, pred: impl Fn(&Event) -> bool) -> usize {
        self.events.iter().filter(|e| pred(e)).count()
    }
}

fn ends<E: GraphEdge<i32>>(edge: &E) -> (i32, i32) {
    (*edge.source(), *edge.target())
}

impl ComputationObserver for EventLog {
    fn state_changed(&mut self, previous: ComputationState, current: ComputationState) {
        self.states.push((previous, current));
    }
    fn started(&mut self) {
        self.started += 1;
    }
    fn finished(&mut self) {
        self.finished += 1;
    }
    fn aborted(&mut self) {
        self.aborted += 1;
    }
}

impl<E: GraphEdge<i32>> BfsVisitor<i32, E> for EventLog {
    fn discover_vertex(&mut self, vertex: &i32) {
        self.events.push(Event::Discover(*vertex));
    }
    fn examine_vertex(&mut self, vertex: &i32) {
        self.events.push(Event::Examine(*vertex));
    }
    fn examine_edge(&mut self, _edge: &E) {
        self.examined_edges += 1;
    }
    fn tree_edge(&mut self, edge: &E) {
        let (s, t) = ends(edge);
        self.events.push(Event::Tree(s, t));
    }
    fn non_tree_edge(&mut self, edge: &E) {
        let (s, t) = ends(edge);
        self.events.push(Event::NonTree(s, t));
    }
    fn finish_vertex(&mut self, vertex: &i32) {
        self.events.push(Event::Finish(*vertex));
    }
}

impl<E: GraphEdge<i32>> UndirectedBfsVisitor<i32, E> for EventLog {
    fn discover_vertex(&mut self, vertex: &i32) {
        self.events.push(Event::Discover(*vertex));
    }
    fn examine_vertex(&mut self, vertex: &i32) {
        self.events.push(Event::Examine(*vertex));
    }
    fn examine_edge(&mut self, _edge: &E, _reversed: bool) {
        self.examined_edges += 1;
    }
    fn tree_edge(&mut self, edge: &E, _reversed: bool) {
        let (s, t) = ends(edge);
        self.events.push(Event::Tree(s, t));
    }
    fn non_tree_edge(&mut self, edge: &E, _reversed: bool) {
        let (s, t) = ends(edge);
        self.events.push(Event::NonTree(s, t));
    }
    fn finish_vertex(&mut self, vertex: &i32) {
        self.events.push(Event::Finish(*vertex));
    }
}

impl<E: GraphEdge<i32>> DfsVisitor<i32, E> for EventLog {
    fn discover_vertex(&mut self, vertex: &i32) {
        self.events.push(Event::Discover(*vertex));
    }
    fn examine_edge(&mut self, _edge: &E) {
        self.examined_edges += 1;
    }
    fn tree_edge(&mut self, edge: &E) {
        let (s, t) = ends(edge);
        self.events.push(Event::Tree(s, t));
    }
    fn back_edge(&mut self, edge: &E) {
        let (s, t) = ends(edge);
        self.events.push(Event::Back(s, t));
    }
    fn forward_or_cross_edge(&mut self, edge: &E) {
        let (s, t) = ends(edge);
        self.events.push(Event::ForwardOrCross(s, t));
    }
    fn finish_vertex(&mut self, vertex: &i32) {
        self.events.push(Event::Finish(*vertex));
    }
}

impl<E: GraphEdge<i32>> ShortestPathVisitor<i32, E> for EventLog {
    fn discover_vertex(&mut self, vertex: &i32) {
        self.events.push(Event::Discover(*vertex));
    }
    fn examine_vertex(&mut self, vertex: &i32) {
        self.events.push(Event::Examine(*vertex));
    }
    fn tree_edge(&mut self, edge: &E) {
        let (s, t) = ends(edge);
        self.events.push(Event::Tree(s, t));
    }
    fn finish_vertex(&mut self, vertex: &i32) {
        self.events.push(Event::Finish(*vertex));
    }
}
