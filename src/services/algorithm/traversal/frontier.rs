//! 广度优先引擎的前沿队列
//!
//! `FifoFrontier` 给出普通 BFS；`PriorityFrontier` 按松弛器的比较规则
//! 出队，Dijkstra 与 A* 通过它复用同一个 BFS 引擎。

use std::cmp::Ordering;
use std::collections::{HashMap, VecDeque};
use std::hash::Hash;

use crate::services::algorithm::shortest_path::DistanceRelaxer;

/// 访问者对灰色 / 黑色目标的处理结果
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FrontierUpdate {
    /// 不改变前沿
    #[default]
    Keep,
    /// 目标仍在前沿中，按新的优先级调整位置
    Update,
    /// 目标已完成，重新变为灰色并再次入队
    Reopen,
}

/// 前沿队列
pub trait Frontier<V> {
    fn push(&mut self, vertex: V, priority: f64);

    fn pop(&mut self) -> Option<V>;

    /// 调整已在队列中的顶点的优先级
    fn update(&mut self, vertex: &V, priority: f64);

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn clear(&mut self);
}

/// 先进先出队列，忽略优先级
#[derive(Debug, Clone)]
pub struct FifoFrontier<V> {
    queue: VecDeque<V>,
}

impl<V> FifoFrontier<V> {
    pub fn new() -> Self {
        Self {
            queue: VecDeque::new(),
        }
    }
}

impl<V> Default for FifoFrontier<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> Frontier<V> for FifoFrontier<V> {
    fn push(&mut self, vertex: V, _priority: f64) {
        self.queue.push_back(vertex);
    }

    fn pop(&mut self) -> Option<V> {
        self.queue.pop_front()
    }

    fn update(&mut self, _vertex: &V, _priority: f64) {}

    fn len(&self) -> usize {
        self.queue.len()
    }

    fn clear(&mut self) {
        self.queue.clear();
    }
}

#[derive(Debug, Clone)]
struct HeapEntry<V> {
    vertex: V,
    priority: f64,
    sequence: u64,
}

/// 带位置索引的二叉堆
///
/// 堆顶是按松弛器 `compare` 最小的顶点；优先级相同时先入队者先出。
/// 每个顶点至多在堆中出现一次，重复入队等价于调整优先级。
#[derive(Debug, Clone)]
pub struct PriorityFrontier<V, R> {
    heap: Vec<HeapEntry<V>>,
    positions: HashMap<V, usize>,
    relaxer: R,
    sequence: u64,
}

impl<V, R> PriorityFrontier<V, R>
where
    V: Clone + Eq + Hash,
    R: DistanceRelaxer,
{
    pub fn new(relaxer: R) -> Self {
        Self {
            heap: Vec::new(),
            positions: HashMap::new(),
            relaxer,
            sequence: 0,
        }
    }

    /// 堆顶顶点
    pub fn peek(&self) -> Option<&V> {
        self.heap.first().map(|entry| &entry.vertex)
    }

    pub fn contains(&self, vertex: &V) -> bool {
        self.positions.contains_key(vertex)
    }

    fn less(&self, a: usize, b: usize) -> bool {
        let (a, b) = (&self.heap[a], &self.heap[b]);
        match self.relaxer.compare(a.priority, b.priority) {
            Ordering::Less => true,
            Ordering::Greater => false,
            Ordering::Equal => a.sequence < b.sequence,
        }
    }

    fn swap(&mut self, a: usize, b: usize) {
        self.heap.swap(a, b);
        self.positions.insert(self.heap[a].vertex.clone(), a);
        self.positions.insert(self.heap[b].vertex.clone(), b);
    }

    fn sift_up(&mut self, mut index: usize) {
        while index > 0 {
            let parent = (index - 1) / 2;
            if !self.less(index, parent) {
                break;
            }
            self.swap(index, parent);
            index = parent;
        }
    }

    fn sift_down(&mut self, mut index: usize) {
        loop {
            let left = 2 * index + 1;
            let right = left + 1;
            let mut smallest = index;
            if left < self.heap.len() && self.less(left, smallest) {
                smallest = left;
            }
            if right < self.heap.len() && self.less(right, smallest) {
                smallest = right;
            }
            if smallest == index {
                break;
            }
            self.swap(index, smallest);
            index = smallest;
        }
    }
}

impl<V, R> Frontier<V> for PriorityFrontier<V, R>
where
    V: Clone + Eq + Hash,
    R: DistanceRelaxer,
{
    fn push(&mut self, vertex: V, priority: f64) {
        if self.positions.contains_key(&vertex) {
            self.update(&vertex, priority);
            return;
        }
        let index = self.heap.len();
        self.positions.insert(vertex.clone(), index);
        self.heap.push(HeapEntry {
            vertex,
            priority,
            sequence: self.sequence,
        });
        self.sequence += 1;
        self.sift_up(index);
    }

    fn pop(&mut self) -> Option<V> {
        if self.heap.is_empty() {
            return None;
        }
        let last = self.heap.len() - 1;
        self.swap(0, last);
        let entry = self.heap.pop()?;
        self.positions.remove(&entry.vertex);
        if !self.heap.is_empty() {
            self.sift_down(0);
        }
        Some(entry.vertex)
    }

    fn update(&mut self, vertex: &V, priority: f64) {
        let Some(&index) = self.positions.get(vertex) else {
            return;
        };
        let previous = self.heap[index].priority;
        self.heap[index].priority = priority;
        match self.relaxer.compare(priority, previous) {
            Ordering::Less => self.sift_up(index),
            Ordering::Greater => self.sift_down(index),
            Ordering::Equal => {}
        }
    }

    fn len(&self) -> usize {
        self.heap.len()
    }

    fn clear(&mut self) {
        self.heap.clear();
        self.positions.clear();
        self.sequence = 0;
    }
}
