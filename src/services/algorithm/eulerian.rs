//! 欧拉路径
//!
//! 从根顶点出发搜索回到起点的闭合路径，再在已有回路上的顶点处不断拼接
//! 子回路，直到回路覆盖所有边或者无法继续扩展。奇度顶点可以先用临时边
//! 两两配对，求出回路后在临时边处切开，得到覆盖全部边的若干条路径。
//!
//! 搜索期间图不会被修改，边以其在图存储中的引用区分，平行边不会混淆。

use std::collections::{HashMap, HashSet};
use std::fmt;
use std::hash::Hash;

use crate::config::AlgorithmConfig;
use crate::core::{
    Algorithm, AlgorithmError, AlgorithmResult, Computation, ComputationHost, ComputationObserver,
    ComputationState, RootedAlgorithm, VertexSlot,
};
use crate::graph::{require_edge_identity, Graph, GraphEdge, IncidenceGraph, MutableEdgeGraph};
use crate::services::algorithm::traversal::{BfsVisitor, BreadthFirstSearch};

/// 欧拉回路搜索的事件
pub trait EulerianVisitor<V, E>: ComputationObserver {
    /// 搜索沿边前进
    fn tree_edge(&mut self, _edge: &E) {}
    /// 边被拼入回路
    fn circuit_edge(&mut self, _edge: &E) {}
    /// 从回路上的顶点出发开始新一轮搜索
    fn visit_edge(&mut self, _edge: &E) {}
}

impl<V, E> EulerianVisitor<V, E> for () {}

type EdgeKey<E> = *const E;

fn key<E>(edge: &E) -> EdgeKey<E> {
    edge as *const E
}

/// 度数为奇数的顶点，按顶点顺序
///
/// 有向图的度数是出度与入度之和，自环计两次。
pub fn odd_vertices<G: IncidenceGraph>(graph: &G) -> Vec<G::Vertex> {
    let mut degrees: HashMap<&G::Vertex, usize> = graph.vertices().map(|v| (v, 0)).collect();
    for edge in graph.edges() {
        *degrees.entry(edge.source()).or_insert(0) += 1;
        *degrees.entry(edge.target()).or_insert(0) += 1;
    }
    graph
        .vertices()
        .filter(|v| degrees.get(v).is_some_and(|d| d % 2 == 1))
        .cloned()
        .collect()
}

/// 覆盖所有边需要的路径条数
///
/// 没有奇度顶点时为 1；奇度顶点数为奇数时无解，返回 0；否则为奇度顶点数的一半。
pub fn eulerian_path_count<G: IncidenceGraph>(graph: &G) -> usize {
    let odd = odd_vertices(graph).len();
    if odd == 0 {
        1
    } else if odd % 2 == 1 {
        0
    } else {
        odd / 2
    }
}

/// 有向图是否存在欧拉回路
///
/// 每个顶点的入度等于出度，且所有非孤立顶点弱连通。
pub fn is_eulerian<G: IncidenceGraph>(graph: &G) -> bool {
    let index: HashMap<&G::Vertex, usize> =
        graph.vertices().enumerate().map(|(i, v)| (v, i)).collect();
    let n = index.len();
    let mut balance = vec![0i64; n];
    let mut touched = vec![false; n];
    let mut parent: Vec<usize> = (0..n).collect();

    fn find(parent: &mut [usize], mut x: usize) -> usize {
        while parent[x] != x {
            parent[x] = parent[parent[x]];
            x = parent[x];
        }
        x
    }

    for edge in graph.edges() {
        let (Some(&s), Some(&t)) = (index.get(edge.source()), index.get(edge.target())) else {
            return false;
        };
        balance[s] += 1;
        balance[t] -= 1;
        touched[s] = true;
        touched[t] = true;
        let (a, b) = (find(&mut parent, s), find(&mut parent, t));
        parent[a] = b;
    }

    if balance.iter().any(|b| *b != 0) {
        return false;
    }
    let roots = (0..n)
        .filter(|&v| touched[v])
        .map(|v| find(&mut parent, v))
        .collect::<HashSet<_>>();
    roots.len() <= 1
}

struct PredecessorRecorder<V, E> {
    predecessors: HashMap<V, E>,
}

impl<V, E> ComputationObserver for PredecessorRecorder<V, E> {}

impl<V, E> BfsVisitor<V, E> for PredecessorRecorder<V, E>
where
    V: Clone + Eq + Hash,
    E: GraphEdge<V>,
{
    fn tree_edge(&mut self, edge: &E) {
        self.predecessors
            .insert(edge.target().clone(), edge.clone());
    }
}

type EdgeFactory<'g, V, E> = Box<dyn Fn(&V, &V) -> E + 'g>;

/// 搜索帧：顶点的出边与游标
struct SearchFrame<'a, E> {
    edges: Vec<&'a E>,
    cursor: usize,
}

/// 欧拉回路 / 路径算法
pub struct EulerianTrail<'g, G: Graph> {
    graph: &'g mut G,
    computation: Computation,
    root: VertexSlot<G::Vertex>,
    circuit: Vec<G::Edge>,
    circuit_temporary: Vec<bool>,
    temporary_edges: Vec<G::Edge>,
    edge_factory: Option<EdgeFactory<'g, G::Vertex, G::Edge>>,
    pair_on_compute: bool,
    computed: bool,
}

impl<'g, G> EulerianTrail<'g, G>
where
    G: MutableEdgeGraph,
    G::Edge: PartialEq,
{
    pub fn new(graph: &'g mut G) -> Self {
        Self {
            graph,
            computation: Computation::new(),
            root: VertexSlot::new(),
            circuit: Vec::new(),
            circuit_temporary: Vec::new(),
            temporary_edges: Vec::new(),
            edge_factory: None,
            pair_on_compute: false,
            computed: false,
        }
    }

    pub fn sharing_cancellation(mut self, host: &Computation) -> Self {
        self.computation = Computation::sharing_cancellation(host);
        self
    }

    /// `add_temporary_edges` 为真时，每次运行前用边工厂自动配对奇度顶点
    pub fn with_config(mut self, config: &AlgorithmConfig) -> Self {
        self.pair_on_compute = config.add_temporary_edges;
        self
    }

    /// 创建临时边的工厂，参数为起点和终点
    pub fn with_edge_factory<F>(mut self, factory: F) -> Self
    where
        F: Fn(&G::Vertex, &G::Vertex) -> G::Edge + 'g,
    {
        self.edge_factory = Some(Box::new(factory));
        self
    }

    pub fn graph(&self) -> &G {
        &*self.graph
    }

    /// 最近一次运行得到的回路
    pub fn circuit(&self) -> &[G::Edge] {
        &self.circuit
    }

    pub fn temporary_edges(&self) -> &[G::Edge] {
        &self.temporary_edges
    }

    /// 回路是否恰好用到图中每条边一次并且首尾相接
    pub fn is_circuit_complete(&self) -> bool {
        if !self.computed || self.circuit.len() != self.graph.edge_count() {
            return false;
        }
        let chained = self
            .circuit
            .windows(2)
            .all(|pair| pair[0].target() == pair[1].source());
        let closed = match (self.circuit.first(), self.circuit.last()) {
            (Some(first), Some(last)) => last.target() == first.source(),
            _ => true,
        };
        chained && closed
    }

    /// 用临时边把奇度顶点两两配对
    ///
    /// 优先连接相邻且没有反向边的奇度顶点（新边方向与已有边相反）。
    /// 找不到时与剩余的另一个奇度顶点配对，优先选择出入度差符号相反的顶点，
    /// 新边从入度多的一方指向出度多的一方。每一步都移除两个顶点。
    pub fn add_temporary_edges<F>(&mut self, factory: F) -> AlgorithmResult<Vec<G::Edge>>
    where
        F: Fn(&G::Vertex, &G::Vertex) -> G::Edge,
    {
        let mut odd = odd_vertices(&*self.graph);
        if odd.len() % 2 != 0 {
            return Err(AlgorithmError::EulerianAugmentation(format!(
                "奇度顶点数为奇数: {}",
                odd.len()
            )));
        }

        // 出度减入度
        let mut balance: HashMap<G::Vertex, i64> = HashMap::new();
        for edge in self.graph.edges() {
            *balance.entry(edge.source().clone()).or_insert(0) += 1;
            *balance.entry(edge.target().clone()).or_insert(0) -= 1;
        }
        let balance_of =
            |balance: &HashMap<G::Vertex, i64>, v: &G::Vertex| balance.get(v).copied().unwrap_or(0);

        let mut added = Vec::with_capacity(odd.len() / 2);
        while !odd.is_empty() {
            let u = odd.remove(0);
            let adjacent = self.graph.out_edges(&u).find_map(|edge| {
                let v = edge.target();
                let candidate = *v != u
                    && odd.contains(v)
                    && !self.graph.contains_edge_between(v, &u);
                candidate.then(|| v.clone())
            });
            let (source, target) = match adjacent {
                Some(v) => (v, u),
                None => {
                    if odd.is_empty() {
                        return Err(AlgorithmError::EulerianAugmentation(format!(
                            "奇度顶点 {:?} 无法配对",
                            u
                        )));
                    }
                    let own = balance_of(&balance, &u).signum();
                    let partner = odd
                        .iter()
                        .position(|v| own * balance_of(&balance, v).signum() < 0)
                        .unwrap_or(0);
                    let v = odd[partner].clone();
                    log::warn!("奇度顶点 {:?} 没有可用的相邻奇度顶点, 与 {:?} 配对", u, v);
                    if balance_of(&balance, &u) <= balance_of(&balance, &v) {
                        (u, v)
                    } else {
                        (v, u)
                    }
                }
            };
            odd.retain(|v| *v != source && *v != target);

            let edge = factory(&source, &target);
            if !self.graph.add_edge(edge.clone()) {
                return Err(AlgorithmError::EulerianAugmentation(format!(
                    "无法添加临时边 {:?}",
                    edge
                )));
            }
            *balance.entry(source).or_insert(0) += 1;
            *balance.entry(target).or_insert(0) -= 1;
            added.push(edge);
        }

        log::debug!("添加了 {} 条临时边", added.len());
        self.temporary_edges.extend(added.iter().cloned());
        Ok(added)
    }

    /// 删除之前添加的临时边，返回删除的条数
    pub fn remove_temporary_edges(&mut self) -> usize {
        let mut removed = 0;
        for edge in self.temporary_edges.drain(..) {
            if self.graph.remove_edge(&edge) {
                removed += 1;
            }
        }
        removed
    }

    /// 在临时边处切开回路
    ///
    /// 回路从第一条临时边之后开始读取，因此跨越回路首尾的路径不会被拆成两段。
    pub fn trails(&self) -> AlgorithmResult<Vec<Vec<G::Edge>>> {
        if !self.computed {
            return Err(AlgorithmError::NotComputed);
        }
        let n = self.circuit.len();
        let Some(first) = self.circuit_temporary.iter().position(|t| *t) else {
            return Ok(if n == 0 {
                Vec::new()
            } else {
                vec![self.circuit.clone()]
            });
        };

        let mut trails = Vec::new();
        let mut trail = Vec::new();
        for offset in 1..=n {
            let i = (first + offset) % n;
            if self.circuit_temporary[i] {
                if !trail.is_empty() {
                    trails.push(std::mem::take(&mut trail));
                }
            } else {
                trail.push(self.circuit[i].clone());
            }
        }
        if !trail.is_empty() {
            trails.push(trail);
        }
        Ok(trails)
    }

    /// 所有路径都从 `start` 出发
    ///
    /// 每遇到一条临时边，新路径先沿不含临时边的最短路径从 `start` 走到
    /// 临时边的终点，再继续沿回路前进。
    pub fn trails_from(&self, start: &G::Vertex) -> AlgorithmResult<Vec<Vec<G::Edge>>> {
        if !self.computed {
            return Err(AlgorithmError::NotComputed);
        }
        let n = self.circuit.len();
        let begin = (0..n)
            .find(|&i| !self.circuit_temporary[i] && self.circuit[i].source() == start)
            .ok_or_else(|| AlgorithmError::vertex_not_found(start))?;

        let graph: &G = &*self.graph;
        let temporary = temporary_keys(graph, &self.temporary_edges);
        let mut bfs = BreadthFirstSearch::new(graph).with_edge_filter(move |edges| {
            edges
                .into_iter()
                .filter(|edge| !temporary.contains(&key(*edge)))
                .collect()
        });
        let mut recorder = PredecessorRecorder {
            predecessors: HashMap::new(),
        };
        bfs.compute_from(start.clone(), &mut recorder)?;

        let path_to = |target: &G::Vertex| -> AlgorithmResult<Vec<G::Edge>> {
            let mut path = Vec::new();
            let mut vertex = target;
            while vertex != start {
                let edge = recorder
                    .predecessors
                    .get(vertex)
                    .ok_or_else(|| AlgorithmError::PredecessorNotFound(format!("{:?}", vertex)))?;
                path.push(edge.clone());
                vertex = edge.source();
            }
            path.reverse();
            Ok(path)
        };

        let mut trails = Vec::new();
        let mut trail = Vec::new();
        for i in (begin..n).chain(0..begin) {
            let edge = &self.circuit[i];
            if self.circuit_temporary[i] {
                if !trail.is_empty() {
                    trails.push(std::mem::take(&mut trail));
                }
                trail = path_to(edge.target())?;
            } else {
                trail.push(edge.clone());
            }
        }
        if !trail.is_empty() {
            trails.push(trail);
        }
        Ok(trails)
    }

    pub fn compute(&mut self) -> AlgorithmResult<ComputationState> {
        self.compute_with(&mut ())
    }
}

/// 临时边在图存储中的引用；相等的边取最近加入的那一条
fn temporary_keys<G>(graph: &G, temporary: &[G::Edge]) -> HashSet<EdgeKey<G::Edge>>
where
    G: IncidenceGraph,
    G::Edge: PartialEq,
{
    let mut keys = HashSet::new();
    for edge in temporary {
        let found = graph
            .out_edges(edge.source())
            .filter(|candidate| *candidate == edge && !keys.contains(&key(*candidate)))
            .last();
        if let Some(found) = found {
            keys.insert(key(found));
        }
    }
    keys
}

/// 单次运行的搜索状态
struct CircuitSearch<'a, 'o, G: Graph, O: ?Sized> {
    graph: &'a G,
    computation: &'a Computation,
    observer: &'o mut O,
    circuit: Vec<&'a G::Edge>,
    temporary_circuit: Vec<&'a G::Edge>,
    used: HashSet<EdgeKey<G::Edge>>,
}

impl<'a, G, O> CircuitSearch<'a, '_, G, O>
where
    G: IncidenceGraph,
    O: EulerianVisitor<G::Vertex, G::Edge> + ?Sized,
{
    fn out_edges(&self, vertex: &G::Vertex) -> Vec<&'a G::Edge> {
        let graph: &'a G = self.graph;
        graph.out_edges(vertex).collect()
    }

    /// 从 `start` 出发找一条回到 `current` 的路径，放进临时回路
    fn search(&mut self, start: &G::Vertex, current: &G::Vertex) -> AlgorithmResult<bool> {
        let mut stack = vec![SearchFrame {
            edges: self.out_edges(start),
            cursor: 0,
        }];

        while let Some(frame) = stack.last_mut() {
            self.computation.throw_if_cancellation_requested()?;

            let used = &self.used;
            let next = frame.edges[frame.cursor..]
                .iter()
                .position(|edge| !used.contains(&key(*edge)));
            match next {
                Some(offset) => {
                    let edge = frame.edges[frame.cursor + offset];
                    frame.cursor += offset + 1;
                    self.observer.tree_edge(edge);
                    self.temporary_circuit.push(edge);
                    self.used.insert(key(edge));
                    if edge.target() == current {
                        return Ok(true);
                    }
                    stack.push(SearchFrame {
                        edges: self.out_edges(edge.target()),
                        cursor: 0,
                    });
                }
                None => {
                    stack.pop();
                    // 死路：撤回走到这里的边
                    if !stack.is_empty() {
                        if let Some(edge) = self.temporary_circuit.pop() {
                            self.used.remove(&key(edge));
                        }
                    }
                }
            }
        }
        Ok(false)
    }

    /// 把临时回路拼接到回路中第一条从 `current` 出发的边之前
    fn augment(&mut self, current: &G::Vertex) -> bool {
        let mut spliced = Vec::with_capacity(self.circuit.len() + self.temporary_circuit.len());
        let split = self
            .circuit
            .iter()
            .position(|edge| edge.source() == current)
            .unwrap_or(self.circuit.len());
        spliced.extend_from_slice(&self.circuit[..split]);

        let mut taken = 0;
        for edge in &self.temporary_circuit {
            spliced.push(*edge);
            self.observer.circuit_edge(edge);
            taken += 1;
            if edge.target() == current {
                break;
            }
        }
        for edge in self.temporary_circuit.drain(..).skip(taken) {
            self.used.remove(&key(edge));
        }

        for edge in &self.circuit[split..] {
            spliced.push(*edge);
            self.observer.circuit_edge(edge);
        }
        self.circuit = spliced;
        self.circuit.len() == self.graph.edge_count()
    }

    /// 在回路上找一个还有未用出边的顶点并从它开始搜索
    fn visit(&mut self) -> AlgorithmResult<Option<G::Vertex>> {
        let graph: &'a G = self.graph;
        for i in 0..self.circuit.len() {
            let edge: &'a G::Edge = self.circuit[i];
            let vertex = edge.source();
            let unused = graph
                .out_edges(vertex)
                .find(|edge| !self.used.contains(&key(*edge)));
            if let Some(edge) = unused {
                self.observer.visit_edge(edge);
                if self.search(vertex, vertex)? {
                    return Ok(Some(vertex.clone()));
                }
            }
        }
        Ok(None)
    }
}

impl<G: Graph> ComputationHost for EulerianTrail<'_, G> {
    fn computation(&self) -> &Computation {
        &self.computation
    }
}

impl<G: Graph> RootedAlgorithm for EulerianTrail<'_, G> {
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

impl<G, O> Algorithm<O> for EulerianTrail<'_, G>
where
    G: MutableEdgeGraph,
    G::Edge: PartialEq,
    O: EulerianVisitor<G::Vertex, G::Edge>,
{
    fn initialize(&mut self, _observer: &mut O) -> AlgorithmResult<()> {
        require_edge_identity::<G::Edge>()?;
        self.circuit.clear();
        self.circuit_temporary.clear();
        self.computed = false;
        if self.pair_on_compute && self.temporary_edges.is_empty() {
            let factory = self.edge_factory.take().ok_or_else(|| {
                AlgorithmError::EulerianAugmentation("未设置临时边工厂".to_string())
            })?;
            let result = self.add_temporary_edges(|u, v| factory(u, v));
            self.edge_factory = Some(factory);
            result?;
        }
        Ok(())
    }

    fn internal_compute(&mut self, observer: &mut O) -> AlgorithmResult<()> {
        let graph: &G = &*self.graph;
        let root = match self.root.get() {
            Some(root) if !graph.contains_vertex(root) => {
                return Err(AlgorithmError::vertex_not_found(root));
            }
            Some(root) => root.clone(),
            None => {
                // 没有根顶点时从第一个有出边的顶点开始
                let first = graph
                    .vertices()
                    .find(|v| graph.out_degree(v) > 0)
                    .or_else(|| graph.vertices().next());
                match first {
                    Some(first) => first.clone(),
                    None => {
                        self.computed = true;
                        return Ok(());
                    }
                }
            }
        };
        log::debug!(
            "欧拉回路搜索开始, 根顶点: {:?}, 边数: {}",
            root,
            graph.edge_count()
        );

        let mut search = CircuitSearch {
            graph,
            computation: &self.computation,
            observer,
            circuit: Vec::with_capacity(graph.edge_count()),
            temporary_circuit: Vec::new(),
            used: HashSet::new(),
        };

        search.search(&root, &root)?;
        let mut complete = search.augment(&root);
        while !complete {
            match search.visit()? {
                Some(current) => complete = search.augment(&current),
                None => break,
            }
        }
        if !complete {
            log::warn!(
                "欧拉回路未覆盖所有边: {}/{}",
                search.circuit.len(),
                graph.edge_count()
            );
        }

        let temporary = temporary_keys(graph, &self.temporary_edges);
        self.circuit_temporary = search
            .circuit
            .iter()
            .map(|edge| temporary.contains(&key(*edge)))
            .collect();
        self.circuit = search.circuit.into_iter().cloned().collect();
        self.computed = true;
        Ok(())
    }
}

impl<G: Graph> fmt::Debug for EulerianTrail<'_, G> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EulerianTrail")
            .field("root", &self.root)
            .field("circuit", &self.circuit)
            .field("temporary_edges", &self.temporary_edges)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{AdjacencyGraph, Edge};

    type DirectedGraph = AdjacencyGraph<i32, Edge<i32>>;

    /// 不占空间的自环边
    #[derive(Debug, Clone, PartialEq)]
    struct Loop;

    impl GraphEdge<i32> for Loop {
        fn source(&self) -> &i32 {
            &0
        }
        fn target(&self) -> &i32 {
            &0
        }
    }

    #[test]
    fn test_zero_sized_edges_are_rejected() {
        let mut graph: AdjacencyGraph<i32, Loop> = AdjacencyGraph::from_edges(vec![Loop, Loop]);
        let mut trail = EulerianTrail::new(&mut graph);
        assert!(matches!(
            trail.compute(),
            Err(AlgorithmError::ZeroSizedEdge(_))
        ));
        assert_eq!(trail.state(), ComputationState::NotRunning);
    }

    fn square() -> DirectedGraph {
        AdjacencyGraph::from_edges(vec![
            Edge::new(1, 2),
            Edge::new(2, 3),
            Edge::new(3, 4),
            Edge::new(4, 1),
        ])
    }

    #[test]
    fn test_simple_circuit() {
        let mut graph = square();
        assert!(is_eulerian(&graph));
        assert_eq!(eulerian_path_count(&graph), 1);

        let mut trail = EulerianTrail::new(&mut graph);
        trail.compute().expect("eulerian should succeed");
        assert!(trail.is_circuit_complete());
        assert_eq!(trail.circuit().len(), 4);
        assert_eq!(trail.trails().expect("computed").len(), 1);
    }

    #[test]
    fn test_splices_sub_circuits() {
        // 两个共享顶点 1 的环
        let mut graph: DirectedGraph = AdjacencyGraph::from_edges(vec![
            Edge::new(1, 2),
            Edge::new(2, 1),
            Edge::new(2, 3),
            Edge::new(3, 2),
            Edge::new(1, 4),
            Edge::new(4, 1),
        ]);
        assert!(is_eulerian(&graph));
        let mut trail = EulerianTrail::new(&mut graph);
        trail.compute_from(1, &mut ()).expect("eulerian should succeed");
        assert!(trail.is_circuit_complete());
        assert_eq!(trail.circuit().first().map(|e| *e.source()), Some(1));
    }

    #[test]
    fn test_parallel_edges_used_once_each() {
        let mut graph: DirectedGraph = AdjacencyGraph::from_edges(vec![
            Edge::new(1, 2),
            Edge::new(2, 1),
            Edge::new(1, 2),
            Edge::new(2, 1),
        ]);
        let mut trail = EulerianTrail::new(&mut graph);
        trail.compute().expect("eulerian should succeed");
        assert!(trail.is_circuit_complete());
    }

    #[test]
    fn test_odd_vertices_and_path_count() {
        let graph: DirectedGraph = AdjacencyGraph::from_edges(vec![
            Edge::new(1, 2),
            Edge::new(2, 3),
            Edge::new(3, 4),
        ]);
        assert_eq!(odd_vertices(&graph), vec![1, 4]);
        assert_eq!(eulerian_path_count(&graph), 1);
        assert!(!is_eulerian(&graph));

        let mut star: DirectedGraph = AdjacencyGraph::new();
        star.add_vertices(vec![0, 1, 2, 3]);
        for leaf in 1..=3 {
            star.add_edge(Edge::new(0, leaf));
        }
        assert_eq!(odd_vertices(&star).len(), 4);
        assert_eq!(eulerian_path_count(&star), 2);
    }

    #[test]
    fn test_temporary_edges_round_trip() {
        let mut graph: DirectedGraph = AdjacencyGraph::from_edges(vec![
            Edge::new(1, 2),
            Edge::new(2, 3),
        ]);
        let mut trail = EulerianTrail::new(&mut graph);
        let added = trail
            .add_temporary_edges(|u, v| Edge::new(*u, *v))
            .expect("two odd vertices pair up");
        // 从入度多的 3 指向出度多的 1
        assert_eq!(added, vec![Edge::new(3, 1)]);
        assert_eq!(trail.graph().edge_count(), 3);

        trail.compute_from(1, &mut ()).expect("eulerian should succeed");
        assert!(trail.is_circuit_complete());
        let trails = trail.trails().expect("computed");
        assert_eq!(trails, vec![vec![Edge::new(1, 2), Edge::new(2, 3)]]);

        assert_eq!(trail.remove_temporary_edges(), 1);
        assert_eq!(trail.graph().edge_count(), 2);
        assert!(trail.temporary_edges().is_empty());
    }

    #[test]
    fn test_adjacent_odd_vertices_pair_against_direction() {
        let mut graph: DirectedGraph = AdjacencyGraph::from_edges(vec![Edge::new(1, 2)]);
        let mut trail = EulerianTrail::new(&mut graph);
        let added = trail
            .add_temporary_edges(|u, v| Edge::new(*u, *v))
            .expect("pairing succeeds");
        assert_eq!(added, vec![Edge::new(2, 1)]);
    }

    #[test]
    fn test_fallback_pairing_terminates() {
        // 1 和 2 相邻但 2 已有指向 1 的边，只能走兜底配对
        let mut graph: DirectedGraph = AdjacencyGraph::from_edges(vec![
            Edge::new(1, 2),
            Edge::new(2, 1),
            Edge::new(2, 1),
        ]);
        assert_eq!(odd_vertices(&graph), vec![1, 2]);
        let mut trail = EulerianTrail::new(&mut graph);
        let added = trail
            .add_temporary_edges(|u, v| Edge::new(*u, *v))
            .expect("fallback pairing succeeds");
        assert_eq!(added, vec![Edge::new(1, 2)]);
        assert!(odd_vertices(trail.graph()).is_empty());
        assert!(is_eulerian(trail.graph()));
    }

    #[test]
    fn test_pair_on_compute_requires_factory() {
        let mut graph: DirectedGraph = AdjacencyGraph::from_edges(vec![Edge::new(1, 2)]);
        let config = AlgorithmConfig {
            add_temporary_edges: true,
            ..AlgorithmConfig::default()
        };
        let mut trail = EulerianTrail::new(&mut graph).with_config(&config);
        assert!(matches!(
            trail.compute(),
            Err(AlgorithmError::EulerianAugmentation(_))
        ));
    }

    #[test]
    fn test_trails_before_compute() {
        let mut graph = square();
        let trail = EulerianTrail::new(&mut graph);
        assert_eq!(trail.trails(), Err(AlgorithmError::NotComputed));
    }
}
