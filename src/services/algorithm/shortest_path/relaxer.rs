//! 距离松弛器
//!
//! 松弛器决定初始距离、距离之间的序以及距离与边权的组合方式。
//! 所有基于松弛的最短路径算法共用同一个 [`relax`]。

use std::cmp::Ordering;
use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;

/// 距离松弛策略
///
/// `compare` 必须是严格弱序，并与 `combine` 一致：组合出的距离
/// 按 `compare` 不会比原距离"更好"，除非边权本身更好。
pub trait DistanceRelaxer: Copy + fmt::Debug + Send + Sync + 'static {
    /// 尚未到达的顶点的距离
    fn initial_distance(&self) -> f64;

    /// `Less` 表示 `a` 比 `b` 更优
    fn compare(&self, a: f64, b: f64) -> Ordering;

    fn combine(&self, distance: f64, weight: f64) -> f64;
}

fn ascending(a: f64, b: f64) -> Ordering {
    a.partial_cmp(&b).unwrap_or(Ordering::Equal)
}

/// 最短距离：求和，越小越优
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ShortestDistanceRelaxer;

/// 关键路径：求和，越大越优
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CriticalDistanceRelaxer;

/// 最少边数：每条边计 1
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EdgeCountRelaxer;

/// 最小生成树式：距离直接替换为边权
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PrimRelaxer;

pub const SHORTEST_DISTANCE: ShortestDistanceRelaxer = ShortestDistanceRelaxer;
pub const CRITICAL_DISTANCE: CriticalDistanceRelaxer = CriticalDistanceRelaxer;
pub const EDGE_COUNT: EdgeCountRelaxer = EdgeCountRelaxer;
pub const PRIM: PrimRelaxer = PrimRelaxer;

impl DistanceRelaxer for ShortestDistanceRelaxer {
    fn initial_distance(&self) -> f64 {
        f64::INFINITY
    }

    fn compare(&self, a: f64, b: f64) -> Ordering {
        ascending(a, b)
    }

    fn combine(&self, distance: f64, weight: f64) -> f64 {
        distance + weight
    }
}

impl DistanceRelaxer for CriticalDistanceRelaxer {
    fn initial_distance(&self) -> f64 {
        f64::NEG_INFINITY
    }

    fn compare(&self, a: f64, b: f64) -> Ordering {
        ascending(b, a)
    }

    fn combine(&self, distance: f64, weight: f64) -> f64 {
        distance + weight
    }
}

impl DistanceRelaxer for EdgeCountRelaxer {
    fn initial_distance(&self) -> f64 {
        f64::INFINITY
    }

    fn compare(&self, a: f64, b: f64) -> Ordering {
        ascending(a, b)
    }

    fn combine(&self, distance: f64, _weight: f64) -> f64 {
        distance + 1.0
    }
}

impl DistanceRelaxer for PrimRelaxer {
    fn initial_distance(&self) -> f64 {
        f64::INFINITY
    }

    fn compare(&self, a: f64, b: f64) -> Ordering {
        ascending(a, b)
    }

    fn combine(&self, _distance: f64, weight: f64) -> f64 {
        weight
    }
}

/// 松弛一条边 `source -> target`
///
/// 组合后的距离按松弛器严格更优时写入并返回 `true`。缺失的距离视为初始距离。
pub fn relax<V, R>(
    distances: &mut HashMap<V, f64>,
    source: &V,
    target: &V,
    weight: f64,
    relaxer: &R,
) -> bool
where
    V: Clone + Eq + Hash,
    R: DistanceRelaxer,
{
    let initial = relaxer.initial_distance();
    let du = distances.get(source).copied().unwrap_or(initial);
    let dv = distances.get(target).copied().unwrap_or(initial);
    let combined = relaxer.combine(du, weight);
    if relaxer.compare(combined, dv) == Ordering::Less {
        distances.insert(target.clone(), combined);
        true
    } else {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_relax_improves_only_when_better() {
        let mut distances = HashMap::new();
        distances.insert("a", 0.0);

        assert!(relax(&mut distances, &"a", &"b", 2.0, &SHORTEST_DISTANCE));
        assert_eq!(distances["b"], 2.0);
        assert!(!relax(&mut distances, &"a", &"b", 2.0, &SHORTEST_DISTANCE));
        assert!(relax(&mut distances, &"a", &"b", 1.5, &SHORTEST_DISTANCE));
        assert_eq!(distances["b"], 1.5);
    }

    #[test]
    fn test_unreached_source_never_relaxes() {
        let mut distances: HashMap<&str, f64> = HashMap::new();
        assert!(!relax(&mut distances, &"x", &"y", -5.0, &SHORTEST_DISTANCE));
        assert!(distances.is_empty());
    }

    #[test]
    fn test_critical_path_prefers_longer() {
        let mut distances = HashMap::new();
        distances.insert(1, 0.0);
        assert!(relax(&mut distances, &1, &2, 3.0, &CRITICAL_DISTANCE));
        assert!(relax(&mut distances, &1, &2, 5.0, &CRITICAL_DISTANCE));
        assert!(!relax(&mut distances, &1, &2, 4.0, &CRITICAL_DISTANCE));
        assert_eq!(distances[&2], 5.0);
    }

    #[test]
    fn test_edge_count_and_prim() {
        assert_eq!(EDGE_COUNT.combine(2.0, 100.0), 3.0);
        assert_eq!(PRIM.combine(10.0, 4.0), 4.0);
        assert_eq!(CRITICAL_DISTANCE.initial_distance(), f64::NEG_INFINITY);
        assert_eq!(
            CRITICAL_DISTANCE.compare(1.0, 2.0),
            Ordering::Greater
        );
    }
}
