//! 边类型

use std::fmt;

/// 有起点和终点的边
pub trait GraphEdge<V>: Clone + fmt::Debug {
    fn source(&self) -> &V;

    fn target(&self) -> &V;

    fn is_self_edge(&self) -> bool
    where
        V: PartialEq,
    {
        self.source() == self.target()
    }

    /// 给定一个端点，返回另一个端点
    fn other_end(&self, vertex: &V) -> &V
    where
        V: PartialEq,
    {
        if self.source() == vertex {
            self.target()
        } else {
            self.source()
        }
    }
}

/// 不带数据的边
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Edge<V> {
    source: V,
    target: V,
}

impl<V> Edge<V> {
    pub fn new(source: V, target: V) -> Self {
        Self { source, target }
    }
}

impl<V: Clone + fmt::Debug> GraphEdge<V> for Edge<V> {
    fn source(&self) -> &V {
        &self.source
    }

    fn target(&self) -> &V {
        &self.target
    }
}

impl<V: fmt::Display> fmt::Display for Edge<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.source, self.target)
    }
}

/// 携带标签的边，标签通常是权重
#[derive(Debug, Clone, PartialEq)]
pub struct TaggedEdge<V, T> {
    source: V,
    target: V,
    tag: T,
}

impl<V, T> TaggedEdge<V, T> {
    pub fn new(source: V, target: V, tag: T) -> Self {
        Self {
            source,
            target,
            tag,
        }
    }

    pub fn tag(&self) -> &T {
        &self.tag
    }
}

impl<V, T> GraphEdge<V> for TaggedEdge<V, T>
where
    V: Clone + fmt::Debug,
    T: Clone + fmt::Debug,
{
    fn source(&self) -> &V {
        &self.source
    }

    fn target(&self) -> &V {
        &self.target
    }
}

impl<V: fmt::Display, T: fmt::Display> fmt::Display for TaggedEdge<V, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {} [{}]", self.source, self.target, self.tag)
    }
}
