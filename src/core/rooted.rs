//! 带根顶点的算法基础
//!
//! 根顶点与目标顶点都用 `Option<V>` 表示，"未设置" 从不通过与默认值比较来推断，
//! 因为顶点类型的默认值本身可能就是一个合法顶点。

use std::fmt;
use std::hash::Hash;

use super::computation::{Algorithm, ComputationHost, ComputationObserver, ComputationState};
use super::error::{AlgorithmError, AlgorithmResult};

type SlotListener<V> = Box<dyn FnMut(Option<&V>) + Send>;

/// 可选顶点槽位，值变化时通知监听者
pub struct VertexSlot<V> {
    vertex: Option<V>,
    listeners: Vec<SlotListener<V>>,
}

impl<V: PartialEq> VertexSlot<V> {
    pub fn new() -> Self {
        Self {
            vertex: None,
            listeners: Vec::new(),
        }
    }

    /// 设置顶点；只有值发生变化时才通知
    pub fn set(&mut self, vertex: V) {
        if self.vertex.as_ref() == Some(&vertex) {
            return;
        }
        self.vertex = Some(vertex);
        self.notify();
    }

    /// 清除顶点
    pub fn clear(&mut self) {
        if self.vertex.take().is_some() {
            self.notify();
        }
    }

    pub fn get(&self) -> Option<&V> {
        self.vertex.as_ref()
    }

    pub fn is_set(&self) -> bool {
        self.vertex.is_some()
    }

    /// 注册变化监听者
    pub fn on_changed<F>(&mut self, listener: F)
    where
        F: FnMut(Option<&V>) + Send + 'static,
    {
        self.listeners.push(Box::new(listener));
    }

    fn notify(&mut self) {
        let current = self.vertex.as_ref();
        for listener in self.listeners.iter_mut() {
            listener(current);
        }
    }
}

impl<V: PartialEq> Default for VertexSlot<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: fmt::Debug> fmt::Debug for VertexSlot<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VertexSlot")
            .field("vertex", &self.vertex)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

/// 带根顶点的算法
pub trait RootedAlgorithm: ComputationHost {
    type Vertex: Clone + Eq + Hash + fmt::Debug;

    fn root_slot(&self) -> &VertexSlot<Self::Vertex>;

    fn root_slot_mut(&mut self) -> &mut VertexSlot<Self::Vertex>;

    /// 顶点是否属于被访问的图
    fn contains_vertex(&self, vertex: &Self::Vertex) -> bool;

    fn set_root(&mut self, root: Self::Vertex) {
        self.root_slot_mut().set(root);
    }

    fn clear_root(&mut self) {
        self.root_slot_mut().clear();
    }

    fn try_get_root(&self) -> Option<&Self::Vertex> {
        self.root_slot().get()
    }

    fn on_root_changed<F>(&mut self, listener: F)
    where
        F: FnMut(Option<&Self::Vertex>) + Send + 'static,
    {
        self.root_slot_mut().on_changed(listener);
    }

    /// 取出已设置且属于图的根顶点
    fn require_root(&self) -> AlgorithmResult<Self::Vertex> {
        let root = self.try_get_root().ok_or(AlgorithmError::RootNotSet)?;
        if !self.contains_vertex(root) {
            return Err(AlgorithmError::vertex_not_found(root));
        }
        Ok(root.clone())
    }

    /// 设置根顶点并运行
    fn compute_from<O>(
        &mut self,
        root: Self::Vertex,
        observer: &mut O,
    ) -> AlgorithmResult<ComputationState>
    where
        Self: Algorithm<O> + Sized,
        O: ComputationObserver,
    {
        if !self.contains_vertex(&root) {
            return Err(AlgorithmError::vertex_not_found(&root));
        }
        self.set_root(root);
        self.compute_with(observer)
    }
}

/// 带根顶点与目标顶点的搜索算法
pub trait RootedSearchAlgorithm: RootedAlgorithm {
    fn target_slot(&self) -> &VertexSlot<Self::Vertex>;

    fn target_slot_mut(&mut self) -> &mut VertexSlot<Self::Vertex>;

    fn set_target(&mut self, target: Self::Vertex) {
        self.target_slot_mut().set(target);
    }

    fn clear_target(&mut self) {
        self.target_slot_mut().clear();
    }

    fn try_get_target(&self) -> Option<&Self::Vertex> {
        self.target_slot().get()
    }

    fn on_target_changed<F>(&mut self, listener: F)
    where
        F: FnMut(Option<&Self::Vertex>) + Send + 'static,
    {
        self.target_slot_mut().on_changed(listener);
    }

    /// 设置根顶点与目标顶点并运行
    fn compute_between<O>(
        &mut self,
        root: Self::Vertex,
        target: Self::Vertex,
        observer: &mut O,
    ) -> AlgorithmResult<ComputationState>
    where
        Self: Algorithm<O> + Sized,
        O: ComputationObserver,
    {
        if !self.contains_vertex(&target) {
            return Err(AlgorithmError::vertex_not_found(&target));
        }
        self.set_target(target);
        self.compute_from(root, observer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    #[test]
    fn test_slot_set_and_clear() {
        let mut slot: VertexSlot<i32> = VertexSlot::new();
        assert!(!slot.is_set());

        slot.set(0);
        assert_eq!(slot.get(), Some(&0));

        slot.clear();
        assert_eq!(slot.get(), None);
    }

    #[test]
    fn test_slot_notifies_only_on_change() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = seen.clone();
        let mut slot: VertexSlot<i32> = VertexSlot::new();
        slot.on_changed(move |v| {
            sink.lock().expect("listener lock").push(v.copied());
        });

        slot.set(1);
        slot.set(1);
        slot.set(2);
        slot.clear();
        slot.clear();

        assert_eq!(
            *seen.lock().expect("listener lock"),
            vec![Some(1), Some(2), None]
        );
    }

    #[test]
    fn test_default_value_is_a_real_vertex() {
        // 0 是 i32 的默认值，但设置之后必须被视为已设置
        let mut slot: VertexSlot<i32> = VertexSlot::default();
        slot.set(i32::default());
        assert!(slot.is_set());
    }
}
