//! 统一错误处理 for graphalgo
//!
//! ## 设计理念
//!
//! 1. **分类**：
//!    - 使用错误：缺少根顶点、顶点不在图中、负权边、在运行前读取结果
//!    - 结构性错误：负权环、欧拉增广失败、路径重建时找不到前驱
//!    - 取消：`Cancelled` 只作为控制流使用，由生命周期状态机捕获后转换为 `Aborted` 状态
//!
//! 2. **数据而非错误**：Bellman-Ford 的负权环标记、欧拉路径是否存在，都以结果数据返回，
//!    不在这里定义
//!
//! 3. **统一接口**：`AlgorithmResult<T>` 提供统一的返回类型，简化错误传播

use thiserror::Error;

/// 统一的算法错误类型
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AlgorithmError {
    #[error("根顶点未设置")]
    RootNotSet,

    #[error("目标顶点未设置")]
    TargetNotSet,

    #[error("顶点不在图中: {0}")]
    VertexNotFound(String),

    #[error("边 {edge} 的权重为负: {weight}")]
    NegativeWeight { edge: String, weight: f64 },

    #[error("算法尚未运行，结果不可用")]
    NotComputed,

    #[error("算法正在运行，不能重复启动")]
    AlreadyRunning,

    #[error("图中存在负权环")]
    NegativeCycle,

    #[error("图中存在环，无法进行拓扑排序")]
    NonAcyclicGraph,

    #[error("欧拉路径增广失败: {0}")]
    EulerianAugmentation(String),

    #[error("路径重建失败，找不到前驱: {0}")]
    PredecessorNotFound(String),

    #[error("边类型 {0} 为零大小类型，无法按引用区分平行边")]
    ZeroSizedEdge(&'static str),

    #[error("服务未注册: {0}")]
    ServiceNotFound(&'static str),

    #[error("计算已取消")]
    Cancelled,
}

impl AlgorithmError {
    /// 由任意可调试的顶点构造 `VertexNotFound`
    pub fn vertex_not_found<V: std::fmt::Debug>(vertex: &V) -> Self {
        AlgorithmError::VertexNotFound(format!("{:?}", vertex))
    }

    /// 检查是否为取消信号
    pub fn is_cancellation(&self) -> bool {
        matches!(self, AlgorithmError::Cancelled)
    }
}

/// 统一的结果类型
pub type AlgorithmResult<T> = Result<T, AlgorithmError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = AlgorithmError::NegativeWeight {
            edge: "1 -> 2".to_string(),
            weight: -1.5,
        };
        assert_eq!(err.to_string(), "边 1 -> 2 的权重为负: -1.5");
        assert_eq!(
            AlgorithmError::vertex_not_found(&42).to_string(),
            "顶点不在图中: 42"
        );
    }

    #[test]
    fn test_is_cancellation() {
        assert!(AlgorithmError::Cancelled.is_cancellation());
        assert!(!AlgorithmError::RootNotSet.is_cancellation());
    }

    #[test]
    fn test_question_mark_propagation() {
        fn inner() -> AlgorithmResult<()> {
            Err(AlgorithmError::NotComputed)
        }
        fn outer() -> AlgorithmResult<u32> {
            inner()?;
            Ok(1)
        }
        assert_eq!(outer(), Err(AlgorithmError::NotComputed));
    }
}
