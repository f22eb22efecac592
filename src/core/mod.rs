// 核心模块：错误类型、计算生命周期、带根算法基础

pub mod computation;
pub mod error;
pub mod rooted;

// 错误和结果类型
pub use error::{AlgorithmError, AlgorithmResult};

// 生命周期状态机
pub use computation::{
    AbortHandle, Algorithm, AtomicCancelManager, CancelManager, Computation, ComputationHost,
    ComputationObserver, ComputationState, ServiceRegistry,
};

// 根顶点 / 目标顶点
pub use rooted::{RootedAlgorithm, RootedSearchAlgorithm, VertexSlot};
