//! graphalgo - 可取消的图算法库
//!
//! 在调用方提供的图结构上运行遍历、最短路径与欧拉路径算法。
//! 每个算法实例都有独立的计算生命周期，可以从其他线程请求中止，
//! 并通过访问者回调报告搜索过程中的事件。

pub mod config;
pub mod core;
pub mod graph;
pub mod services;
pub mod utils;

pub use crate::core::{
    AbortHandle, Algorithm, AlgorithmError, AlgorithmResult, Computation, ComputationHost,
    ComputationObserver, ComputationState, RootedAlgorithm, RootedSearchAlgorithm,
};
