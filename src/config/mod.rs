use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// 日志配置
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(default)]
pub struct LogConfig {
    pub level: String,
    /// 算法模块单独使用的级别，`None` 时与 `level` 相同
    pub algorithm_level: Option<String>,
    pub dir: String,
    pub file: String,
    pub max_file_size: u64,
    pub max_files: usize,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            algorithm_level: None,
            dir: "logs".to_string(),
            file: "graphalgo".to_string(),
            max_file_size: 100 * 1024 * 1024, // 100MB
            max_files: 5,
        }
    }
}

/// 算法默认参数
///
/// 遍历算法与欧拉路径算法通过 `with_config` 读取。
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
#[serde(default)]
pub struct AlgorithmConfig {
    /// 深度优先搜索的最大深度，`None` 表示不限制
    pub max_depth: Option<usize>,
    /// 未设置根顶点时是否遍历所有连通分量
    pub process_all_components: bool,
    /// 欧拉路径运行前是否自动为奇度顶点添加临时边
    pub add_temporary_edges: bool,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
#[serde(default)]
pub struct Config {
    pub log: LogConfig,
    pub algorithm: AlgorithmConfig,
}

impl Config {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, Box<dyn std::error::Error>> {
        let content = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), Box<dyn std::error::Error>> {
        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    /// 按 `[log]` 配置初始化日志系统
    pub fn init_logging(&self) -> Result<(), Box<dyn std::error::Error>> {
        crate::utils::logging::init(&self.log)
    }
}
