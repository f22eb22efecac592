// 日志工具模块
//
// 由 `[log]` 配置启动 flexi_logger。算法模块按步输出 trace 日志，
// 可以通过 `algorithm_level` 单独放开，其余模块仍按 `level` 过滤。

use crate::config::LogConfig;
use flexi_logger::{Cleanup, Criterion, FileSpec, Logger, LoggerHandle, Naming, WriteMode};
use parking_lot::{const_mutex, Mutex};

/// 算法模块的日志目标前缀
const ALGORITHM_TARGET: &str = "graphalgo::services::algorithm";

/// 全局日志句柄，用于 flush
static LOGGER_HANDLE: Mutex<Option<LoggerHandle>> = const_mutex(None);

/// 由配置生成 flexi_logger 日志规格
pub(crate) fn log_spec(config: &LogConfig) -> String {
    match &config.algorithm_level {
        Some(level) => format!("{}, {}={}", config.level, ALGORITHM_TARGET, level),
        None => config.level.clone(),
    }
}

/// 初始化日志系统
///
/// 已经初始化时直接返回。`log` 门面在一个进程中只能安装一次后端，
/// 因此 `shutdown` 之后再次调用会返回错误。
///
/// # Examples
/// ```no_run
/// use graphalgo::config::Config;
///
/// let config = Config::default();
/// config.init_logging().expect("日志初始化失败");
/// ```
pub fn init(config: &LogConfig) -> Result<(), Box<dyn std::error::Error>> {
    let mut guard = LOGGER_HANDLE.lock();
    if guard.is_some() {
        return Ok(());
    }

    let spec = log_spec(config);
    let handle = Logger::try_with_str(&spec)?
        .log_to_file(
            FileSpec::default()
                .basename(&config.file)
                .directory(&config.dir),
        )
        .rotate(
            Criterion::Size(config.max_file_size),
            Naming::Numbers,
            Cleanup::KeepLogFiles(config.max_files),
        )
        .write_mode(WriteMode::Async)
        .append()
        .start()?;
    *guard = Some(handle);
    drop(guard);

    log::info!("日志系统初始化完成: {}/{} ({})", config.dir, config.file, spec);
    Ok(())
}

/// 刷新并关闭日志系统，等待异步写线程完成
pub fn shutdown() {
    if let Some(handle) = LOGGER_HANDLE.lock().take() {
        handle.flush();
    }
}

pub fn is_initialized() -> bool {
    LOGGER_HANDLE.lock().is_some()
}
