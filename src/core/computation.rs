//! 计算生命周期状态机
//!
//! 所有算法共享的运行 / 中止 / 完成协议：
//!
//! ```text
//! NotRunning ──► Running ──► Finished
//!                   │
//!                   └──► PendingAbortion ──► Aborted
//! ```
//!
//! `NotRunning`、`Finished`、`Aborted` 是仅有的合法起点。取消是协作式的：
//! 算法在每个外层循环边界调用 [`Computation::throw_if_cancellation_requested`]，
//! 返回的 `Cancelled` 错误通过 `?` 向上传播，最终在 [`Algorithm::compute_with`]
//! 中被捕获并转换为 `Aborted` 状态。

use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, OnceLock};

use parking_lot::Mutex;

use super::error::{AlgorithmError, AlgorithmResult};

/// 计算状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ComputationState {
    /// 尚未运行
    #[default]
    NotRunning,
    /// 运行中
    Running,
    /// 已请求中止，等待算法响应
    PendingAbortion,
    /// 正常完成
    Finished,
    /// 已中止
    Aborted,
}

impl ComputationState {
    /// 检查是否可以开始新一轮运行
    pub fn can_start(&self) -> bool {
        matches!(
            self,
            ComputationState::NotRunning | ComputationState::Finished | ComputationState::Aborted
        )
    }

    /// 检查是否处于运行中（包括等待中止）
    pub fn is_running(&self) -> bool {
        matches!(
            self,
            ComputationState::Running | ComputationState::PendingAbortion
        )
    }

    /// 获取状态描述
    pub fn description(&self) -> &'static str {
        match self {
            ComputationState::NotRunning => "未运行",
            ComputationState::Running => "运行中",
            ComputationState::PendingAbortion => "等待中止",
            ComputationState::Finished => "已完成",
            ComputationState::Aborted => "已中止",
        }
    }
}

impl fmt::Display for ComputationState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.description())
    }
}

/// 取消服务
///
/// 宿主组件可以注入同一个实例，让链式调用的多个算法共享一个取消域。
/// `reset_cancel` 在持有计算状态锁时被调用，实现不能回调所属计算。
pub trait CancelManager: Send + Sync {
    /// 请求取消
    fn cancel(&self);
    /// 清除取消标志
    fn reset_cancel(&self);
    /// 是否正在取消
    fn is_cancelling(&self) -> bool;
}

/// 基于原子布尔值的默认取消服务
#[derive(Debug, Default)]
pub struct AtomicCancelManager {
    cancelling: AtomicBool,
}

impl AtomicCancelManager {
    pub fn new() -> Self {
        Self::default()
    }
}

impl CancelManager for AtomicCancelManager {
    fn cancel(&self) {
        self.cancelling.store(true, Ordering::SeqCst);
    }

    fn reset_cancel(&self) {
        self.cancelling.store(false, Ordering::SeqCst);
    }

    fn is_cancelling(&self) -> bool {
        self.cancelling.load(Ordering::SeqCst)
    }
}

/// 类型化的服务注册表
///
/// 按类型存放 `Arc<T>`，查找未注册的类型返回 `None` 而不是错误。
#[derive(Default)]
pub struct ServiceRegistry {
    services: Mutex<HashMap<TypeId, Box<dyn Any + Send + Sync>>>,
}

impl ServiceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// 注册服务，返回被替换的旧服务
    pub fn register<T>(&self, service: Arc<T>) -> Option<Arc<T>>
    where
        T: ?Sized + Send + Sync + 'static,
    {
        self.services
            .lock()
            .insert(TypeId::of::<T>(), Box::new(service))
            .and_then(|old| old.downcast::<Arc<T>>().ok())
            .map(|old| *old)
    }

    /// 查找服务
    pub fn try_get<T>(&self) -> Option<Arc<T>>
    where
        T: ?Sized + Send + Sync + 'static,
    {
        self.services
            .lock()
            .get(&TypeId::of::<T>())
            .and_then(|service| service.downcast_ref::<Arc<T>>())
            .cloned()
    }

    /// 已注册服务数量
    pub fn len(&self) -> usize {
        self.services.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl fmt::Debug for ServiceRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServiceRegistry")
            .field("services", &self.len())
            .finish()
    }
}

/// 生命周期通知
///
/// 每次运行中每个通知恰好触发一次；`state_changed` 伴随每一次状态转换。
/// 所有访问者 trait 都以它为父 trait，方法默认为空实现。
pub trait ComputationObserver {
    fn state_changed(&mut self, _previous: ComputationState, _current: ComputationState) {}
    fn started(&mut self) {}
    fn finished(&mut self) {}
    fn aborted(&mut self) {}
}

impl ComputationObserver for () {}

struct ComputationShared {
    state: Mutex<ComputationState>,
    cancel_manager: OnceLock<Arc<dyn CancelManager>>,
    /// 取消域归自己所有时，每次开始运行都清除取消标志
    owns_cancellation: bool,
    /// 上一次取消是否由本计算发出
    issued_cancel: AtomicBool,
    services: ServiceRegistry,
}

/// 一个算法实例的计算状态
///
/// 克隆得到的是同一个计算的句柄，而不是新的计算。
#[derive(Clone)]
pub struct Computation {
    shared: Arc<ComputationShared>,
}

impl Computation {
    /// 创建新的计算，取消服务在首次使用时创建
    pub fn new() -> Self {
        Self::build(OnceLock::new(), true)
    }

    /// 使用注入的取消服务创建计算，取消域归这个计算所有
    pub fn with_cancel_manager(cancel_manager: Arc<dyn CancelManager>) -> Self {
        Self::build(OnceLock::from(cancel_manager), true)
    }

    /// 创建与宿主计算共享取消域的计算
    ///
    /// 取消标志由宿主在开始运行时清除，子计算开始运行不会抹掉宿主已请求的中止；
    /// 只有子计算自己发出的中止会在它下次运行时清除。
    pub fn sharing_cancellation(host: &Computation) -> Self {
        Self::build(OnceLock::from(host.cancel_manager()), false)
    }

    fn build(cancel_manager: OnceLock<Arc<dyn CancelManager>>, owns_cancellation: bool) -> Self {
        Self {
            shared: Arc::new(ComputationShared {
                state: Mutex::new(ComputationState::NotRunning),
                cancel_manager,
                owns_cancellation,
                issued_cancel: AtomicBool::new(false),
                services: ServiceRegistry::new(),
            }),
        }
    }

    /// 当前状态
    pub fn state(&self) -> ComputationState {
        *self.shared.state.lock()
    }

    /// 取消服务（惰性创建）
    pub fn cancel_manager(&self) -> Arc<dyn CancelManager> {
        self.shared
            .cancel_manager
            .get_or_init(|| Arc::new(AtomicCancelManager::new()))
            .clone()
    }

    /// 服务注册表，供宿主注册额外服务
    pub fn services(&self) -> &ServiceRegistry {
        &self.shared.services
    }

    /// 查找服务；取消服务总能解析到
    pub fn try_get_service<T>(&self) -> Option<Arc<T>>
    where
        T: ?Sized + Send + Sync + 'static,
    {
        if TypeId::of::<T>() == TypeId::of::<dyn CancelManager>() {
            let cancel_manager: Box<dyn Any> = Box::new(self.cancel_manager());
            return cancel_manager.downcast::<Arc<T>>().ok().map(|service| *service);
        }
        self.shared.services.try_get::<T>()
    }

    /// 查找服务，未注册时返回 `ServiceNotFound`
    pub fn get_service<T>(&self) -> AlgorithmResult<Arc<T>>
    where
        T: ?Sized + Send + Sync + 'static,
    {
        self.try_get_service::<T>()
            .ok_or(AlgorithmError::ServiceNotFound(std::any::type_name::<T>()))
    }

    /// 请求中止
    ///
    /// 只有 `Running` 状态会转换为 `PendingAbortion`，其余状态下为空操作。
    /// 观察者在运行线程上接收通知，`Running -> PendingAbortion` 因此推迟到
    /// 运行结束时报告，并且总在离开 `PendingAbortion` 的转换之前。
    pub fn abort(&self) {
        let mut state = self.shared.state.lock();
        if *state == ComputationState::Running {
            *state = ComputationState::PendingAbortion;
            self.shared.issued_cancel.store(true, Ordering::SeqCst);
            self.cancel_manager().cancel();
            log::debug!("计算已请求中止");
        }
    }

    /// 可跨线程传递的中止句柄
    pub fn abort_handle(&self) -> AbortHandle {
        AbortHandle {
            computation: self.clone(),
        }
    }

    /// 取消检查
    ///
    /// 取消服务报告正在取消时返回 `Cancelled`，算法应当直接用 `?` 传播。
    pub fn throw_if_cancellation_requested(&self) -> AlgorithmResult<()> {
        if self.cancel_manager().is_cancelling() {
            Err(AlgorithmError::Cancelled)
        } else {
            Ok(())
        }
    }

    pub(crate) fn begin<O>(&self, observer: &mut O) -> AlgorithmResult<()>
    where
        O: ComputationObserver + ?Sized,
    {
        let previous = {
            let mut state = self.shared.state.lock();
            if !state.can_start() {
                return Err(AlgorithmError::AlreadyRunning);
            }
            // 先清除标志再进入 Running，被接受的中止一定能被取消检查看到
            let issued = self.shared.issued_cancel.swap(false, Ordering::SeqCst);
            if self.shared.owns_cancellation || issued {
                self.cancel_manager().reset_cancel();
            }
            let previous = *state;
            *state = ComputationState::Running;
            previous
        };

        log::debug!("计算开始");
        observer.state_changed(previous, ComputationState::Running);
        observer.started();
        Ok(())
    }

    pub(crate) fn end<O>(
        &self,
        outcome: AlgorithmResult<()>,
        observer: &mut O,
    ) -> AlgorithmResult<ComputationState>
    where
        O: ComputationObserver + ?Sized,
    {
        let cancelled = match outcome {
            Ok(()) => false,
            Err(AlgorithmError::Cancelled) => true,
            Err(err) => {
                let previous = {
                    let mut state = self.shared.state.lock();
                    let previous = *state;
                    *state = ComputationState::NotRunning;
                    previous
                };
                log::debug!("计算失败: {}", err);
                if previous == ComputationState::PendingAbortion {
                    observer.state_changed(ComputationState::Running, previous);
                }
                observer.state_changed(previous, ComputationState::NotRunning);
                return Err(err);
            }
        };

        let (pending, current) = {
            let mut state = self.shared.state.lock();
            let pending = *state == ComputationState::PendingAbortion;
            *state = if pending || cancelled {
                ComputationState::Aborted
            } else {
                ComputationState::Finished
            };
            (pending, *state)
        };

        if pending {
            observer.state_changed(ComputationState::Running, ComputationState::PendingAbortion);
            observer.state_changed(ComputationState::PendingAbortion, current);
        } else {
            observer.state_changed(ComputationState::Running, current);
        }

        if current == ComputationState::Aborted {
            log::debug!("计算已中止");
            observer.aborted();
        } else {
            log::debug!("计算完成");
            observer.finished();
        }
        Ok(current)
    }
}

impl Default for Computation {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Computation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Computation")
            .field("state", &self.state())
            .field("services", &self.shared.services)
            .finish()
    }
}

/// 中止句柄
#[derive(Clone, Debug)]
pub struct AbortHandle {
    computation: Computation,
}

impl AbortHandle {
    /// 请求中止对应的计算
    pub fn abort(&self) {
        self.computation.abort();
    }

    /// 对应计算的当前状态
    pub fn state(&self) -> ComputationState {
        self.computation.state()
    }
}

/// 持有计算状态的对象
pub trait ComputationHost {
    fn computation(&self) -> &Computation;

    fn state(&self) -> ComputationState {
        self.computation().state()
    }

    fn abort(&self) {
        self.computation().abort();
    }

    fn abort_handle(&self) -> AbortHandle {
        self.computation().abort_handle()
    }
}

/// 算法接口
///
/// 具体算法实现 `internal_compute`，按需覆盖 `initialize`（重置每次运行的映射）
/// 和 `clean`。`compute_with` 负责状态转换、取消处理与通知。
pub trait Algorithm<O>: ComputationHost
where
    O: ComputationObserver + ?Sized,
{
    fn initialize(&mut self, _observer: &mut O) -> AlgorithmResult<()> {
        Ok(())
    }

    fn internal_compute(&mut self, observer: &mut O) -> AlgorithmResult<()>;

    fn clean(&mut self) {}

    /// 运行算法
    ///
    /// 返回终止状态：`Finished` 或 `Aborted`。取消不会作为错误返回；
    /// 其他错误在 `clean` 之后返回，状态回到 `NotRunning`。
    fn compute_with(&mut self, observer: &mut O) -> AlgorithmResult<ComputationState> {
        let computation = self.computation().clone();
        computation.begin(observer)?;
        let outcome = self
            .initialize(observer)
            .and_then(|_| self.internal_compute(observer));
        self.clean();
        computation.end(outcome, observer)
    }
}
