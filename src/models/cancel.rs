use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// 取消标志
///
/// 调用方设置，工作任务在每次请求之前读取；正在进行的请求不会被打断
#[derive(Debug, Clone, Default)]
pub struct CancelFlag(Arc<AtomicBool>);

impl CancelFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}
