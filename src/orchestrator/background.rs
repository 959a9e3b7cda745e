//! 后台运行
//!
//! 把生成过程放到单独的 tokio 任务里，调用方只通过事件和取消标志与之交互

use std::future::Future;

use tokio::sync::mpsc::{self, UnboundedReceiver};
use tokio::task::JoinHandle;
use tracing::error;

use crate::error::{AppError, GENERIC_FAILURE_MESSAGE};
use crate::models::{CancelFlag, EventSink, GenerationJob, PipelineEvent};
use crate::orchestrator::batch_processor::{EssayGenerator, RunOutcome};

/// 后台运行的句柄
pub struct GenerationHandle {
    events: UnboundedReceiver<PipelineEvent>,
    cancel: CancelFlag,
    task: JoinHandle<RunOutcome>,
}

impl GenerationHandle {
    /// 请求取消；当前请求结束后生效
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    pub fn cancel_flag(&self) -> CancelFlag {
        self.cancel.clone()
    }

    /// 下一个事件；运行结束且事件取完后返回 `None`
    pub async fn next_event(&mut self) -> Option<PipelineEvent> {
        self.events.recv().await
    }

    /// 等待运行结束
    pub async fn join(self) -> RunOutcome {
        match self.task.await {
            Ok(outcome) => outcome,
            Err(e) => RunOutcome::Failed(AppError::Other(e.to_string())),
        }
    }
}

impl EssayGenerator {
    /// 在后台任务中启动生成
    pub fn start(self, job: GenerationJob) -> GenerationHandle {
        spawn_supervised(move |events, cancel| async move {
            self.run(&job, &events, &cancel).await
        })
    }
}

/// 在后台运行 `work`
///
/// `work` 在内层任务中执行；内层任务异常退出（panic）时，由外层补发状态和终止事件，
/// 保证每次运行恰好一个 `Finished`
fn spawn_supervised<F, Fut>(work: F) -> GenerationHandle
where
    F: FnOnce(EventSink, CancelFlag) -> Fut,
    Fut: Future<Output = RunOutcome> + Send + 'static,
{
    let (tx, rx) = mpsc::unbounded_channel();
    let cancel = CancelFlag::new();
    let events = EventSink::new(tx);

    let worker = tokio::spawn(work(events.clone(), cancel.clone()));

    let task = tokio::spawn(async move {
        match worker.await {
            Ok(outcome) => outcome,
            Err(e) => {
                error!("❌ 生成任务异常退出: {}", e);
                events.status(GENERIC_FAILURE_MESSAGE);
                events.finished(false, GENERIC_FAILURE_MESSAGE);
                RunOutcome::Failed(AppError::Other(e.to_string()))
            }
        }
    });

    GenerationHandle {
        events: rx,
        cancel,
        task,
    }
}
