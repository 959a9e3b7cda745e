//! 批量文章生成器 - 编排层
//!
//! ## 职责
//!
//! 本模块是整个生成过程的入口，负责遍历任务中的所有主题并汇报结果。
//!
//! ## 核心功能
//!
//! 1. **资源持有**：持有 LlmService 和 DocumentAssembler，整个运行期间复用
//! 2. **顺序处理**：逐个主题委托给 `EssayFlow`，不并发请求
//! 3. **进度汇报**：全局步数计数，通过事件输出百分比
//! 4. **终止事件**：无论成功、取消还是失败，都恰好发出一次 `Finished`
//!
//! ## 设计特点
//!
//! - **顶层编排**：不处理单个部分的细节
//! - **错误翻译**：把 AppError 翻译成面向用户的文本，技术细节只写日志

use std::time::Instant;

use tracing::{error, info, warn};

use crate::config::Config;
use crate::document::DocumentAssembler;
use crate::error::{AppError, AppResult};
use crate::models::{CancelFlag, EventSink, GenerationJob};
use crate::services::{EssayStore, LlmService};
use crate::utils::logging::{log_job_loaded, log_topic_start, print_final_stats};
use crate::workflow::{EssayCtx, EssayFlow, FlowResult, ProgressTracker};

/// 全部成功时的结束消息
pub const SUCCESS_MESSAGE: &str = "Рефераты успешно сгенерированы! 🎉";
/// 取消时的状态消息
pub const CANCELLED_STATUS: &str = "Генерация отменена";
/// 取消时的结束消息
pub const CANCELLED_MESSAGE: &str = "Генерация была отменена пользователем";

/// 一次运行的终止状态
#[derive(Debug)]
pub enum RunOutcome {
    Completed,
    Cancelled,
    Failed(AppError),
}

impl RunOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, RunOutcome::Completed)
    }

    /// 面向用户的结束消息（与 `Finished` 事件一致）
    pub fn user_message(&self) -> String {
        match self {
            RunOutcome::Completed => SUCCESS_MESSAGE.to_string(),
            RunOutcome::Cancelled => CANCELLED_MESSAGE.to_string(),
            RunOutcome::Failed(e) => e.user_message(),
        }
    }

    fn label(&self) -> &'static str {
        match self {
            RunOutcome::Completed => "完成",
            RunOutcome::Cancelled => "已取消",
            RunOutcome::Failed(_) => "失败",
        }
    }
}

/// 文章生成器
pub struct EssayGenerator {
    llm: LlmService,
    assembler: DocumentAssembler,
}

impl EssayGenerator {
    /// 根据配置创建生成器
    pub fn new(config: &Config) -> AppResult<Self> {
        Ok(Self::with_service(LlmService::new(config)?))
    }

    pub fn with_service(llm: LlmService) -> Self {
        Self {
            llm,
            assembler: DocumentAssembler::new(),
        }
    }

    /// 在当前任务中运行整个生成过程
    ///
    /// # 参数
    /// - `job`: 生成任务
    /// - `events`: 事件发送端
    /// - `cancel`: 取消标志（只在请求之间检查）
    ///
    /// # 返回
    /// 终止状态；对应的 `Finished` 事件已经发出
    pub async fn run(
        &self,
        job: &GenerationJob,
        events: &EventSink,
        cancel: &CancelFlag,
    ) -> RunOutcome {
        log_job_loaded(job);
        let started = Instant::now();
        let total = job.topics().len();

        // 创建流程对象（整个运行期间复用）
        let flow = EssayFlow::new(
            &self.llm,
            &self.assembler,
            EssayStore::new(job.output_dir()),
        );
        let mut progress = ProgressTracker::new(job.total_steps());
        let mut saved = 0;

        let outcome = 'topics: {
            for index in 0..total {
                let Some(ctx) = EssayCtx::from_job(job, index) else {
                    break;
                };
                log_topic_start(ctx.topic_index, ctx.total_topics, &ctx.topic);

                match flow.run(&ctx, &mut progress, events, cancel).await {
                    Ok(FlowResult::Saved(path)) => {
                        saved += 1;
                        info!("{} ✅ 完成: {}", ctx, path.display());
                        events.essay_completed(ctx.topic.clone());
                    }
                    Ok(FlowResult::Cancelled) => {
                        warn!("{} ⏹️ 生成已取消", ctx);
                        break 'topics RunOutcome::Cancelled;
                    }
                    Err(e) => {
                        error!("{} ❌ 生成失败: {}", ctx, e);
                        break 'topics RunOutcome::Failed(e);
                    }
                }
            }
            RunOutcome::Completed
        };

        report_outcome(&outcome, events);
        print_final_stats(outcome.label(), saved, total, started.elapsed());
        outcome
    }
}

/// 发出终止事件
fn report_outcome(outcome: &RunOutcome, events: &EventSink) {
    match outcome {
        RunOutcome::Completed => {
            events.finished(true, SUCCESS_MESSAGE);
        }
        RunOutcome::Cancelled => {
            events.status(CANCELLED_STATUS);
            events.finished(false, CANCELLED_MESSAGE);
        }
        RunOutcome::Failed(e) => {
            let message = e.user_message();
            events.status(message.clone());
            events.finished(false, message);
        }
    }
}
