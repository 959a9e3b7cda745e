//! 编排层（Orchestration Layer）
//!
//! ## 职责
//!
//! 本层负责整个任务的调度和终止汇报，是整个系统的"指挥中心"。
//!
//! ## 模块划分
//!
//! ### `batch_processor` - 批量文章生成器
//! - 持有 LlmService 与排版器
//! - 逐个主题调用 EssayFlow
//! - 全局进度计数
//! - 发出唯一的终止事件
//!
//! ### `background` - 后台运行
//! - 在 tokio 任务中运行生成器
//! - 通过通道把事件交给调用方
//! - 暴露取消标志
//!
//! ## 层次关系
//!
//! ```text
//! background (后台任务 + 事件通道)
//!     ↓
//! batch_processor (处理 Vec<主题>)
//!     ↓
//! workflow::EssayFlow (处理单个主题)
//!     ↓
//! services (能力层：llm / store)
//!     ↓
//! clients + infrastructure (HTTP、docx)
//! ```

pub mod background;
pub mod batch_processor;

// 重新导出主要类型
pub use background::GenerationHandle;
pub use batch_processor::{
    EssayGenerator, RunOutcome, CANCELLED_MESSAGE, CANCELLED_STATUS, SUCCESS_MESSAGE,
};
