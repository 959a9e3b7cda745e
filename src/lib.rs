//! # Essay Generator
//!
//! 通过兼容 OpenAI 的对话接口批量生成文章（реферат）并保存为 .docx 的 Rust 应用程序
//!
//! ## 架构设计
//!
//! 本系统采用严格的四层架构：
//!
//! ### ① 基础设施层（Infrastructure / Clients）
//! - `clients/` - `LlmClient` 负责 HTTP 请求、错误分类、指数退避重试
//! - `infrastructure/` - `DocxWriter` 把文档模型序列化为 .docx 包
//!
//! ### ② 业务能力层（Services）
//! - `services/` - 描述"我能做什么"
//! - `LlmService` - 要大纲、要正文
//! - `EssayStore` - 保存文档
//!
//! ### ③ 流程层（Workflow）
//! - `workflow/` - 定义"一个主题"的完整生成流程
//! - `EssayCtx` - 上下文封装（主题 + 参数）
//! - `EssayFlow` - 流程编排（大纲 → 逐节正文 → 校验 → 排版 → 保存）
//!
//! ### ④ 编排层（Orchestration）
//! - `orchestrator/batch_processor` - 遍历所有主题，汇报进度与终止状态
//! - `orchestrator/background` - 在后台任务中运行，暴露事件与取消标志
//!
//! 排版规则（去 Markdown、去重复标题、字体、页码）位于 `document/`，
//! 数据模型位于 `models/`。
//!
//! ## 模块结构

pub mod clients;
pub mod config;
pub mod document;
pub mod error;
pub mod infrastructure;
pub mod logger;
pub mod models;
pub mod orchestrator;
pub mod services;
pub mod utils;
pub mod workflow;

// 重新导出常用类型
pub use config::Config;
pub use error::{ApiError, AppError, AppResult, EssayError};
pub use models::{CancelFlag, Essay, GenerationJob, Language, PipelineEvent, Section};
pub use orchestrator::{EssayGenerator, GenerationHandle, RunOutcome};
