//! 文章生成流程 - 流程层
//!
//! 核心职责：定义"一个主题"的完整生成流程
//!
//! 流程顺序：
//! 1. 请求大纲 → 拆分标题
//! 2. 逐个标题请求正文（每步前检查取消）
//! 3. 校验结构 → 排版 → 保存

use std::path::PathBuf;

use tracing::{debug, info, warn};

use crate::document::DocumentAssembler;
use crate::error::{AppResult, EssayError};
use crate::models::language::is_chapter_title;
use crate::models::{CancelFlag, Essay, EventSink, Section};
use crate::services::{EssayStore, LlmService};
use crate::utils::logging::truncate_text;
use crate::workflow::essay_ctx::EssayCtx;
use crate::workflow::progress::ProgressTracker;

/// 单个主题的处理结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FlowResult {
    /// 已保存到该路径
    Saved(PathBuf),
    /// 取消标志已置位，本主题未写任何文件
    Cancelled,
}

/// 文章生成流程
///
/// - 决定何时要大纲、何时要正文、何时校验
/// - 只依赖业务能力（services）和排版器
/// - 终止事件（Finished）由编排层发出
pub struct EssayFlow<'a> {
    llm: &'a LlmService,
    assembler: &'a DocumentAssembler,
    store: EssayStore,
}

impl<'a> EssayFlow<'a> {
    pub fn new(llm: &'a LlmService, assembler: &'a DocumentAssembler, store: EssayStore) -> Self {
        Self {
            llm,
            assembler,
            store,
        }
    }

    pub async fn run(
        &self,
        ctx: &EssayCtx,
        progress: &mut ProgressTracker,
        events: &EventSink,
        cancel: &CancelFlag,
    ) -> AppResult<FlowResult> {
        if cancel.is_cancelled() {
            return Ok(FlowResult::Cancelled);
        }

        // ========== 步骤 1: 大纲 ==========
        events.status(format!("Генерация структуры реферата: {}", ctx.topic));
        info!("{} 📋 正在生成大纲: {}", ctx, ctx.topic);

        let outline = self
            .llm
            .get_essay_outline(&ctx.topic, ctx.chapters, ctx.language)
            .await?;

        let titles = split_outline(&outline);
        if titles.is_empty() {
            return Err(EssayError::EmptyOutline {
                topic: ctx.topic.clone(),
            }
            .into());
        }
        info!("{} ✓ 大纲包含 {} 个部分", ctx, titles.len());

        // ========== 步骤 2: 逐节正文 ==========
        let mut sections = Vec::with_capacity(titles.len());

        for title in titles {
            if cancel.is_cancelled() {
                warn!("{} ⏹️ 在生成 \"{}\" 前收到取消", ctx, title);
                return Ok(FlowResult::Cancelled);
            }

            events.status(format!("Генерация раздела: {}", title));
            info!("{} ✍️ 正在生成: {}", ctx, title);

            let content = self
                .llm
                .generate_section_content(&ctx.topic, &title, ctx.chars_per_chapter, ctx.language)
                .await?;

            if content.trim().is_empty() {
                return Err(EssayError::EmptySectionContent {
                    topic: ctx.topic.clone(),
                    section: title,
                }
                .into());
            }
            debug!("{} 正文预览: {}", ctx, truncate_text(&content, 80));

            let is_chapter = is_chapter_title(&title);
            sections.push(Section::new(title, content, is_chapter));

            events.progress(progress.advance());
        }

        // ========== 步骤 3: 校验、排版、保存 ==========
        let essay = Essay {
            topic: ctx.topic.clone(),
            sections,
            num_chapters: ctx.chapters,
            chars_per_chapter: ctx.chars_per_chapter,
        };

        if !essay.validate() {
            return Err(EssayError::InvalidStructure {
                topic: ctx.topic.clone(),
            }
            .into());
        }

        let doc = self.assembler.assemble(&essay);
        let path = self.store.save(&essay.file_name(), &doc).await?;
        info!("{} 💾 已保存: {}", ctx, path.display());

        Ok(FlowResult::Saved(path))
    }
}

/// 大纲拆分为标题：去掉首尾空白，丢弃空行，保持顺序
pub fn split_outline(outline: &str) -> Vec<String> {
    outline
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}
