//! 文章处理上下文
//!
//! 封装"我正在处理第几个主题、用什么参数"这一信息

use std::fmt::Display;

use crate::models::{GenerationJob, Language};

/// 单个主题的处理上下文
#[derive(Debug, Clone)]
pub struct EssayCtx {
    /// 主题
    pub topic: String,

    /// 主题索引（从1开始，仅用于日志显示）
    pub topic_index: usize,

    /// 主题总数
    pub total_topics: usize,

    pub chapters: u32,
    pub chars_per_chapter: u32,
    pub language: Language,
}

impl EssayCtx {
    /// 从任务中取第 `index` 个主题（从0开始）
    pub fn from_job(job: &GenerationJob, index: usize) -> Option<Self> {
        let topic = job.topics().get(index)?;
        Some(Self {
            topic: topic.clone(),
            topic_index: index + 1,
            total_topics: job.topics().len(),
            chapters: job.chapters(),
            chars_per_chapter: job.chars_per_chapter(),
            language: job.language(),
        })
    }
}

impl Display for EssayCtx {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[主题 {}/{}]", self.topic_index, self.total_topics)
    }
}
