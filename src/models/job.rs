use std::ops::RangeInclusive;
use std::path::{Path, PathBuf};

use crate::error::{AppError, AppResult};
use crate::models::Language;

/// 允许的章节数量
pub const CHAPTERS_RANGE: RangeInclusive<u32> = 3..=10;
/// 允许的每章字符数
pub const CHARS_PER_CHAPTER_RANGE: RangeInclusive<u32> = 1000..=10000;
/// 引言的目标字符数
pub const INTRODUCTION_CHARS: u32 = 2000;
/// 每页大约字符数（Times New Roman 14pt，单倍行距）
const CHARS_PER_PAGE: f64 = 1800.0;

/// 生成任务
///
/// 一次运行的全部输入，创建后不可修改
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationJob {
    topics: Vec<String>,
    chapters: u32,
    chars_per_chapter: u32,
    output_dir: PathBuf,
    language: Language,
}

impl GenerationJob {
    /// 创建任务并校验参数
    ///
    /// 空白主题行会被丢弃；丢弃后至少要剩一个主题
    pub fn new(
        topics: impl IntoIterator<Item = impl Into<String>>,
        chapters: u32,
        chars_per_chapter: u32,
        output_dir: impl Into<PathBuf>,
        language: Language,
    ) -> AppResult<Self> {
        let topics: Vec<String> = topics
            .into_iter()
            .map(Into::into)
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .collect();

        if topics.is_empty() {
            return Err(AppError::invalid_job("topics", "至少需要一个主题"));
        }
        if !CHAPTERS_RANGE.contains(&chapters) {
            return Err(AppError::invalid_job(
                "chapters",
                format!("{} 不在 {:?} 范围内", chapters, CHAPTERS_RANGE),
            ));
        }
        if !CHARS_PER_CHAPTER_RANGE.contains(&chars_per_chapter) {
            return Err(AppError::invalid_job(
                "chars_per_chapter",
                format!("{} 不在 {:?} 范围内", chars_per_chapter, CHARS_PER_CHAPTER_RANGE),
            ));
        }

        let output_dir = output_dir.into();
        if output_dir.as_os_str().is_empty() {
            return Err(AppError::invalid_job("output_dir", "输出目录不能为空"));
        }

        Ok(Self {
            topics,
            chapters,
            chars_per_chapter,
            output_dir,
            language,
        })
    }

    pub fn topics(&self) -> &[String] {
        &self.topics
    }

    pub fn chapters(&self) -> u32 {
        self.chapters
    }

    pub fn chars_per_chapter(&self) -> u32 {
        self.chars_per_chapter
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    pub fn language(&self) -> Language {
        self.language
    }

    /// 整个运行的总步数：每个主题 = 引言 + N 章
    pub fn total_steps(&self) -> usize {
        self.topics.len() * (self.chapters as usize + 1)
    }

    /// 单篇文章的大约页数（保留一位小数）
    pub fn estimated_pages(&self) -> f64 {
        let total_chars = f64::from(self.chars_per_chapter) * f64::from(self.chapters)
            + f64::from(INTRODUCTION_CHARS);
        (total_chars / CHARS_PER_PAGE * 10.0).round() / 10.0
    }
}
