use crate::models::language::is_introduction_title;

/// 文件名前缀与扩展名
const FILE_PREFIX: &str = "Реферат - ";
const FILE_EXTENSION: &str = "docx";
/// 清理后主题的最大字符数
const MAX_STEM_CHARS: usize = 100;
/// 清理后为空时使用的名称
const FALLBACK_STEM: &str = "Без названия";

/// 文章的一个部分（引言或章节）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    pub title: String,
    pub content: String,
    pub is_chapter: bool,
}

impl Section {
    pub fn new(title: impl Into<String>, content: impl Into<String>, is_chapter: bool) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
            is_chapter,
        }
    }
}

/// 一篇完整的文章
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Essay {
    pub topic: String,
    pub sections: Vec<Section>,
    pub num_chapters: u32,
    pub chars_per_chapter: u32,
}

impl Essay {
    /// 检查结构是否正确
    ///
    /// - 至少有一个部分
    /// - 第一个部分是引言
    /// - 章节数量与配置一致
    pub fn validate(&self) -> bool {
        let Some(first) = self.sections.first() else {
            return false;
        };

        if !is_introduction_title(&first.title) {
            return false;
        }

        let chapters = self.sections.iter().filter(|s| s.is_chapter).count();
        chapters == self.num_chapters as usize
    }

    /// 输出文件名：`Реферат - <清理后的主题>.docx`
    pub fn file_name(&self) -> String {
        format!("{}{}.{}", FILE_PREFIX, sanitize_topic(&self.topic), FILE_EXTENSION)
    }
}

/// 只保留字母数字、空格、`-`、`_`，去掉首尾空白并截断
pub fn sanitize_topic(topic: &str) -> String {
    let kept: String = topic
        .chars()
        .filter(|c| c.is_alphanumeric() || matches!(c, ' ' | '-' | '_'))
        .collect();

    let truncated: String = kept.trim().chars().take(MAX_STEM_CHARS).collect();
    let truncated = truncated.trim_end();

    if truncated.is_empty() {
        FALLBACK_STEM.to_string()
    } else {
        truncated.to_string()
    }
}
