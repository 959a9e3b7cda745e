use crate::error::ConfigError;

/// 生成语言
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Language {
    #[default]
    Russian,
    English,
    Ukrainian,
    Belarusian,
}

/// 俄语标记始终可识别（提示词要求以俄语格式返回大纲）
const INTRO_RU: &str = "введение";
const CHAPTER_RU: &str = "глава";
const CONCLUSION_RU: &str = "заключение";

/// 所有语言的引言/章节/结论标记（小写）
const INTRO_MARKERS: &[&str] = &[INTRO_RU, "introduction", "вступ", "уводзіны"];
const CHAPTER_MARKERS: &[&str] = &[CHAPTER_RU, "chapter", "розділ", "раздзел"];
const CONCLUSION_MARKERS: &[&str] = &[CONCLUSION_RU, "conclusion", "висновки", "заключэнне"];

impl Language {
    pub const ALL: [Language; 4] = [
        Language::Russian,
        Language::English,
        Language::Ukrainian,
        Language::Belarusian,
    ];

    /// 界面/提示词中使用的名称
    pub fn label(self) -> &'static str {
        match self {
            Language::Russian => "Русский",
            Language::English => "English",
            Language::Ukrainian => "Українська",
            Language::Belarusian => "Беларуская",
        }
    }

    /// 任务文件中可用的简写
    fn aliases(self) -> [&'static str; 2] {
        match self {
            Language::Russian => ["ru", "russian"],
            Language::English => ["en", "english"],
            Language::Ukrainian => ["uk", "ukrainian"],
            Language::Belarusian => ["be", "belarusian"],
        }
    }

    /// 从名称或简写解析（忽略大小写）
    pub fn from_label(s: &str) -> Result<Self, ConfigError> {
        let wanted = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|lang| {
                lang.label().to_lowercase() == wanted || lang.aliases().contains(&wanted.as_str())
            })
            .ok_or_else(|| ConfigError::UnknownLanguage(s.to_string()))
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

fn contains_any(title: &str, markers: &[&str]) -> bool {
    let lower = title.to_lowercase();
    markers.iter().any(|m| lower.contains(m))
}

/// 标题是否为引言
pub fn is_introduction_title(title: &str) -> bool {
    contains_any(title, INTRO_MARKERS)
}

/// 标题是否为章节
pub fn is_chapter_title(title: &str) -> bool {
    contains_any(title, CHAPTER_MARKERS)
}

/// 标题是否为结论
pub fn is_conclusion_title(title: &str) -> bool {
    contains_any(title, CONCLUSION_MARKERS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_round_trip_for_every_language() {
        for lang in Language::ALL {
            assert_eq!(Language::from_label(lang.label()).unwrap(), lang);
        }
        assert_eq!(Language::from_label(" EN ").unwrap(), Language::English);
        assert_eq!(Language::from_label("беларуская").unwrap(), Language::Belarusian);
        assert_eq!(
            Language::from_label("Deutsch"),
            Err(ConfigError::UnknownLanguage("Deutsch".to_string()))
        );
    }

    #[test]
    fn test_markers() {
        assert!(is_introduction_title("Введение"));
        assert!(is_introduction_title("Introduction"));
        assert!(is_chapter_title("Глава 1. Истоки"));
        assert!(is_chapter_title("Chapter 2. Growth"));
        assert!(!is_chapter_title("Введение"));
        assert!(is_conclusion_title("Заключение"));
        assert!(!is_conclusion_title("Глава 3. Итоги"));
    }
}
