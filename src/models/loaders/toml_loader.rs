use std::path::{Path, PathBuf};

use serde::Deserialize;
use tokio::fs;

use crate::error::{AppError, AppResult, FileError};
use crate::models::{GenerationJob, Language};

/// TOML 任务文件结构
#[derive(Debug, Deserialize)]
struct JobFile {
    topics: Vec<String>,
    #[serde(default = "default_chapters")]
    chapters: u32,
    #[serde(default = "default_chars_per_chapter")]
    chars_per_chapter: u32,
    output_dir: PathBuf,
    /// 语言名称或简写，缺省为俄语
    #[serde(default)]
    language: Option<String>,
}

fn default_chapters() -> u32 {
    5
}

fn default_chars_per_chapter() -> u32 {
    2000
}

/// 从 TOML 文本解析任务
pub fn parse_job(content: &str, source: &str) -> AppResult<GenerationJob> {
    let file: JobFile = toml::from_str(content).map_err(|e| {
        AppError::File(FileError::TomlParseFailed {
            path: source.to_string(),
            source: e,
        })
    })?;

    let language = match file.language.as_deref() {
        Some(label) => Language::from_label(label)?,
        None => Language::default(),
    };

    GenerationJob::new(
        file.topics,
        file.chapters,
        file.chars_per_chapter,
        file.output_dir,
        language,
    )
}

/// 从 TOML 文件加载任务
pub async fn load_job_from_toml(path: &Path) -> AppResult<GenerationJob> {
    let display = path.display().to_string();
    let content = fs::read_to_string(path)
        .await
        .map_err(|e| AppError::file_read_failed(display.clone(), e))?;

    let job = parse_job(&content, &display)?;
    tracing::info!("成功加载任务: {} 个主题", job.topics().len());
    Ok(job)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ConfigError;

    #[test]
    fn test_parse_full_job() {
        let job = parse_job(
            r#"
            topics = ["Квантовая механика", "Римская империя"]
            chapters = 4
            chars_per_chapter = 3000
            output_dir = "out"
            language = "English"
            "#,
            "job.toml",
        )
        .unwrap();

        assert_eq!(job.topics().len(), 2);
        assert_eq!(job.chapters(), 4);
        assert_eq!(job.chars_per_chapter(), 3000);
        assert_eq!(job.language(), Language::English);
    }

    #[test]
    fn test_parse_applies_defaults() {
        let job = parse_job("topics = [\"Тема\"]\noutput_dir = \"out\"\n", "job.toml").unwrap();
        assert_eq!(job.chapters(), 5);
        assert_eq!(job.chars_per_chapter(), 2000);
        assert_eq!(job.language(), Language::Russian);
    }

    #[test]
    fn test_parse_reports_toml_errors() {
        let err = parse_job("topics = 5", "broken.toml").unwrap_err();
        assert!(matches!(
            err,
            AppError::File(FileError::TomlParseFailed { ref path, .. }) if path == "broken.toml"
        ));
    }

    #[test]
    fn test_parse_validates_bounds() {
        let err = parse_job(
            "topics = [\"Тема\"]\noutput_dir = \"out\"\nchapters = 42\n",
            "job.toml",
        )
        .unwrap_err();
        assert!(matches!(err, AppError::Config(_)));
    }

    #[test]
    fn test_parse_rejects_unknown_language() {
        let err = parse_job(
            "topics = [\"Тема\"]\noutput_dir = \"out\"\nlanguage = \"Deutsch\"\n",
            "job.toml",
        )
        .unwrap_err();
        assert!(matches!(
            err,
            AppError::Config(ConfigError::UnknownLanguage(ref name)) if name == "Deutsch"
        ));
    }

    #[tokio::test]
    async fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("job.toml");
        std::fs::write(&path, "topics = [\"Тема\"]\noutput_dir = \"out\"\nlanguage = \"uk\"\n").unwrap();

        let job = load_job_from_toml(&path).await.unwrap();
        assert_eq!(job.language(), Language::Ukrainian);
    }
}
