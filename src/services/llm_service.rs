//! LLM 服务 - 业务能力层
//!
//! 只负责"向模型要大纲、要章节正文"两种能力，不关心流程顺序

use tracing::debug;

use crate::clients::LlmClient;
use crate::config::Config;
use crate::error::{ApiError, AppResult};
use crate::models::language::{is_chapter_title, is_introduction_title};
use crate::models::{Language, INTRODUCTION_CHARS};

/// LLM 服务
pub struct LlmService {
    client: LlmClient,
}

impl LlmService {
    /// 创建新的 LLM 服务
    pub fn new(config: &Config) -> AppResult<Self> {
        Ok(Self {
            client: LlmClient::new(config)?,
        })
    }

    /// 获取文章大纲
    ///
    /// 返回按行分隔的标题列表：一个引言 + `num_chapters` 个章节
    pub async fn get_essay_outline(
        &self,
        topic: &str,
        num_chapters: u32,
        language: Language,
    ) -> Result<String, ApiError> {
        debug!("请求大纲: {} ({} 章, {})", topic, num_chapters, language);
        let prompt = build_outline_prompt(topic, num_chapters, language);
        self.client.request_text(&prompt).await
    }

    /// 生成某个部分的正文
    ///
    /// 引言使用固定的目标长度，章节使用配置的每章字符数
    pub async fn generate_section_content(
        &self,
        topic: &str,
        section_title: &str,
        chars_per_chapter: u32,
        language: Language,
    ) -> Result<String, ApiError> {
        let prompt = if is_introduction_section(section_title) {
            build_introduction_prompt(topic, language)
        } else {
            build_chapter_prompt(topic, section_title, chars_per_chapter, language)
        };
        self.client.request_text(&prompt).await
    }
}

/// 引言：包含引言标记且不是章节
fn is_introduction_section(title: &str) -> bool {
    is_introduction_title(title) && !is_chapter_title(title)
}

fn build_outline_prompt(topic: &str, num_chapters: u32, language: Language) -> String {
    format!(
        r#"Составь план реферата на тему "{topic}".

Язык генерации: {language}

План должен состоять из:
1. Введение
2. {num_chapters} глав(ы), каждая раскрывает отдельный аспект темы

Требования:
- Главы идут в логическом порядке
- Каждая глава напрямую связана с темой
- Названия научные и формальные
- Никаких пояснений или комментариев

Ответ дай только списком, по одному названию в строке:
Введение
Глава 1. [Название]
Глава 2. [Название]
..."#,
        topic = topic,
        language = language.label(),
        num_chapters = num_chapters,
    )
}

fn build_introduction_prompt(topic: &str, language: Language) -> String {
    format!(
        r#"Напиши введение к реферату на тему "{topic}".

Язык генерации: {language}

Требования:
- Объём около {chars} символов
- Обоснуй актуальность темы
- Сформулируй цель и задачи работы
- Научный, формальный стиль
- Без цитат и ссылок на источники
- Не начинай текст с заголовка "Введение""#,
        topic = topic,
        language = language.label(),
        chars = INTRODUCTION_CHARS,
    )
}

fn build_chapter_prompt(topic: &str, title: &str, chars: u32, language: Language) -> String {
    format!(
        r#"Напиши текст главы "{title}" для реферата на тему "{topic}".

Язык генерации: {language}

Требования:
- Объём около {chars} символов
- Научный, формальный стиль
- Раскрой тему главы как можно полнее
- Без цитат и ссылок на источники
- Не начинай текст с названия главы"#,
        title = title,
        topic = topic,
        language = language.label(),
        chars = chars,
    )
}
