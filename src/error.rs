use thiserror::Error;

/// 通用失败提示（未分类错误统一展示给用户的文案）
pub const GENERIC_FAILURE_MESSAGE: &str = "Что-то пошло не так... 😔\n\n\
Возможные причины:\n\
• Слишком сложная тема\n\
• Временные проблемы с сервисом\n\
• Проблемы с подключением\n\n\
Попробуйте упростить тему или повторить попытку позже.";

/// 应用程序错误类型
#[derive(Debug, Error)]
pub enum AppError {
    /// API 调用错误（重试耗尽后）
    #[error("API错误: {0}")]
    Api(#[from] ApiError),
    /// 生成内容不可用（结构性错误，不重试）
    #[error("生成错误: {0}")]
    Essay(#[from] EssayError),
    /// 文件操作错误
    #[error("文件错误: {0}")]
    File(#[from] FileError),
    /// 配置错误
    #[error("配置错误: {0}")]
    Config(#[from] ConfigError),
    /// 其他错误（未分类）
    #[error("错误: {0}")]
    Other(String),
}

impl AppError {
    /// 面向用户的提示文案
    ///
    /// API 错误和结构性错误有专门的文案，其余错误只返回通用提示，
    /// 细节只写入日志。
    pub fn user_message(&self) -> String {
        match self {
            AppError::Api(e) => e.user_message().to_string(),
            AppError::Essay(e) => e.user_message(),
            AppError::Config(e) => e.to_string(),
            AppError::File(_) | AppError::Other(_) => GENERIC_FAILURE_MESSAGE.to_string(),
        }
    }
}

/// API 调用错误
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// 请求频率限制（HTTP 429）
    #[error("请求频率超限 (429)")]
    RateLimited,
    /// 网络不可用（连接、DNS、超时）
    #[error("网络不可用")]
    NetworkUnavailable,
    /// 服务端返回错误或无法解析的响应
    #[error("API返回错误响应: code={code}")]
    ServiceError { code: u16 },
}

impl ApiError {
    /// 面向用户的提示文案
    pub fn user_message(&self) -> &'static str {
        match self {
            ApiError::RateLimited => {
                "К сожалению, мы достигли лимита запросов. 🥺\n\n\
                 Это означает, что наш сервис сейчас очень популярен!\n\
                 Пожалуйста, подождите немного и попробуйте снова через 5-10 минут.\n\n\
                 Если вы часто сталкиваетесь с этой проблемой, вы можете поддержать проект, \
                 чтобы мы могли увеличить лимиты. 💝"
            }
            ApiError::NetworkUnavailable => {
                "Упс! Кажется, возникли проблемы с подключением к сервису. 🌐\n\n\
                 Проверьте ваше интернет-соединение и попробуйте снова.\n\
                 Если проблема повторяется, возможно, наш сервис временно недоступен."
            }
            ApiError::ServiceError { code } => service_error_message(*code),
        }
    }
}

fn service_error_message(code: u16) -> &'static str {
    match code {
        401 => {
            "Ой! Похоже, у нас проблемы с авторизацией. 🔑\n\
             Мы уже работаем над этим. Попробуйте позже!"
        }
        403 => {
            "Доступ к сервису временно ограничен. 🚫\n\
             Мы уже разбираемся с этим. Попробуйте через несколько минут."
        }
        500 => {
            "Произошла ошибка при обработке запроса. 🔧\n\n\
             Возможные причины:\n\
             • Слишком длинный или сложный запрос\n\
             • Временные проблемы с сервисом\n\
             • Превышены лимиты на генерацию\n\n\
             Попробуйте:\n\
             1. Уменьшить количество символов\n\
             2. Упростить формулировку темы\n\
             3. Повторить попытку позже"
        }
        502 => {
            "Сервис временно недоступен. ⚡\n\
             Перезайди в программу через пару минут."
        }
        503 => {
            "Сервис перегружен. 🏃\n\
             Слишком много студентов пишут рефераты одновременно! \
             Подожди немного и попробуй снова."
        }
        504 => {
            "Сервер не отвечает. ⏳\n\
             Возможно, запрос слишком сложный. Попробуй уменьшить объём текста."
        }
        _ => {
            "Произошла неожиданная ошибка. 😢\n\
             Мы уже работаем над её устранением."
        }
    }
}

/// 生成内容错误
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EssayError {
    /// 大纲为空
    #[error("大纲为空 (主题: {topic})")]
    EmptyOutline { topic: String },
    /// 章节内容为空
    #[error("章节内容为空 (主题: {topic}, 章节: {section})")]
    EmptySectionContent { topic: String, section: String },
    /// 结构校验失败
    #[error("结构校验失败 (主题: {topic})")]
    InvalidStructure { topic: String },
}

impl EssayError {
    /// 面向用户的提示文案（包含具体主题）
    pub fn user_message(&self) -> String {
        match self {
            EssayError::EmptyOutline { topic } => {
                format!("Не удалось получить структуру для темы: {}", topic)
            }
            EssayError::EmptySectionContent { section, .. } => {
                format!("Не удалось сгенерировать содержимое для раздела: {}", section)
            }
            EssayError::InvalidStructure { topic } => {
                format!("Некорректная структура реферата для темы: {}", topic)
            }
        }
    }
}

/// 文件操作错误
#[derive(Debug, Error)]
pub enum FileError {
    /// 读取文件失败
    #[error("读取文件失败 ({path}): {source}")]
    ReadFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },
    /// 写入文件失败
    #[error("写入文件失败 ({path}): {source}")]
    WriteFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },
    /// TOML 解析失败
    #[error("TOML解析失败 ({path}): {source}")]
    TomlParseFailed {
        path: String,
        #[source]
        source: toml::de::Error,
    },
    /// 文档打包失败
    #[error("文档打包失败: {0}")]
    PackageFailed(#[from] zip::result::ZipError),
}

/// 配置错误
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// 任务参数不合法
    #[error("任务参数 {field} 不合法: {reason}")]
    InvalidJob { field: &'static str, reason: String },
    /// 不支持的语言
    #[error("不支持的语言: {0}")]
    UnknownLanguage(String),
}

// ========== 便捷构造函数 ==========

impl AppError {
    /// 创建文件写入错误
    pub fn file_write_failed(path: impl Into<String>, source: std::io::Error) -> Self {
        AppError::File(FileError::WriteFailed {
            path: path.into(),
            source,
        })
    }

    /// 创建文件读取错误
    pub fn file_read_failed(path: impl Into<String>, source: std::io::Error) -> Self {
        AppError::File(FileError::ReadFailed {
            path: path.into(),
            source,
        })
    }

    /// 创建任务参数错误
    pub fn invalid_job(field: &'static str, reason: impl Into<String>) -> Self {
        AppError::Config(ConfigError::InvalidJob {
            field,
            reason: reason.into(),
        })
    }
}

impl From<zip::result::ZipError> for AppError {
    fn from(err: zip::result::ZipError) -> Self {
        AppError::File(FileError::PackageFailed(err))
    }
}

// ========== Result 类型别名 ==========

/// 应用程序结果类型
pub type AppResult<T> = Result<T, AppError>;
