/// LLM API 客户端
///
/// 只负责"发送一条提示词、拿回一段文本"：
/// - 请求体用 `async-openai` 的类型构建，用 `reqwest` 发送，以便拿到 HTTP 状态码
/// - 失败分类：429 / 其他状态码 / 网络错误 / 响应无法解析
/// - 每次逻辑请求独立的指数退避重试
use async_openai::types::chat::{
    ChatCompletionRequestMessage, ChatCompletionRequestUserMessageArgs, CreateChatCompletionRequest,
    CreateChatCompletionRequestArgs,
};
use reqwest::StatusCode;
use serde::Deserialize;
use tracing::{debug, error, warn};

use crate::clients::retry::RetryPolicy;
use crate::config::Config;
use crate::error::{ApiError, AppError, AppResult};

/// LLM 客户端
pub struct LlmClient {
    http: reqwest::Client,
    endpoint: String,
    api_key: String,
    model_name: String,
    max_tokens: u32,
    temperature: f32,
    top_p: f32,
    retry: RetryPolicy,
}

/// 单次尝试的失败原因
#[derive(Debug)]
enum AttemptFailure {
    RateLimited,
    Status(u16),
    Transport(reqwest::Error),
    Malformed(String),
}

impl AttemptFailure {
    /// 重试耗尽后对外暴露的错误
    fn into_api_error(self) -> ApiError {
        match self {
            AttemptFailure::RateLimited => ApiError::RateLimited,
            AttemptFailure::Status(code) => ApiError::ServiceError { code },
            AttemptFailure::Transport(_) => ApiError::NetworkUnavailable,
            AttemptFailure::Malformed(_) => ApiError::ServiceError { code: 500 },
        }
    }
}

impl std::fmt::Display for AttemptFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AttemptFailure::RateLimited => write!(f, "HTTP 429"),
            AttemptFailure::Status(code) => write!(f, "HTTP {}", code),
            AttemptFailure::Transport(e) => write!(f, "网络错误: {}", e),
            AttemptFailure::Malformed(reason) => write!(f, "响应无法解析: {}", reason),
        }
    }
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[derive(Debug, Deserialize)]
struct ChatMessage {
    #[serde(default)]
    content: Option<String>,
}

impl LlmClient {
    /// 创建新的 LLM 客户端
    pub fn new(config: &Config) -> AppResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.request_timeout())
            .build()
            .map_err(|e| AppError::Other(format!("无法创建 HTTP 客户端: {}", e)))?;

        Ok(Self {
            http,
            endpoint: format!("{}/chat/completions", config.llm_api_base_url.trim_end_matches('/')),
            api_key: config.llm_api_key.clone(),
            model_name: config.llm_model_name.clone(),
            max_tokens: config.llm_max_tokens,
            temperature: config.llm_temperature,
            top_p: config.llm_top_p,
            retry: RetryPolicy::from_config(config),
        })
    }

    /// 发送提示词并返回生成的文本
    ///
    /// 重试对调用方透明：某次重试成功时，与第一次就成功没有区别。
    ///
    /// # 返回
    /// 非空的文本（已去除首尾空白），或重试耗尽后的 [`ApiError`]
    pub async fn request_text(&self, prompt: &str) -> Result<String, ApiError> {
        let request = self.build_request(prompt).map_err(|e| {
            error!("构建 LLM 请求失败: {}", e);
            ApiError::ServiceError { code: 500 }
        })?;

        debug!(
            "调用 LLM API，模型: {}，提示词长度: {} 字符",
            self.model_name,
            prompt.chars().count()
        );

        let mut retries_done = 0;
        loop {
            let failure = match self.send_once(&request).await {
                Ok(text) => {
                    debug!("LLM API 调用成功 (尝试 {} 次)", retries_done + 1);
                    return Ok(text);
                }
                Err(failure) => failure,
            };

            if !self.retry.can_retry(retries_done) {
                error!(
                    "❌ LLM 请求失败，已尝试 {} 次: {}",
                    self.retry.max_attempts(),
                    failure
                );
                return Err(failure.into_api_error());
            }

            let delay = self.retry.delay_for(retries_done);
            warn!(
                "⚠️ LLM 请求失败 ({})，{:?} 后进行第 {}/{} 次重试",
                failure,
                delay,
                retries_done + 1,
                self.retry.max_retries
            );
            tokio::time::sleep(delay).await;
            retries_done += 1;
        }
    }

    fn build_request(&self, prompt: &str) -> Result<CreateChatCompletionRequest, async_openai::error::OpenAIError> {
        let user_msg = ChatCompletionRequestUserMessageArgs::default()
            .content(prompt)
            .build()?;

        CreateChatCompletionRequestArgs::default()
            .model(&self.model_name)
            .messages(vec![ChatCompletionRequestMessage::User(user_msg)])
            .max_tokens(self.max_tokens)
            .temperature(self.temperature)
            .top_p(self.top_p)
            .build()
    }

    /// 单次尝试
    async fn send_once(&self, request: &CreateChatCompletionRequest) -> Result<String, AttemptFailure> {
        let response = self
            .http
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(request)
            .send()
            .await
            .map_err(AttemptFailure::Transport)?;

        let status = response.status();
        if status == StatusCode::TOO_MANY_REQUESTS {
            return Err(AttemptFailure::RateLimited);
        }
        if !status.is_success() {
            return Err(AttemptFailure::Status(status.as_u16()));
        }

        // 读取响应体时断开或超时属于网络问题，其余为内容无法解析
        let body: ChatResponse = response.json().await.map_err(|e| {
            if e.is_body() || e.is_connect() || e.is_timeout() {
                AttemptFailure::Transport(e)
            } else {
                AttemptFailure::Malformed(e.to_string())
            }
        })?;

        body.choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .map(|content| content.trim().to_string())
            .filter(|content| !content.is_empty())
            .ok_or_else(|| AttemptFailure::Malformed("返回内容为空".to_string()))
    }
}
