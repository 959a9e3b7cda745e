use std::time::Duration;

/// 程序配置
#[derive(Clone, Debug)]
pub struct Config {
    // --- LLM 配置 ---
    pub llm_api_key: String,
    /// 兼容 OpenAI 的 API 根地址（不含 `/chat/completions`）
    pub llm_api_base_url: String,
    pub llm_model_name: String,
    pub llm_max_tokens: u32,
    pub llm_temperature: f32,
    pub llm_top_p: f32,
    /// 单次请求超时（秒）
    pub request_timeout_secs: u64,
    // --- 重试配置 ---
    /// 每次逻辑请求的最大重试次数
    pub max_retries: u32,
    /// 退避基准延迟（毫秒）
    pub retry_base_delay_ms: u64,
    /// 是否显示详细日志
    pub verbose_logging: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            llm_api_key: String::new(),
            llm_api_base_url: "https://api.together.xyz/v1".to_string(),
            llm_model_name: "meta-llama/Llama-3-70b-chat-hf".to_string(),
            llm_max_tokens: 1024,
            llm_temperature: 0.7,
            llm_top_p: 0.9,
            request_timeout_secs: 30,
            max_retries: 3,
            retry_base_delay_ms: 5000,
            verbose_logging: false,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        let default = Self::default();
        Self {
            llm_api_key: std::env::var("LLM_API_KEY").unwrap_or(default.llm_api_key),
            llm_api_base_url: std::env::var("LLM_API_BASE_URL").unwrap_or(default.llm_api_base_url),
            llm_model_name: std::env::var("LLM_MODEL_NAME").unwrap_or(default.llm_model_name),
            llm_max_tokens: parse_env("LLM_MAX_TOKENS").unwrap_or(default.llm_max_tokens),
            llm_temperature: parse_env("LLM_TEMPERATURE").unwrap_or(default.llm_temperature),
            llm_top_p: parse_env("LLM_TOP_P").unwrap_or(default.llm_top_p),
            request_timeout_secs: parse_env("LLM_REQUEST_TIMEOUT_SECS").unwrap_or(default.request_timeout_secs),
            max_retries: parse_env("LLM_MAX_RETRIES").unwrap_or(default.max_retries),
            retry_base_delay_ms: parse_env("LLM_RETRY_BASE_DELAY_MS").unwrap_or(default.retry_base_delay_ms),
            verbose_logging: parse_env("VERBOSE_LOGGING").unwrap_or(default.verbose_logging),
        }
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn retry_base_delay(&self) -> Duration {
        Duration::from_millis(self.retry_base_delay_ms)
    }
}

fn parse_env<T: std::str::FromStr>(name: &str) -> Option<T> {
    std::env::var(name).ok().and_then(|v| v.parse().ok())
}
