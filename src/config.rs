use serde::{Deserialize, Serialize};

/// 应用配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub ai: AiConfig,
    pub rate_limit: RateLimitConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

/// AI 服务提供方 (均为 OpenAI 兼容接口)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    OpenAi,
    Ollama,
}

/// AI 服务配置：两种提供方各自的地址与模型
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AiConfig {
    pub provider: Provider,
    pub openai_base_url: String,
    pub openai_model: String,
    pub openai_api_key: String,
    pub ollama_base_url: String,
    pub ollama_model: String,
    /// 单次模型调用的超时 (秒)
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RateLimitConfig {
    pub enabled: bool,
    pub requests_per_minute: u32,
}

impl AiConfig {
    pub fn base_url(&self) -> &str {
        match self.provider {
            Provider::OpenAi => &self.openai_base_url,
            Provider::Ollama => &self.ollama_base_url,
        }
    }

    pub fn model(&self) -> &str {
        match self.provider {
            Provider::OpenAi => &self.openai_model,
            Provider::Ollama => &self.ollama_model,
        }
    }

    /// Ollama 不校验凭证，固定使用占位 key
    pub fn api_key(&self) -> &str {
        match self.provider {
            Provider::OpenAi => &self.openai_api_key,
            Provider::Ollama => "ollama",
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 8000,
            },
            ai: AiConfig {
                provider: Provider::OpenAi,
                openai_base_url: "https://api.openai.com/v1".to_string(),
                openai_model: "gpt-4o".to_string(),
                openai_api_key: String::new(),
                ollama_base_url: "http://localhost:11434/v1".to_string(),
                ollama_model: "llava".to_string(),
                timeout_secs: 60,
            },
            rate_limit: RateLimitConfig {
                enabled: true,
                requests_per_minute: 60,
            },
        }
    }
}

impl AppConfig {
    /// 从环境变量加载配置
    pub fn from_env() -> Self {
        let defaults = AppConfig::default();

        let provider = match std::env::var("AI_SERVICE_TYPE") {
            Ok(v) if v.eq_ignore_ascii_case("ollama") => Provider::Ollama,
            _ => Provider::OpenAi,
        };

        Self {
            server: ServerConfig {
                host: std::env::var("SERVER_HOST").unwrap_or(defaults.server.host),
                port: std::env::var("PORT")
                    .ok()
                    .and_then(|p| p.parse().ok())
                    .unwrap_or(defaults.server.port),
            },
            ai: AiConfig {
                provider,
                openai_base_url: std::env::var("OPENAI_BASE_URL")
                    .unwrap_or(defaults.ai.openai_base_url),
                openai_model: std::env::var("OPENAI_MODEL").unwrap_or(defaults.ai.openai_model),
                openai_api_key: std::env::var("OPENAI_API_KEY").unwrap_or_default(),
                ollama_base_url: std::env::var("OLLAMA_BASE_URL")
                    .unwrap_or(defaults.ai.ollama_base_url),
                ollama_model: std::env::var("OLLAMA_MODEL").unwrap_or(defaults.ai.ollama_model),
                timeout_secs: std::env::var("AI_TIMEOUT_SECONDS")
                    .ok()
                    .and_then(|t| t.parse().ok())
                    .unwrap_or(defaults.ai.timeout_secs),
            },
            rate_limit: RateLimitConfig {
                enabled: std::env::var("RATE_LIMIT_ENABLED")
                    .map(|v| v != "false" && v != "0")
                    .unwrap_or(defaults.rate_limit.enabled),
                requests_per_minute: std::env::var("RATE_LIMIT_REQUESTS_PER_MINUTE")
                    .ok()
                    .and_then(|n| n.parse().ok())
                    .unwrap_or(defaults.rate_limit.requests_per_minute),
            },
        }
    }
}
