use crate::ai::protocol::{
    ChatMessage, ChatRequest, ChatResponse, ContentPart, ImageUrl, ResponseFormat,
};
use crate::config::{AiConfig, Provider};
use crate::error::RecognitionError;
use reqwest::Client;
use std::time::Duration;

/// 单次调用允许的最大输出 token 数，复杂发票明细较多
const MAX_TOKENS: u32 = 2000;
/// 低温度，提高识别一致性
const TEMPERATURE: f32 = 0.1;

/// AI 客户端：通过 OpenAI 兼容的 chat/completions 接口调用视觉模型
pub struct AiClient {
    http: Client,
    config: AiConfig,
}

impl AiClient {
    pub fn new(config: AiConfig) -> Self {
        Self {
            http: Client::new(),
            config,
        }
    }

    /// 单轮对话：提示词 + 图片，返回模型的原始文本回复
    ///
    /// 超时即失败，不做内部重试；空 choices、空 content、非 2xx
    /// 一律折算成 Provider 错误交给上层。
    pub async fn complete(
        &self,
        prompt: &str,
        image_data_url: &str,
    ) -> Result<String, RecognitionError> {
        let request = self.build_request(prompt, image_data_url);
        let url = format!(
            "{}/chat/completions",
            self.config.base_url().trim_end_matches('/')
        );

        let response = self
            .http
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.config.api_key()))
            .timeout(Duration::from_secs(self.config.timeout_secs))
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(RecognitionError::Provider(format!(
                "HTTP {}: {}",
                status, body
            )));
        }

        let reply: ChatResponse = response.json().await?;
        let Some(choice) = reply.choices.into_iter().next() else {
            return Err(RecognitionError::Provider("AI API 返回空回应".to_string()));
        };

        match choice.message.content {
            Some(content) if !content.is_empty() => Ok(content),
            _ => Err(RecognitionError::Provider(
                "AI API 返回的内容为空".to_string(),
            )),
        }
    }

    fn build_request(&self, prompt: &str, image_data_url: &str) -> ChatRequest {
        // 高解析度提示仅对 OpenAI 生效
        let detail = match self.config.provider {
            Provider::OpenAi => Some("high"),
            Provider::Ollama => None,
        };

        let model = self.config.model().to_string();

        // GPT-4o 支持 JSON mode，能显著减少回复里的散文和围栏
        let response_format = if self.config.provider == Provider::OpenAi
            && model.to_lowercase().contains("gpt-4o")
        {
            Some(ResponseFormat {
                format_type: "json_object",
            })
        } else {
            None
        };

        ChatRequest {
            model,
            messages: vec![ChatMessage {
                role: "user",
                content: vec![
                    ContentPart::Text {
                        text: prompt.to_string(),
                    },
                    ContentPart::ImageUrl {
                        image_url: ImageUrl {
                            url: image_data_url.to_string(),
                            detail,
                        },
                    },
                ],
            }],
            max_tokens: MAX_TOKENS,
            temperature: TEMPERATURE,
            response_format,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn ollama_config(base_url: String) -> AiConfig {
        AiConfig {
            provider: Provider::Ollama,
            ollama_base_url: base_url,
            ollama_model: "llava".to_string(),
            timeout_secs: 5,
            ..AppConfig::default().ai
        }
    }

    #[tokio::test]
    async fn returns_message_content_on_success() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .and(header("Authorization", "Bearer ollama"))
            .and(body_partial_json(json!({"model": "llava"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "choices": [{"message": {"role": "assistant", "content": "{\"date\":\"2024-01-15\"}"}}]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = AiClient::new(ollama_config(server.uri()));
        let reply = client
            .complete("提示词", "data:image/png;base64,AAAA")
            .await
            .unwrap();
        assert_eq!(reply, "{\"date\":\"2024-01-15\"}");
    }

    #[tokio::test]
    async fn empty_choices_is_provider_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"choices": []})))
            .mount(&server)
            .await;

        let client = AiClient::new(ollama_config(server.uri()));
        let err = client
            .complete("提示词", "data:image/png;base64,AAAA")
            .await
            .unwrap_err();
        assert!(matches!(err, RecognitionError::Provider(_)));
    }

    #[tokio::test]
    async fn empty_content_is_provider_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "choices": [{"message": {"role": "assistant", "content": ""}}]
            })))
            .mount(&server)
            .await;

        let client = AiClient::new(ollama_config(server.uri()));
        let err = client
            .complete("提示词", "data:image/png;base64,AAAA")
            .await
            .unwrap_err();
        assert!(matches!(err, RecognitionError::Provider(_)));
    }

    #[tokio::test]
    async fn upstream_500_is_provider_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(500).set_body_string("internal"))
            .mount(&server)
            .await;

        let client = AiClient::new(ollama_config(server.uri()));
        let err = client
            .complete("提示词", "data:image/png;base64,AAAA")
            .await
            .unwrap_err();
        match err {
            RecognitionError::Provider(msg) => assert!(msg.contains("500")),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn openai_request_carries_detail_and_json_mode() {
        let config = AiConfig {
            provider: Provider::OpenAi,
            openai_model: "gpt-4o".to_string(),
            ..AppConfig::default().ai
        };
        let client = AiClient::new(config);
        let request = client.build_request("p", "data:image/jpeg;base64,CCCC");
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["response_format"]["type"], "json_object");
        assert_eq!(json["messages"][0]["content"][1]["image_url"]["detail"], "high");
        assert_eq!(json["max_tokens"], 2000);
    }

    #[test]
    fn ollama_request_omits_openai_extensions() {
        let client = AiClient::new(ollama_config("http://localhost:11434/v1".to_string()));
        let request = client.build_request("p", "data:image/jpeg;base64,CCCC");
        let json = serde_json::to_value(&request).unwrap();
        assert!(json.get("response_format").is_none());
        assert!(json["messages"][0]["content"][1]["image_url"]
            .get("detail")
            .is_none());
    }
}
