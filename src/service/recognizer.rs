use crate::ai::AiClient;
use crate::error::RecognitionError;
use crate::models::InvoiceData;
use crate::service::{normalize, preprocess, prompt};

/// 发票识别服务：预处理 → 提示词 → 模型调用 → 解析 → 组装
///
/// 任何一个阶段失败立即短路，折算成 (success, data, message) 三元组，
/// 畸形的图片或模型回复只会产生失败响应，不会让进程崩溃。
pub struct InvoiceRecognizer {
    client: AiClient,
}

impl InvoiceRecognizer {
    pub fn new(client: AiClient) -> Self {
        Self { client }
    }

    /// 识别发票图片
    pub async fn recognize(&self, base64_image: &str) -> (bool, Option<InvoiceData>, String) {
        match self.run_pipeline(base64_image).await {
            Ok(invoice) => {
                tracing::info!("发票识别成功: 发票号码 {}", invoice.invoice_number);
                (true, Some(invoice), "发票识别成功".to_string())
            }
            Err(e) => {
                tracing::error!("发票识别失败: {}", e);
                let message = match &e {
                    // 用户可纠正的输入问题，直接给出指引
                    RecognitionError::UnsupportedFormat(_) => e.to_string(),
                    // 回复里提取不出 JSON，与服务不可用区分开
                    RecognitionError::Malformed(_) => {
                        "无法识别发票，请确认图片清晰度或重新上传".to_string()
                    }
                    _ => format!("发票识别失败: {}", e),
                };
                (false, None, message)
            }
        }
    }

    async fn run_pipeline(&self, base64_image: &str) -> Result<InvoiceData, RecognitionError> {
        // 1. 预处理图片
        let image_url = preprocess::normalize_image(base64_image)?;

        // 2. 调用视觉模型
        let reply = self
            .client
            .complete(prompt::invoice_prompt(), &image_url)
            .await?;

        // 3. 解析回复并组装发票
        let fields = normalize::parse_model_reply(&reply)?;
        Ok(normalize::build_invoice(&fields))
    }
}
