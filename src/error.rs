use thiserror::Error;

/// 识别流程各阶段的失败条件
#[derive(Debug, Error)]
pub enum RecognitionError {
    /// 用户可自行纠正：换一张支持格式的图片
    #[error("不支持的图片格式: {0}，请上传 JPEG/PNG/WEBP 格式的图片")]
    UnsupportedFormat(String),

    #[error("图片预处理失败: {0}")]
    Preprocess(String),

    /// 上游模型服务不可用 (超时、传输错误、空回应)
    #[error("AI 服务调用失败: {0}")]
    Provider(String),

    /// 模型回复里提取不出合法的 JSON 对象
    #[error("AI 回应无法解析: {0}")]
    Malformed(String),
}

impl From<reqwest::Error> for RecognitionError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            RecognitionError::Provider(format!("请求超时: {}", e))
        } else {
            RecognitionError::Provider(e.to_string())
        }
    }
}
