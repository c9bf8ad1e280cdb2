use crate::models::InvoiceData;
use crate::ratelimit::RateLimiter;
use crate::service::InvoiceRecognizer;
use axum::{
    extract::{ConnectInfo, Json, Request, State},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::sync::Arc;

/// 请求体: base64 或 data URL 编码的图片
#[derive(Debug, Deserialize)]
pub struct RecognizeRequest {
    pub image: String,
}

/// 识别响应体
#[derive(Debug, Serialize)]
pub struct RecognizeResponse {
    pub success: bool,
    pub data: Option<InvoiceData>,
    pub message: Option<String>,
}

/// 请求体: 待保存的发票列表
#[derive(Debug, Deserialize)]
pub struct SaveInvoicesRequest {
    pub invoices: Vec<InvoiceData>,
}

/// 保存响应体
#[derive(Debug, Serialize)]
pub struct SaveResponse {
    pub success: bool,
    pub message: Option<String>,
}

/// 健康检查
pub async fn health_check() -> Response {
    Json(serde_json::json!({
        "status": "healthy",
        "service": "invoice-recognition"
    }))
    .into_response()
}

/// 识别发票图片
///
/// 业务失败 (无法识别、上游不可用) 也返回 200，结果语义全部
/// 由 success/message 表达，前端不需要区分 HTTP 错误码。
pub async fn recognize_invoice(
    State(recognizer): State<Arc<InvoiceRecognizer>>,
    Json(req): Json<RecognizeRequest>,
) -> Response {
    let (success, data, message) = recognizer.recognize(&req.image).await;
    let response = RecognizeResponse {
        success,
        data,
        message: Some(message),
    };
    (StatusCode::OK, Json(response)).into_response()
}

/// 保存发票数据
///
/// 持久化尚未接入，目前只记录收到的数据。
pub async fn save_invoices(Json(req): Json<SaveInvoicesRequest>) -> Response {
    let count = req.invoices.len();
    tracing::info!("收到 {} 张发票数据:", count);
    for invoice in &req.invoices {
        tracing::info!(
            "  - 发票号码: {}, 金额: {}",
            invoice.invoice_number,
            invoice.total_amount
        );
    }

    let response = SaveResponse {
        success: true,
        message: Some(format!("成功保存 {} 张发票", count)),
    };
    (StatusCode::OK, Json(response)).into_response()
}

/// 限流中间件：按客户端 IP 做滑动窗口准入，超限直接 429
pub async fn rate_limit(
    State(limiter): State<Arc<RateLimiter>>,
    req: Request,
    next: Next,
) -> Response {
    let client_ip = req
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.ip().to_string())
        .unwrap_or_else(|| "unknown".to_string());

    if !limiter.check(&client_ip) {
        tracing::warn!("客户端 {} 触发限流", client_ip);
        let body = serde_json::json!({
            "detail": format!("请求过于频繁，每分钟最多 {} 次请求", limiter.limit())
        });
        return (StatusCode::TOO_MANY_REQUESTS, Json(body)).into_response();
    }

    next.run(req).await
}
