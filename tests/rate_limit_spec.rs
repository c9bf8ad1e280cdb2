use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::{middleware, Router};
use invoice_vision_rust::config::{AiConfig, Provider};
use invoice_vision_rust::{api, AiClient, AppConfig, InvoiceRecognizer, RateLimiter};
use std::sync::Arc;
use tower::ServiceExt;

/// 带限流层的应用；oneshot 请求没有 ConnectInfo，
/// 所有请求都会落在同一个 "unknown" key 上，正好用来验证窗口计数
fn limited_app(limit: usize) -> Router {
    let config = AiConfig {
        provider: Provider::Ollama,
        ollama_base_url: "http://localhost:1".to_string(),
        ..AppConfig::default().ai
    };
    let recognizer = Arc::new(InvoiceRecognizer::new(AiClient::new(config)));
    let limiter = Arc::new(RateLimiter::new(limit));
    api::router(recognizer).layer(middleware::from_fn_with_state(limiter, api::rate_limit))
}

async fn get_health(app: Router) -> StatusCode {
    app.oneshot(
        Request::builder()
            .method("GET")
            .uri("/api/invoice/health")
            .body(Body::empty())
            .expect("request builder should not fail"),
    )
    .await
    .expect("handler should respond")
    .status()
}

#[tokio::test]
async fn requests_over_threshold_get_429() {
    let app = limited_app(3);

    for _ in 0..3 {
        assert_eq!(get_health(app.clone()).await, StatusCode::OK);
    }
    assert_eq!(get_health(app.clone()).await, StatusCode::TOO_MANY_REQUESTS);
}

#[tokio::test]
async fn router_without_layer_is_unlimited() {
    let config = AiConfig {
        provider: Provider::Ollama,
        ollama_base_url: "http://localhost:1".to_string(),
        ..AppConfig::default().ai
    };
    let app = api::router(Arc::new(InvoiceRecognizer::new(AiClient::new(config))));

    for _ in 0..5 {
        assert_eq!(get_health(app.clone()).await, StatusCode::OK);
    }
}
