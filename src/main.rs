use axum::middleware;
use invoice_vision_rust::{api, AiClient, AppConfig, InvoiceRecognizer, RateLimiter};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::fmt::time::ChronoLocal;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 初始化日志 - 使用本地时间格式
    tracing_subscriber::fmt()
        .with_timer(ChronoLocal::new("%Y-%m-%d %H:%M:%S".to_string()))
        .with_target(true)
        .with_level(true)
        .init();

    // 加载配置
    let config = AppConfig::from_env();
    info!(
        "AI provider: {:?}, model: {}, timeout: {}s",
        config.ai.provider,
        config.ai.model(),
        config.ai.timeout_secs
    );

    // 识别服务与限流器
    let recognizer = Arc::new(InvoiceRecognizer::new(AiClient::new(config.ai.clone())));
    let limiter = Arc::new(RateLimiter::new(
        config.rate_limit.requests_per_minute as usize,
    ));

    // 构建路由：限流 → 识别管线，日志与 CORS 包在最外层
    let mut app = api::router(recognizer);
    if config.rate_limit.enabled {
        app = app.layer(middleware::from_fn_with_state(limiter, api::rate_limit));
    }
    let app = app
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http());

    // 启动服务器
    let addr = format!("{}:{}", config.server.host, config.server.port);
    info!("Server listening on {}", addr);
    info!("API Endpoints:");
    info!("  POST /api/invoice/recognize - 识别发票图片");
    info!("  POST /api/invoice/save      - 保存发票数据");
    info!("  GET  /api/invoice/health    - 健康检查");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}
