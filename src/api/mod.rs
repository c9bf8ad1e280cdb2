pub mod handlers;

use crate::service::InvoiceRecognizer;
use axum::routing::{get, post};
use axum::Router;
use std::sync::Arc;

pub use handlers::{health_check, rate_limit, recognize_invoice, save_invoices};

/// 发票相关路由
pub fn router(recognizer: Arc<InvoiceRecognizer>) -> Router {
    Router::new()
        .route("/api/invoice/recognize", post(handlers::recognize_invoice))
        .route("/api/invoice/save", post(handlers::save_invoices))
        .route("/api/invoice/health", get(handlers::health_check))
        .with_state(recognizer)
}
