pub mod ai;
pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod ratelimit;
pub mod service;

pub use ai::AiClient;
pub use config::AppConfig;
pub use error::RecognitionError;
pub use ratelimit::RateLimiter;
pub use service::InvoiceRecognizer;
