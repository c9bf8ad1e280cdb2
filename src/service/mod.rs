pub mod normalize;
pub mod preprocess;
pub mod prompt;
pub mod recognizer;

pub use recognizer::InvoiceRecognizer;
