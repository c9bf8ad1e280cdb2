pub mod invoice;

pub use invoice::{InvoiceData, InvoiceItem};
