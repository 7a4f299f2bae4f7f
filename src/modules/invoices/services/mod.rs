pub mod document_aggregator;
pub mod invoice_service;
pub mod line_item_calculator;

pub use document_aggregator::compute_document_totals;
pub use invoice_service::{normalize_date, InvoiceService};
pub use line_item_calculator::compute_line_item;
