// Invoices module: the calculation engine plus invoice drafting

pub mod models;
pub mod services;

pub use models::{
    DataEnvelope, DocumentCalculation, DocumentTotals, InvoiceDraft, InvoiceItemDraft,
    InvoiceItemPayload, InvoicePayload, InvoiceStatus, LineItem, LineItemResult,
};
pub use services::{compute_document_totals, compute_line_item, InvoiceService};
