mod invoice;
mod line_item;
mod relation;
mod totals;

pub use invoice::{
    DataEnvelope, InvoiceDraft, InvoiceItemDraft, InvoiceItemPayload, InvoicePayload,
    InvoiceStatus,
};
pub use line_item::{LineItem, LineItemResult, DEFAULT_TAX_PERCENT};
pub use relation::{deserialize_relation_id, relation_id};
pub use totals::{DocumentCalculation, DocumentTotals, FormattedTotals};
