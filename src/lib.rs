//! Facturador: monetary calculation engine for an electronic-invoicing back office.
//!
//! Computes invoice and credit-note rows (discount, IVA, ICO, cent rounding),
//! aggregates them into document totals, and prepares the payloads the back
//! office submits to its invoicing backend.

pub mod config;
pub mod core;
pub mod modules;

// Re-export commonly used types
pub use modules::credit_notes;
pub use modules::invoices;
pub use modules::products;

pub use modules::invoices::{compute_document_totals, compute_line_item};
