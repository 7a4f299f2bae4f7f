pub mod credit_notes;
pub mod invoices;
pub mod products;
