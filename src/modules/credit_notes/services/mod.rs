pub mod credit_note_service;

pub use credit_note_service::CreditNoteService;
