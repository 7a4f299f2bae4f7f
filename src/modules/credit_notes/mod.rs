// Credit notes module: corrections against an issued invoice

pub mod models;
pub mod services;

pub use models::{
    CorrectionConcept, CreateCreditNoteRequest, CreditNoteDraft, CreditNoteItemDraft,
    CreditNoteItemRequest,
};
pub use services::CreditNoteService;
