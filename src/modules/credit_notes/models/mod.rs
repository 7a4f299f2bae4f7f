mod credit_note;

pub use credit_note::{
    CorrectionConcept, CreateCreditNoteRequest, CreditNoteDraft, CreditNoteItemDraft,
    CreditNoteItemRequest,
};
