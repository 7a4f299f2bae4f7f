// Integration test: issued invoice -> credit-note draft -> request
//
// A credit note starts from the rows of an invoice that was already sent.
// The user unticks the rows that are not being corrected, lowers quantities,
// picks a DIAN correction concept and writes the reason.

use facturador::config::BillingConfig;
use facturador::credit_notes::{CorrectionConcept, CreditNoteDraft, CreditNoteService};
use facturador::invoices::{InvoiceDraft, InvoiceItemDraft, InvoiceService};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde_json::json;

fn issued_invoice_rows() -> Vec<facturador::invoices::InvoiceItemPayload> {
    let draft = InvoiceDraft {
        client: Some(12),
        issue_date: "2025-05-02".to_string(),
        items: vec![
            InvoiceItemDraft {
                product: Some(1),
                code: "MON-24".to_string(),
                name: "Monitor 24\"".to_string(),
                quantity: dec!(3),
                unit_price: dec!(650000),
                ..InvoiceItemDraft::default()
            },
            InvoiceItemDraft {
                product: Some(2),
                code: "CAB-HDMI".to_string(),
                name: "Cable HDMI".to_string(),
                quantity: dec!(3),
                unit_price: dec!(25000),
                discount_percent: dec!(20),
                ..InvoiceItemDraft::default()
            },
        ],
        ..InvoiceDraft::default()
    };

    InvoiceService::default()
        .prepare_payload(&draft)
        .unwrap()
        .invoice_items
}

fn partial_return() -> CreditNoteDraft {
    let mut items = CreditNoteService::items_from_invoice(&issued_invoice_rows());
    // One monitor comes back; the cables stay with the client
    items[0].quantity = dec!(1);
    items[1].include = false;

    CreditNoteDraft {
        invoice_id: Some(901),
        concept: CorrectionConcept::Devolucion,
        reason: "Monitor con píxeles muertos".to_string(),
        items,
        ..CreditNoteDraft::default()
    }
}

#[test]
fn test_rows_copied_from_invoice() {
    let items = CreditNoteService::items_from_invoice(&issued_invoice_rows());

    assert_eq!(items.len(), 2);
    assert!(items.iter().all(|item| item.include));
    assert_eq!(items[0].product_id, Some(1));
    assert_eq!(items[0].tax_percent, dec!(19));
    assert_eq!(items[1].discount_percent, dec!(20));
    assert_eq!(items[1].quantity, dec!(3));
}

#[test]
fn test_partial_return_totals() {
    let service = CreditNoteService::new(BillingConfig::default());
    let calculation = service.calculate(&partial_return());

    // Excluded rows are still computed for display
    assert_eq!(calculation.lines.len(), 2);
    assert_eq!(calculation.lines[1].taxable_base, dec!(60000));

    assert_eq!(calculation.totals.subtotal, dec!(650000));
    assert_eq!(calculation.totals.total_primary_tax, dec!(123500));
    assert_eq!(calculation.totals.total_discount, Decimal::ZERO);
    assert_eq!(calculation.totals.grand_total, dec!(773500));
    assert_eq!(service.format_totals(&calculation).grand_total, "$ 773.500");
}

#[test]
fn test_request_body() {
    let service = CreditNoteService::new(BillingConfig::default());
    let request = service.prepare_request(&partial_return()).unwrap();

    assert_eq!(request.items.len(), 1);
    assert_eq!(request.items[0].codigo_producto, "MON-24");

    let body = serde_json::to_value(&request).unwrap();
    assert_eq!(body["invoiceId"], json!(901));
    assert_eq!(body["concepto_correccion_id"], json!(1));
    assert_eq!(body["motivo_correccion"], json!("Monitor con píxeles muertos"));
    assert_eq!(body["descripcion_correccion"], body["motivo_correccion"]);
    assert_eq!(body["items"][0]["productId"], json!(1));
    assert_eq!(body["items"][0]["cantidad"].as_f64(), Some(1.0));
    assert!(body.get("observaciones").is_none());
}

#[test]
fn test_rejects_missing_invoice() {
    let mut draft = partial_return();
    draft.invoice_id = None;

    let err = CreditNoteService::default().prepare_request(&draft).unwrap_err();
    assert!(err.is_validation());
    assert!(err.to_string().contains("An invoice must be selected"));
}

#[test]
fn test_min_reason_length_is_configurable() {
    let billing = BillingConfig {
        credit_note_min_reason_length: 40,
        ..BillingConfig::default()
    };
    let err = CreditNoteService::new(billing)
        .validate(&partial_return())
        .unwrap_err();
    assert!(err.to_string().contains("at least 40 characters"));
}

#[test]
fn test_draft_from_form_json() {
    let draft: CreditNoteDraft = serde_json::from_value(json!({
        "invoiceId": {"id": 33},
        "concepto_correccion_id": 3,
        "motivo_correccion": "Descuento comercial acordado",
        "descripcion_correccion": "   ",
        "observaciones": "Aplicado en junio",
        "items": [{
            "codigo_producto": "SRV",
            "nombre_producto": "Consultoría",
            "cantidad": "1",
            "precio_unitario": "1000000",
            "descuento_porcentaje": "15"
        }]
    }))
    .unwrap();

    assert_eq!(draft.concept, CorrectionConcept::RebajaDescuento);

    let service = CreditNoteService::default();
    let calculation = service.calculate(&draft);
    // Credit-note rows carry no IVA unless the form sets it
    assert_eq!(calculation.totals.grand_total, dec!(850000));

    let request = service.prepare_request(&draft).unwrap();
    assert_eq!(request.descripcion_correccion, "Descuento comercial acordado");
    assert_eq!(request.observaciones.as_deref(), Some("Aplicado en junio"));
}

#[test]
fn test_unknown_concept_rejected() {
    let result = serde_json::from_value::<CreditNoteDraft>(json!({
        "invoiceId": 1,
        "concepto_correccion_id": 7
    }));
    assert!(result.is_err());
}
