use rust_decimal::Decimal;

use crate::config::BillingConfig;
use crate::core::{AppError, Result};
use crate::modules::credit_notes::models::{
    CreateCreditNoteRequest, CreditNoteDraft, CreditNoteItemDraft, CreditNoteItemRequest,
};
use crate::modules::invoices::models::{
    DocumentCalculation, FormattedTotals, InvoiceItemPayload, LineItemResult,
};
use crate::modules::invoices::services::{compute_document_totals, compute_line_item};

/// Smallest quantity a credit-note row may carry
const MIN_QUANTITY: Decimal = Decimal::from_parts(1, 0, 0, false, 2);

/// Service for credit-note drafting
#[derive(Debug, Clone, Default)]
pub struct CreditNoteService {
    billing: BillingConfig,
}

impl CreditNoteService {
    pub fn new(billing: BillingConfig) -> Self {
        Self { billing }
    }

    /// Copies the rows of an issued invoice into credit-note rows, all included
    pub fn items_from_invoice(items: &[InvoiceItemPayload]) -> Vec<CreditNoteItemDraft> {
        items
            .iter()
            .map(|item| CreditNoteItemDraft {
                include: true,
                code: item.codigo_producto.clone(),
                name: item.nombre_producto.clone(),
                quantity: item.cantidad,
                unit_price: item.precio_unitario,
                discount_percent: item.descuento_porcentaje,
                tax_percent: item.iva_porcentaje,
                secondary_tax_percent: item.ico_porcentaje,
                is_tax_exempt: item.es_excluido,
                product_id: Some(item.product),
            })
            .collect()
    }

    /// Computes every row for display; totals cover the included rows only
    pub fn calculate(&self, draft: &CreditNoteDraft) -> DocumentCalculation {
        let lines: Vec<LineItemResult> = draft
            .items
            .iter()
            .map(|item| compute_line_item(&item.line_item()))
            .collect();

        let included: Vec<LineItemResult> = draft
            .items
            .iter()
            .zip(&lines)
            .filter(|(item, _)| item.include)
            .map(|(_, line)| *line)
            .collect();
        let totals = compute_document_totals(&included);

        tracing::debug!(
            items = lines.len(),
            included = included.len(),
            grand_total = %totals.grand_total,
            "Recalculated credit note"
        );

        DocumentCalculation { lines, totals }
    }

    pub fn format_totals(&self, calculation: &DocumentCalculation) -> FormattedTotals {
        calculation.totals.formatted(self.billing.currency)
    }

    pub fn validate(&self, draft: &CreditNoteDraft) -> Result<DocumentCalculation> {
        if draft.invoice_id.is_none() {
            return Err(AppError::validation("An invoice must be selected"));
        }

        let min_reason = self.billing.credit_note_min_reason_length;
        if draft.reason.trim().chars().count() < min_reason {
            return Err(AppError::validation(format!(
                "The correction reason must be at least {} characters",
                min_reason
            )));
        }

        if draft.included_items().next().is_none() {
            return Err(AppError::validation(
                "At least one item must be included in the credit note",
            ));
        }

        for (index, item) in draft.items.iter().enumerate() {
            if !item.include {
                continue;
            }
            let position = index + 1;

            if item.name.trim().is_empty() {
                return Err(AppError::validation(format!(
                    "Item {} must have a product name",
                    position
                )));
            }
            if item.quantity < MIN_QUANTITY {
                return Err(AppError::validation(format!(
                    "Item {} quantity must be at least {}",
                    position, MIN_QUANTITY
                )));
            }
            if item.unit_price < Decimal::ZERO {
                return Err(AppError::validation(format!(
                    "Item {} price cannot be negative",
                    position
                )));
            }
            if item.discount_percent < Decimal::ZERO
                || item.discount_percent > Decimal::ONE_HUNDRED
            {
                return Err(AppError::validation(format!(
                    "Item {} discount must be between 0 and 100",
                    position
                )));
            }
            if item.tax_percent < Decimal::ZERO || item.secondary_tax_percent < Decimal::ZERO {
                return Err(AppError::validation(format!(
                    "Item {} tax rates cannot be negative",
                    position
                )));
            }
        }

        Ok(self.calculate(draft))
    }

    /// Validate the draft and build the create-credit-note request.
    ///
    /// Only included rows are sent; the description falls back to the reason.
    pub fn prepare_request(&self, draft: &CreditNoteDraft) -> Result<CreateCreditNoteRequest> {
        let calculation = self.validate(draft)?;
        let invoice_id = draft
            .invoice_id
            .ok_or_else(|| AppError::validation("An invoice must be selected"))?;

        let reason = draft.reason.trim().to_string();
        let description = draft
            .description
            .as_deref()
            .map(str::trim)
            .filter(|d| !d.is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| reason.clone());

        let items: Vec<CreditNoteItemRequest> =
            draft.included_items().map(CreditNoteItemRequest::from).collect();

        tracing::info!(
            invoice_id,
            concept = draft.concept.id(),
            items = items.len(),
            total = %calculation.totals.grand_total,
            "Prepared credit note request"
        );

        Ok(CreateCreditNoteRequest {
            invoice_id,
            motivo_correccion: reason,
            concepto_correccion_id: draft.concept,
            descripcion_correccion: description,
            observaciones: draft
                .observations
                .clone()
                .filter(|o| !o.trim().is_empty()),
            items,
        })
    }
}
