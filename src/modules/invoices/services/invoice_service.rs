use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};
use rust_decimal::Decimal;

use crate::config::BillingConfig;
use crate::core::{AppError, Result};
use crate::modules::invoices::models::{
    DocumentCalculation, FormattedTotals, InvoiceDraft, InvoiceItemDraft, InvoiceItemPayload,
    InvoicePayload, InvoiceStatus, LineItemResult,
};
use crate::modules::invoices::services::{compute_document_totals, compute_line_item};

/// Service for invoice editing and submission logic
#[derive(Debug, Clone, Default)]
pub struct InvoiceService {
    billing: BillingConfig,
}

impl InvoiceService {
    pub fn new(billing: BillingConfig) -> Self {
        Self { billing }
    }

    /// Recompute every row and the document totals.
    ///
    /// Cheap enough to call on each field change; rows are computed before the
    /// totals so the totals always reflect the latest edit.
    pub fn calculate(&self, draft: &InvoiceDraft) -> DocumentCalculation {
        let lines: Vec<LineItemResult> = draft
            .items
            .iter()
            .map(|item| compute_line_item(&item.line_item()))
            .collect();
        let totals = compute_document_totals(&lines);

        tracing::debug!(
            items = lines.len(),
            grand_total = %totals.grand_total,
            "Recalculated invoice"
        );

        DocumentCalculation { lines, totals }
    }

    pub fn format_totals(&self, calculation: &DocumentCalculation) -> FormattedTotals {
        calculation.totals.formatted(self.billing.currency)
    }

    /// Full form validation run before the invoice is saved.
    ///
    /// Checks, in order: client, issue date, operation type and payment form,
    /// at least one row, each row, and finally a positive grand total.
    pub fn validate_for_submission(&self, draft: &InvoiceDraft) -> Result<DocumentCalculation> {
        if draft.client.is_none() {
            return Err(AppError::validation("A client must be selected"));
        }

        if draft.issue_date.trim().is_empty() {
            return Err(AppError::validation("Issue date is required"));
        }

        if normalize_date(&draft.issue_date).is_none() {
            return Err(AppError::validation(format!(
                "Invalid issue date: {}",
                draft.issue_date
            )));
        }

        if draft.operation_type.trim().is_empty() {
            return Err(AppError::validation("Operation type is required"));
        }

        if draft.payment_form.trim().is_empty() {
            return Err(AppError::validation("Payment form is required"));
        }

        if draft.items.is_empty() {
            return Err(AppError::validation("The invoice must have at least one item"));
        }

        for (index, item) in draft.items.iter().enumerate() {
            Self::validate_item(index + 1, item)?;
        }

        let calculation = self.calculate(draft);
        if calculation.totals.grand_total <= Decimal::ZERO {
            return Err(AppError::validation("The invoice total must be greater than 0"));
        }

        Ok(calculation)
    }

    fn validate_item(position: usize, item: &InvoiceItemDraft) -> Result<()> {
        if item.product.is_none() {
            return Err(AppError::validation(format!(
                "Item {} must have a product selected",
                position
            )));
        }

        if item.code.trim().is_empty() || item.name.trim().is_empty() {
            return Err(AppError::validation(format!("Item {} is incomplete", position)));
        }

        if item.quantity <= Decimal::ZERO {
            return Err(AppError::validation(format!(
                "Item {} must have a quantity greater than 0",
                position
            )));
        }

        if item.unit_price <= Decimal::ZERO {
            return Err(AppError::validation(format!(
                "Item {} must have a price greater than 0",
                position
            )));
        }

        let percent_range = Decimal::ZERO..=Decimal::ONE_HUNDRED;
        for (label, value) in [
            ("discount", item.discount_percent),
            ("IVA", item.tax_percent),
            ("ICO", item.secondary_tax_percent),
        ] {
            if !percent_range.contains(&value) {
                return Err(AppError::validation(format!(
                    "Item {} {} must be between 0 and 100",
                    position, label
                )));
            }
        }

        Ok(())
    }

    /// Lighter check run right before asking the provider to emit the invoice
    pub fn validate_before_emission(&self, draft: &InvoiceDraft) -> Result<()> {
        if draft.client.is_none() {
            return Err(AppError::validation("A client must be selected"));
        }

        if draft.items.is_empty() {
            return Err(AppError::validation("At least one product must be added"));
        }

        for (index, item) in draft.items.iter().enumerate() {
            if item.product.is_none() {
                return Err(AppError::validation(format!(
                    "Item {} has no product",
                    index + 1
                )));
            }
            if item.code.trim().is_empty() || item.name.trim().is_empty() {
                return Err(AppError::validation(format!(
                    "Item {} is incomplete",
                    index + 1
                )));
            }
        }

        Ok(())
    }

    /// Validate the draft and build the outbound create-invoice payload
    pub fn prepare_payload(&self, draft: &InvoiceDraft) -> Result<InvoicePayload> {
        let calculation = self.validate_for_submission(draft)?;
        let client = draft
            .client
            .ok_or_else(|| AppError::validation("A client must be selected"))?;

        let issue_date = normalize_date(&draft.issue_date).ok_or_else(|| {
            AppError::validation(format!("Invalid issue date: {}", draft.issue_date))
        })?;
        let due_date = match draft.due_date.as_deref().map(str::trim) {
            Some(raw) if !raw.is_empty() => normalize_date(raw)
                .ok_or_else(|| AppError::validation(format!("Invalid due date: {}", raw)))?,
            _ => issue_date.clone(),
        };

        let payment_means = draft
            .payment_means
            .as_deref()
            .map(str::trim)
            .filter(|means| !means.is_empty())
            .unwrap_or(draft.payment_form.trim())
            .to_string();

        let mut items = Vec::with_capacity(draft.items.len());
        for (index, (item, result)) in draft.items.iter().zip(&calculation.lines).enumerate() {
            let product = item.product.ok_or_else(|| {
                AppError::validation(format!("Item {} must have a product selected", index + 1))
            })?;
            let orden = u32::try_from(index + 1)
                .map_err(|_| AppError::internal("Too many invoice items"))?;
            items.push(InvoiceItemPayload::from_draft(item, product, result, orden));
        }

        let totals = calculation.totals;
        let payload = InvoicePayload {
            client,
            fecha_emision: issue_date,
            fecha_vencimiento: due_date,
            tipo_operacion: draft.operation_type.trim().to_string(),
            forma_pago: draft.payment_form.trim().to_string(),
            medio_pago: payment_means,
            observaciones: draft.observations.clone().unwrap_or_default(),
            subtotal: totals.subtotal,
            total_iva: totals.total_primary_tax,
            total_ico: totals.total_secondary_tax,
            total_descuentos: totals.total_discount,
            total: totals.grand_total,
            estado_local: InvoiceStatus::Borrador,
            enviar_email: false,
            invoice_items: items,
        };

        tracing::info!(
            client = payload.client,
            items = payload.invoice_items.len(),
            total = %payload.total,
            "Prepared invoice payload"
        );

        Ok(payload)
    }
}

/// Normalise a form date to `YYYY-MM-DDTHH:MM:SS.sssZ`.
///
/// A bare date is pinned to 12:00 UTC so that no timezone shift moves it to
/// another calendar day.
/// `None` when the input is neither `YYYY-MM-DD` nor RFC 3339.
pub fn normalize_date(raw: &str) -> Option<String> {
    let raw = raw.trim();
    let instant: DateTime<Utc> = if raw.contains('T') {
        DateTime::parse_from_rfc3339(raw).ok()?.with_timezone(&Utc)
    } else {
        NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .ok()?
            .and_hms_opt(12, 0, 0)?
            .and_utc()
    };
    Some(instant.to_rfc3339_opts(SecondsFormat::Millis, true))
}
