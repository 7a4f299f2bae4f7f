use crate::modules::invoices::models::{DocumentTotals, LineItemResult};

/// Sums already-computed rows into document totals.
///
/// Callers pass only the rows that belong on the document (a credit note
/// drops the rows the user excluded). Row order does not matter. The sums are
/// of cent-rounded values; only the grand total is rounded again, and the
/// discount is not subtracted from it because every taxable base already nets
/// it out. An empty slice gives all-zero totals.
pub fn compute_document_totals(lines: &[LineItemResult]) -> DocumentTotals {
    let totals = lines
        .iter()
        .try_fold(DocumentTotals::default(), |acc, line| acc.checked_add_line(line));

    match totals {
        Some(totals) => totals,
        None => {
            tracing::warn!(
                lines = lines.len(),
                "Document totals overflow, reporting zero totals"
            );
            DocumentTotals::default()
        }
    }
}
