use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config::BillingConfig;
use crate::core::numeric::{deserialize_lenient, deserialize_lenient_option};
use crate::modules::invoices::models::InvoiceItemDraft;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProductKind {
    #[default]
    Producto,
    Servicio,
}

fn default_true() -> bool {
    true
}

/// Catalog entry as returned by the product endpoints
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    #[serde(default)]
    pub id: Option<i64>,

    #[serde(rename = "codigo")]
    pub code: String,

    #[serde(rename = "nombre")]
    pub name: String,

    #[serde(rename = "descripcion", default)]
    pub description: Option<String>,

    #[serde(rename = "tipo", default)]
    pub kind: ProductKind,

    #[serde(
        rename = "precio_unitario",
        default,
        deserialize_with = "deserialize_lenient"
    )]
    pub unit_price: Decimal,

    #[serde(rename = "unidad_medida", default)]
    pub unit_of_measure: Option<String>,

    #[serde(rename = "unidad_medida_id", default)]
    pub unit_of_measure_id: Option<i64>,

    #[serde(rename = "codigo_unspsc", default)]
    pub unspsc_code: Option<String>,

    #[serde(
        rename = "iva_porcentaje",
        default,
        deserialize_with = "deserialize_lenient_option"
    )]
    pub tax_percent: Option<Decimal>,

    /// `false` marks the product as IVA-excluded
    #[serde(rename = "aplica_iva", default = "default_true")]
    pub applies_tax: bool,

    #[serde(
        rename = "ico_porcentaje",
        default,
        deserialize_with = "deserialize_lenient_option"
    )]
    pub secondary_tax_percent: Option<Decimal>,

    #[serde(rename = "aplica_ico", default)]
    pub applies_secondary_tax: bool,

    #[serde(rename = "activo", default = "default_true")]
    pub active: bool,
}

impl Product {
    /// Fills an invoice row from this product, as when it is picked in the
    /// product selector. Quantity starts at 1 with no discount.
    pub fn to_item_draft(&self, billing: &BillingConfig) -> InvoiceItemDraft {
        let secondary_tax_percent = if self.applies_secondary_tax {
            self.secondary_tax_percent
                .unwrap_or(billing.default_secondary_tax_percent)
        } else {
            Decimal::ZERO
        };

        InvoiceItemDraft {
            product: self.id,
            code: self.code.clone(),
            name: self.name.clone(),
            description: self.description.clone(),
            quantity: Decimal::ONE,
            unit_price: self.unit_price,
            discount_percent: Decimal::ZERO,
            tax_percent: self.tax_percent.unwrap_or(billing.default_tax_percent),
            secondary_tax_percent,
            is_tax_exempt: !self.applies_tax,
            unit_of_measure: self.unit_of_measure.clone(),
            unit_of_measure_id: self.unit_of_measure_id,
        }
    }
}
