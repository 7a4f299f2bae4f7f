use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::core::numeric::deserialize_lenient;
use crate::modules::invoices::models::{deserialize_relation_id, LineItem};

/// DIAN correction concept codes for credit notes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum CorrectionConcept {
    /// Partial return of goods, or partial rejection of a service
    Devolucion = 1,
    Anulacion = 2,
    RebajaDescuento = 3,
    AjustePrecio = 4,
    #[default]
    Otros = 5,
}

impl CorrectionConcept {
    pub fn all() -> [CorrectionConcept; 5] {
        [
            CorrectionConcept::Devolucion,
            CorrectionConcept::Anulacion,
            CorrectionConcept::RebajaDescuento,
            CorrectionConcept::AjustePrecio,
            CorrectionConcept::Otros,
        ]
    }

    pub fn id(&self) -> u8 {
        *self as u8
    }

    pub fn name(&self) -> &'static str {
        match self {
            CorrectionConcept::Devolucion => "Devolución",
            CorrectionConcept::Anulacion => "Anulación",
            CorrectionConcept::RebajaDescuento => "Rebaja/Descuento",
            CorrectionConcept::AjustePrecio => "Ajuste de precio",
            CorrectionConcept::Otros => "Otros",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            CorrectionConcept::Devolucion => {
                "Devolución de parte de los bienes; no aceptación de partes del servicio"
            }
            CorrectionConcept::Anulacion => "Anulación de factura electrónica",
            CorrectionConcept::RebajaDescuento => "Rebaja o descuento parcial o total",
            CorrectionConcept::AjustePrecio => "Ajuste de precio",
            CorrectionConcept::Otros => "Otros",
        }
    }
}

impl TryFrom<u8> for CorrectionConcept {
    type Error = String;

    fn try_from(id: u8) -> Result<Self, Self::Error> {
        CorrectionConcept::all()
            .into_iter()
            .find(|concept| concept.id() == id)
            .ok_or_else(|| format!("Invalid correction concept: {}", id))
    }
}

impl From<CorrectionConcept> for u8 {
    fn from(concept: CorrectionConcept) -> Self {
        concept.id()
    }
}

fn default_include() -> bool {
    true
}

/// One row of the credit-note form, usually copied from the source invoice
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreditNoteItemDraft {
    /// Excluded rows stay visible but are neither totalled nor sent
    #[serde(rename = "incluir", default = "default_include")]
    pub include: bool,

    #[serde(rename = "codigo_producto", default)]
    pub code: String,

    #[serde(rename = "nombre_producto", default)]
    pub name: String,

    #[serde(rename = "cantidad", default, deserialize_with = "deserialize_lenient")]
    pub quantity: Decimal,

    #[serde(
        rename = "precio_unitario",
        default,
        deserialize_with = "deserialize_lenient"
    )]
    pub unit_price: Decimal,

    #[serde(
        rename = "descuento_porcentaje",
        default,
        deserialize_with = "deserialize_lenient"
    )]
    pub discount_percent: Decimal,

    #[serde(
        rename = "iva_porcentaje",
        default,
        deserialize_with = "deserialize_lenient"
    )]
    pub tax_percent: Decimal,

    #[serde(
        rename = "ico_porcentaje",
        default,
        deserialize_with = "deserialize_lenient"
    )]
    pub secondary_tax_percent: Decimal,

    #[serde(rename = "es_excluido", default)]
    pub is_tax_exempt: bool,

    #[serde(
        rename = "productId",
        default,
        deserialize_with = "deserialize_relation_id"
    )]
    pub product_id: Option<i64>,
}

impl Default for CreditNoteItemDraft {
    fn default() -> Self {
        Self {
            include: true,
            code: String::new(),
            name: String::new(),
            quantity: Decimal::ZERO,
            unit_price: Decimal::ZERO,
            discount_percent: Decimal::ZERO,
            tax_percent: Decimal::ZERO,
            secondary_tax_percent: Decimal::ZERO,
            is_tax_exempt: false,
            product_id: None,
        }
    }
}

impl CreditNoteItemDraft {
    pub fn line_item(&self) -> LineItem {
        LineItem {
            quantity: self.quantity,
            unit_price: self.unit_price,
            discount_percent: self.discount_percent,
            tax_percent: self.tax_percent,
            secondary_tax_percent: self.secondary_tax_percent,
            is_tax_exempt: self.is_tax_exempt,
        }
    }
}

/// The credit-note form
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CreditNoteDraft {
    #[serde(
        rename = "invoiceId",
        default,
        deserialize_with = "deserialize_relation_id"
    )]
    pub invoice_id: Option<i64>,

    #[serde(rename = "concepto_correccion_id", default)]
    pub concept: CorrectionConcept,

    #[serde(rename = "motivo_correccion", default)]
    pub reason: String,

    #[serde(rename = "descripcion_correccion", default)]
    pub description: Option<String>,

    #[serde(rename = "observaciones", default)]
    pub observations: Option<String>,

    #[serde(default)]
    pub items: Vec<CreditNoteItemDraft>,
}

impl CreditNoteDraft {
    /// Rows that belong on the credit note
    pub fn included_items(&self) -> impl Iterator<Item = &CreditNoteItemDraft> {
        self.items.iter().filter(|item| item.include)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreditNoteItemRequest {
    pub codigo_producto: String,
    pub nombre_producto: String,
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub cantidad: Decimal,
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub precio_unitario: Decimal,
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub descuento_porcentaje: Decimal,
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub iva_porcentaje: Decimal,
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub ico_porcentaje: Decimal,
    pub es_excluido: bool,
    #[serde(rename = "productId", default, skip_serializing_if = "Option::is_none")]
    pub product_id: Option<i64>,
}

impl From<&CreditNoteItemDraft> for CreditNoteItemRequest {
    fn from(item: &CreditNoteItemDraft) -> Self {
        Self {
            codigo_producto: item.code.trim().to_string(),
            nombre_producto: item.name.trim().to_string(),
            cantidad: item.quantity,
            precio_unitario: item.unit_price,
            descuento_porcentaje: item.discount_percent,
            iva_porcentaje: item.tax_percent,
            ico_porcentaje: item.secondary_tax_percent,
            es_excluido: item.is_tax_exempt,
            product_id: item.product_id,
        }
    }
}

/// Body of the backend's create-credit-note endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateCreditNoteRequest {
    #[serde(rename = "invoiceId")]
    pub invoice_id: i64,
    pub motivo_correccion: String,
    pub concepto_correccion_id: CorrectionConcept,
    pub descripcion_correccion: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub observaciones: Option<String>,
    pub items: Vec<CreditNoteItemRequest>,
}
