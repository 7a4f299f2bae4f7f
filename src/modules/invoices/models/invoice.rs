// Invoice draft (what the editing form holds) and invoice payload (what is
// sent to the backend on submission).
//
// Field names on the wire follow the backend's Spanish schema; the Rust side
// uses English names with serde renames.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::line_item::{default_tax_percent, LineItem, LineItemResult};
use super::relation::deserialize_relation_id;
use crate::core::numeric::deserialize_lenient;

/// Local lifecycle of an invoice as tracked by the back office
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum InvoiceStatus {
    /// Saved, not yet sent to DIAN
    #[default]
    Borrador,
    /// Submitted to the e-invoicing provider
    Enviada,
    Aceptada,
    Rechazada,
    Anulada,
}

impl std::fmt::Display for InvoiceStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InvoiceStatus::Borrador => write!(f, "Borrador"),
            InvoiceStatus::Enviada => write!(f, "Enviada"),
            InvoiceStatus::Aceptada => write!(f, "Aceptada"),
            InvoiceStatus::Rechazada => write!(f, "Rechazada"),
            InvoiceStatus::Anulada => write!(f, "Anulada"),
        }
    }
}

impl std::str::FromStr for InvoiceStatus {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "Borrador" => Ok(InvoiceStatus::Borrador),
            "Enviada" => Ok(InvoiceStatus::Enviada),
            "Aceptada" => Ok(InvoiceStatus::Aceptada),
            "Rechazada" => Ok(InvoiceStatus::Rechazada),
            "Anulada" => Ok(InvoiceStatus::Anulada),
            _ => Err(format!("Invalid invoice status: {}", s)),
        }
    }
}

/// `{"data": ...}` wrapper expected around every request body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataEnvelope<T> {
    pub data: T,
}

impl<T> DataEnvelope<T> {
    pub fn new(data: T) -> Self {
        Self { data }
    }
}

fn default_quantity() -> Decimal {
    Decimal::ONE
}

fn default_operation_type() -> String {
    "Contado".to_string()
}

fn default_payment_form() -> String {
    "Efectivo".to_string()
}

/// One row of the invoice editing form
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvoiceItemDraft {
    #[serde(default, deserialize_with = "deserialize_relation_id")]
    pub product: Option<i64>,

    #[serde(rename = "codigo_producto", default)]
    pub code: String,

    #[serde(rename = "nombre_producto", default)]
    pub name: String,

    #[serde(rename = "descripcion", default)]
    pub description: Option<String>,

    #[serde(
        rename = "cantidad",
        default = "default_quantity",
        deserialize_with = "deserialize_lenient"
    )]
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
        default = "default_tax_percent",
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

    #[serde(rename = "unidad_medida", default)]
    pub unit_of_measure: Option<String>,

    #[serde(rename = "unidad_medida_id", default)]
    pub unit_of_measure_id: Option<i64>,
}

impl Default for InvoiceItemDraft {
    fn default() -> Self {
        Self {
            product: None,
            code: String::new(),
            name: String::new(),
            description: None,
            quantity: default_quantity(),
            unit_price: Decimal::ZERO,
            discount_percent: Decimal::ZERO,
            tax_percent: default_tax_percent(),
            secondary_tax_percent: Decimal::ZERO,
            is_tax_exempt: false,
            unit_of_measure: None,
            unit_of_measure_id: None,
        }
    }
}

impl InvoiceItemDraft {
    /// Calculator input for this row
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

/// The invoice editing form
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvoiceDraft {
    #[serde(default, deserialize_with = "deserialize_relation_id")]
    pub client: Option<i64>,

    /// `YYYY-MM-DD` or RFC 3339
    #[serde(rename = "fecha_emision", default)]
    pub issue_date: String,

    #[serde(rename = "fecha_vencimiento", default)]
    pub due_date: Option<String>,

    #[serde(rename = "tipo_operacion", default = "default_operation_type")]
    pub operation_type: String,

    #[serde(rename = "forma_pago", default = "default_payment_form")]
    pub payment_form: String,

    #[serde(rename = "medio_pago", default)]
    pub payment_means: Option<String>,

    #[serde(rename = "observaciones", default)]
    pub observations: Option<String>,

    #[serde(rename = "invoice_items", default)]
    pub items: Vec<InvoiceItemDraft>,
}

impl Default for InvoiceDraft {
    fn default() -> Self {
        Self {
            client: None,
            issue_date: String::new(),
            due_date: None,
            operation_type: default_operation_type(),
            payment_form: default_payment_form(),
            payment_means: None,
            observations: None,
            items: Vec::new(),
        }
    }
}

/// One row as sent to the backend, computed fields included
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvoiceItemPayload {
    pub product: i64,
    pub codigo_producto: String,
    pub nombre_producto: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub descripcion: Option<String>,
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub cantidad: Decimal,
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub precio_unitario: Decimal,
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub descuento_porcentaje: Decimal,
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub descuento_valor: Decimal,
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub subtotal: Decimal,
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub iva_porcentaje: Decimal,
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub iva_valor: Decimal,
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub ico_porcentaje: Decimal,
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub ico_valor: Decimal,
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub total_item: Decimal,
    /// 1-based position on the document
    pub orden: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unidad_medida: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unidad_medida_id: Option<i64>,
    #[serde(default)]
    pub es_excluido: bool,
    /// Parent invoice id, set once the invoice itself has been created
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub invoice: Option<i64>,
}

impl InvoiceItemPayload {
    /// Merges a validated row with its computed amounts
    pub fn from_draft(
        draft: &InvoiceItemDraft,
        product: i64,
        result: &LineItemResult,
        orden: u32,
    ) -> Self {
        Self {
            product,
            codigo_producto: draft.code.trim().to_string(),
            nombre_producto: draft.name.trim().to_string(),
            descripcion: draft.description.clone().filter(|d| !d.trim().is_empty()),
            cantidad: draft.quantity,
            precio_unitario: draft.unit_price,
            descuento_porcentaje: draft.discount_percent,
            descuento_valor: result.discount_amount,
            subtotal: result.taxable_base,
            iva_porcentaje: draft.tax_percent,
            iva_valor: result.primary_tax_amount,
            ico_porcentaje: draft.secondary_tax_percent,
            ico_valor: result.secondary_tax_amount,
            total_item: result.line_total,
            orden,
            unidad_medida: draft.unit_of_measure.clone(),
            unidad_medida_id: draft.unit_of_measure_id,
            es_excluido: draft.is_tax_exempt,
            invoice: None,
        }
    }
}

/// Invoice body for the backend's create endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvoicePayload {
    pub client: i64,
    pub fecha_emision: String,
    pub fecha_vencimiento: String,
    pub tipo_operacion: String,
    pub forma_pago: String,
    pub medio_pago: String,
    pub observaciones: String,
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub subtotal: Decimal,
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub total_iva: Decimal,
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub total_ico: Decimal,
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub total_descuentos: Decimal,
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub total: Decimal,
    pub estado_local: InvoiceStatus,
    pub enviar_email: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub invoice_items: Vec<InvoiceItemPayload>,
}

impl InvoicePayload {
    /// The invoice without its rows: the first request of the
    /// create-invoice-then-create-items sequence.
    pub fn header(&self) -> DataEnvelope<InvoicePayload> {
        DataEnvelope::new(InvoicePayload {
            invoice_items: Vec::new(),
            ..self.clone()
        })
    }

    /// One request per row, linked to the invoice the backend just created,
    /// in document order.
    pub fn item_requests(&self, invoice_id: i64) -> Vec<DataEnvelope<InvoiceItemPayload>> {
        self.invoice_items
            .iter()
            .map(|item| {
                DataEnvelope::new(InvoiceItemPayload {
                    invoice: Some(invoice_id),
                    ..item.clone()
                })
            })
            .collect()
    }
}
