use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Ordinary Italian VAT rate (22%) as a decimal fraction.
pub const ALIQUOTA_ORDINARIA: Decimal = dec!(0.22);

/// Reduced Italian VAT rate (10%) as a decimal fraction.
pub const ALIQUOTA_RIDOTTA: Decimal = dec!(0.10);

/// Super-reduced Italian VAT rate (4%) as a decimal fraction.
pub const ALIQUOTA_SUPER_RIDOTTA: Decimal = dec!(0.04);

/// An ERP document in its transient, pre-commit form.
///
/// Lines may be product-backed (carrying only a product reference and a
/// quantity) or free entries carrying their own description and price.
/// Committing the document resolves, prices, and expands it into the
/// derived rows the rest of the system persists.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    /// Owning organization. Every master-data lookup is scoped to it.
    pub organization_id: Uuid,
    /// Progressive number (art. 21 DPR 633/72), assigned by a
    /// [`NumberSequence`](super::NumberSequence) at registration time.
    pub number: Option<String>,
    /// Document date, the base for payment deadlines.
    pub date: NaiveDate,
    /// Behavior flags of the document type.
    pub config: DocumentTypeConfig,
    /// Default warehouse for lines that resolve no other warehouse.
    pub main_warehouse_id: Option<Uuid>,
    /// Payment terms reference driving deadline generation.
    pub payment_terms_id: Option<Uuid>,
    /// Free text notes.
    pub notes: Vec<String>,
    /// Document lines.
    pub lines: Vec<DocumentLine>,
}

/// A transient document line.
///
/// Product-backed lines may leave price, VAT rate, and description empty
/// and inherit them from the product record at commit time. Free entries
/// (no product reference) must carry their own.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentLine {
    /// Product reference, when the line sells a catalogued item.
    pub product_id: Option<Uuid>,
    /// Warehouse override, highest priority in the fallback chain.
    pub warehouse_id: Option<Uuid>,
    /// Description as printed on the document.
    pub description: Option<String>,
    /// Item code as printed on the document.
    pub code: Option<String>,
    /// Quantity, up to 4 decimal places. Negative quantities are allowed
    /// for correction lines.
    pub quantity: Decimal,
    /// Unit price, up to 2 decimal places.
    pub unit_price: Option<Decimal>,
    /// VAT rate as a decimal fraction (0.22 = 22%).
    pub vat_rate: Option<Decimal>,
    /// Unit of measure code (PZ, KG, ...).
    pub unit: Option<String>,
}

/// Committed document totals, all rounded to the cent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentTotals {
    /// Sum of line net amounts (imponibile).
    pub net_total: Decimal,
    /// Sum of line VAT amounts (imposta).
    pub vat_total: Decimal,
    /// Sum of line gross amounts.
    pub gross_total: Decimal,
}

/// Movement direction for stock and valuation effects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OperationSign {
    /// Goods enter the warehouse (carico).
    Load,
    /// Goods leave the warehouse (scarico).
    Unload,
}

impl OperationSign {
    /// Multiplier applied to quantities and valuation amounts.
    pub fn factor(&self) -> Decimal {
        match self {
            Self::Load => Decimal::ONE,
            Self::Unload => Decimal::NEGATIVE_ONE,
        }
    }

    /// Signed integer code as persisted (+1 / -1).
    pub fn code(&self) -> i8 {
        match self {
            Self::Load => 1,
            Self::Unload => -1,
        }
    }

    /// Parse from the persisted integer code.
    pub fn from_code(code: i8) -> Option<Self> {
        match code {
            1 => Some(Self::Load),
            -1 => Some(Self::Unload),
            _ => None,
        }
    }
}

/// Behavior flags attached to a document type.
///
/// The flags decide which side effects committing a document produces:
/// whether stock moves, in which direction, and whether the movement
/// carries a valuation delta. Presets cover the common Italian document
/// types; bespoke types can fill the struct directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentTypeConfig {
    /// Whether committing the document moves stock.
    pub inventory_movement: bool,
    /// Whether stock movements carry a valuation delta.
    pub valuation_impact: bool,
    /// Direction applied to stock quantities, when stock moves.
    pub operation_sign_stock: Option<OperationSign>,
    /// Direction applied to valuation amounts, when valuation is affected.
    pub operation_sign_valuation: Option<OperationSign>,
}

impl DocumentTypeConfig {
    /// Fattura di vendita: unloads stock and its value.
    pub fn sales_invoice() -> Self {
        Self {
            inventory_movement: true,
            valuation_impact: true,
            operation_sign_stock: Some(OperationSign::Unload),
            operation_sign_valuation: Some(OperationSign::Unload),
        }
    }

    /// Nota di credito: loads returned stock and its value back.
    pub fn credit_note() -> Self {
        Self {
            inventory_movement: true,
            valuation_impact: true,
            operation_sign_stock: Some(OperationSign::Load),
            operation_sign_valuation: Some(OperationSign::Load),
        }
    }

    /// DDT (documento di trasporto, DPR 472/96): moves goods without
    /// touching valuation.
    pub fn delivery_note() -> Self {
        Self {
            inventory_movement: true,
            valuation_impact: false,
            operation_sign_stock: Some(OperationSign::Unload),
            operation_sign_valuation: None,
        }
    }

    /// Ordine cliente: no warehouse effect at all.
    pub fn sales_order() -> Self {
        Self {
            inventory_movement: false,
            valuation_impact: false,
            operation_sign_stock: None,
            operation_sign_valuation: None,
        }
    }

    /// Fattura di acquisto: loads purchased stock and its value.
    pub fn purchase_invoice() -> Self {
        Self {
            inventory_movement: true,
            valuation_impact: true,
            operation_sign_stock: Some(OperationSign::Load),
            operation_sign_valuation: Some(OperationSign::Load),
        }
    }
}
