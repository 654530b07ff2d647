//! Warehouse (magazzino) resolution and stock movements.
//!
//! Documents rarely name a warehouse on every line; the effective one
//! is resolved through a fallback chain: the line's own warehouse, then
//! the product's default, then the document's main warehouse. Stock
//! movements record the resolved warehouse together with the signed
//! quantity the document's operation applies.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::core::OperationSign;

/// First candidate that is actually set, scanning in order.
///
/// The building block of every fallback chain in this crate: pass the
/// candidates most-specific first and the winner comes back, or `None`
/// when the whole chain is empty.
pub fn first_present<T>(candidates: impl IntoIterator<Item = Option<T>>) -> Option<T> {
    candidates.into_iter().flatten().next()
}

/// Resolve the warehouse for a document line.
///
/// Fallback order: the line's own warehouse, the product's default
/// warehouse, the document's main warehouse.
pub fn resolve_warehouse(
    line_warehouse: Option<Uuid>,
    product_default_warehouse: Option<Uuid>,
    document_main_warehouse: Option<Uuid>,
) -> Option<Uuid> {
    first_present([line_warehouse, product_default_warehouse, document_main_warehouse])
}

/// A stock movement generated from one document line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockMovement {
    /// Owning tenant.
    pub organization_id: Uuid,
    /// Product being moved.
    pub product_id: Uuid,
    /// Warehouse the movement applies to, after fallback resolution.
    pub warehouse_id: Uuid,
    /// Movement date (the document date).
    pub date: NaiveDate,
    /// Quantity as written on the line.
    pub quantity: Decimal,
    /// Load or unload.
    pub operation: OperationSign,
    /// Signed valuation amount, set when the document type impacts
    /// valuation: the line net amount times the valuation sign.
    pub valuation: Option<Decimal>,
    /// Index of the originating line within the document.
    pub line_index: usize,
}

impl StockMovement {
    /// Quantity with the operation's sign applied: positive for loads,
    /// negative for unloads.
    pub fn signed_quantity(&self) -> Decimal {
        self.quantity * self.operation.factor()
    }
}
