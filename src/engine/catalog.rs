//! Master-data access for document processing.

use std::collections::HashMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::scadenze::PaymentCondition;

/// Error raised by a catalog backend.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum CatalogError {
    /// The backing store failed to answer a lookup.
    #[error("catalog backend error: {0}")]
    Backend(String),
}

/// A product as the engine needs it: pricing defaults plus the flags
/// that decide whether selling it moves stock.
///
/// `stock_managed` is the product category's stock-management flag,
/// flattened onto the record by the adapter that feeds the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: Uuid,
    /// Owning organization.
    pub organization_id: Uuid,
    /// Item code, inherited by lines that do not override it.
    pub code: String,
    /// Description, inherited by lines that do not override it.
    pub description: String,
    /// Default unit price.
    pub unit_price: Decimal,
    /// Default VAT rate as a decimal fraction.
    pub vat_rate: Decimal,
    /// Default unit of measure code.
    pub unit: Option<String>,
    /// Whether documents moving this product generate stock movements.
    pub stock_managed: bool,
    /// Default warehouse, second tier of the per-line fallback.
    pub default_warehouse_id: Option<Uuid>,
}

/// A warehouse master-data record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Warehouse {
    pub id: Uuid,
    /// Owning organization.
    pub organization_id: Uuid,
    pub name: String,
}

/// A payment terms record wrapping the condition template it applies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentTerms {
    pub id: Uuid,
    /// Owning organization.
    pub organization_id: Uuid,
    /// Display name, e.g. "30/60 gg fine mese".
    pub description: String,
    /// The deadline template expanded at commit time.
    pub condition: PaymentCondition,
}

/// Lookup seam between document processing and master data.
///
/// Lookups return the record whoever owns it; the engine compares the
/// record's `organization_id` against the document's, so it can tell a
/// reference to a missing record from a reference into another tenant.
/// `Ok(None)` means the id does not exist at all; errors are reserved
/// for backend failures.
pub trait Catalog {
    /// Fetch a product by id.
    fn product(&self, id: Uuid) -> Result<Option<Product>, CatalogError>;

    /// Fetch a warehouse by id.
    fn warehouse(&self, id: Uuid) -> Result<Option<Warehouse>, CatalogError>;

    /// Fetch a payment terms record by id.
    fn payment_terms(&self, id: Uuid) -> Result<Option<PaymentTerms>, CatalogError>;
}

/// In-memory [`Catalog`] for tests, demos, and small deployments.
#[derive(Debug, Clone, Default)]
pub struct MemoryCatalog {
    products: HashMap<Uuid, Product>,
    warehouses: HashMap<Uuid, Warehouse>,
    payment_terms: HashMap<Uuid, PaymentTerms>,
}

impl MemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a product.
    pub fn add_product(&mut self, product: Product) {
        self.products.insert(product.id, product);
    }

    /// Insert or replace a warehouse.
    pub fn add_warehouse(&mut self, warehouse: Warehouse) {
        self.warehouses.insert(warehouse.id, warehouse);
    }

    /// Insert or replace a payment terms record.
    pub fn add_payment_terms(&mut self, terms: PaymentTerms) {
        self.payment_terms.insert(terms.id, terms);
    }
}

impl Catalog for MemoryCatalog {
    fn product(&self, id: Uuid) -> Result<Option<Product>, CatalogError> {
        Ok(self.products.get(&id).cloned())
    }

    fn warehouse(&self, id: Uuid) -> Result<Option<Warehouse>, CatalogError> {
        Ok(self.warehouses.get(&id).cloned())
    }

    fn payment_terms(&self, id: Uuid) -> Result<Option<PaymentTerms>, CatalogError> {
        Ok(self.payment_terms.get(&id).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn uuid(n: u128) -> Uuid {
        Uuid::from_u128(n)
    }

    #[test]
    fn memory_catalog_stores_and_returns_records() {
        let mut catalog = MemoryCatalog::new();
        catalog.add_product(Product {
            id: uuid(1),
            organization_id: uuid(100),
            code: "ART-001".into(),
            description: "Widget".into(),
            unit_price: dec!(10.00),
            vat_rate: dec!(0.22),
            unit: Some("PZ".into()),
            stock_managed: true,
            default_warehouse_id: None,
        });

        let found = catalog.product(uuid(1)).unwrap().unwrap();
        assert_eq!(found.code, "ART-001");
        assert!(catalog.product(uuid(2)).unwrap().is_none());
    }

    #[test]
    fn missing_ids_are_none_not_errors() {
        let catalog = MemoryCatalog::new();
        assert!(catalog.warehouse(uuid(9)).unwrap().is_none());
        assert!(catalog.payment_terms(uuid(9)).unwrap().is_none());
    }
}
