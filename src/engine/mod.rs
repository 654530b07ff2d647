//! Document totals and side-effect orchestration.
//!
//! [`process_document`] turns a transient [`Document`](crate::core::Document)
//! into a [`DocumentCommit`]: priced lines, rounded totals, stock
//! movements, and payment deadlines, resolved against a tenant-scoped
//! [`Catalog`]. The function is pure; persistence, transactions, and
//! destructive updates stay with the caller.

mod catalog;
mod process;

pub use catalog::{Catalog, CatalogError, MemoryCatalog, PaymentTerms, Product, Warehouse};
pub use process::{DocumentCommit, EngineError, PricedLine, process_document, validate_commit};
