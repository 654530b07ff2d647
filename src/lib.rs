//! # fattura
//!
//! Italian ERP document engine: fixed-point monetary arithmetic with
//! fiscal rounding, VAT application and scorporo, payment deadline
//! (scadenze) generation, warehouse fallback and stock movements, and
//! document commit orchestration over tenant-scoped master data.
//!
//! All monetary values use [`rust_decimal::Decimal`], never floating
//! point. Monetary rounding is half up, per Italian fiscal practice.
//!
//! ## Quick Start
//!
//! ```rust
//! use chrono::NaiveDate;
//! use fattura::core::*;
//! use fattura::money::calculate_line_total;
//! use rust_decimal_macros::dec;
//!
//! let amounts = calculate_line_total(dec!(2), dec!(10.00), ALIQUOTA_ORDINARIA);
//! assert_eq!(amounts.net_amount, dec!(20.00));
//! assert_eq!(amounts.vat_amount, dec!(4.40));
//! assert_eq!(amounts.gross_amount, dec!(24.40));
//!
//! let document = DocumentBuilder::new(
//!     uuid::Uuid::new_v4(),
//!     NaiveDate::from_ymd_opt(2024, 6, 15).unwrap(),
//!     DocumentTypeConfig::sales_invoice(),
//! )
//! .number("FT-0001/2024")
//! .add_line(
//!     DocumentLineBuilder::new(dec!(2))
//!         .description("Consulenza")
//!         .unit_price(dec!(10.00))
//!         .unit("H")
//!         .build(),
//! )
//! .build()
//! .unwrap();
//!
//! assert_eq!(document.lines.len(), 1);
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Description |
//! |---------|-------------|
//! | `core` (default) | Document types, builder, validation, numbering, money |
//! | `scadenze` | Payment deadline calculator |
//! | `magazzino` | Warehouse fallback & stock movement intents |
//! | `fiscale` | Partita IVA / codice fiscale validation |
//! | `engine` | Document processing over a tenant-scoped catalog |
//! | `all` | Everything |

#[cfg(feature = "core")]
pub mod core;

#[cfg(feature = "core")]
pub mod money;

#[cfg(feature = "scadenze")]
pub mod scadenze;

#[cfg(feature = "magazzino")]
pub mod magazzino;

#[cfg(feature = "fiscale")]
pub mod fiscale;

#[cfg(feature = "engine")]
pub mod engine;

// Re-export core types at crate root for convenience
#[cfg(feature = "core")]
pub use crate::core::*;
