//! Core document types, validation, and numbering.
//!
//! This module provides the foundational types for Italian ERP
//! documents: the transient document model, its behavior flags,
//! input validation, and progressive numbering per art. 21 DPR 633/72.

mod builder;
mod error;
mod numbering;
mod types;
pub mod units;
mod validation;

pub use builder::*;
pub use error::*;
pub use numbering::*;
pub use types::*;
pub use units::is_known_unit_code;
pub use validation::*;
