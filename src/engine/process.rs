//! Document processing: pricing, totals, stock movements, deadlines.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::core::{Document, DocumentLine, DocumentTotals, ValidationError, validate_document};
use crate::magazzino::{StockMovement, first_present, resolve_warehouse};
use crate::money::{LineAmounts, calculate_line_total, round_amount};
use crate::scadenze::{Deadline, ScadenzaError, calculate_deadlines, schedule_balances};

use super::catalog::{Catalog, CatalogError, Product};

/// Errors raised while processing a document.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum EngineError {
    /// The document failed input validation.
    #[error("document failed validation: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),

    /// A referenced product does not exist.
    #[error("product {product_id} not found")]
    ProductNotFound { product_id: Uuid },

    /// A referenced warehouse does not exist.
    #[error("warehouse {warehouse_id} not found")]
    WarehouseNotFound { warehouse_id: Uuid },

    /// The referenced payment terms record does not exist.
    #[error("payment condition {terms_id} not found")]
    PaymentConditionNotFound { terms_id: Uuid },

    /// A referenced record belongs to a different organization.
    #[error("{entity} {id} belongs to a different organization")]
    CrossTenantAccessDenied { entity: &'static str, id: Uuid },

    /// Deadline generation failed.
    #[error(transparent)]
    Scadenza(#[from] ScadenzaError),

    /// The catalog backend failed.
    #[error(transparent)]
    Catalog(#[from] CatalogError),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// A document line after product resolution and pricing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricedLine {
    /// Index of the source line within the document.
    pub line_index: usize,
    /// Product reference, when the line was product-backed.
    pub product_id: Option<Uuid>,
    /// Item code, from the line or its product.
    pub code: Option<String>,
    /// Description, from the line or its product.
    pub description: String,
    /// Quantity as entered.
    pub quantity: Decimal,
    /// Unit of measure, from the line or its product.
    pub unit: Option<String>,
    /// Effective unit price.
    pub unit_price: Decimal,
    /// Effective VAT rate as a decimal fraction.
    pub vat_rate: Decimal,
    /// Net, VAT, and gross amounts for the line.
    pub amounts: LineAmounts,
}

/// Everything committing a document produces, ready to persist in one
/// transaction.
///
/// Updates recompute from scratch: the caller deletes the previously
/// persisted lines, movements, and deadlines, re-runs processing on the
/// edited document, and inserts the fresh rows. The engine is pure, so
/// create and update share this one path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentCommit {
    /// Owning organization, copied from the document.
    pub organization_id: Uuid,
    /// Document date, copied from the document.
    pub date: NaiveDate,
    /// Priced lines, in document order.
    pub lines: Vec<PricedLine>,
    /// Document totals, rounded to the cent.
    pub totals: DocumentTotals,
    /// Stock movements the document generates.
    pub movements: Vec<StockMovement>,
    /// Payment deadlines generated from the gross total.
    pub deadlines: Vec<Deadline>,
}

/// Process a document into the rows a commit persists.
///
/// Runs input validation, resolves and prices every line against the
/// catalog, accumulates totals, emits stock movements per the document
/// type configuration, and expands the payment terms into deadlines
/// against the final gross total. The first error aborts with no
/// partial output.
///
/// Every catalog reference is tenant-checked: a record that exists but
/// belongs to another organization fails with
/// [`EngineError::CrossTenantAccessDenied`] rather than "not found",
/// so misconfigured references are distinguishable from stale ones.
pub fn process_document(
    document: &Document,
    catalog: &impl Catalog,
) -> Result<DocumentCommit, EngineError> {
    let problems = validate_document(document);
    if !problems.is_empty() {
        return Err(EngineError::Validation(problems));
    }

    if let Some(main_id) = document.main_warehouse_id {
        check_warehouse(catalog, document.organization_id, main_id)?;
    }

    let mut lines = Vec::with_capacity(document.lines.len());
    let mut movements = Vec::new();
    let mut net_sum = Decimal::ZERO;
    let mut vat_sum = Decimal::ZERO;

    for (index, line) in document.lines.iter().enumerate() {
        let product = resolve_product(catalog, document.organization_id, line.product_id)?;
        let priced = price_line(index, line, product.as_ref())?;
        net_sum += priced.amounts.net_amount;
        vat_sum += priced.amounts.vat_amount;

        if document.config.inventory_movement {
            if let Some(movement) =
                build_movement(document, catalog, index, line, product.as_ref(), &priced)?
            {
                movements.push(movement);
            }
        }
        lines.push(priced);
    }

    // Per-line amounts are already at 2 decimals, so the sums are exact;
    // rounding here only pins the totals to the persistence scale.
    let totals = DocumentTotals {
        net_total: round_amount(net_sum),
        vat_total: round_amount(vat_sum),
        gross_total: round_amount(net_sum + vat_sum),
    };

    let deadlines = match document.payment_terms_id {
        Some(terms_id) => {
            let terms = catalog
                .payment_terms(terms_id)?
                .ok_or(EngineError::PaymentConditionNotFound { terms_id })?;
            if terms.organization_id != document.organization_id {
                return Err(EngineError::CrossTenantAccessDenied {
                    entity: "payment terms",
                    id: terms_id,
                });
            }
            if totals.gross_total > Decimal::ZERO {
                calculate_deadlines(totals.gross_total, &terms.condition, document.date)?
            } else {
                // Zero or negative totals have nothing to collect.
                Vec::new()
            }
        }
        None => Vec::new(),
    };

    Ok(DocumentCommit {
        organization_id: document.organization_id,
        date: document.date,
        lines,
        totals,
        movements,
        deadlines,
    })
}

/// Arithmetic coherence check over a computed commit.
///
/// Complements [`validate_document`]: that one checks the input, this
/// one checks the output before persistence. Returns all problems, not
/// just the first.
pub fn validate_commit(commit: &DocumentCommit) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    let mut net_sum = Decimal::ZERO;
    let mut vat_sum = Decimal::ZERO;
    for line in &commit.lines {
        let amounts = &line.amounts;
        if amounts.gross_amount != amounts.net_amount + amounts.vat_amount {
            errors.push(ValidationError::new(
                format!("lines[{}].amounts", line.line_index),
                "gross amount must equal net plus VAT",
            ));
        }
        net_sum += amounts.net_amount;
        vat_sum += amounts.vat_amount;
    }

    if commit.totals.net_total != net_sum {
        errors.push(ValidationError::new(
            "totals.net_total",
            "does not match the sum of line net amounts",
        ));
    }
    if commit.totals.vat_total != vat_sum {
        errors.push(ValidationError::new(
            "totals.vat_total",
            "does not match the sum of line VAT amounts",
        ));
    }
    if commit.totals.gross_total != commit.totals.net_total + commit.totals.vat_total {
        errors.push(ValidationError::new(
            "totals.gross_total",
            "must equal net total plus VAT total",
        ));
    }

    if !commit.deadlines.is_empty() {
        if !schedule_balances(&commit.deadlines, commit.totals.gross_total) {
            errors.push(ValidationError::new(
                "deadlines",
                "amounts drift more than 0.01 from the gross total",
            ));
        }
        for (i, deadline) in commit.deadlines.iter().enumerate() {
            if deadline.installment_number != (i + 1) as u32 {
                errors.push(ValidationError::new(
                    format!("deadlines[{i}].installment_number"),
                    "installment numbers must ascend from 1",
                ));
            }
        }
    }

    for (i, movement) in commit.movements.iter().enumerate() {
        if movement.line_index >= commit.lines.len() {
            errors.push(ValidationError::new(
                format!("movements[{i}].line_index"),
                "references a line outside the document",
            ));
        }
    }

    errors
}

fn resolve_product(
    catalog: &impl Catalog,
    organization_id: Uuid,
    product_id: Option<Uuid>,
) -> Result<Option<Product>, EngineError> {
    let Some(product_id) = product_id else {
        return Ok(None);
    };
    let product = catalog
        .product(product_id)?
        .ok_or(EngineError::ProductNotFound { product_id })?;
    if product.organization_id != organization_id {
        return Err(EngineError::CrossTenantAccessDenied {
            entity: "product",
            id: product_id,
        });
    }
    Ok(Some(product))
}

fn price_line(
    index: usize,
    line: &DocumentLine,
    product: Option<&Product>,
) -> Result<PricedLine, EngineError> {
    let unit_price = first_present([line.unit_price, product.map(|p| p.unit_price)])
        .ok_or_else(|| missing_field(index, "unit_price"))?;
    let vat_rate = first_present([line.vat_rate, product.map(|p| p.vat_rate)])
        .ok_or_else(|| missing_field(index, "vat_rate"))?;
    let description = line
        .description
        .clone()
        .or_else(|| product.map(|p| p.description.clone()))
        .ok_or_else(|| missing_field(index, "description"))?;
    let code = line.code.clone().or_else(|| product.map(|p| p.code.clone()));
    let unit = line.unit.clone().or_else(|| product.and_then(|p| p.unit.clone()));

    Ok(PricedLine {
        line_index: index,
        product_id: product.map(|p| p.id),
        code,
        description,
        quantity: line.quantity,
        unit,
        unit_price,
        vat_rate,
        amounts: calculate_line_total(line.quantity, unit_price, vat_rate),
    })
}

// Input validation keeps free lines complete, so these fire only for
// documents built outside the builder with holes a product cannot fill.
fn missing_field(index: usize, field: &str) -> EngineError {
    EngineError::Validation(vec![ValidationError::new(
        format!("lines[{index}].{field}"),
        "cannot be resolved from the line or its product",
    )])
}

fn build_movement(
    document: &Document,
    catalog: &impl Catalog,
    index: usize,
    line: &DocumentLine,
    product: Option<&Product>,
    priced: &PricedLine,
) -> Result<Option<StockMovement>, EngineError> {
    let Some(product) = product.filter(|p| p.stock_managed) else {
        return Ok(None);
    };
    let Some(operation) = document.config.operation_sign_stock else {
        return Ok(None);
    };
    let Some(warehouse_id) = resolve_warehouse(
        line.warehouse_id,
        product.default_warehouse_id,
        document.main_warehouse_id,
    ) else {
        return Ok(None);
    };
    // The main warehouse was already checked up front.
    if Some(warehouse_id) != document.main_warehouse_id {
        check_warehouse(catalog, document.organization_id, warehouse_id)?;
    }

    let valuation = match (
        document.config.valuation_impact,
        document.config.operation_sign_valuation,
    ) {
        (true, Some(sign)) => Some(priced.amounts.net_amount * sign.factor()),
        _ => None,
    };

    Ok(Some(StockMovement {
        organization_id: document.organization_id,
        product_id: product.id,
        warehouse_id,
        date: document.date,
        quantity: line.quantity,
        operation,
        valuation,
        line_index: index,
    }))
}

fn check_warehouse(
    catalog: &impl Catalog,
    organization_id: Uuid,
    warehouse_id: Uuid,
) -> Result<(), EngineError> {
    let warehouse = catalog
        .warehouse(warehouse_id)?
        .ok_or(EngineError::WarehouseNotFound { warehouse_id })?;
    if warehouse.organization_id != organization_id {
        return Err(EngineError::CrossTenantAccessDenied {
            entity: "warehouse",
            id: warehouse_id,
        });
    }
    Ok(())
}
