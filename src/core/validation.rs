use rust_decimal::Decimal;

use crate::money::{AMOUNT_DP, QUANTITY_DP};

use super::error::ValidationError;
use super::types::*;
use super::units;

/// Validate a document's input coherence.
/// Returns all validation errors found (not just the first).
pub fn validate_document(document: &Document) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    if document.organization_id.is_nil() {
        errors.push(ValidationError::new(
            "organization_id",
            "organization id must not be nil",
        ));
    }

    if let Some(number) = &document.number {
        if number.trim().is_empty() {
            errors.push(ValidationError::new(
                "number",
                "document number must not be blank when set",
            ));
        }
    }

    if document.lines.is_empty() {
        errors.push(ValidationError::new(
            "lines",
            "document must have at least one line",
        ));
    }

    // A type that moves stock or value must say in which direction.
    if document.config.inventory_movement && document.config.operation_sign_stock.is_none() {
        errors.push(ValidationError::new(
            "config.operation_sign_stock",
            "inventory movement requires a stock operation sign",
        ));
    }
    if document.config.valuation_impact && document.config.operation_sign_valuation.is_none() {
        errors.push(ValidationError::new(
            "config.operation_sign_valuation",
            "valuation impact requires a valuation operation sign",
        ));
    }

    for (i, line) in document.lines.iter().enumerate() {
        validate_line(line, i, &mut errors);
    }

    errors
}

fn validate_line(line: &DocumentLine, index: usize, errors: &mut Vec<ValidationError>) {
    let prefix = format!("lines[{index}]");

    if line.quantity.is_zero() {
        errors.push(ValidationError::new(
            format!("{prefix}.quantity"),
            "quantity must not be zero",
        ));
    }
    if scale_of(line.quantity) > QUANTITY_DP {
        errors.push(ValidationError::new(
            format!("{prefix}.quantity"),
            format!("quantity cannot have more than {QUANTITY_DP} decimal places"),
        ));
    }

    if let Some(price) = line.unit_price {
        if price.is_sign_negative() {
            errors.push(ValidationError::new(
                format!("{prefix}.unit_price"),
                "unit price must not be negative",
            ));
        }
        if scale_of(price) > AMOUNT_DP {
            errors.push(ValidationError::new(
                format!("{prefix}.unit_price"),
                format!("unit price cannot have more than {AMOUNT_DP} decimal places"),
            ));
        }
    }

    if let Some(rate) = line.vat_rate {
        if rate.is_sign_negative() || rate > Decimal::ONE {
            errors.push(ValidationError::new(
                format!("{prefix}.vat_rate"),
                "VAT rate must be a fraction between 0 and 1 (0.22 = 22%)",
            ));
        }
        if scale_of(rate) > QUANTITY_DP {
            errors.push(ValidationError::new(
                format!("{prefix}.vat_rate"),
                format!("VAT rate cannot have more than {QUANTITY_DP} decimal places"),
            ));
        }
    }

    // Free entries have no product record to fall back on.
    if line.product_id.is_none() {
        if line.description.as_deref().is_none_or(|d| d.trim().is_empty()) {
            errors.push(ValidationError::new(
                format!("{prefix}.description"),
                "free lines must have a description",
            ));
        }
        if line.unit_price.is_none() {
            errors.push(ValidationError::new(
                format!("{prefix}.unit_price"),
                "free lines must have a unit price",
            ));
        }
        if line.vat_rate.is_none() {
            errors.push(ValidationError::new(
                format!("{prefix}.vat_rate"),
                "free lines must have a VAT rate",
            ));
        }
    }

    if let Some(unit) = &line.unit {
        if !units::is_known_unit_code(unit) {
            errors.push(ValidationError::new(
                format!("{prefix}.unit"),
                format!("unit code '{unit}' is not a known code"),
            ));
        }
    }
}

/// Significant fractional digits, ignoring trailing zeros
/// (1.5000 counts as one decimal place).
fn scale_of(value: Decimal) -> u32 {
    value.normalize().scale()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::builder::*;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;
    use uuid::Uuid;

    fn test_date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 15).unwrap()
    }

    fn test_document(lines: Vec<DocumentLine>) -> Document {
        Document {
            organization_id: Uuid::new_v4(),
            number: None,
            date: test_date(),
            config: DocumentTypeConfig::sales_invoice(),
            main_warehouse_id: None,
            payment_terms_id: None,
            notes: Vec::new(),
            lines,
        }
    }

    fn free_line() -> DocumentLine {
        DocumentLineBuilder::new(dec!(1))
            .description("Consulenza")
            .unit_price(dec!(100.00))
            .build()
    }

    #[test]
    fn valid_document_passes() {
        let doc = test_document(vec![free_line()]);
        assert!(validate_document(&doc).is_empty());
    }

    #[test]
    fn rejects_nil_organization() {
        let mut doc = test_document(vec![free_line()]);
        doc.organization_id = Uuid::nil();
        let errors = validate_document(&doc);
        assert!(errors.iter().any(|e| e.field == "organization_id"));
    }

    #[test]
    fn rejects_empty_lines() {
        let doc = test_document(Vec::new());
        let errors = validate_document(&doc);
        assert!(errors.iter().any(|e| e.field == "lines"));
    }

    #[test]
    fn rejects_blank_number() {
        let mut doc = test_document(vec![free_line()]);
        doc.number = Some("   ".into());
        let errors = validate_document(&doc);
        assert!(errors.iter().any(|e| e.field == "number"));
    }

    #[test]
    fn rejects_movement_config_without_sign() {
        let mut doc = test_document(vec![free_line()]);
        doc.config = DocumentTypeConfig {
            inventory_movement: true,
            valuation_impact: false,
            operation_sign_stock: None,
            operation_sign_valuation: None,
        };
        let errors = validate_document(&doc);
        assert!(errors.iter().any(|e| e.field == "config.operation_sign_stock"));
    }

    #[test]
    fn rejects_zero_quantity() {
        let mut line = free_line();
        line.quantity = dec!(0);
        let errors = validate_document(&test_document(vec![line]));
        assert!(errors.iter().any(|e| e.field == "lines[0].quantity"));
    }

    #[test]
    fn allows_negative_quantity() {
        let mut line = free_line();
        line.quantity = dec!(-2);
        assert!(validate_document(&test_document(vec![line])).is_empty());
    }

    #[test]
    fn rejects_excess_quantity_scale() {
        let mut line = free_line();
        line.quantity = dec!(1.00005);
        let errors = validate_document(&test_document(vec![line]));
        assert!(errors.iter().any(|e| e.field == "lines[0].quantity"));
    }

    #[test]
    fn trailing_zeros_do_not_count_as_scale() {
        let mut line = free_line();
        line.quantity = dec!(2.500000);
        assert!(validate_document(&test_document(vec![line])).is_empty());
    }

    #[test]
    fn rejects_negative_price() {
        let mut line = free_line();
        line.unit_price = Some(dec!(-1.00));
        let errors = validate_document(&test_document(vec![line]));
        assert!(errors.iter().any(|e| e.field == "lines[0].unit_price"));
    }

    #[test]
    fn rejects_percentage_style_rate() {
        let mut line = free_line();
        line.vat_rate = Some(dec!(22));
        let errors = validate_document(&test_document(vec![line]));
        assert!(
            errors
                .iter()
                .any(|e| e.field == "lines[0].vat_rate" && e.message.contains("fraction"))
        );
    }

    #[test]
    fn free_line_requires_description_and_price() {
        let line = DocumentLine {
            product_id: None,
            warehouse_id: None,
            description: None,
            code: None,
            quantity: dec!(1),
            unit_price: None,
            vat_rate: None,
            unit: None,
        };
        let errors = validate_document(&test_document(vec![line]));
        assert!(errors.iter().any(|e| e.field == "lines[0].description"));
        assert!(errors.iter().any(|e| e.field == "lines[0].unit_price"));
        assert!(errors.iter().any(|e| e.field == "lines[0].vat_rate"));
    }

    #[test]
    fn product_line_may_omit_price_and_rate() {
        let line = DocumentLineBuilder::new(dec!(3))
            .product(Uuid::new_v4())
            .build();
        assert!(validate_document(&test_document(vec![line])).is_empty());
    }

    #[test]
    fn rejects_unknown_unit() {
        let mut line = free_line();
        line.unit = Some("PIECE".into());
        let errors = validate_document(&test_document(vec![line]));
        assert!(errors.iter().any(|e| e.field == "lines[0].unit"));
    }
}
