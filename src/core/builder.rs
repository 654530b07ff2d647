use chrono::NaiveDate;
use rust_decimal::Decimal;
use uuid::Uuid;

use super::error::DocumentError;
use super::types::*;
use super::validation;

/// Builder for constructing valid documents.
///
/// ```
/// use chrono::NaiveDate;
/// use fattura::core::*;
/// use rust_decimal_macros::dec;
/// use uuid::Uuid;
///
/// let document = DocumentBuilder::new(
///     Uuid::new_v4(),
///     NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
///     DocumentTypeConfig::sales_invoice(),
/// )
/// .add_line(
///     DocumentLineBuilder::new(dec!(2))
///         .description("Consulenza sistemistica")
///         .unit_price(dec!(10.00))
///         .unit("H")
///         .build(),
/// )
/// .build()
/// .unwrap();
///
/// assert_eq!(document.lines.len(), 1);
/// ```
pub struct DocumentBuilder {
    organization_id: Uuid,
    number: Option<String>,
    date: NaiveDate,
    config: DocumentTypeConfig,
    main_warehouse_id: Option<Uuid>,
    payment_terms_id: Option<Uuid>,
    notes: Vec<String>,
    lines: Vec<DocumentLine>,
}

impl DocumentBuilder {
    pub fn new(organization_id: Uuid, date: NaiveDate, config: DocumentTypeConfig) -> Self {
        Self {
            organization_id,
            number: None,
            date,
            config,
            main_warehouse_id: None,
            payment_terms_id: None,
            notes: Vec::new(),
            lines: Vec::new(),
        }
    }

    pub fn number(mut self, number: impl Into<String>) -> Self {
        self.number = Some(number.into());
        self
    }

    pub fn main_warehouse(mut self, warehouse_id: Uuid) -> Self {
        self.main_warehouse_id = Some(warehouse_id);
        self
    }

    pub fn payment_terms(mut self, payment_terms_id: Uuid) -> Self {
        self.payment_terms_id = Some(payment_terms_id);
        self
    }

    pub fn note(mut self, note: impl Into<String>) -> Self {
        self.notes.push(note.into());
        self
    }

    pub fn add_line(mut self, line: DocumentLine) -> Self {
        self.lines.push(line);
        self
    }

    /// Build the document, running input validation.
    /// Returns all validation errors (not just the first).
    pub fn build(self) -> Result<Document, DocumentError> {
        // Input limits to prevent abuse
        if self.lines.len() > 10_000 {
            return Err(DocumentError::Builder(
                "document cannot have more than 10,000 lines".into(),
            ));
        }
        if let Some(number) = &self.number {
            if number.len() > 100 {
                return Err(DocumentError::Builder(
                    "document number cannot exceed 100 characters".into(),
                ));
            }
        }
        if self.notes.len() > 100 {
            return Err(DocumentError::Builder(
                "document cannot have more than 100 notes".into(),
            ));
        }

        let document = self.build_unchecked();

        let errors = validation::validate_document(&document);
        if !errors.is_empty() {
            let msg = errors
                .iter()
                .map(|e| e.to_string())
                .collect::<Vec<_>>()
                .join("; ");
            return Err(DocumentError::Validation(msg));
        }

        Ok(document)
    }

    /// Build without validation. Useful for testing or importing
    /// external data.
    pub fn build_unchecked(self) -> Document {
        Document {
            organization_id: self.organization_id,
            number: self.number,
            date: self.date,
            config: self.config,
            main_warehouse_id: self.main_warehouse_id,
            payment_terms_id: self.payment_terms_id,
            notes: self.notes,
            lines: self.lines,
        }
    }
}

/// Builder for document lines.
///
/// Free entries (no product reference) default to the ordinary 22% VAT
/// rate unless one is set; product-backed lines leave unset fields to be
/// inherited from the product record at commit time.
pub struct DocumentLineBuilder {
    product_id: Option<Uuid>,
    warehouse_id: Option<Uuid>,
    description: Option<String>,
    code: Option<String>,
    quantity: Decimal,
    unit_price: Option<Decimal>,
    vat_rate: Option<Decimal>,
    unit: Option<String>,
}

impl DocumentLineBuilder {
    pub fn new(quantity: Decimal) -> Self {
        Self {
            product_id: None,
            warehouse_id: None,
            description: None,
            code: None,
            quantity,
            unit_price: None,
            vat_rate: None,
            unit: None,
        }
    }

    pub fn product(mut self, product_id: Uuid) -> Self {
        self.product_id = Some(product_id);
        self
    }

    pub fn warehouse(mut self, warehouse_id: Uuid) -> Self {
        self.warehouse_id = Some(warehouse_id);
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }

    pub fn unit_price(mut self, price: Decimal) -> Self {
        self.unit_price = Some(price);
        self
    }

    pub fn vat_rate(mut self, rate: Decimal) -> Self {
        self.vat_rate = Some(rate);
        self
    }

    pub fn unit(mut self, unit: impl Into<String>) -> Self {
        self.unit = Some(unit.into());
        self
    }

    pub fn build(self) -> DocumentLine {
        let vat_rate = match (self.product_id, self.vat_rate) {
            (None, None) => Some(ALIQUOTA_ORDINARIA),
            (_, rate) => rate,
        };
        DocumentLine {
            product_id: self.product_id,
            warehouse_id: self.warehouse_id,
            description: self.description,
            code: self.code,
            quantity: self.quantity,
            unit_price: self.unit_price,
            vat_rate,
            unit: self.unit,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn test_date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 15).unwrap()
    }

    #[test]
    fn free_line_defaults_to_ordinary_rate() {
        let line = DocumentLineBuilder::new(dec!(1))
            .description("Consulenza")
            .unit_price(dec!(50.00))
            .build();
        assert_eq!(line.vat_rate, Some(ALIQUOTA_ORDINARIA));
    }

    #[test]
    fn product_line_leaves_rate_unset() {
        let line = DocumentLineBuilder::new(dec!(1))
            .product(Uuid::new_v4())
            .build();
        assert_eq!(line.vat_rate, None);
    }

    #[test]
    fn explicit_rate_wins_over_default() {
        let line = DocumentLineBuilder::new(dec!(1))
            .description("Libri")
            .unit_price(dec!(12.00))
            .vat_rate(ALIQUOTA_SUPER_RIDOTTA)
            .build();
        assert_eq!(line.vat_rate, Some(dec!(0.04)));
    }

    #[test]
    fn build_rejects_empty_documents() {
        let result = DocumentBuilder::new(
            Uuid::new_v4(),
            test_date(),
            DocumentTypeConfig::sales_invoice(),
        )
        .build();
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("at least one line"));
    }

    #[test]
    fn build_rejects_excess_lines() {
        let mut builder = DocumentBuilder::new(
            Uuid::new_v4(),
            test_date(),
            DocumentTypeConfig::sales_order(),
        );
        for _ in 0..10_001 {
            builder = builder.add_line(
                DocumentLineBuilder::new(dec!(1))
                    .description("x")
                    .unit_price(dec!(1.00))
                    .build(),
            );
        }
        let result = builder.build();
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("10,000"));
    }

    #[test]
    fn build_unchecked_skips_validation() {
        let document = DocumentBuilder::new(
            Uuid::new_v4(),
            test_date(),
            DocumentTypeConfig::sales_invoice(),
        )
        .build_unchecked();
        assert!(document.lines.is_empty());
    }

    #[test]
    fn build_collects_all_problems() {
        let result = DocumentBuilder::new(
            Uuid::nil(),
            test_date(),
            DocumentTypeConfig::sales_invoice(),
        )
        .add_line(DocumentLineBuilder::new(dec!(0)).build())
        .build();

        let msg = result.unwrap_err().to_string();
        assert!(msg.contains("organization id"));
        assert!(msg.contains("quantity"));
        assert!(msg.contains("description"));
    }
}
