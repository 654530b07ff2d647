use chrono::NaiveDate;
use fattura::core::*;
use fattura::engine::*;
use fattura::money::format_euro;
use fattura::scadenze::PaymentCondition;
use rust_decimal_macros::dec;
use uuid::Uuid;

fn main() {
    let organization = Uuid::new_v4();
    let widget = Uuid::new_v4();
    let main_warehouse = Uuid::new_v4();
    let terms = Uuid::new_v4();

    // Master data the document will resolve against
    let mut catalog = MemoryCatalog::new();
    catalog.add_product(Product {
        id: widget,
        organization_id: organization,
        code: "ART-001".into(),
        description: "Staffa di montaggio".into(),
        unit_price: dec!(25.00),
        vat_rate: dec!(0.22),
        unit: Some("PZ".into()),
        stock_managed: true,
        default_warehouse_id: None,
    });
    catalog.add_warehouse(Warehouse {
        id: main_warehouse,
        organization_id: organization,
        name: "Magazzino principale".into(),
    });
    catalog.add_payment_terms(PaymentTerms {
        id: terms,
        organization_id: organization,
        description: "30/60 giorni".into(),
        condition: PaymentCondition {
            days_to_first_due: 30,
            gap_between_dues: 30,
            number_of_dues: 2,
            end_of_month: false,
        },
    });

    // A sales invoice with a product line and a free-entry line
    let document = DocumentBuilder::new(
        organization,
        NaiveDate::from_ymd_opt(2024, 5, 10).unwrap(),
        DocumentTypeConfig::sales_invoice(),
    )
    .number("FT-0001/2024")
    .main_warehouse(main_warehouse)
    .payment_terms(terms)
    .add_line(DocumentLineBuilder::new(dec!(4)).product(widget).build())
    .add_line(
        DocumentLineBuilder::new(dec!(1))
            .description("Trasporto")
            .unit_price(dec!(15.00))
            .vat_rate(dec!(0.22))
            .build(),
    )
    .build()
    .expect("document should be valid");

    let commit = process_document(&document, &catalog).expect("processing should succeed");

    println!("Documento: {}", document.number.as_deref().unwrap_or("-"));
    println!("Data:      {}", document.date);
    println!("---");
    for line in &commit.lines {
        println!(
            "  {} x {} @ {} = {}",
            line.quantity,
            line.description,
            format_euro(line.unit_price),
            format_euro(line.amounts.gross_amount)
        );
    }
    println!("---");
    println!("Imponibile: {}", format_euro(commit.totals.net_total));
    println!("IVA:        {}", format_euro(commit.totals.vat_total));
    println!("Totale:     {}", format_euro(commit.totals.gross_total));
    println!("---");
    for movement in &commit.movements {
        println!(
            "Movimento magazzino: prodotto {} qta {} ({:?})",
            movement.product_id,
            movement.signed_quantity(),
            movement.operation
        );
    }
    for deadline in &commit.deadlines {
        println!(
            "Scadenza {}: {} il {}",
            deadline.installment_number,
            format_euro(deadline.amount),
            deadline.due_date
        );
    }
}
