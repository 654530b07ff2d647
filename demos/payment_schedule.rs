use chrono::NaiveDate;
use fattura::money::format_euro;
use fattura::scadenze::{PaymentCondition, calculate_deadlines};
use rust_decimal_macros::dec;

fn main() {
    let invoice_date = NaiveDate::from_ymd_opt(2024, 1, 31).unwrap();
    let total = dec!(1525.00);

    let conditions = [
        ("Rimessa diretta", PaymentCondition::immediate()),
        ("Bonifico 60 gg", PaymentCondition::net_days(60)),
        ("30/60/90 giorni", PaymentCondition::monthly(3)),
        ("3 rate fine mese", PaymentCondition::monthly_end_of_month(3)),
    ];

    println!("Totale documento: {} del {invoice_date}", format_euro(total));

    for (name, condition) in conditions {
        println!("---");
        println!("{name}:");
        let deadlines =
            calculate_deadlines(total, &condition, invoice_date).expect("schedule should generate");
        for deadline in &deadlines {
            println!(
                "  rata {} di {}: {} entro il {}",
                deadline.installment_number,
                deadlines.len(),
                format_euro(deadline.amount),
                deadline.due_date
            );
        }
    }
}
