//! Payment deadline (scadenze) calculation.
//!
//! Expands a payment condition into an installment schedule: equal
//! installments rounded to the cent, with the rounding remainder
//! absorbed by the last one so the schedule always sums exactly to the
//! document total. Each due date can be snapped to the end of its month
//! ("fine mese"), the common arrangement for ricevute bancarie.

use chrono::{Datelike, Days, NaiveDate};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::money::round_amount;

/// A payment condition template (condizione di pagamento).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentCondition {
    /// Days from the document date to the first due date.
    pub days_to_first_due: u32,
    /// Days between consecutive due dates.
    pub gap_between_dues: u32,
    /// Number of installments (at least 1).
    pub number_of_dues: u32,
    /// Snap every due date to the end of its month (fine mese).
    pub end_of_month: bool,
}

impl PaymentCondition {
    /// Single installment due on the document date (rimessa diretta).
    pub fn immediate() -> Self {
        Self {
            days_to_first_due: 0,
            gap_between_dues: 0,
            number_of_dues: 1,
            end_of_month: false,
        }
    }

    /// Single installment due after `days` days.
    pub fn net_days(days: u32) -> Self {
        Self {
            days_to_first_due: days,
            gap_between_dues: 0,
            number_of_dues: 1,
            end_of_month: false,
        }
    }

    /// `n` installments 30 days apart, the first after 30 days
    /// (30/60/90 giorni).
    pub fn monthly(n: u32) -> Self {
        Self {
            days_to_first_due: 30,
            gap_between_dues: 30,
            number_of_dues: n,
            end_of_month: false,
        }
    }

    /// Like [`monthly`](Self::monthly), snapped to end of month.
    pub fn monthly_end_of_month(n: u32) -> Self {
        Self {
            end_of_month: true,
            ..Self::monthly(n)
        }
    }
}

/// A single generated payment deadline (scadenza).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deadline {
    /// When the installment falls due.
    pub due_date: NaiveDate,
    /// Installment amount, rounded to the cent.
    pub amount: Decimal,
    /// 1-based position in the schedule.
    pub installment_number: u32,
}

/// Errors raised by deadline generation.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ScadenzaError {
    /// The total must be positive before a schedule can be generated.
    #[error("invalid amount: total must be positive, got {0}")]
    InvalidAmount(Decimal),

    /// At least one installment is required.
    #[error("invalid installment count: {0}")]
    InvalidInstallmentCount(u32),

    /// Date arithmetic left the supported calendar range.
    #[error("due date out of range: base {base}, offset {offset} days")]
    DateOutOfRange { base: NaiveDate, offset: u32 },
}

/// Expand a payment condition into its installment schedule.
///
/// The per-installment amount is `total / n` rounded to the cent; the
/// last installment takes `total` minus the others, so the amounts sum
/// exactly to `total`. Due dates start at `base_date` plus
/// `days_to_first_due` and step by `gap_between_dues`; when
/// `end_of_month` is set each due date is snapped to its month end and
/// the next step advances from the snapped date, so the gaps between
/// month-end dues follow the calendar rather than a fixed day count.
pub fn calculate_deadlines(
    total: Decimal,
    condition: &PaymentCondition,
    base_date: NaiveDate,
) -> Result<Vec<Deadline>, ScadenzaError> {
    if total <= Decimal::ZERO {
        return Err(ScadenzaError::InvalidAmount(total));
    }
    let n = condition.number_of_dues;
    if n < 1 {
        return Err(ScadenzaError::InvalidInstallmentCount(n));
    }

    let amount_per_due = round_amount(total / Decimal::from(n));

    let mut due_date = add_days(base_date, condition.days_to_first_due)?;
    let mut deadlines = Vec::with_capacity(n as usize);

    for i in 1..=n {
        if i > 1 {
            due_date = add_days(due_date, condition.gap_between_dues)?;
        }
        if condition.end_of_month {
            due_date = end_of_month(due_date);
        }
        let amount = if i == n {
            total - amount_per_due * Decimal::from(n - 1)
        } else {
            amount_per_due
        };
        deadlines.push(Deadline {
            due_date,
            amount,
            installment_number: i,
        });
    }

    Ok(deadlines)
}

/// Last day of the month containing `date`.
pub fn end_of_month(date: NaiveDate) -> NaiveDate {
    let (next_year, next_month) = if date.month() == 12 {
        (date.year() + 1, 1)
    } else {
        (date.year(), date.month() + 1)
    };
    // The day before the first of the following month. Falls back to the
    // input only at the calendar boundary, which add_days already guards.
    NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .and_then(|first| first.pred_opt())
        .unwrap_or(date)
}

/// Check a generated schedule against an expected total, tolerating
/// upstream rounding drift of at most one cent.
pub fn schedule_balances(deadlines: &[Deadline], total: Decimal) -> bool {
    let sum: Decimal = deadlines.iter().map(|d| d.amount).sum();
    (sum - total).abs() <= dec!(0.01)
}

fn add_days(date: NaiveDate, days: u32) -> Result<NaiveDate, ScadenzaError> {
    date.checked_add_days(Days::new(u64::from(days)))
        .ok_or(ScadenzaError::DateOutOfRange { base: date, offset: days })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn two_equal_installments() {
        let condition = PaymentCondition {
            days_to_first_due: 30,
            gap_between_dues: 30,
            number_of_dues: 2,
            end_of_month: false,
        };
        let deadlines = calculate_deadlines(dec!(1000.00), &condition, date(2024, 1, 15)).unwrap();

        assert_eq!(deadlines.len(), 2);
        assert_eq!(deadlines[0].amount, dec!(500.00));
        assert_eq!(deadlines[0].due_date, date(2024, 2, 14));
        assert_eq!(deadlines[0].installment_number, 1);
        assert_eq!(deadlines[1].amount, dec!(500.00));
        assert_eq!(deadlines[1].due_date, date(2024, 3, 15));
        assert_eq!(deadlines[1].installment_number, 2);
    }

    #[test]
    fn last_installment_absorbs_remainder() {
        let deadlines =
            calculate_deadlines(dec!(100.00), &PaymentCondition::monthly(3), date(2024, 1, 15))
                .unwrap();

        let amounts: Vec<Decimal> = deadlines.iter().map(|d| d.amount).collect();
        assert_eq!(amounts, vec![dec!(33.33), dec!(33.33), dec!(33.34)]);
        assert_eq!(amounts.iter().sum::<Decimal>(), dec!(100.00));
    }

    #[test]
    fn end_of_month_snaps_each_due_independently() {
        let condition = PaymentCondition {
            days_to_first_due: 0,
            gap_between_dues: 30,
            number_of_dues: 2,
            end_of_month: true,
        };
        let deadlines = calculate_deadlines(dec!(200.00), &condition, date(2024, 1, 31)).unwrap();

        // First due stays on Jan 31. Thirty days later is Mar 1, which
        // snaps to Mar 31; short February gets skipped entirely.
        assert_eq!(deadlines[0].due_date, date(2024, 1, 31));
        assert_eq!(deadlines[1].due_date, date(2024, 3, 31));
    }

    #[test]
    fn end_of_month_advances_from_the_snapped_due() {
        let condition = PaymentCondition {
            days_to_first_due: 0,
            gap_between_dues: 30,
            number_of_dues: 2,
            end_of_month: true,
        };
        let deadlines = calculate_deadlines(dec!(200.00), &condition, date(2024, 1, 15)).unwrap();

        // Jan 15 snaps to Jan 31 before the gap is applied, so the
        // second due is Jan 31 + 30 = Mar 1, snapped to Mar 31. Stepping
        // from the unsnapped Jan 15 would have landed on Feb 29 instead.
        assert_eq!(deadlines[0].due_date, date(2024, 1, 31));
        assert_eq!(deadlines[1].due_date, date(2024, 3, 31));
    }

    #[test]
    fn end_of_month_crosses_into_new_year() {
        let deadlines =
            calculate_deadlines(dec!(150.00), &PaymentCondition {
                days_to_first_due: 30,
                gap_between_dues: 0,
                number_of_dues: 1,
                end_of_month: true,
            }, date(2024, 12, 5))
            .unwrap();

        assert_eq!(deadlines[0].due_date, date(2025, 1, 31));
    }

    #[test]
    fn immediate_single_installment() {
        let deadlines =
            calculate_deadlines(dec!(250.00), &PaymentCondition::immediate(), date(2024, 6, 1))
                .unwrap();

        assert_eq!(deadlines.len(), 1);
        assert_eq!(deadlines[0].due_date, date(2024, 6, 1));
        assert_eq!(deadlines[0].amount, dec!(250.00));
    }

    #[test]
    fn net_days_offsets_single_due() {
        let deadlines =
            calculate_deadlines(dec!(99.00), &PaymentCondition::net_days(60), date(2024, 3, 1))
                .unwrap();

        assert_eq!(deadlines.len(), 1);
        assert_eq!(deadlines[0].due_date, date(2024, 4, 30));
    }

    #[test]
    fn monthly_thirty_sixty_ninety() {
        let deadlines =
            calculate_deadlines(dec!(300.00), &PaymentCondition::monthly(3), date(2024, 1, 15))
                .unwrap();

        let dates: Vec<NaiveDate> = deadlines.iter().map(|d| d.due_date).collect();
        assert_eq!(dates, vec![date(2024, 2, 14), date(2024, 3, 15), date(2024, 4, 14)]);
    }

    #[test]
    fn monthly_end_of_month_snaps_leap_february() {
        let deadlines = calculate_deadlines(
            dec!(500.00),
            &PaymentCondition::monthly_end_of_month(2),
            date(2024, 1, 15),
        )
        .unwrap();

        assert_eq!(deadlines[0].due_date, date(2024, 2, 29));
        assert_eq!(deadlines[1].due_date, date(2024, 3, 31));
    }

    #[test]
    fn rejects_non_positive_totals() {
        let condition = PaymentCondition::immediate();
        assert!(matches!(
            calculate_deadlines(dec!(0), &condition, date(2024, 1, 1)),
            Err(ScadenzaError::InvalidAmount(_))
        ));
        assert!(matches!(
            calculate_deadlines(dec!(-10.00), &condition, date(2024, 1, 1)),
            Err(ScadenzaError::InvalidAmount(_))
        ));
    }

    #[test]
    fn rejects_zero_installments() {
        let condition = PaymentCondition {
            days_to_first_due: 0,
            gap_between_dues: 0,
            number_of_dues: 0,
            end_of_month: false,
        };
        assert!(matches!(
            calculate_deadlines(dec!(100.00), &condition, date(2024, 1, 1)),
            Err(ScadenzaError::InvalidInstallmentCount(0))
        ));
    }

    #[test]
    fn seven_installments_sum_exactly() {
        let deadlines =
            calculate_deadlines(dec!(123.45), &PaymentCondition::monthly(7), date(2024, 1, 10))
                .unwrap();

        let amounts: Vec<Decimal> = deadlines.iter().map(|d| d.amount).collect();
        assert_eq!(&amounts[..6], &[dec!(17.64); 6]);
        assert_eq!(amounts[6], dec!(17.61));
        assert_eq!(amounts.iter().sum::<Decimal>(), dec!(123.45));
    }

    #[test]
    fn tiny_totals_may_leave_zero_tail() {
        let deadlines =
            calculate_deadlines(dec!(0.02), &PaymentCondition::monthly(3), date(2024, 1, 10))
                .unwrap();

        let amounts: Vec<Decimal> = deadlines.iter().map(|d| d.amount).collect();
        assert_eq!(amounts, vec![dec!(0.01), dec!(0.01), dec!(0.00)]);
    }

    #[test]
    fn end_of_month_helper() {
        assert_eq!(end_of_month(date(2024, 2, 10)), date(2024, 2, 29));
        assert_eq!(end_of_month(date(2023, 2, 10)), date(2023, 2, 28));
        assert_eq!(end_of_month(date(2024, 12, 25)), date(2024, 12, 31));
        assert_eq!(end_of_month(date(2024, 4, 30)), date(2024, 4, 30));
    }

    #[test]
    fn schedule_balance_tolerance() {
        let deadlines =
            calculate_deadlines(dec!(100.00), &PaymentCondition::monthly(3), date(2024, 1, 15))
                .unwrap();

        assert!(schedule_balances(&deadlines, dec!(100.00)));
        assert!(schedule_balances(&deadlines, dec!(100.01)));
        assert!(!schedule_balances(&deadlines, dec!(100.02)));
    }
}
