use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::round_amount;

/// The three amounts of a priced document line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineAmounts {
    /// Taxable amount (imponibile), quantity times unit price.
    pub net_amount: Decimal,
    /// VAT amount (imposta).
    pub vat_amount: Decimal,
    /// Total including VAT.
    pub gross_amount: Decimal,
}

/// Result of splitting a VAT-inclusive amount (scorporo).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VatSplit {
    /// Taxable amount.
    pub net: Decimal,
    /// VAT amount, derived by subtraction so `net + vat` reconstructs
    /// the gross exactly.
    pub vat: Decimal,
}

/// VAT on a net amount. `rate` is a decimal fraction (0.22 = 22%).
pub fn calculate_vat(net: Decimal, rate: Decimal) -> Decimal {
    round_amount(net * rate)
}

/// Gross amount from a net amount and a VAT rate fraction.
pub fn calculate_gross(net: Decimal, rate: Decimal) -> Decimal {
    round_amount(net + calculate_vat(net, rate))
}

/// Split a VAT-inclusive amount into net and VAT (scorporo dell'IVA).
///
/// The net is rounded to the cent; the VAT is whatever remains, never
/// rounded on its own. Rounding both sides independently can lose a
/// cent against the gross, which on a fiscal document is a defect.
pub fn extract_vat(gross: Decimal, rate: Decimal) -> VatSplit {
    let net = round_amount(gross / (Decimal::ONE + rate));
    VatSplit {
        net,
        vat: gross - net,
    }
}

/// Price a document line: net = quantity times unit price rounded to the
/// cent, VAT on the rounded net, gross as their sum.
///
/// `gross_amount == net_amount + vat_amount` holds exactly for every
/// input, because VAT is computed on the already-rounded net.
pub fn calculate_line_total(quantity: Decimal, unit_price: Decimal, vat_rate: Decimal) -> LineAmounts {
    let net_amount = round_amount(quantity * unit_price);
    let vat_amount = round_amount(net_amount * vat_rate);
    LineAmounts {
        net_amount,
        vat_amount,
        gross_amount: round_amount(net_amount + vat_amount),
    }
}
