//! Monetary arithmetic with commercial (half-up) rounding.
//!
//! The only sanctioned way to compute monetary values in this crate.
//! All amounts are [`rust_decimal::Decimal`], never binary floating
//! point, and every rounding step goes through [`round_half_up`] so the
//! whole codebase shares one policy: half up to the cent, the rounding
//! Italian fiscal documents require.

mod vat;

pub use vat::*;

use std::str::FromStr;

use rust_decimal::Decimal;
use thiserror::Error;

/// Fractional digits carried by monetary amounts.
pub const AMOUNT_DP: u32 = 2;

/// Fractional digits carried by quantities and VAT rates.
pub const QUANTITY_DP: u32 = 4;

/// Errors raised by monetary parsing.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum MoneyError {
    /// Input is not a plain decimal number.
    #[error("invalid numeric format: '{0}'")]
    InvalidNumericFormat(String),
}

/// Round a Decimal to `dp` decimal places using half-up (commercial rounding).
///
/// The result carries exactly `dp` fractional digits, so serialized
/// amounts are stable ("15.00", not "15").
pub fn round_half_up(value: Decimal, dp: u32) -> Decimal {
    let mut rounded =
        value.round_dp_with_strategy(dp, rust_decimal::RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(dp);
    rounded
}

/// Round a monetary amount to the cent.
pub fn round_amount(value: Decimal) -> Decimal {
    round_half_up(value, AMOUNT_DP)
}

/// Round a quantity to its internal precision.
pub fn round_quantity(value: Decimal) -> Decimal {
    round_half_up(value, QUANTITY_DP)
}

/// Parse a decimal amount digit for digit, with no float round-trip.
///
/// Accepts plain decimal notation with a dot separator ("1234.56",
/// "-5", "+0.5"). Anything else, including scientific notation and
/// locale-formatted input, is rejected.
pub fn parse_decimal(input: &str) -> Result<Decimal, MoneyError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(MoneyError::InvalidNumericFormat(input.to_string()));
    }
    Decimal::from_str(trimmed).map_err(|_| MoneyError::InvalidNumericFormat(input.to_string()))
}

/// Format an amount with a fixed two decimals and dot separator,
/// the form amounts are persisted and exchanged in.
pub fn format_amount(value: Decimal) -> String {
    round_amount(value).to_string()
}

/// Format an amount for display the Italian way: thousands separated by
/// dots, decimal comma, euro sign in front ("€ 1.234,56").
///
/// Presentational only. Never feed the output back into [`parse_decimal`].
pub fn format_euro(value: Decimal) -> String {
    let fixed = format_amount(value);
    let (sign, unsigned) = match fixed.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", fixed.as_str()),
    };
    let (int_part, frac_part) = unsigned.split_once('.').unwrap_or((unsigned, "00"));

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }

    format!("€ {sign}{grouped},{frac_part}")
}
