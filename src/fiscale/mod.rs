//! Partita IVA and codice fiscale format validation.

use std::fmt;

/// Error returned when a fiscal identifier fails format validation.
#[derive(Debug, Clone)]
pub struct FiscalCodeError {
    /// The invalid input value.
    pub value: String,
    /// Why the value failed validation.
    pub reason: String,
}

impl fmt::Display for FiscalCodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid fiscal code '{}': {}", self.value, self.reason)
    }
}

impl std::error::Error for FiscalCodeError {}

/// Validate an Italian partita IVA (no registry lookup).
///
/// Accepts the bare 11-digit number, an optional "IT" country prefix,
/// and embedded spaces (e.g. "IT 12345678903"). The check digit is
/// verified with the Luhn scheme used by the Agenzia delle Entrate.
/// Returns the cleaned 11-digit number on success.
pub fn validate_partita_iva(piva: &str) -> Result<String, FiscalCodeError> {
    let compact: String = piva
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect::<String>()
        .to_uppercase();
    let number = compact.strip_prefix("IT").unwrap_or(&compact);

    if number.len() != 11 {
        return Err(FiscalCodeError {
            value: piva.into(),
            reason: format!("expected 11 digits, got {}", number.len()),
        });
    }
    if !number.bytes().all(|b| b.is_ascii_digit()) {
        return Err(FiscalCodeError {
            value: piva.into(),
            reason: "must contain only digits".into(),
        });
    }
    if number.bytes().all(|b| b == b'0') {
        return Err(FiscalCodeError {
            value: piva.into(),
            reason: "the all-zero number is never assigned".into(),
        });
    }

    // Odd positions count as-is; even positions are doubled, with 9
    // subtracted when the double exceeds 9.
    let digits: Vec<u32> = number.bytes().map(|b| u32::from(b - b'0')).collect();
    let mut sum = 0;
    for (i, &d) in digits[..10].iter().enumerate() {
        if i % 2 == 0 {
            sum += d;
        } else {
            let doubled = d * 2;
            sum += if doubled > 9 { doubled - 9 } else { doubled };
        }
    }
    let expected = (10 - sum % 10) % 10;
    if digits[10] != expected {
        return Err(FiscalCodeError {
            value: piva.into(),
            reason: format!("check digit mismatch: expected {expected}"),
        });
    }

    Ok(number.to_string())
}

/// Validate an Italian codice fiscale for a natural person.
///
/// Structural check only: 16 alphanumeric characters with the correct
/// check character in the last position. Omocode substitutions (digits
/// replaced by letters to break ties) are accepted because the check
/// character is computed over whatever characters are present.
/// Returns the cleaned uppercase code on success.
pub fn validate_codice_fiscale(cf: &str) -> Result<String, FiscalCodeError> {
    let cleaned = cf.trim().to_uppercase();

    if cleaned.len() != 16 {
        return Err(FiscalCodeError {
            value: cf.into(),
            reason: format!("expected 16 characters, got {}", cleaned.len()),
        });
    }
    if !cleaned.bytes().all(|b| b.is_ascii_alphanumeric()) {
        return Err(FiscalCodeError {
            value: cf.into(),
            reason: "must contain only letters and digits".into(),
        });
    }
    let bytes = cleaned.as_bytes();
    if !bytes[..6].iter().all(u8::is_ascii_alphabetic) {
        return Err(FiscalCodeError {
            value: cf.into(),
            reason: "the first 6 characters must be letters".into(),
        });
    }

    let sum: u32 = bytes[..15]
        .iter()
        .enumerate()
        // 1-based odd positions are the even indices here.
        .map(|(i, &b)| if i % 2 == 0 { odd_value(b) } else { even_value(b) })
        .sum();
    let expected = b'A' + (sum % 26) as u8;
    if bytes[15] != expected {
        return Err(FiscalCodeError {
            value: cf.into(),
            reason: format!("check character mismatch: expected '{}'", expected as char),
        });
    }

    Ok(cleaned)
}

/// Check-character contribution for characters in odd (1-based)
/// positions, per the conversion table in DM 23/12/1976.
fn odd_value(c: u8) -> u32 {
    match c {
        b'0' | b'A' => 1,
        b'1' | b'B' => 0,
        b'2' | b'C' => 5,
        b'3' | b'D' => 7,
        b'4' | b'E' => 9,
        b'5' | b'F' => 13,
        b'6' | b'G' => 15,
        b'7' | b'H' => 17,
        b'8' | b'I' => 19,
        b'9' | b'J' => 21,
        b'K' => 2,
        b'L' => 4,
        b'M' => 18,
        b'N' => 20,
        b'O' => 11,
        b'P' => 3,
        b'Q' => 6,
        b'R' => 8,
        b'S' => 12,
        b'T' => 14,
        b'U' => 16,
        b'V' => 10,
        b'W' => 22,
        b'X' => 25,
        b'Y' => 24,
        // Callers pre-check the input as ASCII alphanumeric, so only
        // 'Z' can reach the fallthrough.
        _ => 23,
    }
}

/// Check-character contribution for characters in even (1-based)
/// positions: digits map to their value, letters to their ordinal.
fn even_value(c: u8) -> u32 {
    if c.is_ascii_digit() {
        u32::from(c - b'0')
    } else {
        u32::from(c - b'A')
    }
}
