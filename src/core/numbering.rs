use chrono::{Datelike, NaiveDate};

use super::error::DocumentError;

/// Gapless document number sequence generator.
///
/// Generates numbers in the format `{prefix}{sequential}/{year}`, with
/// an optional register suffix (sezionale): "FT-0001/2024" or
/// "FT-0001/2024/A".
///
/// Italian law requires progressive numbering that identifies each
/// invoice uniquely (art. 21 DPR 633/72); registers restart at 1 every
/// year. This struct tracks the last issued number and ensures no gaps.
#[derive(Debug, Clone)]
pub struct NumberSequence {
    prefix: String,
    year: i32,
    next_number: u64,
    zero_pad: usize,
    sezionale: Option<String>,
}

impl NumberSequence {
    /// Create a new sequence starting at 1.
    pub fn new(prefix: impl Into<String>, year: i32) -> Self {
        Self {
            prefix: prefix.into(),
            year,
            next_number: 1,
            zero_pad: 4,
            sezionale: None,
        }
    }

    /// Create a sequence continuing from a given number.
    pub fn starting_at(prefix: impl Into<String>, year: i32, next_number: u64) -> Self {
        Self {
            prefix: prefix.into(),
            year,
            next_number,
            zero_pad: 4,
            sezionale: None,
        }
    }

    /// Set zero-padding width (default: 4, so "0001").
    pub fn with_padding(mut self, width: usize) -> Self {
        self.zero_pad = width;
        self
    }

    /// Attach a register suffix (e.g. "A" for the sezionale A register).
    pub fn with_sezionale(mut self, sezionale: impl Into<String>) -> Self {
        self.sezionale = Some(sezionale.into());
        self
    }

    fn format(&self, num: u64) -> String {
        match &self.sezionale {
            Some(s) => format!(
                "{}{:0>width$}/{}/{}",
                self.prefix,
                num,
                self.year,
                s,
                width = self.zero_pad
            ),
            None => format!(
                "{}{:0>width$}/{}",
                self.prefix,
                num,
                self.year,
                width = self.zero_pad
            ),
        }
    }

    /// Generate the next document number.
    pub fn next_number(&mut self) -> String {
        let num = self.next_number;
        self.next_number += 1;
        self.format(num)
    }

    /// Preview the next number without consuming it.
    pub fn peek(&self) -> String {
        self.format(self.next_number)
    }

    /// Get the current year of the sequence.
    pub fn year(&self) -> i32 {
        self.year
    }

    /// Get the next number that will be issued (without prefix/formatting).
    pub fn next_raw(&self) -> u64 {
        self.next_number
    }

    /// Advance to a new year, resetting the counter to 1.
    pub fn advance_year(&mut self, new_year: i32) -> Result<(), DocumentError> {
        if new_year <= self.year {
            return Err(DocumentError::Numbering(format!(
                "new year {new_year} must be greater than current year {}",
                self.year
            )));
        }
        self.year = new_year;
        self.next_number = 1;
        Ok(())
    }

    /// Auto-advance year if the given date is in a new year.
    /// Returns true if the year was advanced.
    pub fn auto_advance(&mut self, date: NaiveDate) -> bool {
        let date_year = date.year();
        if date_year > self.year {
            self.year = date_year;
            self.next_number = 1;
            true
        } else {
            false
        }
    }
}
