//! Deadline text conversion
//!
//! Deadlines travel as fixed-width `MM/DD/YYYY HH:MM` text. The literal
//! placeholder `MM/DD/YYYY HR:MN` stands for "no deadline set" and maps to a
//! real, very early date so that it sorts before every entered deadline.

use crate::error::{Error, Result};
use chrono::{NaiveDate, NaiveDateTime};
use std::fmt;
use std::str::FromStr;

/// Placeholder text for a task without a deadline
pub const PLACEHOLDER: &str = "MM/DD/YYYY HR:MN";

const FORMAT: &str = "%m/%d/%Y %H:%M";

/// Byte offsets of the digit groups in `MM/DD/YYYY HH:MM`
const DIGIT_RANGES: [(usize, usize); 5] = [(0, 2), (3, 5), (6, 10), (11, 13), (14, 16)];

/// Byte offsets and expected values of the separators
const SEPARATORS: [(usize, u8); 4] = [(2, b'/'), (5, b'/'), (10, b' '), (13, b':')];

/// The date the placeholder stands for: 1899-12-31 00:00
pub fn sentinel_datetime() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(1899, 12, 31)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .unwrap_or(NaiveDateTime::MIN)
}

/// A task deadline, either unset or a minute-precision local date and time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Deadline {
    #[default]
    Unset,
    At(NaiveDateTime),
}

impl Deadline {
    /// Parse deadline text
    ///
    /// Accepts exactly [`PLACEHOLDER`] or `MM/DD/YYYY HH:MM` with every digit
    /// present. Out-of-range fields (month 13, 31st of April, hour 24) are
    /// rejected rather than rolled over.
    pub fn parse(text: &str) -> Result<Self> {
        if text == PLACEHOLDER {
            return Ok(Deadline::Unset);
        }

        let malformed = || Error::MalformedDateText(text.to_string());
        let bytes = text.as_bytes();
        if bytes.len() != PLACEHOLDER.len() {
            return Err(malformed());
        }
        if SEPARATORS.iter().any(|&(pos, sep)| bytes[pos] != sep) {
            return Err(malformed());
        }
        let all_digits = DIGIT_RANGES
            .iter()
            .all(|&(start, end)| bytes[start..end].iter().all(u8::is_ascii_digit));
        if !all_digits {
            return Err(malformed());
        }

        NaiveDateTime::parse_from_str(text, FORMAT)
            .map(Deadline::At)
            .map_err(|_| malformed())
    }

    pub fn is_set(&self) -> bool {
        matches!(self, Deadline::At(_))
    }

    /// Point in time used for ordering; the sentinel date when unset
    pub fn datetime(&self) -> NaiveDateTime {
        match self {
            Deadline::Unset => sentinel_datetime(),
            Deadline::At(at) => *at,
        }
    }

    /// Canonical text form, recomputed from the stored value
    pub fn to_text(&self) -> String {
        match self {
            Deadline::Unset => PLACEHOLDER.to_string(),
            Deadline::At(at) => at.format(FORMAT).to_string(),
        }
    }
}

impl FromStr for Deadline {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Deadline::parse(s)
    }
}

impl fmt::Display for Deadline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_text())
    }
}
