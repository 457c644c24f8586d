//! Parsing free-form model output into an hours value.

use std::fmt;

/// A non-negative, finite number of work hours.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Hours(f64);

impl Hours {
    /// Wraps a value, rejecting negatives, NaN and infinities.
    #[must_use]
    pub fn new(value: f64) -> Option<Self> {
        (value.is_finite() && value >= 0.0).then_some(Self(value))
    }

    /// Returns the numeric value.
    #[must_use]
    pub const fn get(self) -> f64 {
        self.0
    }
}

impl fmt::Display for Hours {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Extracts an hours estimate from model output.
///
/// Every character other than ASCII digits, `.` and `,` is discarded, commas
/// become decimal points, and the remainder is parsed as a float. Returns
/// `None` when nothing numeric survives or the remainder does not parse
/// (for example `"1,234.5"` becomes `"1.234.5"`).
#[must_use]
pub fn parse_hours(text: &str) -> Option<Hours> {
    let cleaned: String = text
        .chars()
        .filter(|character| character.is_ascii_digit() || matches!(character, '.' | ','))
        .map(|character| if character == ',' { '.' } else { character })
        .collect();

    if cleaned.is_empty() {
        return None;
    }

    cleaned.parse::<f64>().ok().and_then(Hours::new)
}
