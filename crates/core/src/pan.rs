//! PAN data model (spec §3): an immutable record of a brand and its masked
//! value. The raw digit string never outlives construction.

use std::fmt;

/// Card brand, closed set per spec §4.1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize)]
pub enum Brand {
    Visa,
    Mastercard,
    Amex,
}

impl fmt::Display for Brand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Brand::Visa => "Visa",
            Brand::Mastercard => "Mastercard",
            Brand::Amex => "AMEX",
        };
        f.write_str(label)
    }
}

/// A found PAN: brand plus a masked value exposing only the first six and
/// last four digits. The constructor is the only place the raw digit
/// string is ever held.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct Pan {
    pub brand: Brand,
    pub masked_value: String,
}

impl Pan {
    /// `digits` must already have separators stripped. Masks everything
    /// between the first six and last four digits.
    pub fn new(brand: Brand, digits: &str) -> Self {
        let masked_value = mask(digits);
        Pan { brand, masked_value }
    }
}

impl fmt::Display for Pan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.brand, self.masked_value)
    }
}

fn mask(digits: &str) -> String {
    let len = digits.len();
    if len <= 10 {
        // Degenerate input shorter than head+tail; mask everything we can
        // without panicking on the slice arithmetic below.
        return "*".repeat(len);
    }
    let head = &digits[0..6];
    let tail = &digits[len - 4..];
    let middle: String = "*".repeat(len - 10);
    format!("{head}{middle}{tail}")
}
