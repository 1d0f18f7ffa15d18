//! Raw cell values as produced by the record reader.

use std::fmt;

/// A single untyped cell from a delimited source file.
///
/// The reader keeps whatever type the CSV parser inferred; coercion to the
/// canonical numeric type happens later with an explicit per-column policy.
#[derive(Debug, Clone, PartialEq)]
pub enum RawCell {
    Missing,
    Text(String),
    Int(i64),
    Float(f64),
}

impl RawCell {
    pub fn is_missing(&self) -> bool {
        match self {
            Self::Missing => true,
            Self::Text(text) => text.trim().is_empty(),
            Self::Int(_) | Self::Float(_) => false,
        }
    }

    /// Canonical text form. Integral floats print without a fractional part so
    /// numeric identifiers never pick up a `.0` suffix.
    pub fn to_text(&self) -> String {
        match self {
            Self::Missing => String::new(),
            Self::Text(text) => text.trim().to_string(),
            Self::Int(value) => value.to_string(),
            Self::Float(value) => format_numeric(*value),
        }
    }
}

impl fmt::Display for RawCell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_text())
    }
}

impl From<&str> for RawCell {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<i64> for RawCell {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<f64> for RawCell {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

/// Formats a floating-point number as a string without trailing zeros.
///
/// # Examples
///
/// ```
/// use fitgrid_model::format_numeric;
///
/// assert_eq!(format_numeric(1.0), "1");
/// assert_eq!(format_numeric(1.50), "1.5");
/// assert_eq!(format_numeric(0.0), "0");
/// assert_eq!(format_numeric(1503960366.0), "1503960366");
/// ```
pub fn format_numeric(v: f64) -> String {
    if v == 0.0 {
        return "0".to_string();
    }
    let s = format!("{v}");
    if !s.contains('.') {
        return s;
    }
    s.trim_end_matches('0').trim_end_matches('.').to_string()
}
