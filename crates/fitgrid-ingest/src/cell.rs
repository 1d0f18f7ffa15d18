//! Polars `AnyValue` to [`RawCell`] conversion.

use fitgrid_model::RawCell;
use polars::prelude::AnyValue;

/// Converts a Polars `AnyValue` into an untyped [`RawCell`].
///
/// The reader loads every column as text, so only nulls and strings are
/// expected; anything else is rendered through its display form. Text is
/// trimmed and BOM-stripped, and blank text is missing.
///
/// # Examples
///
/// ```
/// use fitgrid_ingest::any_to_cell;
/// use fitgrid_model::RawCell;
/// use polars::prelude::AnyValue;
///
/// assert_eq!(any_to_cell(AnyValue::Null), RawCell::Missing);
/// assert_eq!(any_to_cell(AnyValue::String(" 97 ")), RawCell::Text("97".to_string()));
/// ```
pub fn any_to_cell(value: AnyValue<'_>) -> RawCell {
    match value {
        AnyValue::Null => RawCell::Missing,
        AnyValue::String(s) => text_cell(s),
        AnyValue::StringOwned(s) => text_cell(s.as_str()),
        other => text_cell(&other.to_string()),
    }
}

fn text_cell(raw: &str) -> RawCell {
    let cleaned = raw.trim().trim_matches('\u{feff}');
    if cleaned.is_empty() {
        RawCell::Missing
    } else {
        RawCell::Text(cleaned.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_strings_are_missing() {
        assert_eq!(any_to_cell(AnyValue::String("   ")), RawCell::Missing);
    }

    #[test]
    fn bom_is_stripped() {
        assert_eq!(
            any_to_cell(AnyValue::String("\u{feff}1503960366")),
            RawCell::Text("1503960366".to_string())
        );
    }
}
