//! Cell formatting for the cleaned output table.

use chrono::{DateTime, Utc};

use fitgrid_model::{FinalRow, format_numeric};

/// Output column headers, in order.
pub const OUTPUT_HEADER: [&str; 5] = ["Id", "Time", "Steps", "Sleep", "HeartRate"];

/// Minute timestamps are written as UTC with an explicit offset.
pub const OUTPUT_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S+00:00";

pub fn format_time(minute: DateTime<Utc>) -> String {
    minute.format(OUTPUT_TIME_FORMAT).to_string()
}

/// Heart rate is a mean, so it always carries a fractional part.
///
/// # Examples
///
/// ```
/// use fitgrid_output::format_heart_rate;
///
/// assert_eq!(format_heart_rate(75.0), "75.0");
/// assert_eq!(format_heart_rate(72.5), "72.5");
/// ```
pub fn format_heart_rate(value: f64) -> String {
    let text = format_numeric(value);
    if text.contains('.') {
        text
    } else {
        format!("{text}.0")
    }
}

/// Renders one row in header order.
pub fn format_row(row: &FinalRow) -> [String; 5] {
    [
        row.subject_id.to_string(),
        format_time(row.minute),
        row.steps.to_string(),
        format_numeric(row.sleep),
        format_heart_rate(row.heart_rate),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use fitgrid_model::SubjectId;

    #[test]
    fn row_cells() {
        let row = FinalRow {
            subject_id: SubjectId::new("1503960366").unwrap(),
            minute: Utc.with_ymd_and_hms(2016, 4, 12, 7, 21, 0).unwrap(),
            steps: 12,
            sleep: 1.0,
            heart_rate: 72.25,
        };
        assert_eq!(
            format_row(&row),
            [
                "1503960366".to_string(),
                "2016-04-12 07:21:00+00:00".to_string(),
                "12".to_string(),
                "1".to_string(),
                "72.25".to_string(),
            ]
        );
    }

    #[test]
    fn heart_rate_keeps_a_decimal_point() {
        assert_eq!(format_heart_rate(0.0), "0.0");
        assert_eq!(format_heart_rate(100.0), "100.0");
        assert_eq!(format_heart_rate(61.333), "61.333");
    }
}
