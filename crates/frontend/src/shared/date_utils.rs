//! Utilities for date parsing and formatting
//!
//! Filter inputs and the orders API exchange dates as ISO `YYYY-MM-DD`;
//! the UI shows them as `DD.MM.YYYY`.

use chrono::NaiveDate;

const ISO_DATE: &str = "%Y-%m-%d";

/// Parse the date part of an ISO date or datetime string
/// Example: "2024-03-15" or "2024-03-15T14:02:26Z" -> 2024-03-15
pub fn parse_iso_date(value: &str) -> Option<NaiveDate> {
    let date_part = value.trim().split('T').next()?;
    NaiveDate::parse_from_str(date_part, ISO_DATE).ok()
}

/// Format a calendar date as ISO `YYYY-MM-DD`
pub fn iso_date(date: NaiveDate) -> String {
    date.format(ISO_DATE).to_string()
}

/// Format ISO datetime string to DD.MM.YYYY HH:MM:SS format
/// Example: "2024-03-15T14:02:26.123Z" -> "15.03.2024 14:02:26"
pub fn format_datetime(datetime_str: &str) -> String {
    if let Some((date_part, time_part)) = datetime_str.split_once('T') {
        if let Some((year, rest)) = date_part.split_once('-') {
            if let Some((month, day)) = rest.split_once('-') {
                let time = time_part
                    .split(['.', 'Z', '+'])
                    .next()
                    .unwrap_or(time_part);
                return format!("{}.{}.{} {}", day, month, year, time);
            }
        }
    }
    datetime_str.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_datetime() {
        assert_eq!(
            format_datetime("2024-03-15T14:02:26.123Z"),
            "15.03.2024 14:02:26"
        );
        assert_eq!(
            format_datetime("2024-12-31T23:59:59Z"),
            "31.12.2024 23:59:59"
        );
        assert_eq!(
            format_datetime("2024-12-31T23:59:59+00:00"),
            "31.12.2024 23:59:59"
        );
    }

    #[test]
    fn test_invalid_format() {
        assert_eq!(format_datetime("invalid"), "invalid");
    }

    #[test]
    fn test_parse_iso_date() {
        let expected = NaiveDate::from_ymd_opt(2024, 6, 10).unwrap();
        assert_eq!(parse_iso_date("2024-06-10"), Some(expected));
        assert_eq!(parse_iso_date(" 2024-06-10T08:00:00Z "), Some(expected));
        assert_eq!(parse_iso_date("2024-02-30"), None);
        assert_eq!(parse_iso_date("10.06.2024"), None);
        assert_eq!(iso_date(expected), "2024-06-10");
    }
}
