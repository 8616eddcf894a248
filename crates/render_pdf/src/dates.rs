//! Localized date formatting

use chrono::{DateTime, Datelike, NaiveDate, Utc};

/// Polish month names in genitive form, as used after a day number
const POLISH_MONTHS_GENITIVE: [&str; 12] = [
    "stycznia",
    "lutego",
    "marca",
    "kwietnia",
    "maja",
    "czerwca",
    "lipca",
    "sierpnia",
    "września",
    "października",
    "listopada",
    "grudnia",
];

/// Formats a date the long Polish way, e.g. "7 sierpnia 2026"
pub fn polish_long_date(date: NaiveDate) -> String {
    let month = POLISH_MONTHS_GENITIVE[date.month0() as usize];
    format!("{} {} {}", date.day(), month, date.year())
}

/// Formats a timestamp for the Polish document footer, e.g. "07.08.2026 14:30"
pub fn polish_timestamp(at: DateTime<Utc>) -> String {
    at.format("%d.%m.%Y %H:%M").to_string()
}

/// Formats a date for the generic layout, e.g. "2026-08-07"
pub fn iso_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Formats a timestamp for the generic document footer, e.g. "2026-08-07 14:30"
pub fn iso_timestamp(at: DateTime<Utc>) -> String {
    at.format("%Y-%m-%d %H:%M").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_polish_long_date_uses_genitive_month() {
        let date = NaiveDate::from_ymd_opt(2026, 8, 7).unwrap();
        assert_eq!(polish_long_date(date), "7 sierpnia 2026");
    }

    #[test]
    fn test_polish_long_date_all_months() {
        for month in 1..=12u32 {
            let date = NaiveDate::from_ymd_opt(2025, month, 1).unwrap();
            let formatted = polish_long_date(date);
            assert!(formatted.starts_with("1 "));
            assert!(formatted.ends_with("2025"));
        }
    }

    #[test]
    fn test_polish_timestamp_format() {
        let at = DateTime::parse_from_rfc3339("2026-08-07T14:30:00Z")
            .unwrap()
            .with_timezone(&Utc);
        assert_eq!(polish_timestamp(at), "07.08.2026 14:30");
    }

    #[test]
    fn test_iso_formats() {
        let date = NaiveDate::from_ymd_opt(2026, 8, 7).unwrap();
        assert_eq!(iso_date(date), "2026-08-07");
    }
}
