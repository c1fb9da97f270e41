//! Conversions between domain values and their SQLite TEXT representation.
//!
//! Decimals are stored as plain strings rounded to the domain precision.
//! Timestamps are stored as RFC3339 UTC with a fixed microsecond width, so
//! ordering by the TEXT column matches chronological order.

use std::str::FromStr;

use chrono::{DateTime, SecondsFormat, Utc};
use rust_decimal::Decimal;

use crate::errors::StorageError;
use goalpost_core::constants::DECIMAL_PRECISION;

pub fn format_decimal(value: Decimal) -> String {
    value.round_dp(DECIMAL_PRECISION).normalize().to_string()
}

pub fn format_optional_decimal(value: Option<Decimal>) -> Option<String> {
    value.map(format_decimal)
}

pub fn parse_decimal(column: &str, raw: &str) -> Result<Decimal, StorageError> {
    Decimal::from_str(raw)
        .map_err(|e| StorageError::CorruptValue(format!("{column} '{raw}': {e}")))
}

pub fn parse_optional_decimal(
    column: &str,
    raw: Option<&str>,
) -> Result<Option<Decimal>, StorageError> {
    raw.map(|r| parse_decimal(column, r)).transpose()
}

pub fn format_timestamp(value: DateTime<Utc>) -> String {
    value.to_rfc3339_opts(SecondsFormat::Micros, true)
}

pub fn parse_timestamp(column: &str, raw: &str) -> Result<DateTime<Utc>, StorageError> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| StorageError::CorruptValue(format!("{column} '{raw}': {e}")))
}

pub fn parse_optional_timestamp(
    column: &str,
    raw: Option<&str>,
) -> Result<Option<DateTime<Utc>>, StorageError> {
    raw.map(|r| parse_timestamp(column, r)).transpose()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rust_decimal_macros::dec;

    #[test]
    fn test_decimal_text_is_rounded_and_trimmed() {
        assert_eq!(format_decimal(dec!(12.345)), "12.35");
        assert_eq!(format_decimal(dec!(5.00)), "5");
        assert_eq!(parse_decimal("v", "12.35").unwrap(), dec!(12.35));
    }

    #[test]
    fn test_corrupt_decimal_is_reported() {
        let err = parse_decimal("current_value", "abc").unwrap_err();
        assert!(matches!(err, StorageError::CorruptValue(msg) if msg.contains("current_value")));
    }

    #[test]
    fn test_timestamps_sort_as_text() {
        let a = Utc.with_ymd_and_hms(2026, 1, 2, 3, 4, 5).unwrap();
        let b = a + chrono::Duration::microseconds(1);
        let (ta, tb) = (format_timestamp(a), format_timestamp(b));
        assert_eq!(ta, "2026-01-02T03:04:05.000000Z");
        assert!(ta < tb);
        assert_eq!(parse_timestamp("t", &tb).unwrap(), b);
    }
}
