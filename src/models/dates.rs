//! Date and month string helpers
//!
//! Ledger keys are `YYYY-MM-DD` strings and budget keys are `YYYY-MM`. Both
//! sort lexicographically in chronological order, which range and month-prefix
//! filters rely on.

use chrono::NaiveDate;

use crate::error::{LedgerError, LedgerResult};

/// Parse a strict `YYYY-MM-DD` date
pub fn parse_date(value: &str) -> LedgerResult<NaiveDate> {
    let value = value.trim();
    if value.len() != 10 {
        return Err(invalid_date(value));
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|_| invalid_date(value))
}

/// Validate a `YYYY-MM-DD` string and return it in canonical form
pub fn normalize_date(value: &str) -> LedgerResult<String> {
    parse_date(value).map(|d| d.format("%Y-%m-%d").to_string())
}

/// Validate a strict `YYYY-MM` month string and return it trimmed
pub fn parse_month(value: &str) -> LedgerResult<String> {
    let value = value.trim();
    let valid = value.len() == 7
        && NaiveDate::parse_from_str(&format!("{}-01", value), "%Y-%m-%d").is_ok();

    if valid {
        Ok(value.to_string())
    } else {
        Err(LedgerError::InvalidFormat(format!(
            "'{}' is not a month, expected YYYY-MM",
            value
        )))
    }
}

/// The `YYYY-MM` prefix of a `YYYY-MM-DD` key
pub fn month_of(date_key: &str) -> &str {
    date_key.get(..7).unwrap_or(date_key)
}

fn invalid_date(value: &str) -> LedgerError {
    LedgerError::InvalidFormat(format!("'{}' is not a date, expected YYYY-MM-DD", value))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_date() {
        assert_eq!(
            parse_date("2025-01-15").unwrap(),
            NaiveDate::from_ymd_opt(2025, 1, 15).unwrap()
        );
        assert!(parse_date("2025-1-15").is_err());
        assert!(parse_date("2025-02-30").is_err());
        assert!(parse_date("15/01/2025").is_err());
    }

    #[test]
    fn test_parse_month() {
        assert_eq!(parse_month("2025-01").unwrap(), "2025-01");
        assert!(matches!(
            parse_month("2025-13"),
            Err(LedgerError::InvalidFormat(_))
        ));
        assert!(parse_month("2025-1").is_err());
        assert!(parse_month("January").is_err());
    }

    #[test]
    fn test_month_of() {
        assert_eq!(month_of("2025-01-15"), "2025-01");
        assert_eq!(month_of("bad"), "bad");
    }
}
