pub mod auth_service;
pub mod finance_service;
pub mod founder_service;
pub mod profit_service;
pub mod transaction_service;

use chrono::NaiveDate;

use crate::util::error::ServiceError;

/// Parse a calendar-date string in ISO 8601 date form (YYYY-MM-DD).
pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate, ServiceError> {
    raw.parse::<NaiveDate>()
        .map_err(|_| ServiceError::InvalidInput("Invalid date format. Use YYYY-MM-DD".to_string()))
}

/// Round a floating-point amount to 2 decimal places.
pub(crate) fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_date_valid() {
        let date = parse_date("2024-03-15").unwrap();
        assert_eq!(date.to_string(), "2024-03-15");
    }

    #[test]
    fn test_parse_date_rejects_garbage() {
        assert!(parse_date("15/03/2024").is_err());
        assert!(parse_date("2024-13-01").is_err());
        assert!(parse_date("not-a-date").is_err());
    }

    #[test]
    fn test_round2() {
        assert_eq!(round2(1.234), 1.23);
        assert_eq!(round2(1.236), 1.24);
        assert_eq!(round2(400.0), 400.0);
        assert_eq!(round2(-199.999), -200.0);
    }
}
