//! CLI command implementations.

pub mod irr;
pub mod update;

pub use irr::IrrArgs;
pub use update::UpdateArgs;

use chrono::{NaiveDate, NaiveDateTime};

use crate::error::{CliError, CliResult};

/// Parses `YYYY-MM-DD` (midnight) or `YYYY-MM-DDTHH:MM:SS`.
pub fn parse_datetime(s: &str) -> CliResult<NaiveDateTime> {
    let s = s.trim();
    if let Ok(dt) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S") {
        return Ok(dt);
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .ok_or_else(|| CliError::InvalidDate(s.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_datetime() {
        let midnight = parse_datetime("2024-01-01").unwrap();
        assert_eq!(midnight.to_string(), "2024-01-01 00:00:00");

        let noon = parse_datetime("2024-01-01T12:30:00").unwrap();
        assert_eq!(noon.to_string(), "2024-01-01 12:30:00");

        assert!(matches!(
            parse_datetime("01/01/24"),
            Err(CliError::InvalidDate(_))
        ));
    }
}
