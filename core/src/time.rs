//! Time related utils.

use crate::Error;
use chrono::NaiveDateTime;
use chrono::Utc;

/// The timestamp type used across the workspace.
pub type DateTime = chrono::DateTime<Utc>;

/// Date format used in signing scopes: `20220313`.
const DATE: &str = "%Y%m%d";

/// Compact ISO 8601 format used in date headers: `20220313T072004Z`.
const ISO8601: &str = "%Y%m%dT%H%M%SZ";

/// Take the current time.
pub fn now() -> DateTime {
    Utc::now()
}

/// Format a timestamp as an 8-digit scope date.
pub fn format_date(t: DateTime) -> String {
    t.format(DATE).to_string()
}

/// Format a timestamp as compact ISO 8601.
pub fn format_iso8601(t: DateTime) -> String {
    t.format(ISO8601).to_string()
}

/// Parse a compact ISO 8601 timestamp like `20220313T072004Z`.
pub fn parse_iso8601(s: &str) -> crate::Result<DateTime> {
    let naive = NaiveDateTime::parse_from_str(s, ISO8601)
        .map_err(|e| Error::request_invalid(format!("invalid timestamp: {s}")).with_source(e))?;
    Ok(naive.and_utc())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn test_time() -> DateTime {
        parse_iso8601("20220313T072004Z").expect("timestamp must be valid")
    }

    #[test]
    fn test_format_date() {
        assert_eq!(format_date(test_time()), "20220313");
    }

    #[test]
    fn test_format_iso8601() {
        assert_eq!(format_iso8601(test_time()), "20220313T072004Z");
    }

    #[test]
    fn test_parse_round_trip() {
        let t = test_time();
        assert_eq!(parse_iso8601(&format_iso8601(t)).unwrap(), t);
    }

    #[test]
    fn test_parse_rejects_separators() {
        assert!(parse_iso8601("2022-03-13T07:20:04Z").is_err());
    }
}
