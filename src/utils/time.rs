use crate::error::{Error, Result};
use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};

/// Input format for interview scheduling, e.g. "2025-03-14 15:30".
pub const SCHEDULE_FORMAT: &str = "%Y-%m-%d %H:%M";

pub fn now() -> DateTime<Utc> {
    Utc::now()
}

pub fn to_rfc3339(dt: DateTime<Utc>) -> String {
    dt.to_rfc3339()
}

/// Parses a scheduling timestamp. Past dates are accepted; only the shape
/// of the input is validated.
pub fn parse_schedule_datetime(raw: &str) -> Result<DateTime<Utc>> {
    let naive = NaiveDateTime::parse_from_str(raw.trim(), SCHEDULE_FORMAT)
        .map_err(|_| Error::InvalidDate(format!("Expected a timestamp like {}", SCHEDULE_FORMAT)))?;
    Ok(Utc.from_utc_datetime(&naive))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    #[test]
    fn parses_the_fixed_format() {
        let dt = parse_schedule_datetime("2025-03-14 15:30").unwrap();
        assert_eq!(
            (dt.year(), dt.month(), dt.day(), dt.hour(), dt.minute()),
            (2025, 3, 14, 15, 30)
        );
    }

    #[test]
    fn trims_surrounding_whitespace() {
        assert!(parse_schedule_datetime("  2025-03-14 15:30  ").is_ok());
    }

    #[test]
    fn past_dates_are_accepted() {
        assert!(parse_schedule_datetime("1999-01-01 09:00").is_ok());
    }

    #[test]
    fn rejects_other_shapes() {
        for raw in [
            "",
            "tomorrow",
            "2025-03-14",
            "2025-03-14T15:30:00Z",
            "14.03.2025 15:30",
            "2025-13-40 15:30",
        ] {
            match parse_schedule_datetime(raw) {
                Err(Error::InvalidDate(_)) => {}
                other => panic!("expected InvalidDate for {:?}, got {:?}", raw, other.map(|_| ())),
            }
        }
    }
}
