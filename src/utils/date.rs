use chrono::{DateTime, Duration, NaiveDate, NaiveTime, Utc};

use crate::utils::error::AppError;

const DATE_FORMATS: [&str; 3] = ["%Y-%m-%d", "%m/%d/%Y", "%Y/%m/%d"];

/// Parses an event date and normalizes it to midnight UTC of that day.
///
/// Accepts `YYYY-MM-DD`, `MM/DD/YYYY`, `YYYY/MM/DD` and full RFC 3339
/// timestamps.
pub fn parse_event_date(raw: &str, field: &str) -> Result<DateTime<Utc>, AppError> {
    let raw = raw.trim();

    let day = DateTime::parse_from_rfc3339(raw)
        .map(|ts| ts.with_timezone(&Utc).date_naive())
        .ok()
        .or_else(|| {
            DATE_FORMATS
                .iter()
                .find_map(|format| NaiveDate::parse_from_str(raw, format).ok())
        })
        .ok_or_else(|| AppError::ValidationError(format!("Invalid date format for {field}")))?;

    Ok(day.and_time(NaiveTime::MIN).and_utc())
}

/// An event counts as past once its start is more than a day behind `now`.
pub fn is_past(start: DateTime<Utc>, now: DateTime<Utc>) -> bool {
    start < now - Duration::days(1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_parse_supported_formats() {
        let expected = Utc.with_ymd_and_hms(2025, 3, 14, 0, 0, 0).unwrap();

        assert_eq!(parse_event_date("2025-03-14", "start date").unwrap(), expected);
        assert_eq!(parse_event_date("03/14/2025", "start date").unwrap(), expected);
        assert_eq!(
            parse_event_date("2025-03-14T18:30:00+00:00", "start date").unwrap(),
            expected
        );
    }

    #[test]
    fn test_parse_rejects_garbage() {
        let err = parse_event_date("next friday", "end date").unwrap_err();
        assert!(matches!(err, AppError::ValidationError(msg) if msg.contains("end date")));
    }

    #[test]
    fn test_is_past_uses_one_day_grace() {
        let now = Utc.with_ymd_and_hms(2025, 3, 14, 12, 0, 0).unwrap();
        assert!(!is_past(now - Duration::hours(23), now));
        assert!(is_past(now - Duration::hours(25), now));
    }
}
