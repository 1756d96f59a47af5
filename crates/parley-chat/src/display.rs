//! Timestamp formatting for the chat list and message view

use chrono::{DateTime, TimeZone};

const MILLIS_PER_DAY: i64 = 24 * 60 * 60 * 1000;

/// Clock time of a message, e.g. `09:05`
pub fn format_time<Tz: TimeZone>(timestamp: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    timestamp.format("%H:%M").to_string()
}

/// Label for a chat's last update relative to `now`.
///
/// Whole elapsed days decide the shape: none gives the clock time, one
/// gives "Yesterday", anything else (including timestamps in the future)
/// gives the calendar date.
pub fn format_relative<Tz: TimeZone>(timestamp: &DateTime<Tz>, now: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    let elapsed = now.clone() - timestamp.clone();
    let days = elapsed.num_milliseconds().div_euclid(MILLIS_PER_DAY);

    match days {
        0 => format_time(timestamp),
        1 => "Yesterday".to_string(),
        _ => timestamp.format("%-m/%-d/%Y").to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};

    #[test]
    fn test_format_time() {
        let ts = Utc.with_ymd_and_hms(2024, 3, 9, 9, 5, 42).unwrap();
        assert_eq!(format_time(&ts), "09:05");
    }

    #[test]
    fn test_format_relative() {
        let now = Utc.with_ymd_and_hms(2024, 3, 9, 18, 0, 0).unwrap();

        let earlier_today = now - Duration::hours(2);
        assert_eq!(format_relative(&earlier_today, &now), "16:00");

        let yesterday = now - Duration::hours(30);
        assert_eq!(format_relative(&yesterday, &now), "Yesterday");

        let last_week = now - Duration::days(7);
        assert_eq!(format_relative(&last_week, &now), "3/2/2024");
    }

    #[test]
    fn test_format_relative_future_uses_date() {
        let now = Utc.with_ymd_and_hms(2024, 3, 9, 18, 0, 0).unwrap();
        let later = now + Duration::minutes(5);
        assert_eq!(format_relative(&later, &now), "3/9/2024");
    }
}
