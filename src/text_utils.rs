use chrono::{DateTime, NaiveDate, NaiveDateTime};

// Date-time shapes content authors actually type in front matter
const DATE_TIME_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"];

/// Parses a front-matter date string. Accepts a plain date, a date-time
/// with an optional fraction, or a full RFC 3339 timestamp. Anything else
/// is None, which makes the record sort after every dated one.
pub fn parse_publish_date(buf: &str) -> Option<NaiveDateTime> {
    let buf = buf.trim();
    if buf.is_empty() {
        return None;
    }

    for format in DATE_TIME_FORMATS {
        if let Ok(date_time) = NaiveDateTime::parse_from_str(buf, format) {
            return Some(date_time);
        }
    }

    if let Ok(date) = NaiveDate::parse_from_str(buf, "%Y-%m-%d") {
        return date.and_hms_opt(0, 0, 0);
    }

    if let Ok(date_time) = DateTime::parse_from_rfc3339(buf) {
        return Some(date_time.naive_utc());
    }

    None
}

pub fn format_date_time(date_time: &NaiveDateTime) -> (String, String) {
    let date = date_time.format("%Y-%m-%d").to_string();
    let time = date_time.format("%H:%M:%S").to_string();
    (date, time)
}
