use chrono::{DateTime, NaiveDateTime, Utc};

/// Parse an ISO-8601 timestamp into UTC
///
/// Accepts RFC 3339 (`Z` or numeric offsets) and offset-less timestamps,
/// which are taken as UTC. Returns `None` for anything else.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();

    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts.with_timezone(&Utc));
    }

    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .map(|naive| naive.and_utc())
}

/// Coarse age of `timestamp` relative to `now`
///
/// `"just now"` under a minute, then whole minutes, hours and days.
/// Timestamps in the future read as `"just now"`.
pub fn relative_time(timestamp: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let minutes = (now - timestamp).num_minutes();
    let hours = minutes / 60;
    let days = hours / 24;

    if minutes < 1 {
        "just now".to_string()
    } else if minutes < 60 {
        format!("{} {} ago", minutes, plural(minutes, "min"))
    } else if hours < 24 {
        format!("{} {} ago", hours, plural(hours, "hour"))
    } else {
        format!("{} {} ago", days, plural(days, "day"))
    }
}

fn plural(count: i64, unit: &str) -> String {
    if count == 1 {
        unit.to_string()
    } else {
        format!("{}s", unit)
    }
}
