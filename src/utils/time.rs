use chrono::{DateTime, Duration, NaiveDate, TimeZone};
use chrono_tz::Tz;

/// Parse time string in HH:MM format
pub fn parse_time(time_str: &str) -> Option<(u32, u32)> {
    let parts: Vec<&str> = time_str.split(':').collect();
    if parts.len() != 2 {
        return None;
    }
    let hour = parts[0].parse::<u32>().ok()?;
    let minute = parts[1].parse::<u32>().ok()?;
    if hour > 23 || minute > 59 {
        return None;
    }
    Some((hour, minute))
}

/// Parse a target date in YYYY-MM-DD format
pub fn parse_date(date_str: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(date_str.trim(), "%Y-%m-%d").ok()
}

/// Local midnight of `date` in `tz`
pub fn start_of_day(tz: &Tz, date: NaiveDate) -> Option<DateTime<Tz>> {
    let midnight = date.and_hms_opt(0, 0, 0)?;
    match tz.from_local_datetime(&midnight) {
        chrono::LocalResult::Single(dt) => Some(dt),
        chrono::LocalResult::Ambiguous(earliest, _) => Some(earliest),
        chrono::LocalResult::None => None,
    }
}

/// Calculate the next daily notification time
pub fn next_notification_time(current_time: DateTime<Tz>, target_time: &str) -> Option<DateTime<Tz>> {
    let (target_hour, target_minute) = parse_time(target_time)?;

    let next = current_time
        .date_naive()
        .and_hms_opt(target_hour, target_minute, 0)?;

    let mut next = match current_time.timezone().from_local_datetime(&next) {
        chrono::LocalResult::Single(dt) => dt,
        _ => return None,
    };

    // If we've already passed the target time today, move to tomorrow
    if next <= current_time {
        next += Duration::days(1);
    }

    Some(next)
}

/// Calculate the wait in seconds until the next notification
pub fn calculate_wait_duration(now: &DateTime<Tz>, next_time: &DateTime<Tz>) -> u64 {
    let seconds = next_time.signed_duration_since(*now).num_seconds();

    if seconds <= 0 {
        // Never spin; wait at least a minute
        return 60;
    }

    seconds as u64
}
