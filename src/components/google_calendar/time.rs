use crate::error::{google_calendar_error, BotResult};
use crate::utils::time::start_of_day;
use chrono::{DateTime, NaiveDate};
use chrono_tz::Tz;
use serde_json::Value;

/// An event boundary as returned by the API
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EventTime {
    pub instant: DateTime<Tz>,
    /// Set when the boundary was a bare `date` rather than a `dateTime`
    pub date_only: bool,
}

/// Parse an event's `start` or `end` object into the configured time zone
pub fn parse_event_time(value: &Value, tz: &Tz) -> BotResult<EventTime> {
    let object = value
        .as_object()
        .ok_or_else(|| google_calendar_error("Event time is not an object"))?;

    if let Some(date_time) = object.get("dateTime").and_then(|dt| dt.as_str()) {
        let dt = DateTime::parse_from_rfc3339(date_time)
            .map_err(|e| google_calendar_error(&format!("Failed to parse datetime: {}", e)))?;
        Ok(EventTime {
            instant: dt.with_timezone(tz),
            date_only: false,
        })
    } else if let Some(date) = object.get("date").and_then(|d| d.as_str()) {
        let date = NaiveDate::parse_from_str(date, "%Y-%m-%d")
            .map_err(|e| google_calendar_error(&format!("Failed to parse date: {}", e)))?;
        let instant = start_of_day(tz, date)
            .ok_or_else(|| google_calendar_error("Invalid local time"))?;
        Ok(EventTime {
            instant,
            date_only: true,
        })
    } else {
        Err(google_calendar_error("Event time has neither dateTime nor date"))
    }
}
