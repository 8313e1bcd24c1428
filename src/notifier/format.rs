use crate::components::CalendarEvent;
use chrono::{DateTime, TimeZone};
use serde::Serialize;
use std::fmt::Display;

/// Fixed label layout: month, day, hour and minute with their markers
const DATE_LABEL_FORMAT: &str = "%m月%d日%H時%M分";

/// Display fields of one event
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EventDisplayRecord {
    pub title: String,
    pub start: String,
    pub end: String,
    pub all_day: bool,
    pub attendees: Vec<String>,
}

impl From<&CalendarEvent> for EventDisplayRecord {
    fn from(event: &CalendarEvent) -> Self {
        Self {
            title: event.title.clone(),
            start: format_date_label(&event.start),
            end: format_date_label(&event.end),
            all_day: event.all_day,
            attendees: event.attendees.clone(),
        }
    }
}

/// Format an instant as `MM月DD日HH時MM分` in its own time zone
pub fn format_date_label<Tz>(instant: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    instant.format(DATE_LABEL_FORMAT).to_string()
}
