use chrono::DateTime;
use chrono_tz::Tz;

/// Calendar event as read from the calendar API
#[derive(Debug, Clone, PartialEq)]
pub struct CalendarEvent {
    pub id: String,
    pub title: String,
    pub start: DateTime<Tz>,
    pub end: DateTime<Tz>,
    /// All-day events run from 00:00 of the first day to 00:00 after the last day
    pub all_day: bool,
    pub attendees: Vec<String>,
}
