mod client;
pub mod models;
mod time;

pub use client::{parse_event, GoogleCalendarClient, GOOGLE_CALENDAR_API};
pub use models::CalendarEvent;
pub use time::{parse_event_time, EventTime};
