use crate::error::BotResult;
use async_trait::async_trait;
use chrono::NaiveDate;

// Export components
pub mod chatwork;
pub mod google_calendar;

pub use chatwork::ChatworkClient;
pub use google_calendar::{CalendarEvent, GoogleCalendarClient};

/// Read-only provider of calendar events
#[async_trait]
pub trait EventSource: Send + Sync {
    /// Display name of the calendar
    async fn calendar_name(&self, calendar_id: &str) -> BotResult<String>;

    /// Events occurring on `date`, in source order
    async fn events_for_day(
        &self,
        calendar_id: &str,
        date: NaiveDate,
    ) -> BotResult<Vec<CalendarEvent>>;
}

/// Destination for assembled notification messages
#[async_trait]
pub trait MessageSink: Send + Sync {
    /// Post `body` to the given room
    async fn send(&self, room_id: &str, body: &str) -> BotResult<()>;
}
