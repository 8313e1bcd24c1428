mod filter;
mod format;
mod gate;
mod message;

pub use filter::events_on_day;
pub use format::{format_date_label, EventDisplayRecord};
pub use gate::{AlwaysNotify, NotificationGate, WeekdayGate};
pub use message::NotificationMessage;

use crate::components::{EventSource, MessageSink};
use crate::error::{config_error, BotResult};
use crate::utils::time::parse_date;
use chrono::{NaiveDate, Utc};
use chrono_tz::Tz;
use tracing::{debug, info};

/// Per-run options; every field is optional
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NotifyOptions {
    /// Day to report on, today when unset
    pub date: Option<NaiveDate>,
    /// Header used when the day has events
    pub header: Option<String>,
    /// Header used when the day has no events
    pub header_no_event: Option<String>,
}

impl NotifyOptions {
    /// Build options from raw text, rejecting a malformed date
    pub fn parse(
        date: Option<&str>,
        header: Option<String>,
        header_no_event: Option<String>,
    ) -> BotResult<Self> {
        let date = match date {
            Some(raw) => Some(parse_date(raw).ok_or_else(|| {
                config_error(&format!("Invalid date (expected YYYY-MM-DD): {}", raw))
            })?),
            None => None,
        };

        Ok(Self {
            date,
            header,
            header_no_event,
        })
    }

    /// Fill unset headers from defaults
    pub fn or_headers(mut self, header: &str, header_no_event: &str) -> Self {
        self.header.get_or_insert_with(|| header.to_string());
        self.header_no_event
            .get_or_insert_with(|| header_no_event.to_string());
        self
    }
}

/// Result of a notification run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotifyOutcome {
    /// The message was delivered
    Sent { date: NaiveDate, event_count: usize },
    /// The gate held the notification back
    Suppressed { date: NaiveDate },
}

/// Fetches a calendar day, builds the message and posts it to a room
pub struct Notifier<S, D> {
    source: S,
    sink: D,
    gate: Box<dyn NotificationGate>,
    timezone: Tz,
}

impl<S, D> Notifier<S, D>
where
    S: EventSource,
    D: MessageSink,
{
    /// Create a notifier that skips weekends
    pub fn new(source: S, sink: D, timezone: Tz) -> Self {
        Self {
            source,
            sink,
            gate: Box::new(WeekdayGate),
            timezone,
        }
    }

    /// Replace the notification gate
    pub fn with_gate<G: NotificationGate + 'static>(mut self, gate: G) -> Self {
        self.gate = Box::new(gate);
        self
    }

    /// Current date in the notifier's time zone
    pub fn today(&self) -> NaiveDate {
        Utc::now().with_timezone(&self.timezone).date_naive()
    }

    /// Build the message for the requested day without sending it
    pub async fn build_message(
        &self,
        calendar_id: &str,
        options: &NotifyOptions,
    ) -> BotResult<NotificationMessage> {
        let date = options.date.unwrap_or_else(|| self.today());
        self.message_for_day(calendar_id, date, options).await
    }

    /// Send the requested day's events from `calendar_id` to `room_id`
    pub async fn notify(
        &self,
        calendar_id: &str,
        room_id: &str,
        options: &NotifyOptions,
    ) -> BotResult<NotifyOutcome> {
        let date = options.date.unwrap_or_else(|| self.today());

        if !self.gate.should_notify(date) {
            info!("Notification for {} suppressed by gate", date);
            return Ok(NotifyOutcome::Suppressed { date });
        }

        let message = self.message_for_day(calendar_id, date, options).await?;
        let event_count = message.events.len();

        info!(
            "Sending {} events from '{}' to room {}",
            event_count, message.calendar_name, room_id
        );
        self.sink.send(room_id, &message.render()).await?;

        Ok(NotifyOutcome::Sent { date, event_count })
    }

    async fn message_for_day(
        &self,
        calendar_id: &str,
        date: NaiveDate,
        options: &NotifyOptions,
    ) -> BotResult<NotificationMessage> {
        let calendar_name = self.source.calendar_name(calendar_id).await?;
        let events = self.source.events_for_day(calendar_id, date).await?;
        let fetched = events.len();

        let records: Vec<EventDisplayRecord> = events_on_day(events, date)
            .iter()
            .map(EventDisplayRecord::from)
            .collect();
        debug!("{} of {} events kept for {}", records.len(), fetched, date);

        Ok(NotificationMessage::assemble(
            &calendar_name,
            options.header.as_deref().unwrap_or(""),
            options.header_no_event.as_deref().unwrap_or(""),
            records,
        ))
    }
}
