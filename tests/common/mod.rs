#![allow(dead_code)]

use async_trait::async_trait;
use calendar_notifier::components::{CalendarEvent, EventSource, MessageSink};
use calendar_notifier::error::{delivery_error, not_found_error, BotResult};
use chrono::{Duration, NaiveDate, TimeZone};
use chrono_tz::Asia::Tokyo;
use std::sync::Arc;
use tokio::sync::Mutex;

/// In-memory calendar that answers day queries like the calendar API
#[derive(Debug, Clone, Default)]
pub struct MockCalendar {
    id: String,
    name: String,
    events: Vec<CalendarEvent>,
    fetches: Arc<Mutex<Vec<(String, NaiveDate)>>>,
}

impl MockCalendar {
    /// Create a mock calendar with the given id and display name
    pub fn new(id: &str, name: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            ..Default::default()
        }
    }

    /// Add an event
    pub fn with_event(mut self, event: CalendarEvent) -> Self {
        self.events.push(event);
        self
    }

    /// Day queries made so far
    pub async fn fetches(&self) -> Vec<(String, NaiveDate)> {
        self.fetches.lock().await.clone()
    }
}

#[async_trait]
impl EventSource for MockCalendar {
    async fn calendar_name(&self, calendar_id: &str) -> BotResult<String> {
        if calendar_id != self.id {
            return Err(not_found_error(&format!("Calendar not found: {calendar_id}")));
        }
        Ok(self.name.clone())
    }

    async fn events_for_day(
        &self,
        calendar_id: &str,
        date: NaiveDate,
    ) -> BotResult<Vec<CalendarEvent>> {
        if calendar_id != self.id {
            return Err(not_found_error(&format!("Calendar not found: {calendar_id}")));
        }
        self.fetches.lock().await.push((calendar_id.to_string(), date));

        // Overlap with [00:00, next 00:00), end inclusive like a day query
        let day_start = date.and_hms_opt(0, 0, 0).unwrap();
        let day_end = day_start + Duration::days(1);
        Ok(self
            .events
            .iter()
            .filter(|e| e.start.naive_local() < day_end && e.end.naive_local() >= day_start)
            .cloned()
            .collect())
    }
}

/// Message sink that records what it was asked to send
#[derive(Debug, Clone, Default)]
pub struct RecordingSink {
    sent: Arc<Mutex<Vec<(String, String)>>>,
    fail: bool,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// A sink whose every delivery fails
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Default::default()
        }
    }

    /// Messages delivered so far as (room, body)
    pub async fn sent(&self) -> Vec<(String, String)> {
        self.sent.lock().await.clone()
    }
}

#[async_trait]
impl MessageSink for RecordingSink {
    async fn send(&self, room_id: &str, body: &str) -> BotResult<()> {
        if self.fail {
            return Err(delivery_error("HTTP 429 - rate limited"));
        }
        self.sent
            .lock()
            .await
            .push((room_id.to_string(), body.to_string()));
        Ok(())
    }
}

/// Timed event in Tokyo time
pub fn timed_event(
    title: &str,
    date: (i32, u32, u32),
    start: (u32, u32),
    end: (u32, u32),
    attendees: &[&str],
) -> CalendarEvent {
    CalendarEvent {
        id: title.to_lowercase(),
        title: title.to_string(),
        start: Tokyo
            .with_ymd_and_hms(date.0, date.1, date.2, start.0, start.1, 0)
            .unwrap(),
        end: Tokyo
            .with_ymd_and_hms(date.0, date.1, date.2, end.0, end.1, 0)
            .unwrap(),
        all_day: false,
        attendees: attendees.iter().map(|a| a.to_string()).collect(),
    }
}

/// All-day event covering `days` days from `date`
pub fn all_day_event(title: &str, date: (i32, u32, u32), days: i64) -> CalendarEvent {
    let start = Tokyo
        .with_ymd_and_hms(date.0, date.1, date.2, 0, 0, 0)
        .unwrap();
    CalendarEvent {
        id: title.to_lowercase(),
        title: title.to_string(),
        start,
        end: start + Duration::days(days),
        all_day: true,
        attendees: Vec::new(),
    }
}

pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}
