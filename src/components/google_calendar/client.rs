use super::models::CalendarEvent;
use super::time::parse_event_time;
use crate::components::EventSource;
use crate::error::{google_calendar_error, not_found_error, BotResult};
use crate::utils::time::start_of_day;
use async_trait::async_trait;
use chrono::{Duration, NaiveDate};
use chrono_tz::Tz;
use reqwest::{Client, StatusCode};
use serde_json::Value;
use tracing::debug;
use url::Url;

/// Base URL of the Google Calendar v3 API
pub const GOOGLE_CALENDAR_API: &str = "https://www.googleapis.com/calendar/v3/";

/// Google Calendar REST client authenticated with a caller-supplied access token
#[derive(Clone)]
pub struct GoogleCalendarClient {
    client: Client,
    access_token: String,
    timezone: Tz,
    base_url: Url,
}

impl GoogleCalendarClient {
    /// Create a new client; events are expressed in `timezone`
    pub fn new(access_token: &str, timezone: Tz, timeout: std::time::Duration) -> BotResult<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| google_calendar_error(&format!("Failed to build HTTP client: {}", e)))?;
        let base_url = Url::parse(GOOGLE_CALENDAR_API)
            .map_err(|e| google_calendar_error(&format!("Failed to parse URL: {}", e)))?;

        Ok(Self {
            client,
            access_token: access_token.to_string(),
            timezone,
            base_url,
        })
    }

    /// Point the client at a different API root
    pub fn with_base_url(mut self, base_url: Url) -> Self {
        self.base_url = base_url;
        self
    }

    /// Build `{base}/calendars/{calendar_id}[/{suffix}]` with the id percent-encoded
    fn calendar_url(&self, calendar_id: &str, suffix: Option<&str>) -> BotResult<Url> {
        if calendar_id.trim().is_empty() {
            return Err(not_found_error("Calendar ID is empty"));
        }

        let mut url = self.base_url.clone();
        {
            let mut segments = url
                .path_segments_mut()
                .map_err(|_| google_calendar_error("API base URL cannot have a path"))?;
            segments.pop_if_empty().push("calendars").push(calendar_id);
            if let Some(suffix) = suffix {
                segments.push(suffix);
            }
        }
        Ok(url)
    }

    /// Issue an authorized GET and decode the JSON body
    async fn get_json(&self, url: Url, calendar_id: &str) -> BotResult<Value> {
        debug!("GET {}", url);
        let response = self
            .client
            .get(url)
            .bearer_auth(&self.access_token)
            .send()
            .await
            .map_err(|e| google_calendar_error(&format!("Request failed: {}", e)))?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(not_found_error(&format!("Calendar not found: {}", calendar_id)));
        }
        if !status.is_success() {
            let error_body = response
                .text()
                .await
                .unwrap_or_else(|_| "Could not read error response".to_string());
            return Err(google_calendar_error(&format!(
                "HTTP {} - {}",
                status, error_body
            )));
        }

        response
            .json()
            .await
            .map_err(|e| google_calendar_error(&format!("Failed to parse response: {}", e)))
    }
}

#[async_trait]
impl EventSource for GoogleCalendarClient {
    async fn calendar_name(&self, calendar_id: &str) -> BotResult<String> {
        let url = self.calendar_url(calendar_id, None)?;
        let calendar = self.get_json(url, calendar_id).await?;

        calendar
            .get("summary")
            .and_then(|s| s.as_str())
            .map(|s| s.to_string())
            .ok_or_else(|| google_calendar_error("Calendar has no summary"))
    }

    async fn events_for_day(
        &self,
        calendar_id: &str,
        date: NaiveDate,
    ) -> BotResult<Vec<CalendarEvent>> {
        let next_day = date
            .checked_add_signed(Duration::days(1))
            .ok_or_else(|| google_calendar_error("Date out of range"))?;
        let time_min = start_of_day(&self.timezone, date)
            .ok_or_else(|| google_calendar_error("Invalid local time"))?;
        let time_max = start_of_day(&self.timezone, next_day)
            .ok_or_else(|| google_calendar_error("Invalid local time"))?;

        let mut events = Vec::new();
        let mut page_token: Option<String> = None;

        loop {
            let mut url = self.calendar_url(calendar_id, Some("events"))?;
            {
                let mut query = url.query_pairs_mut();
                query
                    .append_pair("timeMin", &time_min.to_rfc3339())
                    .append_pair("timeMax", &time_max.to_rfc3339())
                    .append_pair("singleEvents", "true")
                    .append_pair("orderBy", "startTime");
                if let Some(token) = &page_token {
                    query.append_pair("pageToken", token);
                }
            }

            let response = self.get_json(url, calendar_id).await?;
            let items = response
                .get("items")
                .and_then(|i| i.as_array())
                .ok_or_else(|| google_calendar_error("No items in response"))?;

            for item in items {
                events.push(parse_event(item, &self.timezone)?);
            }

            page_token = response
                .get("nextPageToken")
                .and_then(|t| t.as_str())
                .map(|t| t.to_string());
            if page_token.is_none() {
                break;
            }
        }

        debug!("Fetched {} events for {} on {}", events.len(), calendar_id, date);
        Ok(events)
    }
}

/// Convert one item of an events list response
pub fn parse_event(event: &Value, tz: &Tz) -> BotResult<CalendarEvent> {
    let id = event.get("id").and_then(|id| id.as_str()).unwrap_or("").to_string();
    let title = event
        .get("summary")
        .and_then(|s| s.as_str())
        .unwrap_or("")
        .to_string();

    let start = parse_event_time(
        event
            .get("start")
            .ok_or_else(|| google_calendar_error(&format!("Event {} has no start", id)))?,
        tz,
    )?;
    let end = parse_event_time(
        event
            .get("end")
            .ok_or_else(|| google_calendar_error(&format!("Event {} has no end", id)))?,
        tz,
    )?;

    // Guests keep API order; fall back to the address when no name is set
    let attendees: Vec<String> = event
        .get("attendees")
        .and_then(|a| a.as_array())
        .map(|list| {
            list.iter()
                .filter_map(|attendee| {
                    attendee
                        .get("displayName")
                        .or_else(|| attendee.get("email"))
                        .and_then(|n| n.as_str())
                        .map(|n| n.to_string())
                })
                .collect()
        })
        .unwrap_or_default();

    Ok(CalendarEvent {
        id,
        title,
        start: start.instant,
        end: end.instant,
        all_day: start.date_only,
        attendees,
    })
}
