use super::format::EventDisplayRecord;
use serde::Serialize;
use std::fmt;

/// Indicator for events spanning whole days
const ALL_DAY_LABEL: &str = "終日";
/// Indicator for events with a time range
const TIMED_LABEL: &str = "時間";
const ATTENDEES_LABEL: &str = "参加者";

/// ChatWork markup tags that change the message layout
const MARKUP_TAGS: &[&str] = &[
    "info", "title", "hr", "code", "qt", "to:", "toall", "rp", "picon", "preview", "download",
    "task",
];

/// Message posted to the room for one calendar day
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NotificationMessage {
    pub calendar_name: String,
    pub header: String,
    pub events: Vec<EventDisplayRecord>,
}

impl NotificationMessage {
    /// Pick the header variant matching `events` and build the message
    pub fn assemble(
        calendar_name: &str,
        header: &str,
        header_no_event: &str,
        events: Vec<EventDisplayRecord>,
    ) -> Self {
        let header = if events.is_empty() {
            header_no_event
        } else {
            header
        };

        Self {
            calendar_name: calendar_name.to_string(),
            header: header.to_string(),
            events,
        }
    }

    /// Render the ChatWork message body
    pub fn render(&self) -> String {
        let mut body = format!(
            "[info][title]{}[/title]{}\n",
            neutralize_markup(&self.header),
            neutralize_markup(&self.calendar_name)
        );
        for event in &self.events {
            body.push_str(&render_event(event));
        }
        body.push_str("[/info]");
        body
    }
}

impl fmt::Display for NotificationMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

fn render_event(event: &EventDisplayRecord) -> String {
    let indicator = if event.all_day {
        ALL_DAY_LABEL
    } else {
        TIMED_LABEL
    };

    let mut block = format!(
        "[hr]■ {}\n{}: {} 〜 {}\n",
        neutralize_markup(&event.title),
        indicator,
        event.start,
        event.end
    );
    if !event.attendees.is_empty() {
        block.push_str(&format!(
            "{}: {}\n",
            ATTENDEES_LABEL,
            neutralize_markup(&event.attendees.join(", "))
        ));
    }
    block
}

/// Swap the `[` of anything that reads as a ChatWork tag for a full-width bracket,
/// so calendar text cannot open or close blocks in the message
fn neutralize_markup(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for (i, c) in text.char_indices() {
        if c == '[' {
            let rest = text[i + 1..].trim_start_matches('/').to_ascii_lowercase();
            if MARKUP_TAGS.iter().any(|tag| rest.starts_with(tag)) {
                out.push('［');
                continue;
            }
        }
        out.push(c);
    }
    out
}
