use crate::components::CalendarEvent;
use chrono::NaiveDate;

/// Keep the events that belong to `date`, in source order.
///
/// A day query also returns the all-day event of the previous day, because its
/// span ends at 00:00 of `date`. Timed events are kept as returned; all-day
/// events are kept only when they start on `date`.
pub fn events_on_day(events: Vec<CalendarEvent>, date: NaiveDate) -> Vec<CalendarEvent> {
    events
        .into_iter()
        .filter(|event| !event.all_day || event.start.date_naive() == date)
        .collect()
}
