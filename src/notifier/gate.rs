use chrono::{Datelike, NaiveDate, Weekday};

/// Decides whether a notification goes out on a given day
pub trait NotificationGate: Send + Sync {
    fn should_notify(&self, today: NaiveDate) -> bool;
}

/// Suppresses notifications on Saturdays and Sundays
#[derive(Debug, Clone, Copy, Default)]
pub struct WeekdayGate;

impl NotificationGate for WeekdayGate {
    fn should_notify(&self, today: NaiveDate) -> bool {
        !matches!(today.weekday(), Weekday::Sat | Weekday::Sun)
    }
}

/// Lets every day through
#[derive(Debug, Clone, Copy, Default)]
pub struct AlwaysNotify;

impl NotificationGate for AlwaysNotify {
    fn should_notify(&self, _today: NaiveDate) -> bool {
        true
    }
}
