use crate::error::{config_error, env_error, BotResult};
use crate::utils::time::parse_time;
use chrono_tz::Tz;
use dotenvy::dotenv;
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::Path;

/// Default time zone used for day boundaries and date labels
pub const DEFAULT_TIMEZONE: &str = "Asia/Tokyo";

/// Default local time of the daily notification
pub const DEFAULT_NOTIFICATION_TIME: &str = "08:00";

/// Default timeout for calls to the calendar and chat APIs
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;

/// Optional file overriding the notification headers
pub const MESSAGES_FILE: &str = "config/messages.toml";

/// Main configuration structure for the notifier
#[derive(Debug, Clone)]
pub struct Config {
    /// Google Calendar API access token
    pub google_access_token: String,
    /// Google Calendar ID to report on
    pub google_calendar_id: String,
    /// ChatWork API token
    pub chatwork_api_token: String,
    /// ChatWork room that receives the notification
    pub chatwork_room_id: String,
    /// Time zone for day boundaries and date labels
    pub timezone: Tz,
    /// Local time of the daily notification in HH:MM format
    pub notification_time: String,
    /// Send notifications on Saturdays and Sundays too
    pub notify_on_weekends: bool,
    /// Timeout for each HTTP request in seconds
    pub http_timeout_secs: u64,
    /// Header shown when the day has events
    pub header: String,
    /// Header shown when the day has no events
    pub header_no_event: String,
}

/// Header overrides read from `config/messages.toml`
#[derive(Debug, Default, Deserialize)]
pub struct MessageTemplates {
    pub header: Option<String>,
    pub header_no_event: Option<String>,
}

impl Config {
    /// Load configuration from environment and config file
    pub fn load() -> BotResult<Self> {
        // Load .env file if it exists
        dotenv().ok();

        let mut config = Self::from_lookup(|key| env::var(key).ok())?;

        if Path::new(MESSAGES_FILE).exists() {
            let content = fs::read_to_string(MESSAGES_FILE)?;
            let templates = toml::from_str::<MessageTemplates>(&content)?;
            config.apply_templates(templates);
        }

        Ok(config)
    }

    /// Build the configuration from a key lookup, usually the process environment
    pub fn from_lookup<F>(lookup: F) -> BotResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &str| lookup(key).ok_or_else(|| env_error(key));

        // Required values
        let google_access_token = required("GOOGLE_ACCESS_TOKEN")?;
        let google_calendar_id = required("GOOGLE_CALENDAR_ID")?;
        let chatwork_api_token = required("CHATWORK_API_TOKEN")?;
        let chatwork_room_id = required("CHATWORK_ROOM_ID")?;
        if chatwork_room_id.is_empty() || !chatwork_room_id.chars().all(|c| c.is_ascii_digit()) {
            return Err(config_error(&format!(
                "Invalid CHATWORK_ROOM_ID (expected digits): {}",
                chatwork_room_id
            )));
        }

        let timezone_str =
            lookup("TIMEZONE").unwrap_or_else(|| String::from(DEFAULT_TIMEZONE));
        let timezone = timezone_str
            .parse::<Tz>()
            .map_err(|_| config_error(&format!("Invalid TIMEZONE: {}", timezone_str)))?;

        let notification_time = lookup("NOTIFICATION_TIME")
            .unwrap_or_else(|| String::from(DEFAULT_NOTIFICATION_TIME));
        if parse_time(&notification_time).is_none() {
            return Err(config_error(&format!(
                "Invalid NOTIFICATION_TIME (expected HH:MM): {}",
                notification_time
            )));
        }

        let notify_on_weekends = match lookup("NOTIFY_ON_WEEKENDS") {
            Some(value) => parse_bool(&value).ok_or_else(|| {
                config_error(&format!("Invalid NOTIFY_ON_WEEKENDS: {}", value))
            })?,
            None => false,
        };

        let http_timeout_secs = match lookup("HTTP_TIMEOUT_SECS") {
            Some(value) => value
                .parse::<u64>()
                .map_err(|_| config_error(&format!("Invalid HTTP_TIMEOUT_SECS: {}", value)))?,
            None => DEFAULT_HTTP_TIMEOUT_SECS,
        };

        Ok(Config {
            google_access_token,
            google_calendar_id,
            chatwork_api_token,
            chatwork_room_id,
            timezone,
            notification_time,
            notify_on_weekends,
            http_timeout_secs,
            header: lookup("EVENTS_HEADER").unwrap_or_default(),
            header_no_event: lookup("EVENTS_HEADER_NO_EVENT").unwrap_or_default(),
        })
    }

    /// Override headers with values from the messages file
    pub fn apply_templates(&mut self, templates: MessageTemplates) {
        if let Some(header) = templates.header {
            self.header = header;
        }
        if let Some(header_no_event) = templates.header_no_event {
            self.header_no_event = header_no_event;
        }
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use std::collections::HashMap;

    fn base_env() -> HashMap<&'static str, String> {
        HashMap::from([
            ("GOOGLE_ACCESS_TOKEN", "ya29.token".to_string()),
            ("GOOGLE_CALENDAR_ID", "team@example.com".to_string()),
            ("CHATWORK_API_TOKEN", "cw-token".to_string()),
            ("CHATWORK_ROOM_ID", "123456".to_string()),
        ])
    }

    fn load(vars: &HashMap<&'static str, String>) -> BotResult<Config> {
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = load(&base_env()).unwrap();
        assert_eq!(config.timezone, chrono_tz::Asia::Tokyo);
        assert_eq!(config.notification_time, "08:00");
        assert!(!config.notify_on_weekends);
        assert_eq!(config.http_timeout_secs, 30);
        assert_eq!(config.header, "");
        assert_eq!(config.header_no_event, "");
    }

    #[test]
    fn test_missing_required_variable() {
        let mut vars = base_env();
        vars.remove("CHATWORK_ROOM_ID");
        match load(&vars) {
            Err(Error::Environment(msg)) => assert!(msg.contains("CHATWORK_ROOM_ID")),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_invalid_values() {
        let mut vars = base_env();
        vars.insert("TIMEZONE", "Mars/Olympus".to_string());
        assert!(matches!(load(&vars), Err(Error::Config(_))));

        let mut vars = base_env();
        vars.insert("NOTIFICATION_TIME", "25:00".to_string());
        assert!(matches!(load(&vars), Err(Error::Config(_))));

        let mut vars = base_env();
        vars.insert("NOTIFY_ON_WEEKENDS", "sometimes".to_string());
        assert!(matches!(load(&vars), Err(Error::Config(_))));

        let mut vars = base_env();
        vars.insert("HTTP_TIMEOUT_SECS", "-1".to_string());
        assert!(matches!(load(&vars), Err(Error::Config(_))));

        let mut vars = base_env();
        vars.insert("CHATWORK_ROOM_ID", "abc".to_string());
        assert!(matches!(load(&vars), Err(Error::Config(_))));

        let mut vars = base_env();
        vars.insert("CHATWORK_ROOM_ID", String::new());
        assert!(matches!(load(&vars), Err(Error::Config(_))));
    }

    #[test]
    fn test_templates_override_headers() {
        let mut vars = base_env();
        vars.insert("EVENTS_HEADER", "from env".to_string());
        vars.insert("EVENTS_HEADER_NO_EVENT", "nothing (env)".to_string());
        let mut config = load(&vars).unwrap();

        let templates: MessageTemplates = toml::from_str(r#"header = "今日の予定""#).unwrap();
        config.apply_templates(templates);

        assert_eq!(config.header, "今日の予定");
        assert_eq!(config.header_no_event, "nothing (env)");
    }
}
