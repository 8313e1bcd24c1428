use miette::{Diagnostic, Result};
use thiserror::Error;

/// Main error type for the notifier
#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    #[error("Not found: {0}")]
    #[diagnostic(code(notifier::not_found))]
    NotFound(String),

    #[error("Delivery error: {0}")]
    #[diagnostic(code(notifier::delivery))]
    Delivery(String),

    #[error("Configuration error: {0}")]
    #[diagnostic(code(notifier::config))]
    Config(String),

    #[error("Environment error: {0}")]
    #[diagnostic(code(notifier::environment))]
    Environment(String),

    #[error("Google Calendar API error: {0}")]
    #[diagnostic(code(notifier::google_calendar))]
    GoogleCalendar(String),

    #[error(transparent)]
    #[diagnostic(code(notifier::io))]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    #[diagnostic(code(notifier::serialization))]
    Serialization(String),

    #[error("Other error: {0}")]
    #[diagnostic(code(notifier::other))]
    Other(String),
}

// Implement From for TOML deserialization errors
impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Serialization(err.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Serialization(err.to_string())
    }
}

/// Type alias for Result with our Error type
pub type BotResult<T> = Result<T, Error>;

/// Helper to create environment errors
pub fn env_error(var: &str) -> Error {
    Error::Environment(format!("Missing environment variable: {}", var))
}

/// Helper to create configuration errors
pub fn config_error(message: &str) -> Error {
    Error::Config(message.to_string())
}

/// Helper to create not-found errors
pub fn not_found_error(message: &str) -> Error {
    Error::NotFound(message.to_string())
}

/// Helper to create delivery errors
pub fn delivery_error(message: &str) -> Error {
    Error::Delivery(message.to_string())
}

/// Helper to create Google Calendar errors
pub fn google_calendar_error(message: &str) -> Error {
    Error::GoogleCalendar(message.to_string())
}
