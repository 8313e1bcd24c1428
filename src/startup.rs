use calendar_notifier::components::{ChatworkClient, GoogleCalendarClient};
use calendar_notifier::config::Config;
use calendar_notifier::error::{BotResult, Error};
use calendar_notifier::notifier::{AlwaysNotify, Notifier, NotifyOptions, NotifyOutcome};
use calendar_notifier::utils::time::{calculate_wait_duration, next_notification_time};
use chrono::Utc;
use std::time::Duration;
use tokio::sync::oneshot;
use tokio::time::sleep;
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use crate::shutdown;

/// Initialize logging with environment-based configuration
pub fn init_logging() -> miette::Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,reqwest=warn,hyper=warn")),
        )
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| Error::Other(format!("Failed to set up logging: {}", e)))?;

    Ok(())
}

/// Load the application config
pub fn load_config() -> miette::Result<Config> {
    match Config::load() {
        Ok(config) => {
            info!(
                "Loaded configuration for calendar {} in {}",
                config.google_calendar_id, config.timezone
            );
            Ok(config)
        }
        Err(e) => {
            error!("Failed to load configuration: {:?}", e);
            Err(e.into())
        }
    }
}

type LiveNotifier = Notifier<GoogleCalendarClient, ChatworkClient>;

/// Wire the API clients and gate from the config
fn build_notifier(config: &Config) -> BotResult<LiveNotifier> {
    let timeout = Duration::from_secs(config.http_timeout_secs);
    let source = GoogleCalendarClient::new(&config.google_access_token, config.timezone, timeout)?;
    let sink = ChatworkClient::new(&config.chatwork_api_token, timeout)?;

    let notifier = Notifier::new(source, sink, config.timezone);
    if config.notify_on_weekends {
        Ok(notifier.with_gate(AlwaysNotify))
    } else {
        Ok(notifier)
    }
}

fn log_outcome(outcome: &NotifyOutcome) {
    match outcome {
        NotifyOutcome::Sent { date, event_count } => {
            info!("Notification for {} sent ({} events)", date, event_count)
        }
        NotifyOutcome::Suppressed { date } => info!("No notification sent for {}", date),
    }
}

/// Send one notification
pub async fn run_once(
    config: &Config,
    date: Option<&str>,
    header: Option<String>,
    header_no_event: Option<String>,
) -> miette::Result<()> {
    // Reject bad options before touching either API
    let options = NotifyOptions::parse(date, header, header_no_event)?
        .or_headers(&config.header, &config.header_no_event);
    let notifier = build_notifier(config)?;

    let outcome = notifier
        .notify(&config.google_calendar_id, &config.chatwork_room_id, &options)
        .await?;
    log_outcome(&outcome);

    Ok(())
}

/// Print the message that would be sent
pub async fn preview(config: &Config, date: Option<&str>, json: bool) -> miette::Result<()> {
    let options =
        NotifyOptions::parse(date, None, None)?.or_headers(&config.header, &config.header_no_event);
    let notifier = build_notifier(config)?;

    let message = notifier
        .build_message(&config.google_calendar_id, &options)
        .await?;

    if json {
        let rendered = serde_json::to_string_pretty(&message).map_err(Error::from)?;
        println!("{}", rendered);
    } else {
        println!("{}", message);
    }

    Ok(())
}

/// Send the notification every day at the configured time until a shutdown signal
pub async fn run_scheduler(config: Config) -> miette::Result<()> {
    let notifier = build_notifier(&config)?;
    let options = NotifyOptions::default().or_headers(&config.header, &config.header_no_event);

    // Create shutdown channel
    let (shutdown_send, mut shutdown_recv) = oneshot::channel();

    // Spawn signal handler task
    tokio::spawn(async move {
        shutdown::handle_signals(shutdown_send).await;
    });

    loop {
        let now = Utc::now().with_timezone(&config.timezone);
        let next = match next_notification_time(now, &config.notification_time) {
            Some(time) => time,
            None => {
                error!(
                    "Failed to calculate next notification time from {}",
                    config.notification_time
                );
                // Retry in an hour
                tokio::select! {
                    _ = sleep(Duration::from_secs(3600)) => continue,
                    _ = &mut shutdown_recv => break,
                }
            }
        };

        info!("Next notification scheduled for {}", next);
        let wait = calculate_wait_duration(&now, &next);

        tokio::select! {
            _ = sleep(Duration::from_secs(wait)) => {}
            _ = &mut shutdown_recv => break,
        }

        let run_options = NotifyOptions {
            date: Some(next.date_naive()),
            ..options.clone()
        };
        match notifier
            .notify(&config.google_calendar_id, &config.chatwork_room_id, &run_options)
            .await
        {
            Ok(outcome) => log_outcome(&outcome),
            Err(e) => error!("Failed to send daily notification: {}", e),
        }
    }

    info!("Scheduler stopped");
    Ok(())
}
