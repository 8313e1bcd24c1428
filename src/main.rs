mod shutdown;
mod startup;

use clap::{Parser, Subcommand};
use tracing::info;

#[derive(Parser)]
#[command(name = "calendar-notifier")]
#[command(about = "Post a Google Calendar day's events to a ChatWork room")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Send the notification once
    Notify {
        /// Day to report (YYYY-MM-DD), today when omitted
        #[arg(short, long)]
        date: Option<String>,

        /// Header shown when the day has events
        #[arg(long)]
        header: Option<String>,

        /// Header shown when the day has no events
        #[arg(long)]
        header_no_event: Option<String>,
    },
    /// Print the message without sending it
    Preview {
        /// Day to report (YYYY-MM-DD), today when omitted
        #[arg(short, long)]
        date: Option<String>,

        /// Print the message as JSON
        #[arg(long)]
        json: bool,
    },
    /// Send the notification every day at NOTIFICATION_TIME
    Schedule,
}

#[tokio::main]
async fn main() -> miette::Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    startup::init_logging()?;

    info!("Starting calendar notifier");

    // Load configuration
    let config = startup::load_config()?;

    match cli.command {
        Commands::Notify {
            date,
            header,
            header_no_event,
        } => startup::run_once(&config, date.as_deref(), header, header_no_event).await,
        Commands::Preview { date, json } => {
            startup::preview(&config, date.as_deref(), json).await
        }
        Commands::Schedule => startup::run_scheduler(config).await,
    }
}
