//! Homework Bot
//!
//! A long-running worker that watches the review status of a homework
//! submission and reports changes to a Telegram chat.
//!
//! Architecture:
//! - Configuration: flags and environment (optionally from `.env`)
//! - Repositories: trait seams over the homework API and Bot API clients
//! - Services: message delivery to the configured chat
//! - Scheduler: the fixed-interval poll loop
//!
//! Every poll cycle runs to completion before the next one starts. Failed
//! cycles are logged and reported; only missing configuration is fatal.

mod config;
mod logging;
mod repository;
mod scheduler;
mod service;

use anyhow::{Context, Result};
use clap::Parser;
use homework_client::{PracticumClient, TelegramClient, build_http_client};
use homework_core::domain::cursor::PollCursor;
use std::sync::Arc;
use tracing::{error, info};

use crate::config::{Args, Config};
use crate::repository::{HomeworkRepository, MessageRepository};
use crate::scheduler::{StatusPoller, current_timestamp};
use crate::service::Notifier;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let args = Args::parse();

    let _log_guard = logging::init(args.log_dir.as_deref())?;

    info!("Starting homework bot");

    let config = Config::from_args(args).inspect_err(|e| {
        error!("Refusing to start: {}", e);
    })?;
    info!(
        "Loaded configuration: retry_interval={:?}, request_timeout={:?}",
        config.retry_interval, config.request_timeout
    );

    // Install signal handlers before the first cycle starts
    let shutdown = tokio::spawn(shutdown_signal());

    let http = build_http_client(config.request_timeout).context("Failed to build HTTP client")?;

    let practicum = PracticumClient::new(
        config.endpoint.clone(),
        config.practicum_token.clone(),
        http.clone(),
    );
    info!("Polling homework statuses at {}", practicum.endpoint());
    let homeworks: Arc<dyn HomeworkRepository> = Arc::new(practicum);
    let messenger: Arc<dyn MessageRepository> = Arc::new(TelegramClient::new(
        config.telegram_api_url.clone(),
        config.telegram_token.clone(),
        http,
    ));
    let notifier = Notifier::new(messenger, config.telegram_chat_id.clone());
    info!("Notifications go to chat {}", notifier.recipient());

    let cursor = PollCursor::new(config.from_date.unwrap_or_else(current_timestamp));
    let mut poller = StatusPoller::new(homeworks, notifier, config.retry_interval, cursor);

    if config.once {
        info!("Running a single poll cycle");
        poller.tick().await;
        return Ok(());
    }

    poller
        .run(async {
            let _ = shutdown.await;
        })
        .await;

    info!(
        "Homework bot stopped (cursor: {}, tracked submissions: {})",
        poller.cursor(),
        poller.state().len()
    );
    Ok(())
}

/// Resolves on Ctrl+C or SIGTERM
async fn shutdown_signal() {
    use tokio::signal;

    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                error!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received Ctrl+C, shutting down"),
        _ = terminate => info!("Received SIGTERM, shutting down"),
    }
}
