use std::time::Duration;

use hw_common::config::AppConfig;
use hw_notifier::telegram::TelegramNotifier;
use hw_poller::fetch::ReqwestFetcher;
use hw_poller::logging;
use hw_poller::supervisor::Supervisor;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    let config = AppConfig::from_env()?;

    // Initialize tracing
    logging::init(&config)?;

    tracing::info!("Homework status bot starting...");

    let timeout = Duration::from_secs(config.http_timeout_secs);
    let fetcher = ReqwestFetcher::new(timeout)?;
    let notifier = TelegramNotifier::new(
        &config.telegram_api_url,
        config.credentials.telegram_token(),
        timeout,
    )?;

    let mut supervisor = Supervisor::new(&config, fetcher, notifier);

    // Run with graceful shutdown on Ctrl+C
    tokio::select! {
        result = supervisor.run() => {
            if let Err(e) = result {
                return Err(e.into());
            }
        }
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("Received shutdown signal, stopping gracefully...");
        }
    }

    tracing::info!("Homework status bot stopped.");
    Ok(())
}
