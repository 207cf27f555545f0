mod api_client;
mod bot;
mod config;
mod error;
mod homework;
mod logging;
mod poller;

use anyhow::Result;
use api_client::ApiClient;
use bot::TelegramNotifier;
use config::Config;
use poller::Poller;
use teloxide::Bot;
use tracing::{error, info};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    // Initialize logging
    let _log_guard = logging::init()?;

    // Load configuration
    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("Invalid configuration: {}", e);
            return Err(e.into());
        }
    };

    info!("Starting homework bot...");
    info!("API endpoint: {}", config.endpoint);

    let notifier = TelegramNotifier::new(Bot::new(&config.telegram_token), config.recipient());
    notifier.check().await;

    let client = ApiClient::new(config.endpoint.clone(), config.practicum_token.clone());
    let mut poller = Poller::new(client, notifier, config.retry_period);
    poller.run().await;

    info!("Homework bot stopped");
    Ok(())
}
