mod config;
mod core;
mod error;
mod logging;
mod models;
mod providers;

extern crate dotenv;

use dotenv::dotenv;
use tracing::{debug, error, info};

use crate::config::Config;
use crate::core::runtime::Runtime;
use crate::models::Checkpoint;
use crate::providers::{practicum::Practicum, telegram::Telegram};

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    let dotenv_result = dotenv();
    logging::init(logging::log_file_from_env())?;
    if let Err(e) = dotenv_result {
        debug!("No .env file loaded: {}", e);
    }

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!(severity = "critical", "Refusing to start: {}", e);
            return Err(e.into());
        }
    };

    info!(
        "Polling {} every {:?}, notifying chat {:?}",
        config.endpoint, config.retry_interval, config.chat
    );

    let mut runtime = Runtime::new(
        Practicum::from_config(&config),
        Telegram::new(&config.telegram_token, &config.chat),
        Checkpoint::now(),
        config.retry_interval,
    )
    .with_failure_reports(config.notify_on_failure);

    runtime
        .run_until(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                error!("Failed to listen for the interrupt signal: {}", e);
                std::future::pending::<()>().await;
            }
        })
        .await;

    Ok(())
}
