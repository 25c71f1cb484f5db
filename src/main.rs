//! Jan Adhikar server: legal-aid consultations between citizens and lawyers.
//!
//! Main entry point that loads configuration, initializes logging, opens the
//! configured stores, and serves the HTTP API.

use tracing_subscriber::{EnvFilter, fmt};

use adhikar_core::config::AppConfig;
use adhikar_core::error::AppError;
use adhikar_database::Stores;

#[tokio::main]
async fn main() {
    let env = std::env::var("ADHIKAR_ENV").unwrap_or_else(|_| "development".to_string());

    let config = match AppConfig::load(&env) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    init_logging(&config);
    tracing::info!(env = %env, version = env!("CARGO_PKG_VERSION"), "Configuration loaded");

    if let Err(e) = run(config).await {
        tracing::error!(error = %e, "Server error");
        std::process::exit(1);
    }
}

/// Initialize tracing. `RUST_LOG` overrides the configured level.
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .with_thread_ids(true)
                .init();
        }
        _ => {
            fmt()
                .pretty()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
    }
}

async fn run(config: AppConfig) -> Result<(), AppError> {
    let stores = Stores::from_config(&config.store, &config.database).await?;
    adhikar_api::run_server(config, stores).await
}
