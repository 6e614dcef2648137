//! vendepass - login/logout driver
//!
//! Logs in against a vendepass server, then logs out with the returned token.

use tracing_subscriber::EnvFilter;
use vendepass_client::config::CONFIG_ENV;
use vendepass_client::{run_session, Client, Config, SessionOutcome};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Load configuration (from file if VENDEPASS_CONFIG is set, then env overrides)
    let config = match Config::load() {
        Ok(c) => c,
        Err(e) => {
            tracing::error!("Failed to load config from ${}: {}", CONFIG_ENV, e);
            return Err(e.into());
        }
    };

    tracing::info!("Server: {}:{}", config.server.host, config.server.port);

    let client = Client::new(config.connection());

    match run_session(&client, &config.credentials).await {
        SessionOutcome::LoggedOut { login, logout } => {
            println!("Login response: {}", serde_json::to_string(&login)?);
            println!("Logout response: {}", serde_json::to_string(&logout)?);
        }
        SessionOutcome::TokenNotFound { login } => {
            println!("Login response: {}", serde_json::to_string(&login)?);
            println!("Token not found for logout");
        }
        SessionOutcome::LoginFailed(e) => {
            println!("Failed to receive login response: {}", e);
        }
        SessionOutcome::LogoutFailed { login, error } => {
            println!("Login response: {}", serde_json::to_string(&login)?);
            println!("Logout failed: {}", error);
        }
    }

    Ok(())
}
