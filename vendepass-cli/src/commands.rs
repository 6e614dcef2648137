//! Command execution.

use crate::Commands;
use colored::Colorize;
use serde_json::{Map, Value};
use std::path::Path;
use vendepass_client::{run_session, Client, Credentials, SessionOutcome};
use vendepass_protocol::ResponseEnvelope;

/// Executes a command and returns the formatted output.
pub async fn execute(client: &Client, cmd: Commands) -> Result<String, Box<dyn std::error::Error>> {
    match cmd {
        Commands::Repl => unreachable!(),

        // Routes are handled directly in main.rs (no server connection needed)
        Commands::Routes { .. } => unreachable!(),

        Commands::Send { action, data, auth } => {
            let data = data
                .map(|d| parse_data_arg(&d))
                .transpose()?
                .unwrap_or_default();

            tracing::debug!("Sending action {}", action);
            let response = match auth {
                Some(token) => client.exchange_with_auth(&action, data, &token).await?,
                None => client.exchange(&action, data).await?,
            };
            Ok(format_response(&response))
        }

        Commands::Login { username, password } => {
            let response = client.login(&username, &password).await?;
            match response.token() {
                Some(token) => Ok(format!("{} {}", "Token:".green(), token.cyan())),
                None => Ok(format_response(&response)),
            }
        }

        Commands::Logout { token } => {
            let response = client.logout(&token).await?;
            Ok(format_response(&response))
        }

        Commands::Session { username, password } => {
            let outcome = run_session(client, &Credentials::new(username, password)).await;
            Ok(format_session(&outcome))
        }
    }
}

/// Renders the airport adjacency listing from the two data files.
pub fn render_routes(
    flights: &Path,
    airports: &Path,
) -> Result<String, Box<dyn std::error::Error>> {
    let lines = vendepass_routes::render_files(flights, airports)?;
    Ok(lines.join("\n"))
}

/// Formats a session outcome as one diagnostic line per step.
pub fn format_session(outcome: &SessionOutcome) -> String {
    match outcome {
        SessionOutcome::LoggedOut { login, logout } => format!(
            "{} {}\n{} {}",
            "Login response:".green(),
            compact_json(login),
            "Logout response:".green(),
            compact_json(logout)
        ),
        SessionOutcome::TokenNotFound { login } => format!(
            "{} {}\n{}",
            "Login response:".green(),
            compact_json(login),
            "Token not found for logout".yellow()
        ),
        SessionOutcome::LoginFailed(e) => {
            format!("{}: {}", "Failed to receive login response".red(), e)
        }
        SessionOutcome::LogoutFailed { login, error } => format!(
            "{} {}\n{}: {}",
            "Login response:".green(),
            compact_json(login),
            "Logout failed".red(),
            error
        ),
    }
}

/// Formats a response for display, flagging server-reported errors.
pub fn format_response(response: &ResponseEnvelope) -> String {
    match response.error() {
        Some(msg) => format!(
            "{}: {}\n{}",
            "Server error".red(),
            msg,
            format_json(&response.to_value())
        ),
        None => format_json(&response.to_value()),
    }
}

/// Parses a `Data` argument (either an inline JSON object or @file.json).
pub fn parse_data_arg(arg: &str) -> Result<Map<String, Value>, Box<dyn std::error::Error>> {
    let value: Value = if let Some(path) = arg.strip_prefix('@') {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content)?
    } else {
        serde_json::from_str(arg)?
    };

    match value {
        Value::Object(map) => Ok(map),
        other => Err(format!("data must be a JSON object, got {}", other).into()),
    }
}

fn compact_json(response: &ResponseEnvelope) -> String {
    serde_json::to_string(response).unwrap_or_else(|_| response.to_value().to_string())
}

/// Formats JSON for display.
pub fn format_json(value: &Value) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
}
