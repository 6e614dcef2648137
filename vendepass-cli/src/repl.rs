//! Interactive REPL.

use crate::commands::{format_response, format_session, parse_data_arg};
use colored::Colorize;
use rustyline::error::ReadlineError;
use rustyline::history::DefaultHistory;
use rustyline::{Config, Editor};
use serde_json::{Map, Value};
use vendepass_client::{run_session, Client, Credentials};

const HELP_TEXT: &str = r#"
Available commands:
  help                          Show this help

  login [user] [password]       Log in and remember the token
  logout [token]                Log out (defaults to the remembered token)
  session [user] [password]     Log in, then log out
  token                         Show the remembered token

  send <action> [data_json]     Send an arbitrary action
  auth <action> [data_json]     Send an action with the remembered token as Auth

  quit, exit                    Exit the REPL
"#;

/// REPL state carried between commands.
#[derive(Default)]
struct ReplState {
    token: Option<String>,
}

pub async fn run(client: Client) -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", "vendepass CLI".bold().cyan());
    println!("Server: {}", client.config().address());

    // Create readline editor
    let config = Config::builder()
        .history_ignore_space(true)
        .auto_add_history(true)
        .build();
    let mut rl: Editor<(), DefaultHistory> = Editor::with_config(config)?;

    // Load history
    let history_path = std::env::var("HOME")
        .map(|h| std::path::PathBuf::from(h).join(".vendepass_history"))
        .unwrap_or_else(|_| ".vendepass_history".into());
    let _ = rl.load_history(&history_path);

    println!("Type 'help' for available commands.\n");

    let mut state = ReplState::default();

    loop {
        let prompt = format!("{} ", "vendepass>".cyan());
        match rl.readline(&prompt) {
            Ok(line) => {
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }

                match execute_repl_command(&client, &mut state, line).await {
                    Ok(Some(output)) => println!("{}\n", output),
                    Ok(None) => break, // Exit command
                    Err(e) => println!("{}: {}\n", "Error".red(), e),
                }
            }
            Err(ReadlineError::Interrupted) => {
                println!("^C");
                continue;
            }
            Err(ReadlineError::Eof) => {
                println!("^D");
                break;
            }
            Err(err) => {
                println!("{}: {:?}", "Error".red(), err);
                break;
            }
        }
    }

    // Save history
    let _ = rl.save_history(&history_path);

    Ok(())
}

async fn execute_repl_command(
    client: &Client,
    state: &mut ReplState,
    line: &str,
) -> Result<Option<String>, Box<dyn std::error::Error>> {
    let parts: Vec<&str> = line.split_whitespace().collect();
    if parts.is_empty() {
        return Ok(Some(String::new()));
    }

    let cmd = parts[0].to_lowercase();
    let args = &parts[1..];

    match cmd.as_str() {
        "help" | "?" => Ok(Some(HELP_TEXT.to_string())),

        "quit" | "exit" | "q" => Ok(None),

        "login" | "li" => {
            let creds = credentials_from_args(args);
            let response = client.login(&creds.username, &creds.password).await?;
            match response.token() {
                Some(token) => {
                    state.token = Some(token.to_string());
                    Ok(Some(format!("{} {}", "Logged in, token:".green(), token.cyan())))
                }
                None => Ok(Some(format!(
                    "{}\n{}",
                    "No token in login response".yellow(),
                    format_response(&response)
                ))),
            }
        }

        "logout" | "lo" => {
            let token = match args.first() {
                Some(token) => token.to_string(),
                None => match state.token.clone() {
                    Some(token) => token,
                    None => {
                        return Ok(Some(
                            "Usage: logout <token> (no remembered token)".to_string(),
                        ))
                    }
                },
            };
            let response = client.logout(&token).await?;
            if state.token.as_deref() == Some(token.as_str()) {
                state.token = None;
            }
            Ok(Some(format_response(&response)))
        }

        "session" => {
            let creds = credentials_from_args(args);
            let outcome = run_session(client, &creds).await;
            Ok(Some(format_session(&outcome)))
        }

        "token" => Ok(Some(match &state.token {
            Some(token) => token.cyan().to_string(),
            None => "No token".yellow().to_string(),
        })),

        "send" | "s" => {
            if args.is_empty() {
                return Ok(Some("Usage: send <action> [data_json]".to_string()));
            }
            let data = data_from_args(&args[1..])?;
            let response = client.exchange(args[0], data).await?;
            Ok(Some(format_response(&response)))
        }

        "auth" => {
            if args.is_empty() {
                return Ok(Some("Usage: auth <action> [data_json]".to_string()));
            }
            let Some(token) = state.token.clone() else {
                return Ok(Some("Not logged in. Use 'login' first.".yellow().to_string()));
            };
            let data = data_from_args(&args[1..])?;
            let response = client.exchange_with_auth(args[0], data, &token).await?;
            Ok(Some(format_response(&response)))
        }

        _ => Ok(Some(format!(
            "Unknown command: {}. Type 'help' for help.",
            cmd
        ))),
    }
}

fn credentials_from_args(args: &[&str]) -> Credentials {
    let defaults = Credentials::default();
    Credentials::new(
        args.first().map(|s| s.to_string()).unwrap_or(defaults.username),
        args.get(1).map(|s| s.to_string()).unwrap_or(defaults.password),
    )
}

fn data_from_args(args: &[&str]) -> Result<Map<String, Value>, Box<dyn std::error::Error>> {
    if args.is_empty() {
        return Ok(Map::new());
    }
    parse_data_arg(&args.join(" "))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_credentials_from_args() {
        let creds = credentials_from_args(&[]);
        assert_eq!(creds, Credentials::default());

        let creds = credentials_from_args(&["maria"]);
        assert_eq!(creds.username, "maria");
        assert_eq!(creds.password, "senhaSegura79");

        let creds = credentials_from_args(&["maria", "segredo"]);
        assert_eq!(creds, Credentials::new("maria", "segredo"));
    }

    #[test]
    fn test_data_from_args() {
        assert!(data_from_args(&[]).unwrap().is_empty());

        let data = data_from_args(&[r#"{"Source":"#, r#""Recife","Dest":"Natal"}"#]).unwrap();
        assert_eq!(data["Source"], "Recife");
        assert_eq!(data["Dest"], "Natal");
    }

    #[tokio::test]
    async fn test_repl_help_and_quit() {
        let client = Client::default();
        let mut state = ReplState::default();

        let help = execute_repl_command(&client, &mut state, "help").await.unwrap();
        assert!(help.unwrap().contains("login"));

        let quit = execute_repl_command(&client, &mut state, "quit").await.unwrap();
        assert!(quit.is_none());
    }

    #[tokio::test]
    async fn test_repl_logout_without_token() {
        let client = Client::default();
        let mut state = ReplState::default();

        let out = execute_repl_command(&client, &mut state, "logout")
            .await
            .unwrap()
            .unwrap();
        assert!(out.starts_with("Usage: logout"));
    }
}
