//! vendepass-cli - Command-line interface for vendepass
//!
//! Provides both a REPL and one-shot command execution.

mod commands;
mod repl;

use clap::{Parser, Subcommand};
use colored::Colorize;
use std::path::PathBuf;
use std::time::Duration;
use tracing_subscriber::EnvFilter;
use vendepass_client::connection::DEFAULT_READ_BUFFER_SIZE;
use vendepass_client::{Client, ConnectionConfig};
use vendepass_protocol::{DEFAULT_HOST, DEFAULT_PORT};

#[derive(Parser)]
#[command(name = "vendepass-cli")]
#[command(about = "Command-line interface for the vendepass action server")]
#[command(version)]
struct Cli {
    /// Server host
    #[arg(long, default_value = DEFAULT_HOST, env = "VENDEPASS_HOST")]
    host: String,

    /// Server port
    #[arg(short, long, default_value_t = DEFAULT_PORT, env = "VENDEPASS_PORT")]
    port: u16,

    /// Connect timeout in seconds
    #[arg(long, default_value_t = 10, env = "VENDEPASS_CONNECT_TIMEOUT")]
    connect_timeout: u64,

    /// Receive timeout in seconds
    #[arg(long, default_value_t = 30, env = "VENDEPASS_READ_TIMEOUT")]
    read_timeout: u64,

    /// Size of the single response read, in bytes
    #[arg(long, default_value_t = DEFAULT_READ_BUFFER_SIZE, env = "VENDEPASS_READ_BUFFER_SIZE")]
    read_buffer_size: usize,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start interactive REPL
    Repl,

    /// Send an arbitrary action
    Send {
        /// Action name
        action: String,

        /// Data JSON object (or @file.json to read from file)
        data: Option<String>,

        /// Session token to send as Auth
        #[arg(short, long)]
        auth: Option<String>,
    },

    /// Log in and print the session token
    Login {
        /// Username
        #[arg(short, long, default_value = "pedrocosta", env = "VENDEPASS_USERNAME")]
        username: String,

        /// Password
        #[arg(short = 'P', long, default_value = "senhaSegura79", env = "VENDEPASS_PASSWORD")]
        password: String,
    },

    /// Log out a session
    Logout {
        /// Session token
        token: String,
    },

    /// Log in, then log out with the returned token
    Session {
        /// Username
        #[arg(short, long, default_value = "pedrocosta", env = "VENDEPASS_USERNAME")]
        username: String,

        /// Password
        #[arg(short = 'P', long, default_value = "senhaSegura79", env = "VENDEPASS_PASSWORD")]
        password: String,
    },

    /// Print the airport adjacency list from flight and airport files
    Routes {
        /// Flights JSON file
        #[arg(long, default_value = "internal/stubs/flights.json")]
        flights: PathBuf,

        /// Airports JSON file
        #[arg(long, default_value = "internal/stubs/airports.json")]
        airports: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();

    // Routes are computed locally (no server connection needed)
    if let Some(Commands::Routes { flights, airports }) = &cli.command {
        match commands::render_routes(flights, airports) {
            Ok(output) => println!("{}", output),
            Err(e) => {
                eprintln!("{}: {}", "Error".red(), e);
                std::process::exit(1);
            }
        }
        return Ok(());
    }

    let config = ConnectionConfig::new(cli.host.clone(), cli.port)
        .with_connect_timeout(Duration::from_secs(cli.connect_timeout))
        .with_receive_timeout(Duration::from_secs(cli.read_timeout))
        .with_read_buffer_size(cli.read_buffer_size);
    let client = Client::new(config);

    match cli.command {
        Some(Commands::Repl) | None => {
            repl::run(client).await?;
        }
        Some(Commands::Routes { .. }) => unreachable!(), // Already handled above
        Some(cmd) => match commands::execute(&client, cmd).await {
            Ok(output) => {
                println!("{}", output);
            }
            Err(e) => {
                eprintln!("{}: {}", "Error".red(), e);
                std::process::exit(1);
            }
        },
    }

    Ok(())
}
