//! Hooklens CLI - Terminal dashboard for a webhook relay
//!
//! Usage:
//!   hooklens watch <RELAY_URL>         Open the live dashboard
//!   hooklens ls <RELAY_URL>            List captured requests
//!   hooklens show <RELAY_URL> <ID>     Print one request in full
//!   hooklens delete <RELAY_URL> <ID>   Delete a stored request
//!   hooklens replay <RELAY_URL> <ID>   Replay a request to the forward target

mod commands;
mod relay;
mod tui;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "hooklens")]
#[command(author = "Hooklens Team")]
#[command(version)]
#[command(about = "Inspect webhook deliveries captured by a relay", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Open the live dashboard for a relay
    Watch {
        /// Base URL of the relay, e.g. http://127.0.0.1:8080
        relay: String,
    },

    /// List captured requests
    Ls {
        /// Base URL of the relay
        relay: String,
    },

    /// Print one captured request in full
    Show {
        /// Base URL of the relay
        relay: String,

        /// Request ID (as shown in the table)
        id: String,
    },

    /// Delete a stored request
    Delete {
        /// Base URL of the relay
        relay: String,

        /// Request ID
        id: String,
    },

    /// Replay a stored request to the relay's forward target
    Replay {
        /// Base URL of the relay
        relay: String,

        /// Request ID
        id: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("{},hooklens_cli=info", log_level).into()),
        )
        .with(tracing_subscriber::fmt::layer().without_time())
        .init();

    match cli.command {
        Commands::Watch { relay } => {
            commands::watch::run(&relay).await?;
        }

        Commands::Ls { relay } => {
            commands::requests::list(&relay).await?;
        }

        Commands::Show { relay, id } => {
            commands::requests::show(&relay, &id).await?;
        }

        Commands::Delete { relay, id } => {
            commands::requests::delete(&relay, &id).await?;
        }

        Commands::Replay { relay, id } => {
            commands::requests::replay(&relay, &id).await?;
        }
    }

    Ok(())
}
