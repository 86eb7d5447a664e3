//! Veilpay Demo CLI
//!
//! Command-line interface for testing and demonstrating token-commitment
//! transfers against a local gateway.

use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;
mod ui;

const DEFAULT_API_URL: &str = "http://localhost:8001";

#[derive(Parser)]
#[command(name = "veilpay-demo")]
#[command(about = "Veilpay Demo CLI - Transfer token commitments between registered users", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Custom storage directory (can also be set via VEILPAY_DEMO_DIR env var)
    #[arg(long, global = true)]
    storage_dir: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Transfer two commitments, splitting them between recipient and change
    Transfer {
        /// Commitment ids to consume, e.g. "0,1" (prompted when omitted)
        #[arg(short, long)]
        commitments: Option<String>,

        /// Amount to transfer (prompted when omitted)
        #[arg(short, long)]
        amount: Option<u128>,

        /// Registered name of the recipient (prompted when omitted)
        #[arg(short, long)]
        recipient: Option<String>,

        /// Gateway base URL
        #[arg(long, default_value = DEFAULT_API_URL)]
        api_url: String,
    },

    /// List the commitments held by the current user
    Commitments {
        /// Filter by value, matched as a substring
        #[arg(short, long)]
        search: Option<String>,

        /// Gateway base URL
        #[arg(long, default_value = DEFAULT_API_URL)]
        api_url: String,
    },

    /// List the registered recipient names
    Users {
        /// Gateway base URL
        #[arg(long, default_value = DEFAULT_API_URL)]
        api_url: String,
    },

    /// Show recorded transfers
    History {
        /// Transfer ID to show details for
        #[arg(short, long)]
        id: Option<String>,
    },

    /// Manage cached token display info
    Token {
        #[command(subcommand)]
        action: TokenAction,
    },

    /// Show the overview page
    Overview {
        /// Tab to preselect
        #[arg(long, default_value = "ft-commitment")]
        tab: String,
    },
}

#[derive(Subcommand)]
enum TokenAction {
    /// Cache the token name and symbol
    Set {
        /// Token name
        #[arg(long)]
        name: Option<String>,

        /// Token symbol
        #[arg(long)]
        symbol: Option<String>,
    },

    /// Show the cached token info
    Show,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    if cli.verbose {
        tracing_subscriber::fmt()
            .with_env_filter("veilpay_cli=debug,veilpay_core=debug")
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter("veilpay_cli=info,veilpay_core=warn")
            .init();
    }

    // Setup storage directory
    let storage_dir = if let Some(dir) = cli.storage_dir {
        std::path::PathBuf::from(dir)
    } else if let Ok(dir) = std::env::var("VEILPAY_DEMO_DIR") {
        std::path::PathBuf::from(dir)
    } else {
        dirs::data_local_dir()
            .unwrap_or_else(|| std::path::PathBuf::from("."))
            .join("veilpay-demo")
    };

    // Dispatch commands
    match cli.command {
        Commands::Transfer {
            commitments,
            amount,
            recipient,
            api_url,
        } => {
            commands::transfer::run(
                &storage_dir,
                &api_url,
                commitments,
                amount,
                recipient,
                cli.verbose,
            )
            .await?;
        }
        Commands::Commitments { search, api_url } => {
            commands::commitments::run(&storage_dir, &api_url, search.as_deref(), cli.verbose)
                .await?;
        }
        Commands::Users { api_url } => {
            commands::users::run(&api_url, cli.verbose).await?;
        }
        Commands::History { id } => {
            if let Some(transfer_id) = id {
                commands::history::show(&storage_dir, &transfer_id, cli.verbose).await?;
            } else {
                commands::history::run(&storage_dir, cli.verbose).await?;
            }
        }
        Commands::Token { action } => match action {
            TokenAction::Set { name, symbol } => {
                commands::token::set(
                    &storage_dir,
                    name.as_deref(),
                    symbol.as_deref(),
                    cli.verbose,
                )
                .await?;
            }
            TokenAction::Show => {
                commands::token::show(&storage_dir, cli.verbose).await?;
            }
        },
        Commands::Overview { tab } => {
            commands::overview::run(&storage_dir, &tab, cli.verbose).await?;
        }
    }

    Ok(())
}
