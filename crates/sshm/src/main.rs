// SPDX-FileCopyrightText: 2026 sshm Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! sshm - a local vault for SSH logins.
//!
//! This is the binary entry point.

mod commands;
mod error;
mod launch;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use colored::Colorize;

use crate::error::CliError;

/// sshm - keep SSH logins and their secrets in a local encrypted vault.
#[derive(Parser, Debug)]
#[command(name = "sshm", version, about, long_about = None)]
struct Cli {
    /// Read configuration from this file instead of the standard locations.
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Initialize the database.
    DbInit,
    /// Reset the database, deleting every profile and login.
    DbReset {
        /// Skip the confirmation prompt.
        #[arg(long)]
        yes: bool,
    },
    /// Create a profile protected by a master password.
    InitProfile {
        /// Profile name (defaults to the configured profile or your login name).
        #[arg(long)]
        name: Option<String>,
    },
    /// Add a new SSH login.
    Add {
        /// Nickname for the login.
        name: String,
        /// Host address for this connection.
        #[arg(long)]
        host: String,
        /// User to connect as on the remote host.
        #[arg(long)]
        username: String,
        /// Profile that will own the login.
        #[arg(long)]
        profile: Option<String>,
        /// Prompt for a secret to store with the login.
        #[arg(long)]
        with_secret: bool,
    },
    /// List the logins of a profile.
    List {
        #[arg(long)]
        profile: Option<String>,
    },
    /// Connect to a stored login.
    Ssh {
        /// Nickname of the login to connect to.
        #[arg(long)]
        name: String,
        /// Profile that owns the login.
        #[arg(long)]
        profile: Option<String>,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = match sshm_config::load_and_validate(cli.config.as_deref()) {
        Ok(config) => config,
        Err(errors) => {
            sshm_config::render_errors(&errors);
            std::process::exit(1);
        }
    };

    init_tracing(&config.log_level);

    if let Err(e) = run(cli.command, &config).await {
        eprintln!("{}: {e}", "error".red().bold());
        std::process::exit(1);
    }
}

async fn run(command: Commands, config: &sshm_config::SshmConfig) -> Result<(), CliError> {
    match command {
        Commands::DbInit => commands::db_init(config).await,
        Commands::DbReset { yes } => commands::db_reset(config, yes).await,
        Commands::InitProfile { name } => commands::init_profile(config, name.as_deref()).await,
        Commands::Add {
            name,
            host,
            username,
            profile,
            with_secret,
        } => {
            commands::add(
                config,
                &name,
                &host,
                &username,
                profile.as_deref(),
                with_secret,
            )
            .await
        }
        Commands::List { profile } => commands::list(config, profile.as_deref()).await,
        Commands::Ssh { name, profile } => commands::ssh(config, &name, profile.as_deref()).await,
    }
}

/// Install the tracing subscriber. `RUST_LOG` overrides the configured level.
///
/// Output goes to stderr so stdout carries only command output.
fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("sshm={log_level},warn")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .init();
}
