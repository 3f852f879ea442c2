// SPDX-FileCopyrightText: 2026 sshm Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Building and running the `ssh` process for a resolved login.
//!
//! A stored secret is handed to `sshpass -e` through the `SSHPASS`
//! environment variable so it never appears on the command line. Without a
//! secret, and when running inside tmux, the session opens in a new pane.

use std::process::{Command, ExitStatus};

use secrecy::ExposeSecret;
use sshm_config::model::LauncherConfig;
use sshm_vault::ConnectionTarget;
use tracing::debug;

use crate::error::CliError;

/// Environment variable `sshpass -e` reads the password from.
pub const SSHPASS_ENV: &str = "SSHPASS";

/// Whether the current terminal is a tmux client, judged from `TERM` and `TMUX`.
pub fn inside_tmux(term: Option<&str>, tmux: Option<&str>) -> bool {
    let term_matches = term
        .map(|t| matches!(t.to_ascii_lowercase().as_str(), "screen" | "tmux"))
        .unwrap_or(false);
    term_matches && tmux.is_some_and(|t| !t.is_empty())
}

/// Build the command that connects to `target`.
pub fn build_command(
    config: &LauncherConfig,
    target: &ConnectionTarget,
    in_tmux: bool,
) -> Command {
    let destination = format!("{}@{}", target.username, target.host);

    match &target.secret {
        Some(secret) => {
            let mut cmd = Command::new(&config.sshpass_program);
            cmd.arg("-e")
                .arg(&config.ssh_program)
                .arg(&destination)
                .env(SSHPASS_ENV, secret.expose_secret());
            cmd
        }
        None if in_tmux && config.tmux_split => {
            // Separate argv entries: tmux execs ssh without `sh -c`.
            let mut cmd = Command::new("tmux");
            cmd.arg("split-window")
                .arg("--")
                .arg(&config.ssh_program)
                .arg(&destination);
            cmd
        }
        None => {
            let mut cmd = Command::new(&config.ssh_program);
            cmd.arg(&destination);
            cmd
        }
    }
}

/// Run `cmd` to completion, inheriting the terminal.
pub fn run(mut cmd: Command) -> Result<ExitStatus, CliError> {
    let program = cmd.get_program().to_string_lossy().into_owned();
    debug!(program = %program, "launching");
    cmd.status().map_err(|source| CliError::Launch { program, source })
}
