// file: src/main.rs
// version: 1.1.0
// guid: f2a3b4c5-d6e7-8901-2345-678901fabcde

//! Helix Provision Agent - Main entry point

use clap::Parser;
use helix_provision_agent::{
    cli::{args::Cli, commands::*},
    logging::logger,
    Result,
};
use tokio::signal;
use tracing::warn;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    logger::init_logger(cli.verbose, cli.quiet)?;

    let shutdown_signal = async {
        signal::ctrl_c().await.expect("Failed to install Ctrl+C handler");
        warn!("Received Ctrl+C, aborting; the host keeps whatever state the last command left");
    };

    let command_future = async {
        match cli.command.task() {
            Some(task) => {
                run_task_command(task, &cli.host, &cli.ssh_config, cli.config.as_deref()).await
            }
            None => check_prereqs_command(&cli.ssh_config).await,
        }
    };

    tokio::select! {
        result = command_future => result,
        _ = shutdown_signal => {
            std::process::exit(130); // Standard exit code for Ctrl+C
        }
    }
}
