// file: src/cli/args.rs
// version: 1.1.0
// guid: d0e1f2a3-b4c5-6789-0123-456789defabc

//! Command line argument definitions

use crate::tasks::TaskId;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "helix-provision-agent")]
#[command(about = "Provision Perforce Helix test environments over SSH")]
#[command(version = env!("CARGO_PKG_VERSION"))]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[arg(
        long,
        global = true,
        default_value = "default",
        help = "Host entry in the SSH connection profile"
    )]
    pub host: String,

    #[arg(
        long,
        global = true,
        default_value = "ssh_config",
        help = "Path of the SSH connection profile (generated if missing)"
    )]
    pub ssh_config: String,

    #[arg(short, long, global = true, help = "Optional YAML settings file")]
    pub config: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Prepare the host for use in testing
    Prepare,

    /// Install Node.js via the vendor setup script
    InstallNodejs,

    /// Install pm2 using npm
    InstallPm2,

    /// Install and configure the authentication service
    ProvisionService,

    /// Install and configure the Helix server with extensions and test setup
    ProvisionP4d,

    /// Install the Helix server packages
    InstallP4d,

    /// Configure Helix server users and groups for testing
    ConfigureP4d,

    /// Install the login/logout extensions
    InstallExtension,

    /// Check local prerequisites without touching the remote host
    CheckPrereqs,
}

impl Commands {
    /// Task this subcommand maps to; `None` for local-only commands
    pub fn task(&self) -> Option<TaskId> {
        match self {
            Commands::Prepare => Some(TaskId::Prepare),
            Commands::InstallNodejs => Some(TaskId::InstallNodejs),
            Commands::InstallPm2 => Some(TaskId::InstallPm2),
            Commands::ProvisionService => Some(TaskId::ProvisionService),
            Commands::ProvisionP4d => Some(TaskId::ProvisionP4d),
            Commands::InstallP4d => Some(TaskId::InstallP4d),
            Commands::ConfigureP4d => Some(TaskId::ConfigureP4d),
            Commands::InstallExtension => Some(TaskId::InstallExtension),
            Commands::CheckPrereqs => None,
        }
    }
}
