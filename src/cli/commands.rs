// file: src/cli/commands.rs
// version: 1.2.0
// guid: e1f2a3b4-c5d6-7890-1234-567890efabcd

//! Command implementations for the CLI

use crate::config::{ConfigLoader, ProvisionConfig};
use crate::logging::logger::with_task_span;
use crate::network::{profile, ConnectionProfile, SshClient};
use crate::tasks::{Provisioner, TaskId};
use crate::utils::LocalUtils;
use crate::Result;
use std::path::Path;
use tracing::{error, info};

/// Run one provisioning task (with its dependencies) against a host.
///
/// Connection setup is the explicit initialization step: generate the SSH
/// profile if missing, load it once, open the session, then hand everything
/// to the task runner by value.
pub async fn run_task_command(
    task: TaskId,
    host: &str,
    ssh_config: &str,
    config_path: Option<&str>,
) -> Result<()> {
    let config = load_settings(config_path)?;

    let path = Path::new(ssh_config);
    profile::ensure_ssh_config(path).await?;
    let connection = ConnectionProfile::load(path)?;
    let host_profile = connection.host(host)?;

    let client = SshClient::connect(host_profile).await?;
    let mut provisioner = Provisioner::new(client, config);
    provisioner.execute(task).await?;

    info!("Task {} completed", task.name());
    Ok(())
}

/// Check local prerequisites without touching the remote host
pub async fn check_prereqs_command(ssh_config: &str) -> Result<()> {
    with_task_span("check-prereqs", || {
        let mut missing = Vec::new();

        if LocalUtils::command_exists("vagrant") {
            info!("vagrant found on PATH");
        } else {
            error!("vagrant not found on PATH");
            missing.push("vagrant");
        }

        let path = Path::new(ssh_config);
        if path.exists() {
            let connection = ConnectionProfile::load(path)?;
            info!(
                "SSH connection profile {} lists hosts: {}",
                ssh_config,
                connection.host_names().join(", ")
            );
        } else if missing.is_empty() {
            info!(
                "SSH connection profile {} missing; it will be generated on first use",
                ssh_config
            );
        } else {
            error!(
                "SSH connection profile {} missing and vagrant is unavailable to generate it",
                ssh_config
            );
        }

        if missing.is_empty() {
            info!("All prerequisites satisfied");
            Ok(())
        } else {
            Err(crate::error::ProvisionError::task(format!(
                "missing prerequisites: {}",
                missing.join(", ")
            )))
        }
    })
}

fn load_settings(config_path: Option<&str>) -> Result<ProvisionConfig> {
    match config_path {
        Some(path) => {
            info!("Loading settings from {}", path);
            ConfigLoader::new().load_provision_config(path)
        }
        None => Ok(ProvisionConfig::default()),
    }
}
