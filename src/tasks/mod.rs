// file: src/tasks/mod.rs
// version: 1.0.0
// guid: d8e9f0a1-b2c3-4567-8901-234567defabc

//! Provisioning tasks
//!
//! Each task is a node in an explicit dependency graph. The runner resolves
//! a deterministic execution plan for the requested task and executes each
//! node at most once, stopping at the first failure.

pub mod apt_repo;
pub mod extension;
pub mod graph;
pub mod nodejs;
pub mod p4d;
pub mod p4d_users;
pub mod pm2;
pub mod prepare;
pub mod runner;
pub mod service;

pub use graph::plan;
pub use runner::Provisioner;

use crate::error::ProvisionError;
use crate::network::RemoteShell;
use crate::utils::shell::last_field;
use crate::Result;

/// Identifier of one provisioning task
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TaskId {
    /// OS hygiene: package upgrade, baseline utilities, halt on pending reboot
    Prepare,
    /// Node.js runtime via the vendor setup script
    InstallNodejs,
    /// pm2 process supervisor via npm
    InstallPm2,
    /// Fetch, configure, and start the authentication service
    ProvisionService,
    /// Vendor APT key and source list (internal node, not a subcommand)
    ConfigureAptRepo,
    /// Helix server packages and vendor configuration script
    InstallP4d,
    /// Server-side group, ticket refresh, SSO flag, daemon restart
    ConfigureP4d,
    /// Login/logout extension hook wiring the daemon to the service
    InstallExtension,
    /// Composite: install, configure, extension
    ProvisionP4d,
}

impl TaskId {
    /// Direct dependencies, in the order they must run
    pub fn deps(&self) -> &'static [TaskId] {
        match self {
            TaskId::Prepare => &[],
            TaskId::InstallNodejs => &[],
            TaskId::InstallPm2 => &[TaskId::InstallNodejs],
            TaskId::ProvisionService => &[TaskId::InstallPm2],
            TaskId::ConfigureAptRepo => &[],
            TaskId::InstallP4d => &[TaskId::ConfigureAptRepo],
            TaskId::ConfigureP4d => &[TaskId::InstallP4d],
            TaskId::InstallExtension => &[TaskId::InstallP4d],
            TaskId::ProvisionP4d => &[
                TaskId::InstallP4d,
                TaskId::ConfigureP4d,
                TaskId::InstallExtension,
            ],
        }
    }

    /// Stable task name used in logs
    pub fn name(&self) -> &'static str {
        match self {
            TaskId::Prepare => "prepare",
            TaskId::InstallNodejs => "install-nodejs",
            TaskId::InstallPm2 => "install-pm2",
            TaskId::ProvisionService => "provision-service",
            TaskId::ConfigureAptRepo => "configure-apt-repo",
            TaskId::InstallP4d => "install-p4d",
            TaskId::ConfigureP4d => "configure-p4d",
            TaskId::InstallExtension => "install-extension",
            TaskId::ProvisionP4d => "provision-p4d",
        }
    }
}

/// Externally reachable address of the remote host.
///
/// Queried live each time; the address is never cached between tasks.
pub(crate) async fn host_address<R: RemoteShell>(remote: &mut R) -> Result<String> {
    let output = remote.run("hostname -I").await?;
    last_field(&output)
        .map(str::to_string)
        .ok_or_else(|| ProvisionError::task("hostname -I returned no addresses"))
}
