// file: src/network/profile.rs
// version: 1.1.0
// guid: d2e3f4a5-b6c7-8901-2345-678901defabc

//! SSH connection profile handling
//!
//! The profile is an OpenSSH-style configuration file exported once from the
//! virtualization tool (`vagrant ssh-config`). Loading it is an explicit
//! initialization step: tasks receive an immutable [`ConnectionProfile`]
//! value, never a global.

use crate::error::ProvisionError;
use crate::Result;
use std::path::Path;
use tokio::process::Command;
use tracing::info;

/// One `Host` block from the connection profile
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostProfile {
    pub name: String,
    pub host_name: String,
    pub user: Option<String>,
    pub port: Option<u16>,
    pub identity_files: Vec<String>,
}

impl HostProfile {
    fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            host_name: String::new(),
            user: None,
            port: None,
            identity_files: Vec::new(),
        }
    }

    /// Connection user; vagrant boxes default to `vagrant`
    pub fn user(&self) -> &str {
        self.user.as_deref().unwrap_or("vagrant")
    }

    /// Connection port, defaulting to 22
    pub fn port(&self) -> u16 {
        self.port.unwrap_or(22)
    }
}

/// Immutable set of host profiles parsed from the connection config
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionProfile {
    hosts: Vec<HostProfile>,
}

impl ConnectionProfile {
    /// Load a profile from an OpenSSH-style configuration file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(|e| {
            ProvisionError::connection(format!(
                "Failed to read SSH config {}: {}",
                path.as_ref().display(),
                e
            ))
        })?;
        Self::parse(&content)
    }

    /// Parse OpenSSH-style configuration text
    pub fn parse(content: &str) -> Result<Self> {
        let mut hosts: Vec<HostProfile> = Vec::new();

        for line in content.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let Some((key, value)) = line.split_once(char::is_whitespace) else {
                continue;
            };
            let value = value.trim().trim_matches('"');

            if key.eq_ignore_ascii_case("Host") {
                // a Host line may list aliases; the first is the lookup name
                let name = value.split_whitespace().next().unwrap_or(value);
                hosts.push(HostProfile::new(name));
                continue;
            }

            let Some(current) = hosts.last_mut() else {
                continue;
            };
            if key.eq_ignore_ascii_case("HostName") {
                current.host_name = value.to_string();
            } else if key.eq_ignore_ascii_case("User") {
                current.user = Some(value.to_string());
            } else if key.eq_ignore_ascii_case("Port") {
                let port = value.parse::<u16>().map_err(|_| {
                    ProvisionError::connection(format!("Invalid port in SSH config: {}", value))
                })?;
                current.port = Some(port);
            } else if key.eq_ignore_ascii_case("IdentityFile") {
                current.identity_files.push(value.to_string());
            }
        }

        if hosts.is_empty() {
            return Err(ProvisionError::connection(
                "SSH config contains no Host entries",
            ));
        }

        Ok(Self { hosts })
    }

    /// Look up a host block by name
    pub fn host(&self, name: &str) -> Result<&HostProfile> {
        self.hosts.iter().find(|h| h.name == name).ok_or_else(|| {
            ProvisionError::connection(format!("No host '{}' in SSH config", name))
        })
    }

    /// Names of all configured hosts
    pub fn host_names(&self) -> Vec<&str> {
        self.hosts.iter().map(|h| h.name.as_str()).collect()
    }
}

/// Generate the connection config from `vagrant ssh-config` if it is missing.
///
/// The exported config embeds absolute identity-file paths under the local
/// working directory; the prefix is stripped so the file stays valid when the
/// directory moves.
pub async fn ensure_ssh_config(path: &Path) -> Result<()> {
    if path.exists() {
        return Ok(());
    }

    info!("Generating {} via vagrant ssh-config", path.display());

    let output = Command::new("vagrant")
        .arg("ssh-config")
        .output()
        .await
        .map_err(|e| ProvisionError::local(format!("Failed to run vagrant ssh-config: {}", e)))?;

    if !output.status.success() {
        return Err(ProvisionError::local(format!(
            "vagrant ssh-config failed: {}",
            String::from_utf8_lossy(&output.stderr).trim()
        )));
    }

    let config = String::from_utf8_lossy(&output.stdout).to_string();
    let cwd = std::env::current_dir()?;
    let stripped = strip_workdir_prefix(&config, &cwd);

    std::fs::write(path, stripped)?;
    Ok(())
}

/// Remove the working-directory prefix from embedded absolute paths
pub fn strip_workdir_prefix(config: &str, workdir: &Path) -> String {
    let prefix = format!("{}/", workdir.display());
    config.replace(&prefix, "")
}
