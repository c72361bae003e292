// file: src/config/mod.rs
// version: 1.1.0
// guid: 7b4e2a90-c3d5-4f18-9a6b-e01f58c7d2a3

//! Configuration module for the Helix provisioning agent
//!
//! Holds the settings every task reads, plus the typed records the agent
//! renders into remote configuration artifacts.

pub mod ecosystem;
pub mod group;
pub mod loader;

pub use ecosystem::{EcosystemConfig, ServiceEnv};
pub use group::GroupSpec;
pub use loader::ConfigLoader;

use serde::{Deserialize, Serialize};

/// Settings for one provisioning run.
///
/// Defaults describe the standard test setup: the 2019.1 Helix packages from
/// the vendor APT repository and a fixed superuser credential. None of these
/// values are production secrets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProvisionConfig {
    /// URL of the vendor public key for APT package verification
    pub p4_pub_key_url: String,
    /// Base URL of the vendor APT repository
    pub p4_apt_url: String,
    /// Remote path of the vendor source-list file
    pub sources_list: String,
    /// URL of the Node.js vendor setup script
    pub node_setup_url: String,
    /// URL of the prebuilt authentication service archive
    pub service_archive_url: String,
    /// Directory the service archive unpacks into
    pub service_dir: String,
    /// Port the authentication service listens on
    pub service_port: u16,
    /// Port the Helix server listens on
    pub p4d_port: u16,
    /// Helix server instance name
    pub p4d_instance: String,
    /// Superuser account name
    pub super_user: String,
    /// Superuser password (test environments only)
    pub super_passwd: String,
    /// Group granted unlimited ticket timeout
    pub group_name: String,
    /// OS account the Helix server runs under
    pub service_account: String,
}

impl Default for ProvisionConfig {
    fn default() -> Self {
        Self {
            // 2019.1 release of p4d rather than cutting edge main
            p4_pub_key_url: "http://pkg-ondemand.bnr.perforce.com/perforce/r19.1/perforce.pubkey"
                .to_string(),
            p4_apt_url: "http://pkg-ondemand.bnr.perforce.com/perforce/r19.1/apt/ubuntu"
                .to_string(),
            sources_list: "/etc/apt/sources.list.d/perforce.sources.list".to_string(),
            node_setup_url: "https://deb.nodesource.com/setup_10.x".to_string(),
            service_archive_url:
                "https://swarm.perforce.com/archives/depot/main/p4-auth-integ-svc.zip".to_string(),
            service_dir: "p4-auth-integ-svc".to_string(),
            service_port: 3000,
            p4d_port: 1666,
            p4d_instance: "despot".to_string(),
            super_user: "super".to_string(),
            super_passwd: "Rebar123".to_string(),
            group_name: "notimeout".to_string(),
            service_account: "perforce".to_string(),
        }
    }
}

impl ProvisionConfig {
    /// Helix server address for a given host address, e.g. `10.0.2.15:1666`
    pub fn p4port(&self, addr: &str) -> String {
        format!("{}:{}", addr, self.p4d_port)
    }

    /// Externally reachable service base URL for a given host address
    pub fn service_base_url(&self, addr: &str) -> String {
        format!("https://{}:{}", addr, self.service_port)
    }

    /// Basic sanity checks on the loaded settings
    pub fn validate(&self) -> crate::Result<()> {
        if self.super_user.is_empty() || self.super_passwd.is_empty() {
            return Err(crate::error::ProvisionError::config(
                "superuser name and password must not be empty",
            ));
        }
        if self.service_dir.is_empty() {
            return Err(crate::error::ProvisionError::config(
                "service directory must not be empty",
            ));
        }
        if !self.sources_list.starts_with('/') {
            return Err(crate::error::ProvisionError::config(format!(
                "sources list must be an absolute path: {}",
                self.sources_list
            )));
        }
        Ok(())
    }
}
