// file: src/tasks/p4d.rs
// version: 1.0.0
// guid: e5f6a7b8-c9d0-1234-5678-901234efabcd

//! Helix server installer task

use super::host_address;
use crate::config::ProvisionConfig;
use crate::network::RemoteShell;
use crate::Result;
use tracing::info;

/// Installs the Helix CLI and server packages and runs the vendor
/// configuration script.
///
/// The script owns all daemon initialization; it is treated as opaque.
pub struct P4dInstaller<'a, R: RemoteShell> {
    remote: &'a mut R,
    config: &'a ProvisionConfig,
}

impl<'a, R: RemoteShell> P4dInstaller<'a, R> {
    pub fn new(remote: &'a mut R, config: &'a ProvisionConfig) -> Self {
        Self { remote, config }
    }

    pub async fn run(&mut self) -> Result<()> {
        info!("Installing Helix server");

        self.remote.sudo("apt-get install -q -y helix-cli").await?;
        self.remote.sudo("apt-get install -q -y helix-p4d").await?;

        let addr = host_address(self.remote).await?;
        let p4port = self.config.p4port(&addr);
        self.remote
            .sudo(&format!(
                "/opt/perforce/sbin/configure-helix-p4d.sh -n -p {} -u {} -P {} {}",
                p4port, self.config.super_user, self.config.super_passwd, self.config.p4d_instance
            ))
            .await?;

        Ok(())
    }
}
