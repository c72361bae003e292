// file: src/tasks/prepare.rs
// version: 1.0.0
// guid: f0a1b2c3-d4e5-6789-0123-456789fabcde

//! Host preparation task

use crate::network::RemoteShell;
use crate::Result;
use tracing::{info, warn};

/// Prepares a host for use in testing
pub struct HostPreparer<'a, R: RemoteShell> {
    remote: &'a mut R,
}

impl<'a, R: RemoteShell> HostPreparer<'a, R> {
    pub fn new(remote: &'a mut R) -> Self {
        Self { remote }
    }

    /// Best-effort OS hygiene: locale, package upgrade, baseline utilities.
    ///
    /// If the OS flags a pending reboot, the host is halted — not rebooted;
    /// the caller brings it back up.
    pub async fn run(&mut self) -> Result<()> {
        info!("Preparing host for testing");

        // generate the default locale to avoid errors
        self.remote.sudo("locale-gen en_US.UTF-8").await?;

        self.remote.sudo("apt-get update -q -y").await?;
        self.remote
            .sudo("DEBIAN_FRONTEND=noninteractive apt-get upgrade -q -y")
            .await?;
        self.remote.sudo("apt-get clean -q -y").await?;
        self.remote.sudo("apt-get autoremove -q -y").await?;

        self.remote.sudo("apt-get install -q -y emacs-nox").await?;
        // ubuntu does not ship with unzip pre-installed
        self.remote.sudo("apt-get install -q -y unzip").await?;

        if self.remote.exists("/var/run/reboot-required").await? {
            warn!("Pending reboot detected; halting host");
            self.remote.sudo("shutdown -h now").await?;
        }

        Ok(())
    }
}
