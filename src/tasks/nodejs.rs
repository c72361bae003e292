// file: src/tasks/nodejs.rs
// version: 1.0.0
// guid: a1b2c3d4-e5f6-7890-1234-567890abcdef

//! Node.js runtime installer task

use crate::config::ProvisionConfig;
use crate::network::RemoteShell;
use crate::Result;
use tracing::info;

/// Installs the Node.js runtime from the vendor package source
pub struct NodejsInstaller<'a, R: RemoteShell> {
    remote: &'a mut R,
    config: &'a ProvisionConfig,
}

impl<'a, R: RemoteShell> NodejsInstaller<'a, R> {
    pub fn new(remote: &'a mut R, config: &'a ProvisionConfig) -> Self {
        Self { remote, config }
    }

    /// Install Node.js unless a runtime already resolves on PATH.
    ///
    /// A pre-existing installation of any version satisfies the check; the
    /// pinned version is not verified against it.
    pub async fn run(&mut self) -> Result<()> {
        if self.remote.probe("which node").await?.success() {
            info!("Node.js already installed; skipping");
            return Ok(());
        }

        info!("Installing Node.js");

        // build tools for compiling native modules, if needed
        self.remote
            .sudo("apt-get install -q -y build-essential")
            .await?;
        // minimal systems often lack curl
        self.remote.sudo("apt-get install -q -y curl").await?;

        // The distro package is far too old; the vendor setup script adds the
        // package source for the LTS version, npm included.
        self.remote
            .run(&format!(
                "curl -sL {} | sudo -E bash -",
                self.config.node_setup_url
            ))
            .await?;
        self.remote.sudo("apt-get install -q -y nodejs").await?;

        // run npm once unprivileged so it creates ~/.config owned by this
        // user rather than by root during the first 'npm install' later
        self.remote.run("npm version").await?;

        Ok(())
    }
}
