// file: src/tasks/pm2.rs
// version: 1.0.0
// guid: b2c3d4e5-f6a7-8901-2345-678901bcdefa

//! pm2 process supervisor installer task

use crate::network::RemoteShell;
use crate::Result;
use tracing::info;

/// Installs the pm2 supervisor globally via npm.
///
/// The Node.js runtime is a declared dependency in the task graph, not an
/// inline call.
pub struct Pm2Installer<'a, R: RemoteShell> {
    remote: &'a mut R,
}

impl<'a, R: RemoteShell> Pm2Installer<'a, R> {
    pub fn new(remote: &'a mut R) -> Self {
        Self { remote }
    }

    pub async fn run(&mut self) -> Result<()> {
        if self.remote.probe("which pm2").await?.success() {
            info!("pm2 already installed; skipping");
            return Ok(());
        }

        info!("Installing pm2");
        self.remote.sudo("npm install -q -g pm2").await?;
        Ok(())
    }
}
