// file: src/tasks/extension.rs
// version: 1.0.0
// guid: a7b8c9d0-e1f2-3456-7890-123456abcdef

//! Login/logout extension installer task

use super::host_address;
use crate::config::ProvisionConfig;
use crate::network::RemoteShell;
use crate::Result;
use tracing::info;

/// Runs the vendor hook script that registers the server-side extensions
/// redirecting login/logout to the authentication service.
///
/// The hook reads the daemon address and service URL from its environment;
/// both are set for that single invocation only.
pub struct ExtensionInstaller<'a, R: RemoteShell> {
    remote: &'a mut R,
    config: &'a ProvisionConfig,
}

impl<'a, R: RemoteShell> ExtensionInstaller<'a, R> {
    pub fn new(remote: &'a mut R, config: &'a ProvisionConfig) -> Self {
        Self { remote, config }
    }

    pub async fn run(&mut self) -> Result<()> {
        info!("Installing login/logout extensions");

        let addr = host_address(self.remote).await?;
        let p4port = self.config.p4port(&addr);
        let auth_url = self.config.service_base_url(&addr);

        self.remote
            .run(&format!(
                "cd {} && P4PORT={} AUTH_URL={} node hook.js",
                self.config.service_dir, p4port, auth_url
            ))
            .await?;

        Ok(())
    }
}
