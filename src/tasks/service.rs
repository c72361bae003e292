// file: src/tasks/service.rs
// version: 1.1.0
// guid: c3d4e5f6-a7b8-9012-3456-789012cdefab

//! Authentication service provisioner task

use super::host_address;
use crate::config::{EcosystemConfig, ProvisionConfig};
use crate::error::ProvisionError;
use crate::network::RemoteShell;
use crate::Result;
use std::io::Write;
use tempfile::NamedTempFile;
use tracing::info;

/// Fetches, configures, and starts the authentication service under pm2
pub struct ServiceProvisioner<'a, R: RemoteShell> {
    remote: &'a mut R,
    config: &'a ProvisionConfig,
}

impl<'a, R: RemoteShell> ServiceProvisioner<'a, R> {
    pub fn new(remote: &'a mut R, config: &'a ProvisionConfig) -> Self {
        Self { remote, config }
    }

    /// Every step is fatal on failure; there is no partial-failure recovery.
    pub async fn run(&mut self) -> Result<()> {
        info!("Provisioning authentication service");

        // npm ci needs git for the service's dependencies
        self.remote.sudo("apt-get install -q -y git").await?;

        let archive = Self::archive_name(self.config)?;
        self.remote
            .run(&format!("wget -q {}", self.config.service_archive_url))
            .await?;
        self.remote.run(&format!("unzip -q {}", archive)).await?;
        self.remote.run(&format!("rm {}", archive)).await?;

        let addr = host_address(self.remote).await?;
        let descriptor = EcosystemConfig::for_host(&addr, self.config).render()?;

        let dir = &self.config.service_dir;
        self.remote.run(&format!("cd {} && npm ci -q", dir)).await?;

        // stage the descriptor locally, upload it, drop the local copy
        let mut staged = NamedTempFile::new()?;
        staged.write_all(descriptor.as_bytes())?;
        staged.flush()?;
        self.remote
            .put(staged.path(), &format!("{}/ecosystem.config.js", dir))
            .await?;
        drop(staged);

        self.remote
            .run(&format!("cd {} && pm2 start ecosystem.config.js", dir))
            .await?;

        // register the supervisor at boot and persist its process list
        let username = self.remote.run("whoami").await?.trim().to_string();
        self.remote
            .sudo(&format!(
                "pm2 startup systemd -u {0} --hp /home/{0}",
                username
            ))
            .await?;
        self.remote.run("pm2 save").await?;

        Ok(())
    }

    fn archive_name(config: &ProvisionConfig) -> Result<&str> {
        config
            .service_archive_url
            .rsplit('/')
            .next()
            .filter(|name| !name.is_empty())
            .ok_or_else(|| {
                ProvisionError::config(format!(
                    "service archive URL has no file name: {}",
                    config.service_archive_url
                ))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::network::mock::ScriptedRemote;

    fn scripted() -> ScriptedRemote {
        let mut remote = ScriptedRemote::new();
        remote.stdout_on("hostname -I", "10.0.2.15 192.168.33.10 \n");
        remote.stdout_on("whoami", "vagrant\n");
        remote
    }

    #[tokio::test]
    async fn test_service_command_sequence() {
        let mut remote = scripted();
        let config = ProvisionConfig::default();

        ServiceProvisioner::new(&mut remote, &config)
            .run()
            .await
            .unwrap();

        assert_eq!(
            remote.count_containing(
                "wget -q https://swarm.perforce.com/archives/depot/main/p4-auth-integ-svc.zip"
            ),
            1
        );
        assert_eq!(remote.count_containing("unzip -q p4-auth-integ-svc.zip"), 1);
        assert_eq!(remote.count_containing("rm p4-auth-integ-svc.zip"), 1);
        assert_eq!(
            remote.count_containing("cd p4-auth-integ-svc && npm ci -q"),
            1
        );
        assert_eq!(
            remote.count_containing("cd p4-auth-integ-svc && pm2 start ecosystem.config.js"),
            1
        );
        assert_eq!(
            remote.count_containing("pm2 startup systemd -u vagrant --hp /home/vagrant"),
            1
        );
        assert_eq!(remote.count_containing("pm2 save"), 1);
    }

    #[tokio::test]
    async fn test_uploaded_descriptor_contains_host_address() {
        let mut remote = scripted();
        let config = ProvisionConfig::default();

        ServiceProvisioner::new(&mut remote, &config)
            .run()
            .await
            .unwrap();

        let uploads = remote.uploads();
        assert_eq!(uploads.len(), 1);
        let (path, contents) = &uploads[0];
        assert_eq!(path, "p4-auth-integ-svc/ecosystem.config.js");
        assert!(contents.contains("https://192.168.33.10:3000"));
        assert!(!contents.contains("{ipaddr}"));
    }

    #[tokio::test]
    async fn test_failure_aborts_remaining_steps() {
        let mut remote = scripted();
        remote.fail_on("npm ci -q", 1, "npm ERR!");
        let config = ProvisionConfig::default();

        let result = ServiceProvisioner::new(&mut remote, &config).run().await;

        assert!(result.is_err());
        assert_eq!(remote.count_containing("pm2 start"), 0);
        assert_eq!(remote.count_containing("pm2 save"), 0);
    }
}
