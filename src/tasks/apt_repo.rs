// file: src/tasks/apt_repo.rs
// version: 1.0.0
// guid: d4e5f6a7-b8c9-0123-4567-890123defabc

//! Vendor APT repository configurator task

use crate::config::ProvisionConfig;
use crate::error::ProvisionError;
use crate::network::RemoteShell;
use crate::utils::shell::sh_quote;
use crate::Result;
use tracing::info;

/// Registers the vendor APT key and source list.
///
/// Idempotent: the source-list file, once present, is never rewritten. The
/// package index is refreshed on every run either way.
pub struct AptRepoConfigurator<'a, R: RemoteShell> {
    remote: &'a mut R,
    config: &'a ProvisionConfig,
}

impl<'a, R: RemoteShell> AptRepoConfigurator<'a, R> {
    pub fn new(remote: &'a mut R, config: &'a ProvisionConfig) -> Self {
        Self { remote, config }
    }

    pub async fn run(&mut self) -> Result<()> {
        if !self.remote.exists(&self.config.sources_list).await? {
            info!("Registering vendor APT repository");

            let key_file = Self::key_file_name(self.config)?;
            self.remote
                .run(&format!("wget -q {}", self.config.p4_pub_key_url))
                .await?;
            self.remote.sudo(&format!("apt-key add {}", key_file)).await?;
            self.remote.run(&format!("rm -f {}", key_file)).await?;

            let codename = self.remote.run("lsb_release -sc").await?.trim().to_string();
            let repo_line = format!("deb {} {} release", self.config.p4_apt_url, codename);
            self.remote
                .sudo(&format!(
                    "echo {} >> {}",
                    sh_quote(&repo_line),
                    self.config.sources_list
                ))
                .await?;
        }

        self.remote.sudo("apt-get -q -y update").await?;
        Ok(())
    }

    fn key_file_name(config: &ProvisionConfig) -> Result<&str> {
        config
            .p4_pub_key_url
            .rsplit('/')
            .next()
            .filter(|name| !name.is_empty())
            .ok_or_else(|| {
                ProvisionError::config(format!(
                    "public key URL has no file name: {}",
                    config.p4_pub_key_url
                ))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::network::mock::ScriptedRemote;

    #[tokio::test]
    async fn test_configures_repo_when_source_list_missing() {
        let mut remote = ScriptedRemote::new();
        remote.fail_on("test -e /etc/apt/sources.list.d/perforce.sources.list", 1, "");
        remote.stdout_on("lsb_release -sc", "bionic\n");
        let config = ProvisionConfig::default();

        AptRepoConfigurator::new(&mut remote, &config)
            .run()
            .await
            .unwrap();

        assert_eq!(remote.count_containing("apt-key add perforce.pubkey"), 1);
        assert_eq!(
            remote.count_containing(
                "deb http://pkg-ondemand.bnr.perforce.com/perforce/r19.1/apt/ubuntu bionic release"
            ),
            1
        );
        assert_eq!(
            remote.count_containing(">> /etc/apt/sources.list.d/perforce.sources.list"),
            1
        );
        assert_eq!(remote.count_containing("apt-get -q -y update"), 1);
    }

    #[tokio::test]
    async fn test_second_run_appends_nothing_but_still_updates() {
        let mut remote = ScriptedRemote::new();
        // source list absent on the first run, present afterwards
        remote.fail_once("test -e /etc/apt/sources.list.d/perforce.sources.list", 1, "");
        remote.stdout_on("lsb_release -sc", "bionic\n");
        let config = ProvisionConfig::default();

        AptRepoConfigurator::new(&mut remote, &config)
            .run()
            .await
            .unwrap();
        AptRepoConfigurator::new(&mut remote, &config)
            .run()
            .await
            .unwrap();

        assert_eq!(
            remote.count_containing(">> /etc/apt/sources.list.d/perforce.sources.list"),
            1
        );
        assert_eq!(remote.count_containing("apt-get -q -y update"), 2);
    }
}
