// file: src/tasks/p4d_users.rs
// version: 1.1.0
// guid: f6a7b8c9-d0e1-2345-6789-012345fabcde

//! Helix server user and group configurator task

use crate::config::{GroupSpec, ProvisionConfig};
use crate::network::RemoteShell;
use crate::Result;
use std::io::Write;
use tempfile::NamedTempFile;
use tracing::info;

/// Configures Helix server users and groups for testing
pub struct P4dConfigurator<'a, R: RemoteShell> {
    remote: &'a mut R,
    config: &'a ProvisionConfig,
}

impl<'a, R: RemoteShell> P4dConfigurator<'a, R> {
    pub fn new(remote: &'a mut R, config: &'a ProvisionConfig) -> Self {
        Self { remote, config }
    }

    pub async fn run(&mut self) -> Result<()> {
        info!("Configuring Helix server users and groups");

        let super_user = &self.config.super_user;

        // group whose members get tickets that never expire
        let spec = GroupSpec::no_timeout(&self.config.group_name, super_user);
        let mut staged = NamedTempFile::new()?;
        staged.write_all(spec.render().as_bytes())?;
        staged.flush()?;
        self.remote.put(staged.path(), "group.txt").await?;
        drop(staged);

        self.remote
            .run(&format!("p4 -u {} group -i < group.txt", super_user))
            .await?;
        self.remote.run("rm -f group.txt").await?;

        // the unlimited timeout only applies to sessions established after
        // the membership change, so log in again
        self.remote
            .run(&format!("p4 -u {} logout", super_user))
            .await?;
        self.remote
            .run(&format!(
                "echo {} | p4 -u {} login",
                self.config.super_passwd, super_user
            ))
            .await?;

        self.remote
            .run("p4 configure set auth.sso.allow.passwd=1")
            .await?;

        // restart p4d so the changes take effect; the daemon is down between
        // stop and start
        let account = &self.config.service_account;
        let instance = &self.config.p4d_instance;
        self.remote
            .sudo_as(account, &format!("p4dctl stop {}", instance))
            .await?;
        self.remote
            .sudo_as(account, &format!("p4dctl start {}", instance))
            .await?;

        Ok(())
    }
}
