// file: src/tasks/runner.rs
// version: 1.1.0
// guid: b8c9d0e1-f2a3-4567-8901-234567bcdefa

//! Task runner executing resolved plans against one remote host

use super::apt_repo::AptRepoConfigurator;
use super::extension::ExtensionInstaller;
use super::graph;
use super::nodejs::NodejsInstaller;
use super::p4d::P4dInstaller;
use super::p4d_users::P4dConfigurator;
use super::pm2::Pm2Installer;
use super::prepare::HostPreparer;
use super::service::ServiceProvisioner;
use super::TaskId;
use crate::config::ProvisionConfig;
use crate::network::RemoteShell;
use crate::Result;
use tracing::{info, Instrument};

/// Executes provisioning tasks over one remote shell
pub struct Provisioner<R: RemoteShell> {
    remote: R,
    config: ProvisionConfig,
}

impl<R: RemoteShell> Provisioner<R> {
    pub fn new(remote: R, config: ProvisionConfig) -> Self {
        Self { remote, config }
    }

    /// Resolve the plan for `task` and run each node in order.
    ///
    /// The first failing node aborts the remainder of the plan; partially
    /// applied remote state is left as-is.
    pub async fn execute(&mut self, task: TaskId) -> Result<()> {
        let plan = graph::plan(task)?;
        for id in &plan {
            info!("Running task {}", id.name());
            let span = tracing::info_span!("task", name = id.name());
            self.dispatch(*id).instrument(span).await?;
        }
        Ok(())
    }

    async fn dispatch(&mut self, task: TaskId) -> Result<()> {
        match task {
            TaskId::Prepare => HostPreparer::new(&mut self.remote).run().await,
            TaskId::InstallNodejs => {
                NodejsInstaller::new(&mut self.remote, &self.config).run().await
            }
            TaskId::InstallPm2 => Pm2Installer::new(&mut self.remote).run().await,
            TaskId::ProvisionService => {
                ServiceProvisioner::new(&mut self.remote, &self.config).run().await
            }
            TaskId::ConfigureAptRepo => {
                AptRepoConfigurator::new(&mut self.remote, &self.config).run().await
            }
            TaskId::InstallP4d => P4dInstaller::new(&mut self.remote, &self.config).run().await,
            TaskId::ConfigureP4d => {
                P4dConfigurator::new(&mut self.remote, &self.config).run().await
            }
            TaskId::InstallExtension => {
                ExtensionInstaller::new(&mut self.remote, &self.config).run().await
            }
            // composite node; its dependencies do the work
            TaskId::ProvisionP4d => Ok(()),
        }
    }

    /// Consume the runner and return the remote shell
    pub fn into_remote(self) -> R {
        self.remote
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::network::mock::ScriptedRemote;

    fn provisioner(remote: ScriptedRemote) -> Provisioner<ScriptedRemote> {
        Provisioner::new(remote, ProvisionConfig::default())
    }

    #[tokio::test]
    async fn test_runtime_install_issued_at_most_once() {
        let mut remote = ScriptedRemote::new();
        // node absent on the first run, resolvable afterwards
        remote.fail_once("which node", 1, "");
        let mut p = provisioner(remote);

        p.execute(TaskId::InstallNodejs).await.unwrap();
        p.execute(TaskId::InstallNodejs).await.unwrap();

        let remote = p.into_remote();
        assert_eq!(remote.count_containing("apt-get install -q -y nodejs"), 1);
        assert_eq!(remote.count_containing("which node"), 2);
    }

    #[tokio::test]
    async fn test_provision_service_runs_dependencies_in_order() {
        let mut remote = ScriptedRemote::new();
        remote.fail_on("which node", 1, "");
        remote.fail_on("which pm2", 1, "");
        remote.stdout_on("hostname -I", "10.0.2.15\n");
        remote.stdout_once("whoami", "vagrant\n");
        let mut p = provisioner(remote);

        p.execute(TaskId::ProvisionService).await.unwrap();

        let remote = p.into_remote();
        let log = remote.log();
        let pos = |needle: &str| log.iter().position(|c| c.contains(needle)).unwrap();

        assert!(pos("which node") < pos("which pm2"));
        assert!(pos("npm install -q -g pm2") < pos("wget -q"));
        assert!(pos("npm ci -q") < pos("pm2 start ecosystem.config.js"));
    }

    #[tokio::test]
    async fn test_provision_service_fails_fast() {
        let mut remote = ScriptedRemote::new();
        remote.fail_on("which node", 1, "");
        remote.fail_on("which pm2", 1, "");
        // supervisor install fails, service steps must not run
        remote.fail_on("npm install -q -g pm2", 1, "npm ERR!");
        let mut p = provisioner(remote);

        let result = p.execute(TaskId::ProvisionService).await;

        assert!(result.is_err());
        let remote = p.into_remote();
        assert_eq!(remote.count_containing("wget -q"), 0);
        assert_eq!(remote.count_containing("pm2 start"), 0);
    }

    #[tokio::test]
    async fn test_provision_p4d_runs_fixed_order() {
        let mut remote = ScriptedRemote::new();
        remote.stdout_on("hostname -I", "10.0.2.15\n");
        remote.stdout_on("lsb_release -sc", "bionic\n");
        // source list already present; the configurator still refreshes
        let mut p = provisioner(remote);

        p.execute(TaskId::ProvisionP4d).await.unwrap();

        let remote = p.into_remote();
        let log = remote.log();
        let pos = |needle: &str| log.iter().position(|c| c.contains(needle)).unwrap();

        assert!(pos("apt-get -q -y update") < pos("apt-get install -q -y helix-cli"));
        assert!(pos("configure-helix-p4d.sh") < pos("p4 -u super group -i"));
        assert!(pos("p4dctl start despot") < pos("node hook.js"));
        // shared dependency executes once
        assert_eq!(remote.count_containing("apt-get install -q -y helix-p4d"), 1);
    }
}
