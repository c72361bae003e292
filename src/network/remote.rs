// file: src/network/remote.rs
// version: 1.1.0
// guid: c1d2e3f4-a5b6-7890-1234-567890cdefab

//! Remote shell abstraction — enables test doubles for all remote commands

use crate::error::ProvisionError;
use crate::utils::shell::sh_quote;
use crate::Result;
use std::path::Path;

/// Captured result of one remote command
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOutput {
    pub stdout: String,
    pub stderr: String,
    pub exit_code: i32,
}

impl CommandOutput {
    /// Whether the command exited zero
    pub fn success(&self) -> bool {
        self.exit_code == 0
    }
}

/// Abstraction over the remote execution channel.
///
/// Task logic is written against this trait; the production implementation is
/// [`SshClient`](crate::network::SshClient), and tests substitute a scripted
/// double. `probe` is the only primitive command method — everything else is
/// expressed in terms of it, so a double observes every command issued.
#[allow(async_fn_in_trait)]
pub trait RemoteShell {
    /// Run a command and capture its output; a non-zero exit is an Ok value.
    ///
    /// Used for idempotency checks where failure means "not present".
    async fn probe(&mut self, command: &str) -> Result<CommandOutput>;

    /// Upload one local file to a path relative to the remote home directory
    async fn put(&mut self, local: &Path, remote: &str) -> Result<()>;

    /// Run a command as the connected user; non-zero exit is fatal
    async fn run(&mut self, command: &str) -> Result<String> {
        let output = self.probe(command).await?;
        check(command, output)
    }

    /// Run a command with elevated privileges; non-zero exit is fatal
    async fn sudo(&mut self, command: &str) -> Result<String> {
        let wrapped = format!("sudo -H sh -c {}", sh_quote(command));
        let output = self.probe(&wrapped).await?;
        check(command, output)
    }

    /// Run a command with elevated privileges as a named account
    async fn sudo_as(&mut self, user: &str, command: &str) -> Result<String> {
        let wrapped = format!("sudo -H -u {} sh -c {}", user, sh_quote(command));
        let output = self.probe(&wrapped).await?;
        check(command, output)
    }

    /// Whether a path exists on the remote host
    async fn exists(&mut self, path: &str) -> Result<bool> {
        let output = self.probe(&format!("test -e {}", sh_quote(path))).await?;
        Ok(output.success())
    }
}

fn check(command: &str, output: CommandOutput) -> Result<String> {
    if output.success() {
        Ok(output.stdout)
    } else {
        Err(ProvisionError::Process {
            command: command.to_string(),
            exit_code: Some(output.exit_code),
            stderr: if output.stderr.trim().is_empty() {
                output.stdout
            } else {
                output.stderr
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::network::mock::ScriptedRemote;

    #[tokio::test]
    async fn test_run_propagates_failure() {
        let mut remote = ScriptedRemote::new();
        remote.fail_on("false", 1, "boom");

        let result = remote.run("false").await;

        match result {
            Err(ProvisionError::Process {
                command, exit_code, ..
            }) => {
                assert_eq!(command, "false");
                assert_eq!(exit_code, Some(1));
            }
            other => panic!("expected process error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_sudo_wraps_command() {
        let mut remote = ScriptedRemote::new();
        remote.sudo("apt-get update -q -y").await.unwrap();

        assert_eq!(
            remote.log(),
            &["sudo -H sh -c 'apt-get update -q -y'".to_string()]
        );
    }

    #[tokio::test]
    async fn test_exists_maps_exit_code() {
        let mut remote = ScriptedRemote::new();
        remote.fail_on("test -e /var/run/reboot-required", 1, "");

        assert!(!remote.exists("/var/run/reboot-required").await.unwrap());
        assert!(remote.exists("/etc/passwd").await.unwrap());
    }
}
