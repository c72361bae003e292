// file: src/network/ssh.rs
// version: 1.3.0
// guid: b0c1d2e3-f4a5-6789-0123-456789bcdefa

//! SSH client for remote provisioning operations

use super::profile::HostProfile;
use super::remote::{CommandOutput, RemoteShell};
use crate::error::ProvisionError;
use crate::Result;
use ssh2::Session;
use std::io::Read;
use std::net::TcpStream;
use std::path::Path;
use tracing::{debug, info};

/// SSH client for remote operations
pub struct SshClient {
    session: Session,
    host: String,
}

impl SshClient {
    /// Connect to the host described by a connection profile entry.
    ///
    /// Tries the SSH agent first, then each identity file from the profile.
    pub async fn connect(profile: &HostProfile) -> Result<Self> {
        let addr = format!("{}:{}", profile.host_name, profile.port());
        let user = profile.user();
        info!("Connecting to {} as {}", addr, user);

        let tcp = TcpStream::connect(&addr).map_err(|e| {
            ProvisionError::connection(format!("Failed to connect to {}: {}", addr, e))
        })?;

        let mut session = Session::new()
            .map_err(|e| ProvisionError::ssh(format!("Failed to create SSH session: {}", e)))?;
        session.set_tcp_stream(tcp);
        session
            .handshake()
            .map_err(|e| ProvisionError::ssh(format!("SSH handshake failed: {}", e)))?;

        if session.userauth_agent(user).is_err() {
            let mut authed = false;
            for identity in &profile.identity_files {
                let expanded = shellexpand::tilde(identity);
                let key_path = Path::new(expanded.as_ref());
                if session.userauth_pubkey_file(user, None, key_path, None).is_ok() {
                    authed = true;
                    break;
                }
            }
            if !authed {
                return Err(ProvisionError::ssh(format!(
                    "SSH authentication failed for {}@{} - no agent identity or usable key file",
                    user, profile.host_name
                )));
            }
        }

        if !session.authenticated() {
            return Err(ProvisionError::ssh("SSH authentication failed".to_string()));
        }

        info!("SSH connection established to {}", profile.host_name);
        Ok(Self {
            session,
            host: profile.host_name.clone(),
        })
    }

    /// Host this client is connected to
    pub fn host(&self) -> &str {
        &self.host
    }

    fn exec(&mut self, command: &str) -> Result<CommandOutput> {
        debug!("Executing command: {}", command);

        let mut channel = self
            .session
            .channel_session()
            .map_err(|e| ProvisionError::ssh(format!("Failed to create SSH channel: {}", e)))?;

        channel
            .exec(command)
            .map_err(|e| ProvisionError::ssh(format!("Failed to execute command: {}", e)))?;

        let mut stdout = String::new();
        let mut stderr = String::new();

        channel
            .read_to_string(&mut stdout)
            .map_err(|e| ProvisionError::ssh(format!("Failed to read stdout: {}", e)))?;
        channel
            .stderr()
            .read_to_string(&mut stderr)
            .map_err(|e| ProvisionError::ssh(format!("Failed to read stderr: {}", e)))?;

        channel
            .wait_close()
            .map_err(|e| ProvisionError::ssh(format!("Failed to close SSH channel: {}", e)))?;

        let exit_code = channel
            .exit_status()
            .map_err(|e| ProvisionError::ssh(format!("Failed to get exit status: {}", e)))?;

        Ok(CommandOutput {
            stdout,
            stderr,
            exit_code,
        })
    }
}

impl RemoteShell for SshClient {
    async fn probe(&mut self, command: &str) -> Result<CommandOutput> {
        self.exec(command)
    }

    async fn put(&mut self, local: &Path, remote: &str) -> Result<()> {
        debug!("Uploading {} to {}", local.display(), remote);

        let contents = std::fs::read(local)?;
        let mut channel = self
            .session
            .scp_send(Path::new(remote), 0o644, contents.len() as u64, None)
            .map_err(|e| ProvisionError::ssh(format!("Failed to open SCP channel: {}", e)))?;

        use std::io::Write;
        channel
            .write_all(&contents)
            .map_err(|e| ProvisionError::ssh(format!("Failed to write remote file: {}", e)))?;
        channel
            .send_eof()
            .map_err(|e| ProvisionError::ssh(format!("Failed to finish upload: {}", e)))?;
        channel
            .wait_eof()
            .map_err(|e| ProvisionError::ssh(format!("Failed to finish upload: {}", e)))?;
        channel
            .wait_close()
            .map_err(|e| ProvisionError::ssh(format!("Failed to close SCP channel: {}", e)))?;

        Ok(())
    }
}
