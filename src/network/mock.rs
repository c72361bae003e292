// file: src/network/mock.rs
// version: 1.0.0
// guid: mock1a2b-c3d4-5678-9012-345678abcdef

//! Scripted remote shell for tests.
//!
//! Records every command issued through the [`RemoteShell`] trait and replays
//! canned outputs, so sequencing and idempotency tests run without a real
//! SSH session. Unmatched commands succeed with empty output.

use super::remote::{CommandOutput, RemoteShell};
use crate::Result;
use std::collections::VecDeque;
use std::path::Path;

enum Reply {
    /// Consumed front to back; an exhausted queue no longer matches
    Queue(VecDeque<CommandOutput>),
    /// Matches every time
    Always(CommandOutput),
}

/// Test double for [`RemoteShell`]
pub struct ScriptedRemote {
    log: Vec<String>,
    uploads: Vec<(String, String)>,
    rules: Vec<(String, Reply)>,
}

impl ScriptedRemote {
    pub fn new() -> Self {
        Self {
            log: Vec::new(),
            uploads: Vec::new(),
            rules: Vec::new(),
        }
    }

    fn ok(stdout: &str) -> CommandOutput {
        CommandOutput {
            stdout: stdout.to_string(),
            stderr: String::new(),
            exit_code: 0,
        }
    }

    fn fail(exit_code: i32, stderr: &str) -> CommandOutput {
        CommandOutput {
            stdout: String::new(),
            stderr: stderr.to_string(),
            exit_code,
        }
    }

    /// Every command containing `needle` succeeds with this stdout
    pub fn stdout_on(&mut self, needle: &str, stdout: &str) {
        self.rules
            .push((needle.to_string(), Reply::Always(Self::ok(stdout))));
    }

    /// Every command containing `needle` fails
    pub fn fail_on(&mut self, needle: &str, exit_code: i32, stderr: &str) {
        self.rules.push((
            needle.to_string(),
            Reply::Always(Self::fail(exit_code, stderr)),
        ));
    }

    /// The next command containing `needle` fails; later ones fall through
    pub fn fail_once(&mut self, needle: &str, exit_code: i32, stderr: &str) {
        self.push_queued(needle, Self::fail(exit_code, stderr));
    }

    /// The next command containing `needle` succeeds with this stdout
    pub fn stdout_once(&mut self, needle: &str, stdout: &str) {
        self.push_queued(needle, Self::ok(stdout));
    }

    fn push_queued(&mut self, needle: &str, output: CommandOutput) {
        for (existing, reply) in &mut self.rules {
            if existing == needle {
                if let Reply::Queue(queue) = reply {
                    queue.push_back(output);
                    return;
                }
            }
        }
        let mut queue = VecDeque::new();
        queue.push_back(output);
        self.rules.push((needle.to_string(), Reply::Queue(queue)));
    }

    /// All commands issued, in order
    pub fn log(&self) -> &[String] {
        &self.log
    }

    /// Uploaded files as (remote path, contents) pairs
    pub fn uploads(&self) -> &[(String, String)] {
        &self.uploads
    }

    /// How many issued commands contain `needle`
    pub fn count_containing(&self, needle: &str) -> usize {
        self.log.iter().filter(|c| c.contains(needle)).count()
    }
}

impl Default for ScriptedRemote {
    fn default() -> Self {
        Self::new()
    }
}

impl RemoteShell for ScriptedRemote {
    async fn probe(&mut self, command: &str) -> Result<CommandOutput> {
        self.log.push(command.to_string());

        for (needle, reply) in &mut self.rules {
            if !command.contains(needle.as_str()) {
                continue;
            }
            match reply {
                Reply::Queue(queue) => {
                    if let Some(output) = queue.pop_front() {
                        return Ok(output);
                    }
                }
                Reply::Always(output) => return Ok(output.clone()),
            }
        }

        Ok(Self::ok(""))
    }

    async fn put(&mut self, local: &Path, remote: &str) -> Result<()> {
        let contents = std::fs::read_to_string(local)?;
        self.log.push(format!("put {}", remote));
        self.uploads.push((remote.to_string(), contents));
        Ok(())
    }
}
