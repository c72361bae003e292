// file: src/utils/local.rs
// version: 1.0.0
// guid: a5b6c7d8-e9f0-1234-5678-901234abcdef

//! Local system utility functions

/// Helpers for inspecting the invoking machine
pub struct LocalUtils;

impl LocalUtils {
    /// Check if a command resolves on the local PATH
    pub fn command_exists(command: &str) -> bool {
        which::which(command).is_ok()
    }
}
