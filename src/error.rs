// file: src/error.rs
// version: 1.2.0
// guid: 3f8a1c5e-9b42-4d17-8c06-5a2e71d4b903

use thiserror::Error;

/// Result type alias for the application
pub type Result<T> = std::result::Result<T, ProvisionError>;

/// Error types for the Helix provisioning agent
#[derive(Error, Debug)]
pub enum ProvisionError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("SSH error: {0}")]
    Ssh(String),

    #[error("Remote command '{command}' failed{}: {stderr}",
        exit_code.map(|c| format!(" with exit code {}", c)).unwrap_or_default())]
    Process {
        command: String,
        exit_code: Option<i32>,
        stderr: String,
    },

    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Template error: {0}")]
    Template(String),

    #[error("Local command error: {0}")]
    Local(String),

    #[error("Task error: {0}")]
    Task(String),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl ProvisionError {
    /// Create a new SSH error
    pub fn ssh(msg: impl Into<String>) -> Self {
        Self::Ssh(msg.into())
    }

    /// Create a new connection error
    pub fn connection(msg: impl Into<String>) -> Self {
        Self::Connection(msg.into())
    }

    /// Create a new configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a new template error
    pub fn template(msg: impl Into<String>) -> Self {
        Self::Template(msg.into())
    }

    /// Create a new local command error
    pub fn local(msg: impl Into<String>) -> Self {
        Self::Local(msg.into())
    }

    /// Create a new task error
    pub fn task(msg: impl Into<String>) -> Self {
        Self::Task(msg.into())
    }
}
