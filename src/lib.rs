// file: src/lib.rs
// version: 1.0.0
// guid: 9c2d4f6a-1e38-4b5c-a790-2d8e6f013c44

//! Helix Provision Agent
//!
//! Provisions a Perforce Helix test environment on Vagrant-managed Ubuntu
//! hosts over SSH: OS preparation, Node.js and pm2, the authentication
//! integration service, the Helix Core server, and the login/logout
//! extension that bridges the two.

pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod network;
pub mod tasks;
pub mod utils;

pub use error::{ProvisionError, Result};

/// Version information for the agent
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
