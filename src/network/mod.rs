// file: src/network/mod.rs
// version: 1.2.0
// guid: a9b0c1d2-e3f4-5678-9012-345678abcdef

//! Network operations module

pub mod profile;
pub mod remote;
pub mod ssh;

#[cfg(test)]
pub mod mock;

pub use profile::{ConnectionProfile, HostProfile};
pub use remote::{CommandOutput, RemoteShell};
pub use ssh::SshClient;
