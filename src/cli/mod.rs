// file: src/cli/mod.rs
// version: 1.0.0
// guid: c9d0e1f2-a3b4-5678-9012-345678cdefab

//! Command line interface for the Helix provisioning agent

pub mod args;
pub mod commands;

pub use args::Cli;
pub use commands::*;
