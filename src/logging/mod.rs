// file: src/logging/mod.rs
// version: 1.0.0
// guid: b6c7d8e9-f0a1-2345-6789-012345bcdefa

//! Logging system for the Helix provisioning agent

pub mod logger;

pub use logger::init_logger;
