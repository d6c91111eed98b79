//! CLI tool for inspecting consistent hash rings.
//!
//! Provides commands for:
//! - Locating the owner (and failover candidates) of a key
//! - Listing a node's virtual positions
//! - Sampling key distribution across the membership

pub mod commands;
pub mod config;

pub use commands::Command;
pub use config::CliConfig;
