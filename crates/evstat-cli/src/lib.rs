//! Event status CLI library.
//!
//! This crate provides the CLI interface for recording group events and
//! checking the status of a group's last event.

mod cli;
pub mod commands;
mod config;

pub use cli::{Cli, Commands};
pub use config::Config;
