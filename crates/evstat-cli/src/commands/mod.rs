//! CLI subcommand implementations.

pub mod add;
pub mod events;
pub mod status;
