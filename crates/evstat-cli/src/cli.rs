//! Command-line argument definitions.

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};

/// Event status checker.
///
/// Records time-bounded group events and reports whether a group's last
/// event is active, in review, or done.
#[derive(Debug, Parser)]
#[command(name = "evstat", version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to config file.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Show the status of a group's last event.
    Status {
        /// The group to check.
        group_id: String,

        /// Evaluate at this instant (RFC 3339) instead of the current time.
        #[arg(long)]
        at: Option<DateTime<Utc>>,

        /// Output as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Record an event for a group.
    Add {
        /// The group the event belongs to.
        group_id: String,

        /// When the active period ends (RFC 3339).
        #[arg(long)]
        end: DateTime<Utc>,

        /// Length of the review window after the end date, in hours.
        #[arg(long)]
        review_hours: Option<f64>,

        /// Event ID (defaults to a random UUID).
        #[arg(long)]
        id: Option<String>,
    },

    /// List recorded events for a group.
    Events {
        /// The group to list.
        group_id: String,

        /// Output as JSON.
        #[arg(long)]
        json: bool,
    },
}
