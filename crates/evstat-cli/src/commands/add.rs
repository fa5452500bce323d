//! Add command for recording a group event.

use std::io::Write;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};

use evstat_core::{GroupId, LastEvent, ReviewDuration};
use evstat_db::{Database, EventRecord};

/// A new event as given on the command line.
#[derive(Debug, Clone)]
pub struct NewEvent {
    pub group_id: String,
    pub end: DateTime<Utc>,
    pub review_hours: Option<f64>,
    pub id: Option<String>,
}

pub fn run<W: Write>(
    writer: &mut W,
    db: &Database,
    event: NewEvent,
    created_at: DateTime<Utc>,
) -> Result<()> {
    let group_id = GroupId::new(event.group_id).context("invalid group ID")?;
    let review_duration = event
        .review_hours
        .map(ReviewDuration::from_hours)
        .transpose()
        .context("invalid review duration")?;
    let id = event
        .id
        .unwrap_or_else(|| uuid::Uuid::new_v4().to_string());

    let record = EventRecord::new(
        id,
        &group_id,
        &LastEvent::new(event.end, review_duration),
        created_at,
    )
    .context("invalid end date")?;
    let inserted = db
        .insert_event(&record)
        .with_context(|| format!("failed to store event {}", record.id))?;

    if inserted == 0 {
        writeln!(writer, "Event {} already exists, nothing recorded.", record.id)?;
    } else {
        writeln!(writer, "Recorded event {} for {group_id}.", record.id)?;
    }

    Ok(())
}
