//! Status command for checking a group's last event.

use std::io::Write;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::Serialize;

use evstat_core::{CheckLastEventStatus, Clock, EventStatus, FixedClock, GroupId, SystemClock};
use evstat_db::Database;

#[derive(Debug, Serialize)]
struct JsonStatus<'a> {
    group_id: &'a str,
    status: EventStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    at: Option<DateTime<Utc>>,
}

async fn check<C: Clock>(db: &Database, group_id: &GroupId, clock: C) -> Result<EventStatus> {
    let status = CheckLastEventStatus::with_clock(db, clock)
        .execute(group_id)
        .await
        .with_context(|| format!("failed to load last event for group {group_id}"))?;
    Ok(status)
}

/// Checks the group's status, evaluated at `at` when given and at the
/// current time otherwise.
pub fn run<W: Write>(
    writer: &mut W,
    db: &Database,
    group_id: &str,
    at: Option<DateTime<Utc>>,
    json: bool,
) -> Result<()> {
    let group_id = GroupId::new(group_id).context("invalid group ID")?;

    let runtime = tokio::runtime::Builder::new_current_thread()
        .build()
        .context("failed to initialize tokio runtime")?;
    let status = match at {
        Some(at) => runtime.block_on(check(db, &group_id, FixedClock::new(at)))?,
        None => runtime.block_on(check(db, &group_id, SystemClock))?,
    };
    tracing::debug!(%group_id, %status, ?at, "status evaluated");

    if json {
        let output = JsonStatus {
            group_id: group_id.as_str(),
            status,
            at,
        };
        writeln!(writer, "{}", serde_json::to_string_pretty(&output)?)?;
    } else {
        writeln!(writer, "{group_id}: {status}")?;
    }

    Ok(())
}
