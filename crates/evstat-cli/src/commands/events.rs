//! Events command for listing a group's recorded events.

use std::io::Write;

use anyhow::{Context, Result};
use serde::Serialize;

use evstat_db::{Database, EventRecord};

#[derive(Debug, Serialize)]
struct JsonEvent<'a> {
    id: &'a str,
    end_date: &'a str,
    review_duration_hours: Option<f64>,
    created_at: &'a str,
}

impl<'a> From<&'a EventRecord> for JsonEvent<'a> {
    fn from(event: &'a EventRecord) -> Self {
        Self {
            id: &event.id,
            end_date: &event.end_date,
            review_duration_hours: event.review_duration_hours,
            created_at: &event.created_at,
        }
    }
}

fn format_review(hours: Option<f64>) -> String {
    hours.map_or_else(|| "no review window".to_string(), |h| format!("review {h}h"))
}

pub fn run<W: Write>(writer: &mut W, db: &Database, group_id: &str, json: bool) -> Result<()> {
    let events = db
        .list_events(group_id)
        .with_context(|| format!("failed to list events for group {group_id}"))?;

    if json {
        let json_events: Vec<JsonEvent<'_>> = events.iter().map(JsonEvent::from).collect();
        writeln!(writer, "{}", serde_json::to_string_pretty(&json_events)?)?;
        return Ok(());
    }

    if events.is_empty() {
        writeln!(writer, "No events recorded for {group_id}.")?;
        return Ok(());
    }

    writeln!(writer, "Events for {group_id}:")?;
    for event in &events {
        writeln!(
            writer,
            "- {}: ends {}, {}",
            event.id,
            event.end_date,
            format_review(event.review_duration_hours)
        )?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    use insta::assert_snapshot;

    fn record(id: &str, end_date: &str, review_duration_hours: Option<f64>) -> EventRecord {
        EventRecord {
            id: id.to_string(),
            group_id: "team-a".to_string(),
            end_date: end_date.to_string(),
            review_duration_hours,
            created_at: "2025-01-01T00:00:00.000000000Z".to_string(),
        }
    }

    fn seeded_db() -> Database {
        let db = Database::open_in_memory().unwrap();
        db.insert_event(&record("sprint-2", "2025-01-15T00:00:00.000000000Z", None))
            .unwrap();
        db.insert_event(&record("sprint-1", "2025-01-08T00:00:00.000000000Z", Some(24.0)))
            .unwrap();
        db
    }

    #[test]
    fn events_text_output() {
        let db = seeded_db();
        let mut output = Vec::new();

        run(&mut output, &db, "team-a", false).unwrap();

        assert_snapshot!(String::from_utf8(output).unwrap(), @r"
        Events for team-a:
        - sprint-1: ends 2025-01-08T00:00:00.000000000Z, review 24h
        - sprint-2: ends 2025-01-15T00:00:00.000000000Z, no review window
        ");
    }

    #[test]
    fn events_json_output() {
        let db = seeded_db();
        let mut output = Vec::new();

        run(&mut output, &db, "team-a", true).unwrap();

        let parsed: serde_json::Value = serde_json::from_slice(&output).unwrap();
        assert_eq!(parsed[0]["id"], "sprint-1");
        assert_eq!(parsed[0]["review_duration_hours"], 24.0);
        assert!(parsed[1]["review_duration_hours"].is_null());
    }

    #[test]
    fn empty_group_message() {
        let db = Database::open_in_memory().unwrap();
        let mut output = Vec::new();

        run(&mut output, &db, "team-z", false).unwrap();

        assert_eq!(
            String::from_utf8(output).unwrap(),
            "No events recorded for team-z.\n"
        );
    }
}
