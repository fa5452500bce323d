//! Storage layer for event status checks.
//!
//! Persists group events with `rusqlite` and serves as the
//! [`LoadLastEventRepository`] behind the status check.
//!
//! # Thread Safety
//!
//! `rusqlite::Connection` is `Send` but not `Sync`. [`Database`] keeps its
//! connection behind a `Mutex` so a single instance can be shared by reference,
//! which the async repository contract requires. Statements are serialized.
//!
//! # Schema
//!
//! ## Timestamp Format
//!
//! Timestamps are stored as TEXT in RFC 3339 UTC with nanosecond precision
//! (e.g., `2024-01-15T10:30:00.000000000Z`, see [`format_timestamp`]), so a
//! stored end date is exactly the instant it was given. A single fixed-width
//! format keeps lexicographic ordering equal to chronological ordering, which
//! [`Database::last_event`] relies on. That only holds for four-digit years,
//! so [`EventRecord::new`] rejects instants outside years 0000-9999.
//!
//! ## Review Duration
//!
//! `review_duration_hours` is a nullable REAL. NULL means the event has no
//! review window.

use std::path::Path;
use std::sync::{Mutex, MutexGuard};

use chrono::{DateTime, Datelike, SecondsFormat, Utc};
use evstat_core::{GroupId, LastEvent, LoadLastEventRepository, ReviewDuration, ValidationError};
use rusqlite::{Connection, OptionalExtension, Row, params};
use thiserror::Error;
use tracing::debug;

/// Database errors.
#[derive(Debug, Error)]
pub enum DbError {
    /// An error from the underlying database.
    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    /// Another thread panicked while holding the connection.
    #[error("database connection lock poisoned")]
    LockPoisoned,
    /// Failed to parse an event timestamp.
    #[error("invalid timestamp for event {event_id}: {timestamp}")]
    TimestampParse {
        event_id: String,
        timestamp: String,
        #[source]
        source: chrono::ParseError,
    },
    /// Timestamp cannot be stored in the fixed-width format.
    #[error("timestamp out of storable range (years 0000-9999): {timestamp}")]
    TimestampOutOfRange { timestamp: DateTime<Utc> },
    /// Stored review duration is negative or not finite.
    #[error("invalid review duration for event {event_id}")]
    InvalidReviewDuration {
        event_id: String,
        #[source]
        source: ValidationError,
    },
}

/// Database connection wrapper.
///
/// See the [module documentation](self) for thread safety considerations.
pub struct Database {
    conn: Mutex<Connection>,
}

/// A stored event row.
#[derive(Debug, Clone, PartialEq)]
pub struct EventRecord {
    pub id: String,
    pub group_id: String,
    pub end_date: String,
    pub review_duration_hours: Option<f64>,
    pub created_at: String,
}

impl EventRecord {
    /// Builds a record from typed values, formatting timestamps for storage.
    pub fn new(
        id: impl Into<String>,
        group_id: &GroupId,
        event: &LastEvent,
        created_at: DateTime<Utc>,
    ) -> Result<Self, DbError> {
        Ok(Self {
            id: id.into(),
            group_id: group_id.as_str().to_string(),
            end_date: format_timestamp(storable(event.end_date)?),
            review_duration_hours: event.review_duration.map(ReviewDuration::hours),
            created_at: format_timestamp(storable(created_at)?),
        })
    }

    /// Parses the stored columns into the domain record.
    pub fn to_last_event(&self) -> Result<LastEvent, DbError> {
        let end_date = parse_timestamp(&self.end_date, &self.id)?;
        let review_duration = self
            .review_duration_hours
            .map(ReviewDuration::from_hours)
            .transpose()
            .map_err(|source| DbError::InvalidReviewDuration {
                event_id: self.id.clone(),
                source,
            })?;
        Ok(LastEvent::new(end_date, review_duration))
    }

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            group_id: row.get(1)?,
            end_date: row.get(2)?,
            review_duration_hours: row.get(3)?,
            created_at: row.get(4)?,
        })
    }
}

impl Database {
    /// Opens a database at the given path, creating it if necessary.
    ///
    /// The database schema is automatically initialized on first open.
    pub fn open(path: &Path) -> Result<Self, DbError> {
        let conn = Connection::open(path)?;
        let db = Self {
            conn: Mutex::new(conn),
        };
        db.init()?;
        Ok(db)
    }

    /// Opens an in-memory database.
    ///
    /// Useful for testing. The database is destroyed when the connection closes.
    pub fn open_in_memory() -> Result<Self, DbError> {
        let conn = Connection::open_in_memory()?;
        let db = Self {
            conn: Mutex::new(conn),
        };
        db.init()?;
        Ok(db)
    }

    fn conn(&self) -> Result<MutexGuard<'_, Connection>, DbError> {
        self.conn.lock().map_err(|_| DbError::LockPoisoned)
    }

    /// Initializes the database schema.
    ///
    /// This is idempotent - safe to call on an already-initialized database.
    fn init(&self) -> Result<(), DbError> {
        self.conn()?.execute_batch(
            "
            -- Events table: one row per group event
            -- end_date, created_at: RFC 3339 UTC with nanoseconds
            -- review_duration_hours: NULL when the event has no review window
            CREATE TABLE IF NOT EXISTS events (
                id TEXT PRIMARY KEY,
                group_id TEXT NOT NULL,
                end_date TEXT NOT NULL,
                review_duration_hours REAL,
                created_at TEXT NOT NULL
            );

            CREATE INDEX IF NOT EXISTS idx_events_group_end ON events(group_id, end_date);
            ",
        )?;
        Ok(())
    }

    /// Inserts an event, ignoring duplicates by ID.
    ///
    /// Returns the number of rows written (0 or 1).
    pub fn insert_event(&self, event: &EventRecord) -> Result<usize, DbError> {
        let inserted = self.conn()?.execute(
            "
            INSERT OR IGNORE INTO events
            (id, group_id, end_date, review_duration_hours, created_at)
            VALUES (?, ?, ?, ?, ?)
            ",
            params![
                event.id,
                event.group_id,
                event.end_date,
                event.review_duration_hours,
                event.created_at,
            ],
        )?;
        debug!(event_id = %event.id, group_id = %event.group_id, inserted, "event stored");
        Ok(inserted)
    }

    /// Lists a group's events ordered by end date, then creation time.
    pub fn list_events(&self, group_id: &str) -> Result<Vec<EventRecord>, DbError> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(
            "
            SELECT id, group_id, end_date, review_duration_hours, created_at
            FROM events
            WHERE group_id = ?
            ORDER BY end_date ASC, created_at ASC, id ASC
            ",
        )?;
        let rows = stmt.query_map([group_id], EventRecord::from_row)?;
        let mut events = Vec::new();
        for row in rows {
            events.push(row?);
        }
        Ok(events)
    }

    /// Returns the group's last event: the latest end date, ties broken by the
    /// most recently created row.
    pub fn last_event(&self, group_id: &str) -> Result<Option<EventRecord>, DbError> {
        let record = self
            .conn()?
            .query_row(
                "
                SELECT id, group_id, end_date, review_duration_hours, created_at
                FROM events
                WHERE group_id = ?
                ORDER BY end_date DESC, created_at DESC, id DESC
                LIMIT 1
                ",
                [group_id],
                EventRecord::from_row,
            )
            .optional()?;
        Ok(record)
    }
}

impl LoadLastEventRepository for Database {
    type Error = DbError;

    async fn load_last_event(&self, group_id: &GroupId) -> Result<Option<LastEvent>, DbError> {
        let record = self.last_event(group_id.as_str())?;
        debug!(group_id = %group_id, found = record.is_some(), "loaded last event");
        record.as_ref().map(EventRecord::to_last_event).transpose()
    }
}

/// Formats a timestamp the way it is stored.
pub fn format_timestamp(timestamp: DateTime<Utc>) -> String {
    timestamp.to_rfc3339_opts(SecondsFormat::Nanos, true)
}

fn storable(timestamp: DateTime<Utc>) -> Result<DateTime<Utc>, DbError> {
    if (0..=9999).contains(&timestamp.year()) {
        Ok(timestamp)
    } else {
        Err(DbError::TimestampOutOfRange { timestamp })
    }
}

fn parse_timestamp(timestamp: &str, event_id: &str) -> Result<DateTime<Utc>, DbError> {
    DateTime::parse_from_rfc3339(timestamp)
        .map(|parsed| parsed.with_timezone(&Utc))
        .map_err(|source| DbError::TimestampParse {
            event_id: event_id.to_string(),
            timestamp: timestamp.to_string(),
            source,
        })
}
