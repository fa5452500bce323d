//! Event status enum and the rule that derives it.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::event::LastEvent;

/// Lifecycle status of a group's last event.
///
/// Derived on every query and never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventStatus {
    /// `now` is at or before the event's end date.
    Active,
    /// `now` is past the end date but within the review window.
    InReview,
    /// There is no event, or its review window has closed.
    Done,
}

impl EventStatus {
    /// Classifies an event relative to `now`.
    ///
    /// Both boundaries are inclusive: `now == end_date` is [`Self::Active`]
    /// and `now == end_date + review` is [`Self::InReview`].
    #[must_use]
    pub fn classify(now: DateTime<Utc>, event: Option<&LastEvent>) -> Self {
        let Some(event) = event else {
            return Self::Done;
        };
        if now <= event.end_date {
            return Self::Active;
        }
        if now <= event.review_end() {
            return Self::InReview;
        }
        Self::Done
    }

    /// String representation for display and serialization.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::InReview => "in review",
            Self::Done => "done",
        }
    }
}

impl fmt::Display for EventStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl Serialize for EventStatus {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}
