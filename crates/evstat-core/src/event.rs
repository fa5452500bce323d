//! The last event recorded for a group.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::ReviewDuration;

/// The most recent event a repository reports for a group.
///
/// Read-only input to the status check; nothing in this crate creates or
/// mutates stored events.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LastEvent {
    /// When the active period ends.
    pub end_date: DateTime<Utc>,
    /// Length of the review window after `end_date`. `None` means no window.
    #[serde(
        default,
        rename = "reviewDurationInHours",
        skip_serializing_if = "Option::is_none"
    )]
    pub review_duration: Option<ReviewDuration>,
}

impl LastEvent {
    pub const fn new(end_date: DateTime<Utc>, review_duration: Option<ReviewDuration>) -> Self {
        Self {
            end_date,
            review_duration,
        }
    }

    /// Instant at which the review window closes.
    ///
    /// Equals `end_date` when there is no review window.
    pub fn review_end(&self) -> DateTime<Utc> {
        let window = self.review_duration.unwrap_or_default().as_time_delta();
        self.end_date
            .checked_add_signed(window)
            .unwrap_or(DateTime::<Utc>::MAX_UTC)
    }
}
