//! Core type definitions with validation.

use std::fmt;

use chrono::TimeDelta;
use serde::{Deserialize, Serialize};
use thiserror::Error;

const MILLIS_PER_HOUR: f64 = 3_600_000.0;

/// Validation errors for core types.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ValidationError {
    /// The provided value was empty.
    #[error("{field} cannot be empty")]
    Empty { field: &'static str },

    /// The review duration was below zero.
    #[error("review duration cannot be negative, got {value}")]
    NegativeReviewDuration { value: f64 },

    /// The review duration was NaN or infinite.
    #[error("review duration must be a finite number, got {value}")]
    NonFiniteReviewDuration { value: f64 },
}

/// A validated group identifier.
///
/// Group IDs must be non-empty strings. Whether a group actually exists is
/// for the repository to decide.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct GroupId(String);

impl GroupId {
    /// Creates a new ID after validation.
    pub fn new(id: impl Into<String>) -> Result<Self, ValidationError> {
        let id = id.into();
        if id.is_empty() {
            return Err(ValidationError::Empty { field: "group ID" });
        }
        Ok(Self(id))
    }

    /// Returns the ID as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for GroupId {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<GroupId> for String {
    fn from(id: GroupId) -> Self {
        id.0
    }
}

impl fmt::Display for GroupId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for GroupId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Length of the review window that follows an event's end date, in hours.
///
/// Always finite and non-negative. Fractional hours are allowed.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct ReviewDuration(f64);

impl ReviewDuration {
    /// A review window of zero length.
    pub const ZERO: Self = Self(0.0);

    /// Creates a review duration after validation.
    pub fn from_hours(hours: f64) -> Result<Self, ValidationError> {
        if !hours.is_finite() {
            return Err(ValidationError::NonFiniteReviewDuration { value: hours });
        }
        if hours < 0.0 {
            return Err(ValidationError::NegativeReviewDuration { value: hours });
        }
        Ok(Self(hours))
    }

    /// Returns the duration in hours.
    #[must_use]
    pub const fn hours(self) -> f64 {
        self.0
    }

    /// Converts the window to a [`TimeDelta`] at millisecond precision.
    ///
    /// Windows too large to represent saturate at [`TimeDelta::MAX`].
    #[must_use]
    #[expect(
        clippy::cast_possible_truncation,
        reason = "value is finite and non-negative; `as` saturates on overflow"
    )]
    pub fn as_time_delta(self) -> TimeDelta {
        let millis = (self.0 * MILLIS_PER_HOUR).round() as i64;
        TimeDelta::try_milliseconds(millis).unwrap_or(TimeDelta::MAX)
    }
}

impl Default for ReviewDuration {
    fn default() -> Self {
        Self::ZERO
    }
}

impl TryFrom<f64> for ReviewDuration {
    type Error = ValidationError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::from_hours(value)
    }
}

impl From<ReviewDuration> for f64 {
    fn from(duration: ReviewDuration) -> Self {
        duration.0
    }
}

impl fmt::Display for ReviewDuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}h", self.0)
    }
}
