//! Core domain logic for event status checks.
//!
//! This crate contains the fundamental types and logic for:
//! - Classification: deciding whether a group's last event is active, in review or done
//! - Clocks: injectable sources of "now" so the decision can be pinned in tests
//! - Repository contract: the single async capability that loads a group's last event

mod check;
mod clock;
mod event;
mod repository;
mod status;
pub mod types;

pub use check::CheckLastEventStatus;
pub use clock::{Clock, FixedClock, SystemClock};
pub use event::LastEvent;
pub use repository::LoadLastEventRepository;
pub use status::EventStatus;
pub use types::{GroupId, ReviewDuration, ValidationError};
