//! The last-event status check.

use tracing::debug;

use crate::clock::{Clock, SystemClock};
use crate::repository::LoadLastEventRepository;
use crate::status::EventStatus;
use crate::types::GroupId;

/// Reports the lifecycle status of a group's last event.
///
/// Holds no state between calls: every [`execute`](Self::execute) loads the
/// event once and reads the clock once.
#[derive(Debug, Clone)]
pub struct CheckLastEventStatus<R, C = SystemClock> {
    repository: R,
    clock: C,
}

impl<R: LoadLastEventRepository> CheckLastEventStatus<R> {
    /// Creates a check that reads the system clock.
    pub const fn new(repository: R) -> Self {
        Self {
            repository,
            clock: SystemClock,
        }
    }
}

impl<R: LoadLastEventRepository, C: Clock> CheckLastEventStatus<R, C> {
    pub const fn with_clock(repository: R, clock: C) -> Self {
        Self { repository, clock }
    }

    /// Loads the group's last event and classifies it against the current time.
    ///
    /// Repository failures are returned as-is.
    pub async fn execute(&self, group_id: &GroupId) -> Result<EventStatus, R::Error> {
        let event = self.repository.load_last_event(group_id).await?;
        let now = self.clock.now();
        let status = EventStatus::classify(now, event.as_ref());
        debug!(group_id = %group_id, %now, %status, has_event = event.is_some(), "checked last event status");
        Ok(status)
    }
}
