//! Contract for loading a group's last event.

use std::future::Future;

use crate::event::LastEvent;
use crate::types::GroupId;

/// Loads the most recent event for a group.
///
/// Implementations decide what "last" means (latest end date, latest
/// insertion, ...). At most one event is returned per call, and `Ok(None)`
/// means the group has no event, which is not an error.
pub trait LoadLastEventRepository: Send + Sync {
    /// Failure raised by the backing store. Surfaced unchanged by callers.
    type Error: std::error::Error + Send + Sync + 'static;

    fn load_last_event(
        &self,
        group_id: &GroupId,
    ) -> impl Future<Output = Result<Option<LastEvent>, Self::Error>> + Send;
}

impl<R: LoadLastEventRepository> LoadLastEventRepository for &R {
    type Error = R::Error;

    fn load_last_event(
        &self,
        group_id: &GroupId,
    ) -> impl Future<Output = Result<Option<LastEvent>, Self::Error>> + Send {
        (**self).load_last_event(group_id)
    }
}
