//! Synchronisation with the monitoring service.
//!
//! This module owns every network-bound activity of the dashboard:
//!
//! - Refreshing the status list and aggregate stats together
//! - Re-running that refresh on a fixed, cancellable timer
//! - The add-site, delete-site and manual-check flows, each of which ends by
//!   forcing a refresh
//!
//! Work runs on spawned tasks. Results come back to the main loop as
//! [`SyncEvent`]s over a channel; once the loop has gone away the channel is
//! closed and late results are simply dropped.

pub mod mutation;
pub mod poller;
pub mod refresh;

pub use mutation::Mutations;
pub use poller::Poller;
pub use refresh::RefreshController;

use std::time::Duration;

use crate::error::Result;
use crate::state::{AppState, RefreshOutcome, StatusRecord};

/// Default interval between background refreshes.
pub const DEFAULT_REFRESH_INTERVAL: Duration = Duration::from_secs(30);

/// Results reported back to the main loop.
#[derive(Debug)]
pub enum SyncEvent {
    Refreshed(RefreshOutcome),
    SiteCreated(Result<StatusRecord>),
    SiteDeleted { id: i64, result: Result<()> },
    /// The trigger call finished and its follow-up refresh was reported.
    CheckFinished(Result<()>),
}

impl SyncEvent {
    /// Fold this event into the view state.
    pub fn apply(self, state: &mut AppState) {
        match self {
            SyncEvent::Refreshed(outcome) => {
                state.apply_refresh(outcome);
            }
            SyncEvent::SiteCreated(result) => state.finish_add_site(result),
            SyncEvent::SiteDeleted { id, result } => state.finish_delete(id, result),
            SyncEvent::CheckFinished(result) => state.finish_check(result),
        }
    }
}
