//! Refresh controller.
//!
//! A refresh fetches the status list and the stats together and reports the
//! pair as one [`RefreshOutcome`]. Refreshes are never de-duplicated or
//! cancelled: overlapping ones race, and each carries a sequence number so
//! the state can decide what to do with late arrivals.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use super::SyncEvent;
use crate::api::MonitorApi;
use crate::error::Result;
use crate::state::{RefreshOutcome, Snapshot};

/// Issues refreshes against the API and reports them to the main loop.
#[derive(Clone)]
pub struct RefreshController {
    api: Arc<dyn MonitorApi>,
    events: mpsc::UnboundedSender<SyncEvent>,
    next_seq: Arc<AtomicU64>,
}

impl RefreshController {
    pub fn new(api: Arc<dyn MonitorApi>, events: mpsc::UnboundedSender<SyncEvent>) -> Self {
        Self {
            api,
            events,
            next_seq: Arc::new(AtomicU64::new(1)),
        }
    }

    pub fn api(&self) -> &Arc<dyn MonitorApi> {
        &self.api
    }

    pub(crate) fn events(&self) -> &mpsc::UnboundedSender<SyncEvent> {
        &self.events
    }

    /// Start a refresh in the background.
    pub fn refresh(&self) -> JoinHandle<()> {
        let this = self.clone();
        tokio::spawn(async move { this.refresh_now().await })
    }

    /// Run a refresh to completion and report it.
    pub async fn refresh_now(&self) {
        let outcome = self.fetch().await;
        if self.events.send(SyncEvent::Refreshed(outcome)).is_err() {
            tracing::debug!("view closed, dropping refresh result");
        }
    }

    /// Fetch both halves of a snapshot without reporting it.
    pub async fn fetch(&self) -> RefreshOutcome {
        let seq = self.next_seq.fetch_add(1, Ordering::Relaxed);
        tracing::debug!("refresh #{} started", seq);
        RefreshOutcome {
            seq,
            result: fetch_snapshot(self.api.as_ref()).await,
        }
    }
}

/// Issue both requests together; either failing fails the snapshot.
pub async fn fetch_snapshot(api: &dyn MonitorApi) -> Result<Snapshot> {
    let (sites, stats) = tokio::join!(api.list_statuses(), api.get_stats());
    Ok(Snapshot {
        sites: sites?,
        stats: stats?,
    })
}
