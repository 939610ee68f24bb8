//! Write operations: add a site, delete a site, trigger a manual check.
//!
//! Each flow performs its remote call on a spawned task, reports the outcome
//! and then forces a refresh so the view catches up with the service.

use tokio::task::JoinHandle;

use super::{RefreshController, SyncEvent};
use crate::state::{AppState, NewSite};

#[derive(Clone)]
pub struct Mutations {
    refresher: RefreshController,
}

impl Mutations {
    pub fn new(refresher: RefreshController) -> Self {
        Self { refresher }
    }

    /// Validate the add-site form and, if it passes, send it.
    ///
    /// Returns `None` without touching the network when validation fails;
    /// the message is left on the form.
    pub fn submit_add_site(&self, state: &mut AppState) -> Option<JoinHandle<()>> {
        let site = state.begin_add_site()?;
        Some(self.add_site(site))
    }

    /// Create the site, then refresh if the service accepted it.
    pub fn add_site(&self, site: NewSite) -> JoinHandle<()> {
        let refresher = self.refresher.clone();
        tokio::spawn(async move {
            tracing::info!("adding site {} ({})", site.name, site.url);
            let result = refresher.api().create_site(site.name, site.url).await;
            let created = result.is_ok();
            if refresher.events().send(SyncEvent::SiteCreated(result)).is_err() {
                return;
            }
            if created {
                refresher.refresh_now().await;
            }
        })
    }

    /// Flag the check as running and start it, unless one already is.
    pub fn start_manual_check(&self, state: &mut AppState) -> Option<JoinHandle<()>> {
        if !state.begin_check() {
            return None;
        }
        Some(self.manual_check())
    }

    /// Trigger a check, then refresh whether or not the trigger worked.
    pub fn manual_check(&self) -> JoinHandle<()> {
        let refresher = self.refresher.clone();
        tokio::spawn(async move {
            tracing::info!("triggering manual check");
            let trigger = refresher.api().trigger_manual_check().await;
            refresher.refresh_now().await;
            let _ = refresher.events().send(SyncEvent::CheckFinished(trigger));
        })
    }

    /// Delete the selected site, clearing the selection first.
    pub fn delete_selected(&self, state: &mut AppState) -> Option<JoinHandle<()>> {
        let id = state.selected()?.id;
        state.begin_delete(id);
        Some(self.delete_site(id))
    }

    /// Delete a site, then refresh whether or not the delete worked.
    pub fn delete_site(&self, id: i64) -> JoinHandle<()> {
        let refresher = self.refresher.clone();
        tokio::spawn(async move {
            tracing::info!("deleting site #{}", id);
            let result = refresher.api().delete_site(id).await;
            if refresher
                .events()
                .send(SyncEvent::SiteDeleted { id, result })
                .is_err()
            {
                return;
            }
            refresher.refresh_now().await;
        })
    }
}
