//! Application state management.
//!
//! Everything the views render lives in [`AppState`]. It is only ever
//! mutated from the main loop: background work reports back through
//! [`crate::monitor::SyncEvent`] messages, which are applied here in the
//! order they arrive.

pub mod agents;
pub mod form;
pub mod record;
pub mod selection;

pub use agents::{classify_agents, EnvironmentContext};
pub use form::{AddSiteForm, FormField};
pub use record::{
    ConnectionStatus, ConnectionType, MonitorStats, NewSite, SiteStatus, StatusRecord,
};
pub use selection::{Selection, SelectionPolicy};

use chrono::{DateTime, Utc};

use crate::error::Result;

/// One refresh's worth of data.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub sites: Vec<StatusRecord>,
    pub stats: MonitorStats,
}

/// Result of a refresh, tagged with the order it was issued in.
#[derive(Debug, Clone)]
pub struct RefreshOutcome {
    pub seq: u64,
    pub result: Result<Snapshot>,
}

/// What to do with a refresh that completes after a newer one was applied.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StalePolicy {
    /// Whatever completes last is shown.
    #[default]
    ApplyLatestCompleted,
    /// Drop results issued before the last applied refresh.
    DiscardOutOfOrder,
}

/// Application state.
pub struct AppState {
    /// Every record from the last applied refresh, in server order.
    pub sites: Vec<StatusRecord>,
    /// Agents derived from `sites`, or the synthetic controller.
    pub agents: Vec<StatusRecord>,
    pub stats: Option<MonitorStats>,
    pub selection: Selection,
    pub form: AddSiteForm,
    /// True until the first refresh completes.
    pub loading: bool,
    /// A manual check is in flight.
    pub checking: bool,
    /// Dismissible error banner.
    pub error: Option<String>,
    pub last_update: Option<DateTime<Utc>>,
    environment: EnvironmentContext,
    stale_policy: StalePolicy,
    last_applied_seq: Option<u64>,
}

impl AppState {
    /// Creates a new application state.
    pub fn new(
        environment: EnvironmentContext,
        selection_policy: SelectionPolicy,
        stale_policy: StalePolicy,
    ) -> Self {
        Self {
            sites: Vec::new(),
            agents: Vec::new(),
            stats: None,
            selection: Selection::new(selection_policy),
            form: AddSiteForm::default(),
            loading: true,
            checking: false,
            error: None,
            last_update: None,
            environment,
            stale_policy,
            last_applied_seq: None,
        }
    }

    pub fn environment(&self) -> &EnvironmentContext {
        &self.environment
    }

    /// Merge a refresh result. Returns false when it was dropped as stale.
    ///
    /// Failures only set the banner; the previously shown data stays.
    pub fn apply_refresh(&mut self, outcome: RefreshOutcome) -> bool {
        if self.stale_policy == StalePolicy::DiscardOutOfOrder {
            if let Some(last) = self.last_applied_seq {
                if outcome.seq < last {
                    tracing::debug!("dropping refresh #{} (already applied #{})", outcome.seq, last);
                    return false;
                }
            }
        }
        self.last_applied_seq = Some(outcome.seq);
        self.loading = false;

        match outcome.result {
            Ok(snapshot) => {
                tracing::debug!(
                    "refresh #{}: {} records, {} up",
                    outcome.seq,
                    snapshot.sites.len(),
                    snapshot.stats.sites_up
                );
                self.agents = classify_agents(&snapshot.sites, &self.environment);
                self.selection.on_refresh(&snapshot.sites);
                self.sites = snapshot.sites;
                self.stats = Some(snapshot.stats);
                self.error = None;
                self.last_update = Some(Utc::now());
            }
            Err(err) => {
                tracing::warn!("refresh #{} failed: {}", outcome.seq, err);
                self.error = Some(err.user_message());
            }
        }
        true
    }

    pub fn selected(&self) -> Option<&StatusRecord> {
        self.selection.current()
    }

    pub fn select_next(&mut self) {
        self.selection.select_next(&self.sites);
    }

    pub fn select_prev(&mut self) {
        self.selection.select_prev(&self.sites);
    }

    /// Mark a manual check as started. Returns false if one is already running.
    pub fn begin_check(&mut self) -> bool {
        if self.checking {
            return false;
        }
        self.checking = true;
        true
    }

    /// The trigger call and its follow-up refresh have both finished.
    pub fn finish_check(&mut self, trigger: Result<()>) {
        self.checking = false;
        if let Err(err) = trigger {
            tracing::warn!("manual check failed: {}", err);
            self.error = Some(format!("Manual check failed: {}", err.user_message()));
        }
    }

    /// Start submitting the add-site form. Validation errors stay inline.
    pub fn begin_add_site(&mut self) -> Option<NewSite> {
        if self.form.submitting {
            return None;
        }
        let site = self.form.validate().ok()?;
        self.form.error = None;
        self.form.submitting = true;
        Some(site)
    }

    pub fn finish_add_site(&mut self, result: Result<StatusRecord>) {
        match result {
            Ok(record) => {
                tracing::info!("site '{}' added", record.name);
                self.form.close();
            }
            Err(err) => {
                self.form.submitting = false;
                self.form.error = Some(err.user_message());
            }
        }
    }

    /// Forget the selection if it points at the record being deleted.
    pub fn begin_delete(&mut self, id: i64) {
        if self.selection.selected_id() == Some(id) {
            self.selection.clear();
        }
    }

    pub fn finish_delete(&mut self, id: i64, result: Result<()>) {
        if let Err(err) = result {
            tracing::warn!("deleting site #{} failed: {}", id, err);
            self.error = Some(format!("Delete failed: {}", err.user_message()));
        }
    }

    pub fn dismiss_error(&mut self) {
        self.error = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DashboardError;
    use pretty_assertions::assert_eq;

    fn state(policy: StalePolicy) -> AppState {
        AppState::new(
            EnvironmentContext::new("http://localhost:8000", "localhost", "http"),
            SelectionPolicy::Snapshot,
            policy,
        )
    }

    fn site(id: i64, name: &str) -> StatusRecord {
        StatusRecord::new_site(id, name, format!("https://{}.example", name.to_lowercase()))
    }

    fn ok(seq: u64, sites: Vec<StatusRecord>) -> RefreshOutcome {
        let stats = MonitorStats {
            total_sites: sites.len() as u64,
            ..Default::default()
        };
        RefreshOutcome {
            seq,
            result: Ok(Snapshot { sites, stats }),
        }
    }

    fn failed(seq: u64) -> RefreshOutcome {
        RefreshOutcome {
            seq,
            result: Err(DashboardError::Transport("HTTP 502".into())),
        }
    }

    #[test]
    fn cold_start_with_empty_list() {
        let mut state = state(StalePolicy::default());
        assert!(state.loading);

        assert!(state.apply_refresh(ok(1, vec![])));
        assert!(!state.loading);
        assert_eq!(state.stats.as_ref().unwrap().total_sites, 0);
        assert_eq!(state.selected(), None);
        assert_eq!(state.agents.len(), 1);
        assert!(state.agents[0].is_controller());
        assert_eq!(state.agents[0].status, SiteStatus::Up);
    }

    #[test]
    fn first_load_selects_first_site() {
        let mut state = state(StalePolicy::default());
        state.apply_refresh(ok(1, vec![site(3, "Shop"), site(4, "Blog")]));
        assert_eq!(state.selection.selected_id(), Some(3));
        assert!(state.agents[0].is_controller());
    }

    #[test]
    fn failure_keeps_previous_data() {
        let mut state = state(StalePolicy::default());
        state.apply_refresh(ok(1, vec![site(1, "Shop")]));
        state.apply_refresh(failed(2));

        assert_eq!(state.sites.len(), 1);
        assert!(state.stats.is_some());
        assert_eq!(state.error.as_deref(), Some("request failed: HTTP 502"));

        state.apply_refresh(ok(3, vec![site(1, "Shop")]));
        assert_eq!(state.error, None);
    }

    #[test]
    fn cold_start_failure_ends_loading() {
        let mut state = state(StalePolicy::default());
        state.apply_refresh(failed(1));
        assert!(!state.loading);
        assert!(state.sites.is_empty());
        assert!(state.error.is_some());
    }

    #[test]
    fn selection_survives_refresh_with_same_record() {
        let mut state = state(StalePolicy::default());
        state.apply_refresh(ok(1, vec![site(1, "Shop"), site(2, "Blog")]));
        state.select_next();
        assert_eq!(state.selection.selected_id(), Some(2));

        state.apply_refresh(ok(2, vec![site(2, "Blog"), site(1, "Shop")]));
        assert_eq!(state.selection.selected_id(), Some(2));
    }

    #[test]
    fn deleting_selected_clears_it_for_good() {
        let mut state = state(StalePolicy::default());
        state.apply_refresh(ok(1, vec![site(1, "Shop"), site(2, "Blog")]));

        state.begin_delete(1);
        state.finish_delete(1, Ok(()));
        state.apply_refresh(ok(2, vec![site(1, "Shop"), site(2, "Blog")]));
        assert_eq!(state.selected(), None);
    }

    #[test]
    fn deleting_other_site_keeps_selection() {
        let mut state = state(StalePolicy::default());
        state.apply_refresh(ok(1, vec![site(1, "Shop"), site(2, "Blog")]));
        state.begin_delete(2);
        assert_eq!(state.selection.selected_id(), Some(1));
    }

    #[test]
    fn failed_delete_is_reported() {
        let mut state = state(StalePolicy::default());
        state.finish_delete(5, Err(DashboardError::Transport("HTTP 400".into())));
        assert_eq!(state.error.as_deref(), Some("Delete failed: request failed: HTTP 400"));
    }

    #[test]
    fn latest_completed_wins_by_default() {
        let mut state = state(StalePolicy::ApplyLatestCompleted);
        state.apply_refresh(ok(2, vec![site(1, "Newer")]));
        assert!(state.apply_refresh(ok(1, vec![site(1, "Older")])));
        assert_eq!(state.sites[0].name, "Older");
    }

    #[test]
    fn out_of_order_results_can_be_discarded() {
        let mut state = state(StalePolicy::DiscardOutOfOrder);
        state.apply_refresh(ok(2, vec![site(1, "Newer")]));
        assert!(!state.apply_refresh(ok(1, vec![site(1, "Older")])));
        assert_eq!(state.sites[0].name, "Newer");

        assert!(state.apply_refresh(ok(3, vec![site(1, "Newest")])));
        assert_eq!(state.sites[0].name, "Newest");
    }

    #[test]
    fn check_flag_lifecycle() {
        let mut state = state(StalePolicy::default());
        assert!(state.begin_check());
        assert!(!state.begin_check());

        state.finish_check(Err(DashboardError::Transport("HTTP 500".into())));
        assert!(!state.checking);
        assert_eq!(
            state.error.as_deref(),
            Some("Manual check failed: request failed: HTTP 500")
        );
    }

    #[test]
    fn add_site_success_resets_form() {
        let mut state = state(StalePolicy::default());
        state.form.open();
        state.form.name = "Example".into();
        state.form.url = "example.com".into();

        let site = state.begin_add_site().unwrap();
        assert_eq!(site.url, "https://example.com");
        assert!(state.form.submitting);
        assert_eq!(state.begin_add_site(), None);

        state.finish_add_site(Ok(StatusRecord::new_site(1, site.name, site.url)));
        assert!(!state.form.open);
        assert!(state.form.name.is_empty());
    }

    #[test]
    fn add_site_failure_keeps_input() {
        let mut state = state(StalePolicy::default());
        state.form.open();
        state.form.name = "Example".into();
        state.form.url = "example.com".into();
        state.begin_add_site().unwrap();

        state.finish_add_site(Err(DashboardError::Transport("HTTP 400: duplicate".into())));
        assert!(state.form.open);
        assert!(!state.form.submitting);
        assert_eq!(state.form.name, "Example");
        assert_eq!(
            state.form.error.as_deref(),
            Some("request failed: HTTP 400: duplicate")
        );
    }

    #[test]
    fn invalid_form_does_not_submit() {
        let mut state = state(StalePolicy::default());
        state.form.open();
        state.form.url = "example.com".into();

        assert_eq!(state.begin_add_site(), None);
        assert!(!state.form.submitting);
        assert_eq!(state.form.error.as_deref(), Some("Both name and URL are required"));
    }
}
