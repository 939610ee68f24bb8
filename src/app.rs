//! Application state and logic.
//!
//! This module ties the monitoring service client, the view state and the UI
//! together. The main loop is the only place that mutates [`AppState`]:
//! background work reports back through [`SyncEvent`]s and is folded in
//! between frames.

use std::sync::Arc;
use std::time::Duration;

use color_eyre::Result;
use crossterm::event::KeyEvent;
use futures::StreamExt;
use ratatui::backend::Backend;
use ratatui::Terminal;
use tokio::sync::mpsc;

use crate::api::{HttpMonitorApi, MonitorApi};
use crate::event::{Event, EventHandler, DEFAULT_TICK_RATE};
use crate::monitor::{Mutations, Poller, RefreshController, SyncEvent, DEFAULT_REFRESH_INTERVAL};
use crate::state::{AppState, EnvironmentContext, SelectionPolicy, StalePolicy};
use crate::ui::{Ui, UpdateKind};

/// Default monitoring service endpoint.
pub const DEFAULT_API_URL: &str = "http://localhost:8000/api";

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Base URL of the monitoring service API
    pub api_url: String,
    pub refresh_interval: Duration,
    /// Per-request timeout; `None` waits as long as the transport allows
    pub request_timeout: Option<Duration>,
    pub tick_rate: Duration,
    pub selection_policy: SelectionPolicy,
    pub stale_results: StalePolicy,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            refresh_interval: DEFAULT_REFRESH_INTERVAL,
            request_timeout: None,
            tick_rate: DEFAULT_TICK_RATE,
            selection_policy: SelectionPolicy::default(),
            stale_results: StalePolicy::default(),
        }
    }
}

impl AppConfig {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Main application.
pub struct App {
    /// Application state
    state: AppState,
    /// Application configuration
    config: AppConfig,
    /// Current view controller
    ui: Ui,
    refresher: RefreshController,
    mutations: Mutations,
    /// Results coming back from background work
    sync_rx: mpsc::UnboundedReceiver<SyncEvent>,
    /// Should the application exit?
    should_quit: bool,
}

impl App {
    /// Creates a new application talking to the configured service.
    pub fn new(config: AppConfig) -> Result<Self> {
        let api = HttpMonitorApi::new(&config.api_url, config.request_timeout)?;
        let environment = EnvironmentContext::from_url(api.base_url());
        tracing::info!("using monitoring service at {}", api.base_url());
        Ok(Self::with_api(config, Arc::new(api), environment))
    }

    /// Creates an application over any [`MonitorApi`] implementation.
    pub fn with_api(
        config: AppConfig,
        api: Arc<dyn MonitorApi>,
        environment: EnvironmentContext,
    ) -> Self {
        let (sync_tx, sync_rx) = mpsc::unbounded_channel();
        let refresher = RefreshController::new(api, sync_tx);
        let mutations = Mutations::new(refresher.clone());
        let state = AppState::new(environment, config.selection_policy, config.stale_results);

        Self {
            state,
            config,
            ui: Ui::new(),
            refresher,
            mutations,
            sync_rx,
            should_quit: false,
        }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Runs the application until the user quits.
    ///
    /// Loads once immediately and then on the configured interval. The timer
    /// is cancelled on the way out whether or not the loop failed.
    pub async fn run(
        &mut self,
        terminal: &mut Terminal<impl Backend>,
        events: &mut EventHandler,
    ) -> Result<()> {
        self.refresher.refresh();
        let poller = Poller::spawn(self.refresher.clone(), self.config.refresh_interval);

        let result = self.event_loop(terminal, events).await;

        poller.shutdown().await;
        tracing::info!("dashboard closed");
        result
    }

    async fn event_loop(
        &mut self,
        terminal: &mut Terminal<impl Backend>,
        events: &mut EventHandler,
    ) -> Result<()> {
        while !self.should_quit {
            terminal.draw(|frame| self.ui.render(frame, &self.state))?;

            tokio::select! {
                event = events.next() => match event {
                    Some(event) => self.handle_event(event),
                    None => self.should_quit = true,
                },
                Some(sync) = self.sync_rx.recv() => sync.apply(&mut self.state),
            }
        }
        Ok(())
    }

    /// Handles input and other events.
    fn handle_event(&mut self, event: Event) {
        match event {
            Event::Key(key) => self.handle_key_event(key),
            Event::Tick => self.ui.update_animations(),
            // Redrawn at the top of the loop
            Event::Resize(..) => {}
        }
    }

    fn handle_key_event(&mut self, key: KeyEvent) {
        let update = self.ui.handle_key_event(key, &mut self.state);
        self.handle_update(update);
    }

    /// Start whatever work the key asked for.
    fn handle_update(&mut self, update: UpdateKind) {
        match update {
            UpdateKind::Quit => self.should_quit = true,
            UpdateKind::Refresh => {
                self.refresher.refresh();
            }
            UpdateKind::ManualCheck => {
                self.mutations.start_manual_check(&mut self.state);
            }
            UpdateKind::SubmitSite => {
                self.mutations.submit_add_site(&mut self.state);
            }
            UpdateKind::DeleteSelected => {
                self.mutations.delete_selected(&mut self.state);
            }
            UpdateKind::Other => {}
        }
    }
}
