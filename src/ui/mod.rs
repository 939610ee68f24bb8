//! UI components for the SiteUp dashboard.
//!
//! Two views share the same refreshed state: the sites view (list plus the
//! selected site's detail) and the agents view. The add-site dialog and the
//! help overlay are drawn on top of whichever view is active. Key handling
//! lives here too and reports what the app should do through [`UpdateKind`].

pub mod add_site;
pub mod agents_view;
pub mod format;
pub mod help;
pub mod sites_view;
pub mod theme;

pub use add_site::AddSiteDialog;
pub use agents_view::AgentsView;
pub use help::HelpView;
pub use sites_view::SitesView;
pub use theme::Theme;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use itertools::Itertools;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use crate::state::AppState;

const SPINNER: [&str; 4] = ["|", "/", "-", "\\"];

/// The result of updating the UI in response to user input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateKind {
    Quit,
    Refresh,
    ManualCheck,
    SubmitSite,
    DeleteSelected,
    /// Handled locally, nothing for the app to do
    Other,
}

/// Available views in the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewState {
    #[default]
    Sites,
    Agents,
}

impl ViewState {
    fn title(&self) -> &'static str {
        match self {
            ViewState::Sites => "SITES",
            ViewState::Agents => "AGENTS",
        }
    }
}

/// Main UI controller.
pub struct Ui {
    state: ViewState,
    show_help: bool,
    theme: Theme,
    animation_frame: usize,
}

impl Ui {
    pub fn new() -> Self {
        Self {
            state: ViewState::default(),
            show_help: false,
            theme: Theme::default(),
            animation_frame: 0,
        }
    }

    pub fn current_view(&self) -> ViewState {
        self.state
    }

    pub fn navigate_to(&mut self, view: ViewState) {
        self.state = view;
    }

    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
    }

    pub fn is_help_visible(&self) -> bool {
        self.show_help
    }

    /// Advance the spinner.
    pub fn update_animations(&mut self) {
        self.animation_frame = (self.animation_frame + 1) % SPINNER.len();
    }

    /// Handle keyboard input.
    pub fn handle_key_event(&mut self, key: KeyEvent, app_state: &mut AppState) -> UpdateKind {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return UpdateKind::Quit;
        }

        if app_state.form.open {
            return Self::handle_form_input(key, app_state);
        }

        match key.code {
            KeyCode::F(1) | KeyCode::Char('?') => {
                self.toggle_help();
                return UpdateKind::Other;
            }
            KeyCode::Esc if self.show_help => {
                self.show_help = false;
                return UpdateKind::Other;
            }
            KeyCode::Char('q') | KeyCode::Esc => return UpdateKind::Quit,
            KeyCode::Char('1') | KeyCode::Char('s') => {
                self.state = ViewState::Sites;
                return UpdateKind::Other;
            }
            KeyCode::Char('2') | KeyCode::Char('g') => {
                self.state = ViewState::Agents;
                return UpdateKind::Other;
            }
            KeyCode::Char('r') => return UpdateKind::Refresh,
            KeyCode::Char('c') => return UpdateKind::ManualCheck,
            KeyCode::Char('a') => {
                app_state.form.open();
                return UpdateKind::Other;
            }
            KeyCode::Char('e') => {
                app_state.dismiss_error();
                return UpdateKind::Other;
            }
            _ => {}
        }

        match self.state {
            ViewState::Sites => Self::handle_sites_input(key, app_state),
            ViewState::Agents => UpdateKind::Other,
        }
    }

    fn handle_sites_input(key: KeyEvent, app_state: &mut AppState) -> UpdateKind {
        match key.code {
            KeyCode::Down | KeyCode::Char('j') => app_state.select_next(),
            KeyCode::Up | KeyCode::Char('k') => app_state.select_prev(),
            KeyCode::Char('x') | KeyCode::Delete => return UpdateKind::DeleteSelected,
            _ => {}
        }
        UpdateKind::Other
    }

    fn handle_form_input(key: KeyEvent, app_state: &mut AppState) -> UpdateKind {
        let form = &mut app_state.form;
        match key.code {
            KeyCode::Esc if !form.submitting => form.close(),
            KeyCode::Tab | KeyCode::BackTab | KeyCode::Up | KeyCode::Down => form.toggle_focus(),
            KeyCode::Enter => return UpdateKind::SubmitSite,
            KeyCode::Backspace => form.backspace(),
            KeyCode::Char(c) => form.push_char(c),
            _ => {}
        }
        UpdateKind::Other
    }

    /// Render the UI.
    pub fn render(&self, frame: &mut Frame, app_state: &AppState) {
        self.render_in_area(frame, app_state, frame.size());
    }

    /// Render the UI in a specific area
    pub fn render_in_area(&self, frame: &mut Frame, app_state: &AppState, area: Rect) {
        if app_state.loading {
            self.render_loading(frame, area);
            return;
        }

        let banner_height = if app_state.error.is_some() { 3 } else { 0 };
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Length(banner_height),
                Constraint::Min(5),
                Constraint::Length(1),
            ])
            .split(area);

        self.render_header(frame, chunks[0], app_state);
        if let Some(error) = &app_state.error {
            self.render_error(frame, chunks[1], error);
        }

        match self.state {
            ViewState::Sites => SitesView::render(frame, chunks[2], app_state, &self.theme),
            ViewState::Agents => AgentsView::render(frame, chunks[2], app_state, &self.theme),
        }

        self.render_status_line(frame, chunks[3], app_state);

        if app_state.form.open {
            AddSiteDialog::render(frame, area, &app_state.form, &self.theme);
        }
        if self.show_help {
            HelpView::render(frame, area, &self.theme, self.state);
        }
    }

    fn render_loading(&self, frame: &mut Frame, area: Rect) {
        let loading = Paragraph::new(vec![
            Line::from(""),
            Line::from(Span::styled(
                format!("{} Loading...", SPINNER[self.animation_frame]),
                self.theme.busy_style,
            )),
        ])
        .alignment(Alignment::Center);
        frame.render_widget(loading, centered_rect(50, 20, area));
    }

    fn render_header(&self, frame: &mut Frame, area: Rect, app_state: &AppState) {
        let mut spans = vec![Span::styled("SiteUp Monitor", self.theme.header_style)];

        if let Some(stats) = &app_state.stats {
            let mut parts = vec![
                format!("{} sites", stats.total_sites),
                format!("{} up", stats.sites_up),
                format!("{} down", stats.sites_down),
            ];
            if let Some(avg) = stats.average_response_time {
                parts.push(format!("{} avg", format::response_time(Some(avg))));
            }
            spans.push(Span::raw("   "));
            spans.push(Span::styled(parts.iter().join(" | "), self.theme.value_style));
        }

        if app_state.checking {
            spans.push(Span::raw("   "));
            spans.push(Span::styled(
                format!("{} checking...", SPINNER[self.animation_frame]),
                self.theme.busy_style,
            ));
        }

        let header = Paragraph::new(Line::from(spans)).block(
            Block::default()
                .borders(Borders::ALL)
                .style(self.theme.block_style),
        );
        frame.render_widget(header, area);
    }

    fn render_error(&self, frame: &mut Frame, area: Rect, error: &str) {
        let banner = Paragraph::new(Line::from(vec![
            Span::styled(error.to_string(), self.theme.error_style),
            Span::raw("  "),
            Span::styled("(e to dismiss)", self.theme.help_style),
        ]))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(self.theme.error_style),
        );
        frame.render_widget(banner, area);
    }

    fn render_status_line(&self, frame: &mut Frame, area: Rect, app_state: &AppState) {
        let updated = app_state
            .last_update
            .map(|ts| format::timestamp(Some(ts)))
            .unwrap_or_else(|| "never".to_string());

        let status_text = format!(
            "{} | Sites: {} | Agents: {} | Updated: {} | Press ? for help",
            self.state.title(),
            app_state.sites.len(),
            app_state.agents.len(),
            updated
        );

        let status_widget = Paragraph::new(status_text).style(self.theme.help_style);
        frame.render_widget(status_widget, area);
    }
}

impl Default for Ui {
    fn default() -> Self {
        Self::new()
    }
}

/// A rect of the given percentage size centred in `r`.
pub fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_width = r.width * percent_x / 100;
    let popup_height = r.height * percent_y / 100;

    Rect {
        x: r.x + (r.width - popup_width) / 2,
        y: r.y + (r.height - popup_height) / 2,
        width: popup_width,
        height: popup_height,
    }
}
