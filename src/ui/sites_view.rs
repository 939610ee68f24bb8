//! Sites view: the monitored sites on the left, the selected one on the right.

use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap};
use ratatui::Frame;

use crate::state::{AppState, StatusRecord};
use crate::ui::{format, Theme};

/// Width of the site list column.
const LIST_WIDTH: u16 = 36;

pub struct SitesView;

impl SitesView {
    pub fn render(frame: &mut Frame, area: Rect, app_state: &AppState, theme: &Theme) {
        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(LIST_WIDTH), Constraint::Min(20)])
            .split(area);

        Self::render_list(frame, chunks[0], app_state, theme);
        match app_state.selected() {
            Some(record) => Self::render_detail(frame, chunks[1], record, theme),
            None => Self::render_empty(frame, chunks[1], app_state, theme),
        }
    }

    fn render_list(frame: &mut Frame, area: Rect, app_state: &AppState, theme: &Theme) {
        let count = app_state.sites.len();
        let title = format!(
            "Monitored Sites ({} site{})",
            count,
            if count == 1 { "" } else { "s" }
        );
        let name_width = area.width.saturating_sub(6) as usize;

        let items: Vec<ListItem> = app_state
            .sites
            .iter()
            .map(|site| {
                ListItem::new(Line::from(vec![
                    Span::styled(
                        format!("{} ", format::status_symbol(site.status)),
                        theme.status_style(site),
                    ),
                    Span::styled(format::truncate(&site.name, name_width), theme.normal_text),
                ]))
            })
            .collect();

        let list = List::new(items)
            .block(
                Block::default()
                    .title(title)
                    .borders(Borders::ALL)
                    .style(theme.block_style),
            )
            .highlight_style(theme.selected_style)
            .highlight_symbol("> ");

        let mut list_state = ListState::default();
        list_state.select(app_state.selection.position_in(&app_state.sites));
        frame.render_stateful_widget(list, area, &mut list_state);
    }

    fn render_detail(frame: &mut Frame, area: Rect, site: &StatusRecord, theme: &Theme) {
        let field = |label: &str, value: String| {
            Line::from(vec![
                Span::styled(format!("{label:<16}"), theme.label_style),
                Span::styled(value, theme.value_style),
            ])
        };

        let mut lines = vec![
            Line::from(vec![
                Span::styled(site.name.clone(), theme.header_style),
                Span::raw("  "),
                Span::styled(format::status_label(site), theme.status_style(site)),
            ]),
            Line::from(Span::styled(site.url.clone(), theme.muted_style)),
            Line::from(""),
            field("Response time", format::response_time(site.response_time)),
            field("Last checked", format::timestamp(site.checked_at)),
            field("Uptime", format::uptime(site)),
            field("Checks up", site.total_up.to_string()),
            field("Checks down", site.total_down.to_string()),
            field("Monitored since", format::timestamp(Some(site.created_at))),
        ];
        if let Some(code) = site.status_code {
            lines.push(field("HTTP status", code.to_string()));
        }
        if let Some(message) = &site.error_message {
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled(message.clone(), theme.error_style)));
        }

        let detail = Paragraph::new(lines)
            .block(
                Block::default()
                    .title("Status")
                    .borders(Borders::ALL)
                    .style(theme.block_style),
            )
            .wrap(Wrap { trim: false });
        frame.render_widget(detail, area);
    }

    fn render_empty(frame: &mut Frame, area: Rect, app_state: &AppState, theme: &Theme) {
        let hint = if app_state.sites.is_empty() {
            "Add your first site to start monitoring"
        } else {
            "Select a site from the list to view its status"
        };

        let mut lines = vec![
            Line::from(""),
            Line::from(Span::styled("No Site Selected", theme.header_style)),
            Line::from(""),
            Line::from(Span::styled(hint, theme.help_style)),
        ];
        if app_state.sites.is_empty() {
            lines.push(Line::from(""));
            lines.push(Line::from(vec![
                Span::raw("Press "),
                Span::styled("a", theme.key_style),
                Span::raw(" to add a site"),
            ]));
        }

        let empty = Paragraph::new(lines)
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL).style(theme.block_style));
        frame.render_widget(empty, area);
    }
}
