//! Agents view: registered monitoring agents, or the controller itself.

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Cell, Paragraph, Row, Table};
use ratatui::Frame;

use crate::state::{AppState, StatusRecord};
use crate::ui::{format, Theme};

pub struct AgentsView;

impl AgentsView {
    pub fn render(frame: &mut Frame, area: Rect, app_state: &AppState, theme: &Theme) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(2), Constraint::Min(3)])
            .split(area);

        let intro = Paragraph::new(Line::from(Span::styled(
            "These are the distributed agents reporting monitoring data.",
            theme.help_style,
        )));
        frame.render_widget(intro, chunks[0]);

        let header = Row::new(["Agent", "URL", "IP Address", "Protocol", "Status", "Response"])
            .style(theme.header_style)
            .bottom_margin(1);

        let rows = app_state.agents.iter().map(|agent| Self::row(agent, theme));

        let table = Table::new(
            rows,
            [
                Constraint::Percentage(22),
                Constraint::Percentage(30),
                Constraint::Length(16),
                Constraint::Length(10),
                Constraint::Length(11),
                Constraint::Length(10),
            ],
        )
        .header(header)
        .block(
            Block::default()
                .title(format!("Registered Agents ({})", app_state.agents.len()))
                .borders(Borders::ALL)
                .style(theme.block_style),
        );

        frame.render_widget(table, chunks[1]);
    }

    fn row<'a>(agent: &'a StatusRecord, theme: &Theme) -> Row<'a> {
        let (marker, name_style) = if agent.is_controller() {
            ("♛ ", theme.controller_style)
        } else {
            ("■ ", theme.normal_text)
        };

        let mut protocol = vec![Span::raw(format::protocol_label(agent))];
        if agent.is_encrypted {
            protocol.push(Span::styled(" 🔒", theme.encrypted_style));
        }
        if agent.fallback_used == Some(true) {
            protocol.push(Span::styled(" ⤺", theme.busy_style));
        }

        Row::new(vec![
            Cell::from(Line::from(vec![
                Span::styled(marker, name_style),
                Span::styled(agent.name.as_str(), name_style),
            ])),
            Cell::from(agent.url.as_str()),
            Cell::from(agent.ip_address.as_deref().unwrap_or("N/A")),
            Cell::from(Line::from(protocol)),
            Cell::from(Span::styled(
                format::status_label(agent),
                theme.status_style(agent),
            )),
            Cell::from(format::response_time(agent.response_time)),
        ])
    }
}
