//! Help overlay showing keyboard shortcuts and commands.

use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use ratatui::Frame;

use crate::ui::{centered_rect, Theme, ViewState};

const GLOBAL_KEYS: [(&str, &str); 9] = [
    ("q", "Quit application"),
    ("?", "Toggle this help screen"),
    ("1 / s", "Sites view"),
    ("2 / g", "Agents view"),
    ("r", "Refresh now"),
    ("c", "Check all sites now"),
    ("a", "Add a site"),
    ("e", "Dismiss error"),
    ("Esc", "Close dialog / quit"),
];

const SITES_KEYS: [(&str, &str); 2] = [
    ("j / k", "Select next / previous site"),
    ("x / Del", "Delete selected site"),
];

/// Help overlay showing keyboard shortcuts and usage information.
pub struct HelpView;

impl HelpView {
    pub fn render(frame: &mut Frame, area: Rect, theme: &Theme, current_view: ViewState) {
        let popup_area = centered_rect(60, 70, area);
        frame.render_widget(Clear, popup_area);

        let heading = |text: &'static str| {
            Line::from(Span::styled(text, Style::default().add_modifier(Modifier::BOLD)))
        };
        let key_line = |(key, what): &(&'static str, &'static str)| {
            Line::from(vec![
                Span::styled(format!("{key:<8}"), theme.key_style),
                Span::raw(format!(" - {what}")),
            ])
        };

        let mut help_text = vec![heading("Global Shortcuts"), Line::from("")];
        help_text.extend(GLOBAL_KEYS.iter().map(key_line));

        if current_view == ViewState::Sites {
            help_text.push(Line::from(""));
            help_text.push(heading("Sites View"));
            help_text.push(Line::from(""));
            help_text.extend(SITES_KEYS.iter().map(key_line));
        }

        let help_widget = Paragraph::new(help_text)
            .block(
                Block::default()
                    .title("SiteUp Help")
                    .borders(Borders::ALL)
                    .style(theme.block_style),
            )
            .style(theme.normal_text)
            .alignment(Alignment::Left);

        frame.render_widget(help_widget, popup_area);
    }
}
