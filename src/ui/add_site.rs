//! Add-site dialog drawn over the current view.

use ratatui::layout::{Alignment, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};
use ratatui::Frame;

use crate::state::{AddSiteForm, FormField};
use crate::ui::{centered_rect, Theme};

pub struct AddSiteDialog;

impl AddSiteDialog {
    pub fn render(frame: &mut Frame, area: Rect, form: &AddSiteForm, theme: &Theme) {
        let popup = centered_rect(60, 50, area);
        frame.render_widget(Clear, popup);

        let input = |label: &str, value: &str, field: FormField, placeholder: &str| {
            let focused = form.focus == field;
            let style = if focused {
                theme.focused_input_style
            } else {
                theme.input_style
            };
            let shown = if value.is_empty() && !focused {
                Span::styled(placeholder.to_string(), theme.muted_style)
            } else {
                Span::styled(format!("{value}{}", if focused { "_" } else { "" }), style)
            };
            Line::from(vec![Span::styled(format!("{label:<11}"), theme.label_style), shown])
        };

        let mut lines = vec![
            Line::from(Span::styled(
                "Add a website to monitor its uptime and response time.",
                theme.help_style,
            )),
            Line::from(""),
            input("Site Name", &form.name, FormField::Name, "e.g., My Website"),
            input("URL", &form.url, FormField::Url, "e.g., https://example.com"),
            Line::from(""),
        ];

        if let Some(error) = &form.error {
            lines.push(Line::from(Span::styled(error.clone(), theme.error_style)));
            lines.push(Line::from(""));
        }

        lines.push(if form.submitting {
            Line::from(Span::styled("Adding...", theme.busy_style))
        } else {
            Line::from(vec![
                Span::styled("Tab", theme.key_style),
                Span::raw(" switch field  "),
                Span::styled("Enter", theme.key_style),
                Span::raw(" add site  "),
                Span::styled("Esc", theme.key_style),
                Span::raw(" cancel"),
            ])
        });

        let dialog = Paragraph::new(lines)
            .block(
                Block::default()
                    .title("Add New Site")
                    .borders(Borders::ALL)
                    .style(theme.block_style),
            )
            .alignment(Alignment::Left)
            .wrap(Wrap { trim: false });
        frame.render_widget(dialog, popup);
    }
}
