//! UI theme definition.

use ratatui::style::{Color, Modifier, Style};

use crate::state::{ConnectionStatus, SiteStatus, StatusRecord};

/// Theme for the application UI.
#[derive(Debug, Clone)]
pub struct Theme {
    // Basic styles
    pub normal_text: Style,
    pub selected_style: Style,
    pub block_style: Style,
    pub header_style: Style,
    pub label_style: Style,
    pub value_style: Style,
    pub muted_style: Style,

    // Status styles
    pub error_style: Style,
    pub help_style: Style,
    pub busy_style: Style,

    // Key styles
    pub key_style: Style,

    // Site status styles
    pub up_style: Style,
    pub down_style: Style,
    pub unknown_style: Style,

    // Transport styles
    pub encrypted_style: Style,
    pub controller_style: Style,

    // Form styles
    pub input_style: Style,
    pub focused_input_style: Style,
}

impl Theme {
    /// Style for a status badge, preferring the agent link state.
    pub fn status_style(&self, record: &StatusRecord) -> Style {
        if record.connection_status == Some(ConnectionStatus::Connected) {
            return self.up_style;
        }
        match record.status {
            SiteStatus::Up => self.up_style,
            SiteStatus::Down => self.down_style,
            SiteStatus::Unknown => self.unknown_style,
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            // Basic styles
            normal_text: Style::default().fg(Color::White),
            selected_style: Style::default().fg(Color::Black).bg(Color::White),
            block_style: Style::default(),
            header_style: Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            label_style: Style::default().fg(Color::Gray),
            value_style: Style::default().fg(Color::White),
            muted_style: Style::default().fg(Color::DarkGray),

            // Status styles
            error_style: Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            help_style: Style::default().fg(Color::Gray),
            busy_style: Style::default().fg(Color::Yellow),

            // Key styles
            key_style: Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),

            // Site status styles
            up_style: Style::default().fg(Color::Green),
            down_style: Style::default().fg(Color::Red),
            unknown_style: Style::default().fg(Color::DarkGray),

            // Transport styles
            encrypted_style: Style::default().fg(Color::Green),
            controller_style: Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),

            // Form styles
            input_style: Style::default().fg(Color::White),
            focused_input_style: Style::default().fg(Color::Cyan).add_modifier(Modifier::UNDERLINED),
        }
    }
}
