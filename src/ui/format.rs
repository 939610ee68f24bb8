//! Text formatting shared by the views.

use chrono::{DateTime, Local, Utc};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::state::{ConnectionStatus, SiteStatus, StatusRecord};

/// Seconds as whole milliseconds, or `N/A`.
pub fn response_time(seconds: Option<f64>) -> String {
    match seconds {
        Some(secs) => format!("{}ms", (secs * 1000.0).round() as i64),
        None => "N/A".to_string(),
    }
}

/// Badge text for a record.
pub fn status_label(record: &StatusRecord) -> &'static str {
    if record.connection_status == Some(ConnectionStatus::Connected) {
        return "Connected";
    }
    match record.status {
        SiteStatus::Up => "Online",
        SiteStatus::Down => "Down",
        SiteStatus::Unknown => "Unknown",
    }
}

/// Status dot for list rows.
pub fn status_symbol(status: SiteStatus) -> &'static str {
    match status {
        SiteStatus::Up => "●",
        SiteStatus::Down => "●",
        SiteStatus::Unknown => "○",
    }
}

pub fn protocol_label(record: &StatusRecord) -> String {
    record
        .protocol
        .as_deref()
        .map(str::to_uppercase)
        .unwrap_or_else(|| "UNKNOWN".to_string())
}

pub fn uptime(record: &StatusRecord) -> String {
    match record.uptime_percent() {
        Some(pct) => format!("{pct:.1}%"),
        None => "N/A".to_string(),
    }
}

pub fn timestamp(ts: Option<DateTime<Utc>>) -> String {
    match ts {
        Some(ts) => ts.with_timezone(&Local).format("%Y-%m-%d %H:%M:%S").to_string(),
        None => "never".to_string(),
    }
}

/// Cut `text` to at most `width` columns, marking the cut with `…`.
pub fn truncate(text: &str, width: usize) -> String {
    if text.width() <= width {
        return text.to_string();
    }
    if width == 0 {
        return String::new();
    }

    let mut out = String::new();
    let mut used = 0;
    for c in text.chars() {
        let w = c.width().unwrap_or(0);
        if used + w > width - 1 {
            break;
        }
        out.push(c);
        used += w;
    }
    out.push('…');
    out
}
