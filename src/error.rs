//! Error types for the SiteUp dashboard.
//!
//! Every failure the dashboard can observe falls into one of two buckets:
//! problems the user can fix in a form ([`DashboardError::Validation`]) and
//! problems talking to the monitoring service ([`DashboardError::Transport`],
//! [`DashboardError::Decode`]). Neither kind is ever fatal to the UI; callers
//! turn them into view-local error state.

use thiserror::Error;

/// Errors raised by the API client and the mutation flows.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DashboardError {
    /// Local, pre-network input problem.
    #[error("{0}")]
    Validation(String),

    /// Network failure or non-success response from the monitoring service.
    #[error("request failed: {0}")]
    Transport(String),

    /// The service answered with a payload we could not decode.
    #[error("unexpected response: {0}")]
    Decode(String),
}

impl DashboardError {
    /// Text to show the user in a banner or next to a form.
    pub fn user_message(&self) -> String {
        match self {
            DashboardError::Validation(msg) => msg.clone(),
            other => other.to_string(),
        }
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, DashboardError::Validation(_))
    }
}

impl From<reqwest::Error> for DashboardError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            DashboardError::Decode(err.to_string())
        } else {
            DashboardError::Transport(err.to_string())
        }
    }
}

impl From<url::ParseError> for DashboardError {
    fn from(err: url::ParseError) -> Self {
        DashboardError::Transport(format!("invalid API URL: {err}"))
    }
}

pub type Result<T> = std::result::Result<T, DashboardError>;
