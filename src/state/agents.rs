//! Agent classification.
//!
//! The service does not tag every agent explicitly, so the agents view picks
//! them out of the status list by convention: the agent port, the word
//! "agent" in the URL or name, or an explicit `connection_type`. A site that
//! merely has "agent" in its name lands here too; that approximation is
//! accepted as-is.
//!
//! When nothing matches, the local controller is shown instead so the view
//! is never empty.

use chrono::{DateTime, Utc};
use url::Url;

use super::record::{
    ConnectionStatus, ConnectionType, SiteStatus, StatusRecord, CONTROLLER_RECORD_ID,
};

/// Conventional port agents listen on.
pub const AGENT_PORT_MARKER: &str = ":8081";

pub const CONTROLLER_NAME: &str = "Controller (Master)";

/// Where the dashboard is talking to, used to describe the controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvironmentContext {
    pub origin: String,
    pub hostname: String,
    /// Scheme without the trailing colon, e.g. `https`.
    pub scheme: String,
}

impl EnvironmentContext {
    pub fn new(
        origin: impl Into<String>,
        hostname: impl Into<String>,
        scheme: impl Into<String>,
    ) -> Self {
        Self {
            origin: origin.into(),
            hostname: hostname.into(),
            scheme: scheme.into(),
        }
    }

    /// Derive the context from the controller API URL.
    pub fn from_url(url: &Url) -> Self {
        Self {
            origin: url.origin().ascii_serialization(),
            hostname: url.host_str().unwrap_or_default().to_string(),
            scheme: url.scheme().to_string(),
        }
    }

    pub fn is_secure(&self) -> bool {
        self.scheme == "https"
    }
}

/// Whether a record belongs in the agents view.
pub fn is_agent(record: &StatusRecord) -> bool {
    record.url.contains(AGENT_PORT_MARKER)
        || record.url.to_lowercase().contains("agent")
        || record.name.to_lowercase().contains("agent")
        || record.connection_type == ConnectionType::Agent
}

/// Agents in their original order, or the synthetic controller if none.
pub fn classify_agents(records: &[StatusRecord], env: &EnvironmentContext) -> Vec<StatusRecord> {
    classify_agents_at(records, env, Utc::now())
}

/// [`classify_agents`] with an explicit classification time.
pub fn classify_agents_at(
    records: &[StatusRecord],
    env: &EnvironmentContext,
    now: DateTime<Utc>,
) -> Vec<StatusRecord> {
    let agents: Vec<StatusRecord> = records.iter().filter(|r| is_agent(r)).cloned().collect();
    if agents.is_empty() {
        vec![controller_record(env, now)]
    } else {
        agents
    }
}

/// Placeholder describing the local controller.
pub fn controller_record(env: &EnvironmentContext, now: DateTime<Utc>) -> StatusRecord {
    StatusRecord {
        id: CONTROLLER_RECORD_ID,
        name: CONTROLLER_NAME.to_string(),
        url: env.origin.clone(),
        connection_type: ConnectionType::Controller,
        status: SiteStatus::Up,
        connection_status: Some(ConnectionStatus::Connected),
        response_time: Some(0.001),
        status_code: None,
        error_message: None,
        hostname: Some(env.hostname.clone()),
        ip_address: Some("127.0.0.1".to_string()),
        protocol: Some(env.scheme.clone()),
        is_encrypted: env.is_secure(),
        fallback_used: None,
        checked_at: Some(now),
        total_up: 1,
        total_down: 0,
        created_at: now,
    }
}
