//! Status record model.
//!
//! Mirrors the JSON shapes returned by the monitoring service. Decoding is
//! lenient: the service stores timestamps without a zone, leaves `status`
//! null for never-checked sites and omits the agent-related fields entirely
//! for plain sites.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{DashboardError, Result};

/// Id reserved for the synthetic controller record.
pub const CONTROLLER_RECORD_ID: i64 = -1;

/// What kind of entity a status record describes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConnectionType {
    #[default]
    Site,
    Agent,
    Controller,
}

/// Last observed reachability.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SiteStatus {
    Up,
    Down,
    #[default]
    #[serde(other)]
    Unknown,
}

impl SiteStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            SiteStatus::Up => "up",
            SiteStatus::Down => "down",
            SiteStatus::Unknown => "unknown",
        }
    }
}

impl std::fmt::Display for SiteStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Agent link state, reported for agents and the controller only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConnectionStatus {
    Connected,
    Disconnected,
    #[serde(other)]
    Unknown,
}

/// One monitored entity's last-known condition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusRecord {
    pub id: i64,
    pub name: String,
    pub url: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub connection_type: ConnectionType,
    #[serde(default, deserialize_with = "null_as_default")]
    pub status: SiteStatus,
    #[serde(default)]
    pub connection_status: Option<ConnectionStatus>,
    /// Seconds.
    #[serde(default)]
    pub response_time: Option<f64>,
    #[serde(default)]
    pub status_code: Option<u16>,
    #[serde(default)]
    pub error_message: Option<String>,
    #[serde(default)]
    pub hostname: Option<String>,
    #[serde(default)]
    pub ip_address: Option<String>,
    #[serde(default)]
    pub protocol: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub is_encrypted: bool,
    #[serde(default)]
    pub fallback_used: Option<bool>,
    #[serde(default, with = "timestamp::option")]
    pub checked_at: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub total_up: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub total_down: u64,
    #[serde(with = "timestamp")]
    pub created_at: DateTime<Utc>,
}

impl StatusRecord {
    /// A freshly created, never-checked site.
    pub fn new_site(id: i64, name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            url: url.into(),
            connection_type: ConnectionType::Site,
            status: SiteStatus::Unknown,
            connection_status: None,
            response_time: None,
            status_code: None,
            error_message: None,
            hostname: None,
            ip_address: None,
            protocol: None,
            is_encrypted: false,
            fallback_used: None,
            checked_at: None,
            total_up: 0,
            total_down: 0,
            created_at: Utc::now(),
        }
    }

    pub fn is_controller(&self) -> bool {
        self.id == CONTROLLER_RECORD_ID
    }

    /// Share of checks that came back up, as a percentage.
    pub fn uptime_percent(&self) -> Option<f64> {
        let total = self.total_up + self.total_down;
        if total == 0 {
            None
        } else {
            Some(self.total_up as f64 * 100.0 / total as f64)
        }
    }
}

/// Aggregate counters computed by the service.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MonitorStats {
    pub total_sites: u64,
    pub sites_up: u64,
    pub sites_down: u64,
    /// Seconds, averaged over sites that are up.
    #[serde(default)]
    pub average_response_time: Option<f64>,
}

/// Validated input for creating a site.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewSite {
    pub name: String,
    pub url: String,
}

impl NewSite {
    /// Trims both fields, rejects empties and prefixes `https://` when no
    /// scheme is present.
    pub fn parse(name: &str, url: &str) -> Result<Self> {
        let name = name.trim();
        let url = url.trim();
        if name.is_empty() || url.is_empty() {
            return Err(DashboardError::Validation(
                "Both name and URL are required".to_string(),
            ));
        }

        Ok(Self {
            name: name.to_string(),
            url: normalize_url(url),
        })
    }
}

/// Prefix `https://` unless the input already starts with an http(s) scheme.
pub fn normalize_url(url: &str) -> String {
    let url = url.trim();
    if url.starts_with("http://") || url.starts_with("https://") {
        url.to_string()
    } else {
        format!("https://{url}")
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Timestamps as RFC 3339, or naive SQLite-style values taken as UTC.
pub(crate) mod timestamp {
    use chrono::{DateTime, NaiveDateTime, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    const NAIVE_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"];

    pub fn parse(raw: &str) -> Option<DateTime<Utc>> {
        if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
            return Some(ts.with_timezone(&Utc));
        }
        NAIVE_FORMATS
            .iter()
            .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
            .map(|naive| naive.and_utc())
    }

    pub fn serialize<S: Serializer>(ts: &DateTime<Utc>, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&ts.to_rfc3339())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<DateTime<Utc>, D::Error> {
        let raw = String::deserialize(d)?;
        parse(&raw).ok_or_else(|| serde::de::Error::custom(format!("invalid timestamp: {raw}")))
    }

    pub mod option {
        use super::*;

        pub fn serialize<S: Serializer>(
            ts: &Option<DateTime<Utc>>,
            s: S,
        ) -> Result<S::Ok, S::Error> {
            match ts {
                Some(ts) => s.serialize_some(&ts.to_rfc3339()),
                None => s.serialize_none(),
            }
        }

        pub fn deserialize<'de, D: Deserializer<'de>>(
            d: D,
        ) -> Result<Option<DateTime<Utc>>, D::Error> {
            match Option::<String>::deserialize(d)? {
                Some(raw) => super::parse(&raw).map(Some).ok_or_else(|| {
                    serde::de::Error::custom(format!("invalid timestamp: {raw}"))
                }),
                None => Ok(None),
            }
        }
    }
}
