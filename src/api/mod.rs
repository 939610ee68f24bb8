//! Monitoring service API.
//!
//! A thin, stateless transport layer: one round trip per call, no retries
//! and no caching. Everything above this module talks to the service through
//! the [`MonitorApi`] trait so the refresh and mutation logic can run against
//! a fake in tests.

pub mod client;

pub use client::HttpMonitorApi;

use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;

use crate::error::Result;
use crate::state::{MonitorStats, StatusRecord};

/// Operations offered by the monitoring service.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait MonitorApi: Send + Sync {
    /// Every monitored entity, sites and agents alike, in server order.
    async fn list_statuses(&self) -> Result<Vec<StatusRecord>>;

    /// Aggregate counters, computed server-side.
    async fn get_stats(&self) -> Result<MonitorStats>;

    /// Register a new site. Blank fields are rejected before any request is
    /// made and a missing scheme becomes `https://`.
    async fn create_site(&self, name: String, url: String) -> Result<StatusRecord>;

    /// Ask the service to re-check everything now. Does not return statuses;
    /// callers refresh afterwards.
    async fn trigger_manual_check(&self) -> Result<()>;

    /// Remove a site and its check history.
    async fn delete_site(&self, id: i64) -> Result<()>;
}
