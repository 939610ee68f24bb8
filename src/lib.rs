//! SiteUp TUI library
//!
//! Core components for the SiteUp uptime monitoring dashboard.

pub mod api;
pub mod app;
pub mod error;
pub mod event;
pub mod monitor;
pub mod state;
pub mod ui;

pub use error::{DashboardError, Result};
