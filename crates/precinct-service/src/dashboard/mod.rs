//! Role-specific dashboards.
//!
//! Each [`DashboardCategory`](precinct_auth::DashboardCategory) maps to one
//! bundle of read-only statistics queries (see [`bundle`]). The manager
//! evaluates a bundle into a [`DashboardPayload`]; a failing query degrades
//! to zero or an empty list and never fails the dashboard.

pub mod bundle;
pub mod payload;
pub mod service;

pub use bundle::{BundleScope, BundleSpec, RecentSpec, StatSource, StatSpec, bundle_for};
pub use payload::{DashboardPayload, RecentActivity, Stat, StatEntry, StatValue};
pub use service::DashboardManager;
