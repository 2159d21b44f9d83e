//! Dashboard assembly.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{debug, warn};

use precinct_core::error::AppError;
use precinct_database::store::StatsStore;

use super::bundle::{BundleScope, RecentSpec, StatSource, StatSpec, bundle_for};
use super::payload::{DashboardPayload, RecentActivity, Stat, StatEntry, StatValue};
use crate::context::RequestContext;

/// Rows listed under recent activity.
const RECENT_LIMIT: i64 = 10;

/// Builds the dashboard for the calling officer's category.
#[derive(Debug, Clone)]
pub struct DashboardManager {
    stats: Arc<dyn StatsStore>,
}

impl DashboardManager {
    pub fn new(stats: Arc<dyn StatsStore>) -> Self {
        Self { stats }
    }

    /// Dashboard for the caller, as of now.
    pub async fn build(&self, ctx: &RequestContext) -> DashboardPayload {
        self.build_at(ctx, Utc::now()).await
    }

    /// Dashboard for the caller, as of `now`.
    pub async fn build_at(&self, ctx: &RequestContext, now: DateTime<Utc>) -> DashboardPayload {
        let category = ctx.officer.category;
        let scope = BundleScope::at(ctx.officer_id(), now);
        let spec = bundle_for(category, &scope);

        debug!(officer_id = %ctx.officer_id(), %category, "Building dashboard");

        let mut overview = Vec::with_capacity(spec.overview.len());
        for stat in &spec.overview {
            overview.push(self.evaluate(stat).await);
        }

        let recent_activity = self.recent(&spec.recent).await;

        let mut quick_stats = Vec::with_capacity(spec.quick_stats.len());
        for stat in &spec.quick_stats {
            quick_stats.push(self.evaluate(stat).await);
        }

        DashboardPayload {
            category,
            overview,
            recent_activity,
            quick_stats,
            navigation: ctx.officer.navigation(),
        }
    }

    async fn evaluate(&self, spec: &StatSpec) -> Stat {
        let value = match &spec.source {
            StatSource::Metric(metric) => match self.stats.count(metric).await {
                Ok(n) => StatValue::Count(n),
                Err(e) => {
                    degrade(spec.key, &e);
                    StatValue::Count(0)
                }
            },
            StatSource::OfficersPerRank => match self.stats.officers_per_rank().await {
                Ok(rows) => StatValue::Breakdown(
                    rows.into_iter()
                        .map(|(rank, count)| StatEntry {
                            label: rank.to_string(),
                            count,
                        })
                        .collect(),
                ),
                Err(e) => {
                    degrade(spec.key, &e);
                    StatValue::Breakdown(Vec::new())
                }
            },
            StatSource::NotImplemented => StatValue::NotImplemented,
        };

        Stat {
            key: spec.key,
            label: spec.label,
            value,
        }
    }

    async fn recent(&self, spec: &RecentSpec) -> RecentActivity {
        match spec {
            RecentSpec::Cases { officer_id } => RecentActivity::Cases(
                self.stats
                    .recent_cases(officer_id.as_deref(), RECENT_LIMIT)
                    .await
                    .unwrap_or_else(|e| empty("recent_cases", &e)),
            ),
            RecentSpec::Complaints => RecentActivity::Complaints(
                self.stats
                    .recent_complaints(RECENT_LIMIT)
                    .await
                    .unwrap_or_else(|e| empty("recent_complaints", &e)),
            ),
            RecentSpec::Investigations { lead_officer_id } => RecentActivity::Investigations(
                self.stats
                    .recent_investigations(lead_officer_id.as_deref(), RECENT_LIMIT)
                    .await
                    .unwrap_or_else(|e| empty("recent_investigations", &e)),
            ),
            RecentSpec::AccessLogs => RecentActivity::AccessLogs(
                self.stats
                    .recent_access_logs(RECENT_LIMIT)
                    .await
                    .unwrap_or_else(|e| empty("recent_access_logs", &e)),
            ),
            RecentSpec::Duties {
                officer_id,
                from,
                to,
            } => RecentActivity::Duties(
                self.stats
                    .duties_between(officer_id.as_deref(), *from, *to, RECENT_LIMIT)
                    .await
                    .unwrap_or_else(|e| empty("duties_between", &e)),
            ),
        }
    }
}

fn degrade(key: &str, error: &AppError) {
    warn!(metric = %key, error = %error, "Dashboard query failed, substituting zero");
}

fn empty<T>(key: &str, error: &AppError) -> Vec<T> {
    degrade(key, error);
    Vec::new()
}
