//! Statistics queries for [`MemoryDatabase`].

use async_trait::async_trait;
use chrono::NaiveDate;

use precinct_core::result::AppResult;
use precinct_entity::audit::AccessLogEntry;
use precinct_entity::case::{AssignmentStatus, Case, Investigation};
use precinct_entity::complaint::Complaint;
use precinct_entity::duty::Duty;
use precinct_entity::officer::Rank;

use super::state::MemoryState;
use super::{FaultPoint, MemoryDatabase};
use crate::store::{Metric, StatsStore};

fn count_where<T>(rows: impl Iterator<Item = T>, mut pred: impl FnMut(&T) -> bool) -> i64 {
    rows.filter(|row| pred(row)).count() as i64
}

fn evaluate(state: &MemoryState, metric: &Metric) -> i64 {
    match metric {
        Metric::Officers {
            disabled,
            designation,
        } => count_where(state.officers.values(), |o| {
            disabled.is_none_or(|d| d == o.disabled)
                && designation
                    .as_deref()
                    .is_none_or(|d| o.designation.as_deref() == Some(d))
        }),
        Metric::Cases {
            status,
            case_types,
            officer_id,
        } => count_where(state.cases.iter(), |c| {
            status.is_none_or(|s| s == c.status)
                && (case_types.is_empty() || case_types.contains(&c.case_type))
                && officer_id.as_deref().is_none_or(|o| o == c.officer_id)
        }),
        Metric::CasesOpenedSince { since } => {
            count_where(state.cases.iter(), |c| c.created_at >= *since)
        }
        Metric::Complaints { status } => {
            count_where(state.complaints.iter(), |c| status.is_none_or(|s| s == c.status))
        }
        Metric::Investigations {
            status,
            lead_officer_id,
        } => count_where(state.investigations.iter(), |i| {
            status.is_none_or(|s| s == i.status)
                && lead_officer_id
                    .as_deref()
                    .is_none_or(|o| o == i.lead_officer_id)
        }),
        Metric::ActiveAssignments { officer_id } => count_where(state.assignments.iter(), |a| {
            a.officer_id == *officer_id && a.status == AssignmentStatus::Active
        }),
        Metric::ResourceRequests { status, officer_id } => {
            count_where(state.requests.iter(), |r| {
                status.is_none_or(|s| s == r.status)
                    && officer_id.as_deref().is_none_or(|o| o == r.officer_id)
            })
        }
        Metric::Duties {
            from,
            to,
            officer_id,
        } => count_where(state.duties.iter(), |d| {
            d.duty_date >= *from
                && to.is_none_or(|t| d.duty_date <= t)
                && officer_id.as_deref().is_none_or(|o| o == d.officer_id)
        }),
    }
}

#[async_trait]
impl StatsStore for MemoryDatabase {
    async fn count(&self, metric: &Metric) -> AppResult<i64> {
        self.check(FaultPoint::StatsCount).await?;
        Ok(evaluate(&*self.state.read().await, metric))
    }

    async fn recent_cases(&self, officer_id: Option<&str>, limit: i64) -> AppResult<Vec<Case>> {
        let state = self.state.read().await;
        Ok(state
            .cases
            .iter()
            .rev()
            .filter(|c| officer_id.is_none_or(|o| o == c.officer_id))
            .take(limit.max(0) as usize)
            .cloned()
            .collect())
    }

    async fn recent_complaints(&self, limit: i64) -> AppResult<Vec<Complaint>> {
        let state = self.state.read().await;
        Ok(state
            .complaints
            .iter()
            .rev()
            .take(limit.max(0) as usize)
            .cloned()
            .collect())
    }

    async fn recent_investigations(
        &self,
        lead_officer_id: Option<&str>,
        limit: i64,
    ) -> AppResult<Vec<Investigation>> {
        let state = self.state.read().await;
        Ok(state
            .investigations
            .iter()
            .rev()
            .filter(|i| lead_officer_id.is_none_or(|o| o == i.lead_officer_id))
            .take(limit.max(0) as usize)
            .cloned()
            .collect())
    }

    async fn recent_access_logs(&self, limit: i64) -> AppResult<Vec<AccessLogEntry>> {
        let state = self.state.read().await;
        Ok(state
            .access_logs
            .iter()
            .rev()
            .take(limit.max(0) as usize)
            .cloned()
            .collect())
    }

    async fn officers_per_rank(&self) -> AppResult<Vec<(Rank, i64)>> {
        let state = self.state.read().await;
        Ok(Rank::ALL
            .into_iter()
            .map(|rank| {
                let n = count_where(state.officers.values(), |o| o.rank == rank && !o.disabled);
                (rank, n)
            })
            .filter(|(_, n)| *n > 0)
            .collect())
    }

    async fn duties_between(
        &self,
        officer_id: Option<&str>,
        from: NaiveDate,
        to: NaiveDate,
        limit: i64,
    ) -> AppResult<Vec<Duty>> {
        let state = self.state.read().await;
        let mut duties: Vec<Duty> = state
            .duties
            .iter()
            .filter(|d| {
                d.duty_date >= from
                    && d.duty_date <= to
                    && officer_id.is_none_or(|o| o == d.officer_id)
            })
            .cloned()
            .collect();
        duties.sort_by(|a, b| a.duty_date.cmp(&b.duty_date).then(a.shift.cmp(&b.shift)));
        duties.truncate(limit.max(0) as usize);
        Ok(duties)
    }
}
