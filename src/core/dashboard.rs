//! Dashboard metrics queries.
//!
//! [`DashboardService`] issues parametrized metrics queries and normalizes
//! the result for presentation. Results are ephemeral: every filter change
//! triggers a fresh fetch, and nothing is cached. Two independent query
//! streams exist, the user-filtered range and a convenience view pinned to
//! the current calendar month, so the pinned "today / this month" figures
//! stay stable while the user browses a custom range.

use std::collections::BTreeMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use chrono::{DateTime, Datelike, NaiveDate, NaiveTime, SecondsFormat, Utc};
use tokio::sync::watch;
use tracing::debug;

use crate::api::ApiClient;
use crate::api::types::{DashboardRequest, DashboardResult, GraphPoint};
use crate::core::session::SessionState;
use crate::errors::{Error, Result};

/// A parametrized metrics query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardQuery {
    /// Bot to scope the metrics to; `None` covers all of the user's bots.
    pub bot_id: Option<String>,
    /// Inclusive range start.
    pub init_date: NaiveDate,
    /// Inclusive range end.
    pub finish_date: NaiveDate,
}

impl DashboardQuery {
    /// Creates a query over an inclusive date range.
    #[must_use]
    pub const fn new(bot_id: Option<String>, init_date: NaiveDate, finish_date: NaiveDate) -> Self {
        Self {
            bot_id,
            init_date,
            finish_date,
        }
    }

    /// Creates a query covering the current calendar month.
    #[must_use]
    pub fn current_month(bot_id: Option<String>) -> Self {
        let (init_date, finish_date) = month_range(Utc::now().date_naive());
        Self::new(bot_id, init_date, finish_date)
    }

    fn to_request(&self) -> DashboardRequest {
        DashboardRequest {
            bot_id: self.bot_id.clone(),
            init_date: rfc3339(day_start(self.init_date)),
            finish_date: rfc3339(day_end(self.finish_date)),
        }
    }
}

/// The first and last day of the month containing `day`.
#[must_use]
pub fn month_range(day: NaiveDate) -> (NaiveDate, NaiveDate) {
    let first = day.with_day(1).unwrap_or(day);
    let (next_year, next_month) = if day.month() == 12 {
        (day.year() + 1, 1)
    } else {
        (day.year(), day.month() + 1)
    };
    let last = NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .and_then(|date| date.pred_opt())
        .unwrap_or(day);
    (first, last)
}

fn day_start(date: NaiveDate) -> DateTime<Utc> {
    date.and_time(NaiveTime::MIN).and_utc()
}

fn day_end(date: NaiveDate) -> DateTime<Utc> {
    date.succ_opt().map_or_else(
        || day_start(date),
        |next| day_start(next) - chrono::Duration::milliseconds(1),
    )
}

fn rfc3339(instant: DateTime<Utc>) -> String {
    instant.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Issues dashboard queries once the session is resolved.
///
/// The service holds no result state; it hands each normalized result to
/// the caller. Rapid re-entrant filter changes race on the network, so each
/// query stream carries an issuance counter and a response that is no
/// longer the newest issued fetch resolves to `Ok(None)` instead of data,
/// preventing an older response from overwriting a newer one.
#[derive(Debug)]
pub struct DashboardService {
    api: Arc<ApiClient>,
    session: watch::Receiver<SessionState>,
    filtered_issued: AtomicU64,
    pinned_issued: AtomicU64,
}

impl DashboardService {
    /// Creates a service observing the given session state.
    #[must_use]
    pub const fn new(api: Arc<ApiClient>, session: watch::Receiver<SessionState>) -> Self {
        Self {
            api,
            session,
            filtered_issued: AtomicU64::new(0),
            pinned_issued: AtomicU64::new(0),
        }
    }

    /// Fetches metrics for a user-selected range.
    ///
    /// Returns `Ok(None)` when a newer filtered fetch was issued while this
    /// one was in flight. Fails with [`Error::SessionUnresolved`] when the
    /// session state is still `Unknown`; restore the session first.
    pub async fn fetch(&self, query: &DashboardQuery) -> Result<Option<DashboardResult>> {
        self.fetch_on(&self.filtered_issued, query).await
    }

    /// Fetches metrics pinned to the current calendar month, independent of
    /// any user-selected filter. This is a separate query execution with
    /// its own issuance stream, not a view derived from [`fetch`].
    ///
    /// [`fetch`]: Self::fetch
    pub async fn fetch_current_period(
        &self,
        bot_id: Option<String>,
    ) -> Result<Option<DashboardResult>> {
        let query = DashboardQuery::current_month(bot_id);
        self.fetch_on(&self.pinned_issued, &query).await
    }

    async fn fetch_on(
        &self,
        issued: &AtomicU64,
        query: &DashboardQuery,
    ) -> Result<Option<DashboardResult>> {
        if !self.session.borrow().is_resolved() {
            return Err(Error::SessionUnresolved);
        }

        let ticket = issued.fetch_add(1, Ordering::SeqCst) + 1;
        let mut result = self.api.dashboard(&query.to_request()).await?;

        if issued.load(Ordering::SeqCst) != ticket {
            debug!("discarding stale dashboard response, a newer fetch was issued");
            return Ok(None);
        }

        normalize(&mut result, query.init_date, query.finish_date);
        Ok(Some(result))
    }
}

/// Normalizes every daily series in the result: one bucket per day, sorted
/// ascending, restricted to the queried range. International sub-results
/// keep their own currency and are never merged into the general figures.
fn normalize(result: &mut DashboardResult, init_date: NaiveDate, finish_date: NaiveDate) {
    normalize_graphs(&mut result.general_dashboard.graphs, init_date, finish_date);
    for dashboard in &mut result.international_dashboards {
        normalize_graphs(&mut dashboard.graphs, init_date, finish_date);
    }
}

fn normalize_graphs(graphs: &mut Vec<GraphPoint>, init_date: NaiveDate, finish_date: NaiveDate) {
    let mut daily: BTreeMap<NaiveDate, i64> = BTreeMap::new();
    let mut unlabeled: Vec<GraphPoint> = Vec::new();

    for point in graphs.drain(..) {
        match point_date(&point) {
            Some(day) if day < init_date || day > finish_date => {}
            Some(day) => *daily.entry(day).or_insert(0) += point.value,
            // Buckets without a parseable date pass through untouched.
            None => unlabeled.push(point),
        }
    }

    *graphs = daily
        .into_iter()
        .map(|(day, value)| GraphPoint {
            label: day.format("%Y-%m-%d").to_string(),
            value,
        })
        .collect();
    graphs.extend(unlabeled);
}

/// Day a graph bucket covers. Labels arrive either as RFC 3339 instants or
/// plain dates depending on the backend version.
fn point_date(point: &GraphPoint) -> Option<NaiveDate> {
    DateTime::parse_from_rfc3339(&point.label)
        .map(|instant| instant.date_naive())
        .ok()
        .or_else(|| NaiveDate::parse_from_str(&point.label, "%Y-%m-%d").ok())
}
