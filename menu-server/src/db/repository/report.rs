//! Reporting Repository
//!
//! Revenue/expense/profit timelines. Rows are fetched raw and bucketed in
//! Rust; every request recomputes from the store, no caching.

use super::{BaseRepository, RepoError, RepoResult};
use crate::db::models::{Account, AccountId};
use crate::utils::time;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use surrealdb::engine::local::Db;
use surrealdb::Surreal;

const DAY_MS: i64 = 86_400_000;

/// Report period selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportPeriod {
    Weekly,
    Monthly,
    Yearly,
}

impl ReportPeriod {
    /// Number of buckets in the timeline
    fn bucket_count(&self) -> usize {
        match self {
            ReportPeriod::Weekly => 7,
            ReportPeriod::Monthly => 30,
            ReportPeriod::Yearly => 12,
        }
    }
}

/// One timeline bucket (a day, or a month for yearly reports)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimelineBucket {
    pub label: String,
    /// Bucket start (Unix millis)
    pub start: i64,
    pub revenue: Decimal,
    pub expense: Decimal,
    pub profit: Decimal,
}

/// Full profit report
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfitReport {
    pub period: ReportPeriod,
    pub buckets: Vec<TimelineBucket>,
    pub total_revenue: Decimal,
    pub total_expense: Decimal,
    pub total_profit: Decimal,
    /// Profit margin in percent, 0 when there is no revenue
    pub margin: Decimal,
}

/// Build the timeline from raw (timestamp, amount) rows.
///
/// Buckets are daily for weekly/monthly and monthly for yearly, ending at
/// `now`. Buckets that start before the account's creation day (or month)
/// are clipped from the output.
pub fn build_timeline(
    period: ReportPeriod,
    now: i64,
    created_at: i64,
    orders: &[(i64, Decimal)],
    expenses: &[(i64, Decimal)],
) -> ProfitReport {
    let count = period.bucket_count();

    // Bucket starts, oldest first
    let starts: Vec<i64> = match period {
        ReportPeriod::Weekly | ReportPeriod::Monthly => {
            let today = time::day_start_millis(now);
            (0..count)
                .map(|i| today - (count - 1 - i) as i64 * DAY_MS)
                .collect()
        }
        ReportPeriod::Yearly => {
            let mut month = time::month_start_millis(now);
            let mut starts = vec![month];
            for _ in 1..count {
                // Step to the previous month via its last millisecond
                month = time::month_start_millis(month - 1);
                starts.push(month);
            }
            starts.reverse();
            starts
        }
    };

    // Clip buckets that precede the account's creation
    let clip_floor = match period {
        ReportPeriod::Weekly | ReportPeriod::Monthly => time::day_start_millis(created_at),
        ReportPeriod::Yearly => time::month_start_millis(created_at),
    };
    let starts: Vec<i64> = starts.into_iter().filter(|s| *s >= clip_floor).collect();

    let bucket_index = |ts: i64| -> Option<usize> {
        let key = match period {
            ReportPeriod::Weekly | ReportPeriod::Monthly => time::day_start_millis(ts),
            ReportPeriod::Yearly => time::month_start_millis(ts),
        };
        starts.binary_search(&key).ok()
    };

    let mut buckets: Vec<TimelineBucket> = starts
        .iter()
        .map(|start| TimelineBucket {
            label: match period {
                ReportPeriod::Weekly | ReportPeriod::Monthly => time::day_label(*start),
                ReportPeriod::Yearly => time::month_label(*start),
            },
            start: *start,
            revenue: Decimal::ZERO,
            expense: Decimal::ZERO,
            profit: Decimal::ZERO,
        })
        .collect();

    for (ts, amount) in orders {
        if let Some(idx) = bucket_index(*ts) {
            buckets[idx].revenue += *amount;
        }
    }
    for (ts, amount) in expenses {
        if let Some(idx) = bucket_index(*ts) {
            buckets[idx].expense += *amount;
        }
    }

    let mut total_revenue = Decimal::ZERO;
    let mut total_expense = Decimal::ZERO;
    for bucket in &mut buckets {
        bucket.profit = bucket.revenue - bucket.expense;
        total_revenue += bucket.revenue;
        total_expense += bucket.expense;
    }
    let total_profit = total_revenue - total_expense;
    let margin = if total_revenue.is_zero() {
        Decimal::ZERO
    } else {
        (total_profit / total_revenue * Decimal::from(100)).round_dp(2)
    };

    ProfitReport {
        period,
        buckets,
        total_revenue,
        total_expense,
        total_profit,
        margin,
    }
}

#[derive(Debug, Deserialize)]
struct AmountRow {
    ts: i64,
    amount: Decimal,
}

#[derive(Clone)]
pub struct ReportRepository {
    base: BaseRepository,
}

impl ReportRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Paid-order (created_at, total) rows since `since`
    async fn paid_orders_since(
        &self,
        account: &AccountId,
        since: i64,
    ) -> RepoResult<Vec<(i64, Decimal)>> {
        let rows: Vec<AmountRow> = self
            .base
            .db()
            .query(
                "SELECT created_at AS ts, total AS amount FROM order WHERE account = $account AND payment_status = 'paid' AND created_at >= $since",
            )
            .bind(("account", account.clone()))
            .bind(("since", since))
            .await?
            .take(0)?;
        Ok(rows.into_iter().map(|r| (r.ts, r.amount)).collect())
    }

    /// Expense (date, amount) rows since `since`
    async fn expenses_since(
        &self,
        account: &AccountId,
        since: i64,
    ) -> RepoResult<Vec<(i64, Decimal)>> {
        let rows: Vec<AmountRow> = self
            .base
            .db()
            .query(
                "SELECT date AS ts, amount FROM expense WHERE account = $account AND date >= $since",
            )
            .bind(("account", account.clone()))
            .bind(("since", since))
            .await?
            .take(0)?;
        Ok(rows.into_iter().map(|r| (r.ts, r.amount)).collect())
    }

    /// Compute the profit report for a tenant
    pub async fn profit_report(
        &self,
        tenant: &Account,
        period: ReportPeriod,
        now: i64,
    ) -> RepoResult<ProfitReport> {
        let account = tenant
            .id
            .clone()
            .ok_or_else(|| RepoError::Validation("Tenant account has no id".to_string()))?;

        // Fetch back to the earliest possible bucket; clipping happens in
        // build_timeline against the account creation date
        let since = match period {
            ReportPeriod::Weekly => time::day_start_millis(now) - 6 * DAY_MS,
            ReportPeriod::Monthly => time::day_start_millis(now) - 29 * DAY_MS,
            ReportPeriod::Yearly => {
                let mut month = time::month_start_millis(now);
                for _ in 1..12 {
                    month = time::month_start_millis(month - 1);
                }
                month
            }
        };

        let orders = self.paid_orders_since(&account, since).await?;
        let expenses = self.expenses_since(&account, since).await?;
        Ok(build_timeline(
            period,
            now,
            tenant.created_at,
            &orders,
            &expenses,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(v: i64) -> Decimal {
        Decimal::from(v)
    }

    // 2023-11-14T22:13:20Z
    const NOW: i64 = 1_700_000_000_000;

    #[test]
    fn test_weekly_has_seven_buckets_for_old_account() {
        let report = build_timeline(ReportPeriod::Weekly, NOW, 0, &[], &[]);
        assert_eq!(report.buckets.len(), 7);
        assert_eq!(report.buckets.last().unwrap().label, "2023-11-14");
    }

    #[test]
    fn test_buckets_clipped_to_creation_date() {
        // Account created two days ago: weekly report must only show 3 days
        let created = NOW - 2 * DAY_MS;
        let report = build_timeline(ReportPeriod::Weekly, NOW, created, &[], &[]);
        assert_eq!(report.buckets.len(), 3);
        assert!(report.buckets.iter().all(|b| b.start >= time::day_start_millis(created)));

        let monthly = build_timeline(ReportPeriod::Monthly, NOW, created, &[], &[]);
        assert_eq!(monthly.buckets.len(), 3);

        let yearly = build_timeline(ReportPeriod::Yearly, NOW, created, &[], &[]);
        // Creation month is the current month: single bucket
        assert_eq!(yearly.buckets.len(), 1);
    }

    #[test]
    fn test_revenue_expense_profit_per_bucket() {
        let today = time::day_start_millis(NOW);
        let yesterday = today - DAY_MS;
        let orders = vec![(today + 3_600_000, dec(100)), (yesterday, dec(40))];
        let expenses = vec![(today, dec(30))];

        let report = build_timeline(ReportPeriod::Weekly, NOW, 0, &orders, &expenses);
        let last = report.buckets.last().unwrap();
        assert_eq!(last.revenue, dec(100));
        assert_eq!(last.expense, dec(30));
        assert_eq!(last.profit, dec(70));

        assert_eq!(report.total_revenue, dec(140));
        assert_eq!(report.total_expense, dec(30));
        assert_eq!(report.total_profit, dec(110));
    }

    #[test]
    fn test_margin_guarded_against_zero_revenue() {
        let expenses = vec![(time::day_start_millis(NOW), dec(50))];
        let report = build_timeline(ReportPeriod::Weekly, NOW, 0, &[], &expenses);
        assert_eq!(report.margin, Decimal::ZERO);
        assert_eq!(report.total_profit, dec(-50));
    }

    #[test]
    fn test_margin_percentage() {
        let orders = vec![(time::day_start_millis(NOW), dec(200))];
        let expenses = vec![(time::day_start_millis(NOW), dec(50))];
        let report = build_timeline(ReportPeriod::Weekly, NOW, 0, &orders, &expenses);
        assert_eq!(report.margin, dec(75));
    }

    #[test]
    fn test_yearly_buckets_are_months() {
        let report = build_timeline(ReportPeriod::Yearly, NOW, 0, &[], &[]);
        assert_eq!(report.buckets.len(), 12);
        assert_eq!(report.buckets.last().unwrap().label, "2023-11");
        assert_eq!(report.buckets.first().unwrap().label, "2022-12");
    }

    #[test]
    fn test_rows_outside_window_ignored() {
        let ancient = vec![(NOW - 400 * DAY_MS, dec(999))];
        let report = build_timeline(ReportPeriod::Weekly, NOW, 0, &ancient, &[]);
        assert_eq!(report.total_revenue, Decimal::ZERO);
    }
}
