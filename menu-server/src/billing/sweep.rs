//! BillingSweepWorker — daily due-date email sweep
//!
//! Scans all unpaid tenants with a due date set: approaching due dates get
//! a reminder, reached or passed due dates get an overdue warning. The
//! sweep keeps no suppression state, so the warning re-sends every day the
//! condition holds: a tenant ten days overdue has received ten warnings.

use tokio_util::sync::CancellationToken;

use crate::core::state::ServerState;
use crate::notify::templates;
use crate::utils::time;

/// Sweep interval
const SWEEP_INTERVAL_SECS: u64 = 24 * 60 * 60;
/// Reminders start this many days before the due date
const REMINDER_WINDOW_DAYS: i64 = 5;

/// Standing of an unpaid account relative to its due date
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DueStanding {
    /// Due in 1..=REMINDER_WINDOW_DAYS days
    Upcoming { days_left: i64 },
    /// Due today or already past
    Overdue { days_past: i64 },
}

/// Classify an unpaid account's due date against the current time.
///
/// Returns None while the due date is still more than the reminder window
/// away.
pub fn classify(now: i64, due_date: i64) -> Option<DueStanding> {
    let days_left = time::day_diff(now, due_date);
    if (1..=REMINDER_WINDOW_DAYS).contains(&days_left) {
        Some(DueStanding::Upcoming { days_left })
    } else if days_left <= 0 {
        Some(DueStanding::Overdue {
            days_past: -days_left,
        })
    } else {
        None
    }
}

pub struct BillingSweepWorker {
    state: ServerState,
    shutdown: CancellationToken,
}

impl BillingSweepWorker {
    pub fn new(state: ServerState, shutdown: CancellationToken) -> Self {
        Self { state, shutdown }
    }

    /// Run the sweep loop until shutdown
    pub async fn run(self) {
        tracing::info!("BillingSweepWorker started");

        let mut interval =
            tokio::time::interval(tokio::time::Duration::from_secs(SWEEP_INTERVAL_SECS));
        interval.tick().await; // skip immediate tick

        loop {
            tokio::select! {
                _ = self.shutdown.cancelled() => {
                    tracing::info!("BillingSweepWorker shutting down");
                    break;
                }
                _ = interval.tick() => {
                    if let Err(e) = self.sweep_once().await {
                        tracing::error!("Billing sweep failed: {e}");
                    }
                }
            }
        }
    }

    /// One pass over all unpaid tenants with a due date
    pub async fn sweep_once(&self) -> Result<(), shared::error::AppError> {
        let now = time::now_millis();
        let accounts = self
            .state
            .accounts()
            .find_unpaid_with_due_date()
            .await
            .map_err(shared::error::AppError::from)?;

        let mut reminders = 0usize;
        let mut warnings = 0usize;
        for account in &accounts {
            let Some(due_date) = account.due_date else {
                continue;
            };
            match classify(now, due_date) {
                Some(DueStanding::Upcoming { days_left }) => {
                    self.state
                        .outbox()
                        .enqueue(templates::payment_reminder(account, days_left));
                    reminders += 1;
                }
                Some(DueStanding::Overdue { days_past }) => {
                    self.state
                        .outbox()
                        .enqueue(templates::overdue_warning(account, days_past));
                    warnings += 1;
                }
                None => {}
            }
        }

        tracing::info!(
            scanned = accounts.len(),
            reminders,
            warnings,
            "Billing sweep completed"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DAY_MS: i64 = 86_400_000;
    const NOW: i64 = 1_700_000_000_000;

    #[test]
    fn test_reminder_window() {
        for days in 1..=5 {
            assert_eq!(
                classify(NOW, NOW + days * DAY_MS),
                Some(DueStanding::Upcoming { days_left: days }),
                "due in {days} days must remind"
            );
        }
    }

    #[test]
    fn test_too_far_out_is_silent() {
        assert_eq!(classify(NOW, NOW + 6 * DAY_MS), None);
        assert_eq!(classify(NOW, NOW + 60 * DAY_MS), None);
    }

    #[test]
    fn test_due_today_warns() {
        assert_eq!(
            classify(NOW, NOW + 3_600_000),
            Some(DueStanding::Overdue { days_past: 0 })
        );
    }

    #[test]
    fn test_overdue_warns_every_day() {
        // No suppression: day ten past due still classifies as overdue
        assert_eq!(
            classify(NOW, NOW - 10 * DAY_MS),
            Some(DueStanding::Overdue { days_past: 10 })
        );
    }
}
