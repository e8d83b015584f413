//! Billing / subscription state machine
//!
//! The payment-status toggle is guarded by a cycle lock: while an account
//! is paid and its due date has not passed, neither "mark paid" nor
//! "mark unpaid" may overwrite the active cycle. The daily sweep lives in
//! [`sweep`].

pub mod sweep;

pub use sweep::{BillingSweepWorker, DueStanding};

use crate::db::models::{Account, PaymentStatus};

/// Whether the account's payment status is locked for the current cycle.
///
/// Locked exactly while `payment_status == paid` and `now <= due_date`.
/// The boundary is inclusive: at `now == due_date` the cycle is still
/// locked; one millisecond later it is not.
pub fn cycle_locked(account: &Account, now: i64) -> bool {
    account.payment_status == PaymentStatus::Paid
        && account.due_date.is_some_and(|due| now <= due)
}

/// Whether an unpaid account has passed its due date.
///
/// The read-time subscription gate blocks requests while this holds; no
/// background job flips any flag.
pub fn overdue(account: &Account, now: i64) -> bool {
    account.payment_status == PaymentStatus::Unpaid
        && account.due_date.is_some_and(|due| now > due)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::models::{Plan, Role};

    fn account(status: PaymentStatus, due_date: Option<i64>) -> Account {
        Account {
            id: None,
            email: "owner@example.com".into(),
            hash_pass: String::new(),
            role: Role::Owner,
            restaurant_name: "Spice Route".into(),
            slug: "spice-route".into(),
            owner: None,
            plan: Plan::Starter,
            payment_status: status,
            due_date,
            last_payment: None,
            is_active: true,
            billing_history: vec![],
            created_at: 0,
        }
    }

    const DUE: i64 = 1_700_000_000_000;

    #[test]
    fn test_locked_while_paid_and_before_due() {
        let acc = account(PaymentStatus::Paid, Some(DUE));
        assert!(cycle_locked(&acc, DUE - 1));
    }

    #[test]
    fn test_boundary_exactly_at_due_date() {
        let acc = account(PaymentStatus::Paid, Some(DUE));
        // now == due_date still rejects; one millisecond later allows
        assert!(cycle_locked(&acc, DUE));
        assert!(!cycle_locked(&acc, DUE + 1));
    }

    #[test]
    fn test_unpaid_never_locked() {
        let acc = account(PaymentStatus::Unpaid, Some(DUE));
        assert!(!cycle_locked(&acc, DUE - 1));
    }

    #[test]
    fn test_paid_without_due_date_not_locked() {
        let acc = account(PaymentStatus::Paid, None);
        assert!(!cycle_locked(&acc, DUE));
    }

    #[test]
    fn test_overdue_only_after_due_date() {
        let acc = account(PaymentStatus::Unpaid, Some(DUE));
        assert!(!overdue(&acc, DUE));
        assert!(overdue(&acc, DUE + 1));
    }

    #[test]
    fn test_paid_account_never_overdue() {
        let acc = account(PaymentStatus::Paid, Some(DUE));
        assert!(!overdue(&acc, DUE + 1));
    }
}
