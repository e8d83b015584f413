//! Transactional email templates
//!
//! Plain-text bodies; rendering is a pure function of the inputs so the
//! templates are unit-testable without a transport.

use crate::db::models::{Account, Plan};
use crate::utils::time;
use rust_decimal::Decimal;

/// A rendered outbound email
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Email {
    pub to: String,
    pub subject: String,
    pub body: String,
}

fn plan_name(plan: Plan) -> &'static str {
    match plan {
        Plan::Starter => "Starter",
        Plan::Pro => "Pro",
        Plan::Enterprise => "Enterprise",
    }
}

/// Onboarding email with the owner's initial credentials
pub fn owner_welcome(account: &Account, password: &str, dashboard_url: &str) -> Email {
    Email {
        to: account.email.clone(),
        subject: format!("Welcome to your {} dashboard", account.restaurant_name),
        body: format!(
            "Hello,\n\n\
             Your restaurant \"{}\" is ready on the {} plan.\n\n\
             Dashboard: {}\n\
             Email: {}\n\
             Password: {}\n\n\
             Please change your password after the first login.\n",
            account.restaurant_name,
            plan_name(account.plan),
            dashboard_url,
            account.email,
            password,
        ),
    }
}

/// Credentials email for a newly added manager
pub fn manager_welcome(manager: &Account, password: &str, dashboard_url: &str) -> Email {
    Email {
        to: manager.email.clone(),
        subject: format!("Manager access for {}", manager.restaurant_name),
        body: format!(
            "Hello,\n\n\
             You have been added as a manager of \"{}\".\n\n\
             Dashboard: {}\n\
             Email: {}\n\
             Password: {}\n",
            manager.restaurant_name, dashboard_url, manager.email, password,
        ),
    }
}

/// Temporary password issued by the superadmin credential reset
pub fn credentials_reset(account: &Account, temp_password: &str) -> Email {
    Email {
        to: account.email.clone(),
        subject: "Your password has been reset".to_string(),
        body: format!(
            "Hello,\n\n\
             A platform administrator reset the password for {}.\n\n\
             Temporary password: {}\n\n\
             Please log in and change it immediately.\n",
            account.email, temp_password,
        ),
    }
}

/// Due-date change notice
pub fn due_date_changed(account: &Account, due_date: i64) -> Email {
    Email {
        to: account.email.clone(),
        subject: "Subscription due date updated".to_string(),
        body: format!(
            "Hello,\n\n\
             The next payment for \"{}\" ({} plan) is due on {}.\n",
            account.restaurant_name,
            plan_name(account.plan),
            time::day_label(due_date),
        ),
    }
}

/// Payment confirmation after a plan change
pub fn payment_confirmation(account: &Account, plan: Plan, amount: Decimal) -> Email {
    Email {
        to: account.email.clone(),
        subject: "Payment received".to_string(),
        body: format!(
            "Hello,\n\n\
             We received your payment of {} for the {} plan.\n\
             Restaurant: {}\n\n\
             Thank you!\n",
            amount,
            plan_name(plan),
            account.restaurant_name,
        ),
    }
}

/// Payment reminder sent while the due date approaches
pub fn payment_reminder(account: &Account, days_left: i64) -> Email {
    let day_word = if days_left == 1 { "day" } else { "days" };
    Email {
        to: account.email.clone(),
        subject: format!("Payment due in {} {}", days_left, day_word),
        body: format!(
            "Hello,\n\n\
             The subscription for \"{}\" ({} plan) is due in {} {}.\n\
             Please settle the payment to avoid interruption.\n",
            account.restaurant_name,
            plan_name(account.plan),
            days_left,
            day_word,
        ),
    }
}

/// Overdue warning sent daily once the due date is reached or passed
pub fn overdue_warning(account: &Account, days_past: i64) -> Email {
    let since = if days_past == 0 {
        "today".to_string()
    } else {
        format!("{} day(s) ago", days_past)
    };
    Email {
        to: account.email.clone(),
        subject: "Subscription payment overdue".to_string(),
        body: format!(
            "Hello,\n\n\
             The subscription for \"{}\" was due {}.\n\
             Access to the dashboard is blocked until payment is received.\n",
            account.restaurant_name, since,
        ),
    }
}

/// Thank-you note after a feedback submission
pub fn feedback_thanks(restaurant_name: &str, customer_email: &str, customer_name: &str) -> Email {
    Email {
        to: customer_email.to_string(),
        subject: format!("Thanks for your feedback, {}", customer_name),
        body: format!(
            "Hi {},\n\n\
             Thank you for sharing your experience at {}. We read every\n\
             piece of feedback and hope to see you again soon!\n",
            customer_name, restaurant_name,
        ),
    }
}

/// Newsletter to a customer
pub fn newsletter(restaurant_name: &str, customer_email: &str, subject: &str, body: &str) -> Email {
    Email {
        to: customer_email.to_string(),
        subject: subject.to_string(),
        body: format!("{}\n\n-- {}\n", body, restaurant_name),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::models::{PaymentStatus, Role};

    fn owner() -> Account {
        Account {
            id: None,
            email: "owner@spice.example".into(),
            hash_pass: String::new(),
            role: Role::Owner,
            restaurant_name: "Spice Route".into(),
            slug: "spice-route".into(),
            owner: None,
            plan: Plan::Pro,
            payment_status: PaymentStatus::Unpaid,
            due_date: None,
            last_payment: None,
            is_active: true,
            billing_history: vec![],
            created_at: 0,
        }
    }

    #[test]
    fn test_reminder_pluralization() {
        let one = payment_reminder(&owner(), 1);
        assert_eq!(one.subject, "Payment due in 1 day");
        let five = payment_reminder(&owner(), 5);
        assert_eq!(five.subject, "Payment due in 5 days");
        assert!(five.body.contains("Spice Route"));
    }

    #[test]
    fn test_overdue_today_wording() {
        let email = overdue_warning(&owner(), 0);
        assert!(email.body.contains("was due today"));
    }

    #[test]
    fn test_welcome_contains_credentials() {
        let email = owner_welcome(&owner(), "s3cret-pass", "https://dash.example");
        assert_eq!(email.to, "owner@spice.example");
        assert!(email.body.contains("s3cret-pass"));
        assert!(email.body.contains("Pro"));
    }
}
