//! Account Model
//!
//! A single collection holds superadmin, restaurant-owner and manager
//! accounts, discriminated by the role field. Subscription and billing
//! state lives on the owner account; the billing history is an embedded
//! append-only array so every billing mutation is a single-document update.

use super::serde_helpers;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

/// Account ID type
pub type AccountId = RecordId;

/// Account role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Superadmin,
    Owner,
    Manager,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Superadmin => "superadmin",
            Role::Owner => "owner",
            Role::Manager => "manager",
        }
    }
}

/// Subscription plan
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Plan {
    #[default]
    Starter,
    Pro,
    Enterprise,
}

/// Subscription payment status
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    Paid,
    #[default]
    Unpaid,
}

/// One entry of the append-only billing history ledger
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BillingEntry {
    /// When the mutation happened (Unix millis)
    pub date: i64,
    pub plan: Plan,
    pub status: PaymentStatus,
    #[serde(default)]
    pub due_date: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Account model matching the store schema
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub id: Option<AccountId>,
    pub email: String,
    #[serde(skip_serializing)]
    pub hash_pass: String,
    pub role: Role,
    #[serde(default)]
    pub restaurant_name: String,
    /// Derived from restaurant_name, unique across tenants
    #[serde(default)]
    pub slug: String,
    /// Owning restaurant account (managers only)
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "serde_helpers::option_record_id"
    )]
    pub owner: Option<AccountId>,
    #[serde(default)]
    pub plan: Plan,
    #[serde(default)]
    pub payment_status: PaymentStatus,
    #[serde(default)]
    pub due_date: Option<i64>,
    #[serde(default)]
    pub last_payment: Option<i64>,
    #[serde(
        default = "default_true",
        deserialize_with = "serde_helpers::bool_true"
    )]
    pub is_active: bool,
    #[serde(default)]
    pub billing_history: Vec<BillingEntry>,
    #[serde(default)]
    pub created_at: i64,
}

fn default_true() -> bool {
    true
}

impl Account {
    /// Verify password using argon2
    pub fn verify_password(&self, password: &str) -> Result<bool, argon2::password_hash::Error> {
        use argon2::{
            Argon2,
            password_hash::{PasswordHash, PasswordVerifier},
        };

        let parsed_hash = PasswordHash::new(&self.hash_pass)?;
        Ok(Argon2::default()
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok())
    }

    /// Hash password using argon2
    pub fn hash_password(password: &str) -> Result<String, argon2::password_hash::Error> {
        use argon2::{
            Argon2,
            password_hash::{PasswordHasher, SaltString, rand_core::OsRng},
        };

        let salt = SaltString::generate(&mut OsRng);
        let argon2 = Argon2::default();
        let password_hash = argon2.hash_password(password.as_bytes(), &salt)?;
        Ok(password_hash.to_string())
    }

    /// The account that owns this tenant's data: the owner account itself,
    /// or the manager's back-referenced restaurant
    pub fn tenant_id(&self) -> Option<&AccountId> {
        match self.role {
            Role::Owner => self.id.as_ref(),
            Role::Manager => self.owner.as_ref(),
            Role::Superadmin => None,
        }
    }
}

/// Create restaurant owner payload (superadmin console)
#[derive(Debug, Clone, Deserialize, validator::Validate)]
pub struct OwnerCreate {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 8))]
    pub password: String,
    #[validate(length(min = 1))]
    pub restaurant_name: String,
    #[serde(default)]
    pub plan: Plan,
    #[serde(default)]
    pub due_date: Option<i64>,
}

/// Create manager payload (owner dashboard)
#[derive(Debug, Clone, Deserialize, validator::Validate)]
pub struct ManagerCreate {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 8))]
    pub password: String,
}

/// Update account profile payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub restaurant_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_password_hash_roundtrip() {
        let hash = Account::hash_password("correct horse battery").unwrap();
        let account = Account {
            id: None,
            email: "owner@example.com".into(),
            hash_pass: hash,
            role: Role::Owner,
            restaurant_name: "Spice Route".into(),
            slug: "spice-route".into(),
            owner: None,
            plan: Plan::Starter,
            payment_status: PaymentStatus::Unpaid,
            due_date: None,
            last_payment: None,
            is_active: true,
            billing_history: vec![],
            created_at: 0,
        };
        assert!(account.verify_password("correct horse battery").unwrap());
        assert!(!account.verify_password("wrong").unwrap());
    }

    #[test]
    fn test_role_serde() {
        assert_eq!(serde_json::to_string(&Role::Superadmin).unwrap(), "\"superadmin\"");
        let role: Role = serde_json::from_str("\"manager\"").unwrap();
        assert_eq!(role, Role::Manager);
    }

    #[test]
    fn test_hash_never_serialized() {
        let account = Account {
            id: None,
            email: "a@b.c".into(),
            hash_pass: "$argon2id$secret".into(),
            role: Role::Owner,
            restaurant_name: String::new(),
            slug: String::new(),
            owner: None,
            plan: Plan::default(),
            payment_status: PaymentStatus::default(),
            due_date: None,
            last_payment: None,
            is_active: true,
            billing_history: vec![],
            created_at: 0,
        };
        let json = serde_json::to_string(&account).unwrap();
        assert!(!json.contains("argon2"));
        assert!(!json.contains("hash_pass"));
    }
}
