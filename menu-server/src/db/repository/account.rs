//! Account Repository
//!
//! Accounts, manager back-references, billing mutations and public slug
//! resolution. Every billing mutation is issued as one store-level UPDATE
//! that also appends the billing-history entry, so the change and its
//! ledger line are atomic per document.

use super::{BaseRepository, RepoError, RepoResult};
use crate::db::models::{
    Account, AccountId, AccountUpdate, BillingEntry, ManagerCreate, OwnerCreate, PaymentStatus,
    Plan, Role,
};
use crate::utils::{slug, time};
use surrealdb::engine::local::Db;
use surrealdb::{RecordId, Surreal};

#[derive(Clone)]
pub struct AccountRepository {
    base: BaseRepository,
}

impl AccountRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    fn parse_id(id: &str) -> RepoResult<RecordId> {
        id.parse()
            .map_err(|_| RepoError::Validation(format!("Invalid ID: {}", id)))
    }

    /// Find account by id
    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Account>> {
        let thing = Self::parse_id(id)?;
        let account: Option<Account> = self.base.db().select(thing).await?;
        Ok(account)
    }

    /// Find account by record id
    pub async fn find_by_record_id(&self, id: &AccountId) -> RepoResult<Option<Account>> {
        let account: Option<Account> = self.base.db().select(id.clone()).await?;
        Ok(account)
    }

    /// Find account by email
    pub async fn find_by_email(&self, email: &str) -> RepoResult<Option<Account>> {
        let email_owned = email.to_lowercase();
        let mut result = self
            .base
            .db()
            .query("SELECT * FROM account WHERE email = $email LIMIT 1")
            .bind(("email", email_owned))
            .await?;
        let accounts: Vec<Account> = result.take(0)?;
        Ok(accounts.into_iter().next())
    }

    /// All restaurant-owner accounts, sorted by restaurant name
    pub async fn find_owners(&self) -> RepoResult<Vec<Account>> {
        let accounts: Vec<Account> = self
            .base
            .db()
            .query("SELECT * FROM account WHERE role = 'owner' ORDER BY restaurant_name")
            .await?
            .take(0)?;
        Ok(accounts)
    }

    /// Unpaid owners with a due date set (billing sweep input)
    pub async fn find_unpaid_with_due_date(&self) -> RepoResult<Vec<Account>> {
        let accounts: Vec<Account> = self
            .base
            .db()
            .query(
                "SELECT * FROM account WHERE role = 'owner' AND payment_status = 'unpaid' AND due_date != NONE",
            )
            .await?
            .take(0)?;
        Ok(accounts)
    }

    /// Manager accounts of one restaurant
    pub async fn find_managers(&self, owner: &AccountId) -> RepoResult<Vec<Account>> {
        let accounts: Vec<Account> = self
            .base
            .db()
            .query("SELECT * FROM account WHERE role = 'manager' AND owner = $owner ORDER BY email")
            .bind(("owner", owner.clone()))
            .await?
            .take(0)?;
        Ok(accounts)
    }

    /// Manager accounts missing their owner back-reference (repair script)
    pub async fn find_unlinked_managers(&self) -> RepoResult<Vec<Account>> {
        let accounts: Vec<Account> = self
            .base
            .db()
            .query("SELECT * FROM account WHERE role = 'manager' AND owner = NONE")
            .await?
            .take(0)?;
        Ok(accounts)
    }

    /// Re-link a manager to its owning restaurant
    pub async fn link_manager(&self, id: &AccountId, owner: &AccountId) -> RepoResult<Account> {
        let mut result = self
            .base
            .db()
            .query("UPDATE $id SET owner = $owner RETURN AFTER")
            .bind(("id", id.clone()))
            .bind(("owner", owner.clone()))
            .await?;
        result
            .take::<Option<Account>>(0)?
            .ok_or_else(|| RepoError::NotFound(format!("Account {} not found", id)))
    }

    /// Whether a superadmin account already exists
    pub async fn superadmin_exists(&self) -> RepoResult<bool> {
        let mut result = self
            .base
            .db()
            .query("SELECT * FROM account WHERE role = 'superadmin' LIMIT 1")
            .await?;
        let found: Vec<Account> = result.take(0)?;
        Ok(!found.is_empty())
    }

    /// Create the superadmin account (seed script)
    pub async fn create_superadmin(&self, email: &str, password: &str) -> RepoResult<Account> {
        if self.find_by_email(email).await?.is_some() {
            return Err(RepoError::Duplicate(format!(
                "Email '{}' already registered",
                email
            )));
        }
        let hash_pass = Account::hash_password(password)
            .map_err(|e| RepoError::Database(format!("Failed to hash password: {}", e)))?;
        let email_owned = email.to_lowercase();
        let slug = slug::slugify(&email_owned);

        let mut result = self
            .base
            .db()
            .query(
                r#"CREATE account SET
                    email = $email,
                    hash_pass = $hash_pass,
                    role = 'superadmin',
                    restaurant_name = '',
                    slug = $slug,
                    plan = 'starter',
                    payment_status = 'paid',
                    is_active = true,
                    billing_history = [],
                    created_at = $now
                RETURN AFTER"#,
            )
            .bind(("email", email_owned))
            .bind(("hash_pass", hash_pass))
            .bind(("slug", slug))
            .bind(("now", time::now_millis()))
            .await?;

        let created: Option<Account> = result.take(0)?;
        created.ok_or_else(|| RepoError::Database("Failed to create superadmin".to_string()))
    }

    /// Create a restaurant owner account (superadmin console)
    ///
    /// The slug is derived from the restaurant name; uniqueness of email and
    /// slug is backstopped by store indexes.
    pub async fn create_owner(&self, data: OwnerCreate, hash_pass: String) -> RepoResult<Account> {
        if self.find_by_email(&data.email).await?.is_some() {
            return Err(RepoError::Duplicate(format!(
                "Email '{}' already registered",
                data.email
            )));
        }

        let slug = slug::slugify(&data.restaurant_name);
        if slug.is_empty() {
            return Err(RepoError::Validation(
                "Restaurant name must contain at least one alphanumeric character".to_string(),
            ));
        }
        if self.find_by_slug(&slug).await?.is_some() {
            return Err(RepoError::Duplicate(format!(
                "Restaurant name '{}' already taken",
                data.restaurant_name
            )));
        }

        let mut result = self
            .base
            .db()
            .query(
                r#"CREATE account SET
                    email = $email,
                    hash_pass = $hash_pass,
                    role = 'owner',
                    restaurant_name = $restaurant_name,
                    slug = $slug,
                    plan = $plan,
                    payment_status = 'unpaid',
                    due_date = $due_date,
                    is_active = true,
                    billing_history = [],
                    created_at = $now
                RETURN AFTER"#,
            )
            .bind(("email", data.email.to_lowercase()))
            .bind(("hash_pass", hash_pass))
            .bind(("restaurant_name", data.restaurant_name))
            .bind(("slug", slug))
            .bind(("plan", data.plan))
            .bind(("due_date", data.due_date))
            .bind(("now", time::now_millis()))
            .await?;

        let created: Option<Account> = result.take(0)?;
        created.ok_or_else(|| RepoError::Database("Failed to create owner".to_string()))
    }

    /// Create a manager account under an owner
    ///
    /// Managers share the owner's restaurant name but carry their own
    /// email-derived slug to satisfy the unique slug index.
    pub async fn create_manager(
        &self,
        owner: &Account,
        data: ManagerCreate,
        hash_pass: String,
    ) -> RepoResult<Account> {
        if self.find_by_email(&data.email).await?.is_some() {
            return Err(RepoError::Duplicate(format!(
                "Email '{}' already registered",
                data.email
            )));
        }
        let owner_id = owner
            .id
            .clone()
            .ok_or_else(|| RepoError::Validation("Owner account has no id".to_string()))?;

        let email_owned = data.email.to_lowercase();
        let slug = slug::slugify(&email_owned);

        let mut result = self
            .base
            .db()
            .query(
                r#"CREATE account SET
                    email = $email,
                    hash_pass = $hash_pass,
                    role = 'manager',
                    restaurant_name = $restaurant_name,
                    slug = $slug,
                    owner = $owner,
                    plan = $plan,
                    payment_status = 'unpaid',
                    is_active = true,
                    billing_history = [],
                    created_at = $now
                RETURN AFTER"#,
            )
            .bind(("email", email_owned))
            .bind(("hash_pass", hash_pass))
            .bind(("restaurant_name", owner.restaurant_name.clone()))
            .bind(("slug", slug))
            .bind(("owner", owner_id))
            .bind(("plan", owner.plan))
            .bind(("now", time::now_millis()))
            .await?;

        let created: Option<Account> = result.take(0)?;
        created.ok_or_else(|| RepoError::Database("Failed to create manager".to_string()))
    }

    /// Update profile fields; a changed restaurant name re-derives the slug
    pub async fn update_profile(&self, id: &str, data: AccountUpdate) -> RepoResult<Account> {
        let thing = Self::parse_id(id)?;
        let existing = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Account {} not found", id)))?;

        // Slug is re-derived only when the name actually changed; re-saving
        // the same name keeps the stored slug
        let new_slug = match &data.restaurant_name {
            Some(name) if *name != existing.restaurant_name => {
                let slug = slug::slugify(name);
                if slug.is_empty() {
                    return Err(RepoError::Validation(
                        "Restaurant name must contain at least one alphanumeric character"
                            .to_string(),
                    ));
                }
                if let Some(other) = self.find_by_slug(&slug).await?
                    && other.id != existing.id
                {
                    return Err(RepoError::Duplicate(format!(
                        "Restaurant name '{}' already taken",
                        name
                    )));
                }
                Some(slug)
            }
            _ => None,
        };

        if let Some(ref email) = data.email
            && email.to_lowercase() != existing.email
            && self.find_by_email(email).await?.is_some()
        {
            return Err(RepoError::Duplicate(format!(
                "Email '{}' already registered",
                email
            )));
        }

        let mut result = self
            .base
            .db()
            .query(
                r#"UPDATE $thing SET
                    restaurant_name = $restaurant_name OR restaurant_name,
                    email = $email OR email,
                    slug = $slug OR slug
                RETURN AFTER"#,
            )
            .bind(("thing", thing))
            .bind(("restaurant_name", data.restaurant_name))
            .bind(("email", data.email.map(|e| e.to_lowercase())))
            .bind(("slug", new_slug))
            .await?;

        result
            .take::<Option<Account>>(0)?
            .ok_or_else(|| RepoError::NotFound(format!("Account {} not found", id)))
    }

    /// Replace the stored password hash (credential reset)
    pub async fn set_password_hash(&self, id: &AccountId, hash_pass: String) -> RepoResult<Account> {
        let mut result = self
            .base
            .db()
            .query("UPDATE $id SET hash_pass = $hash_pass RETURN AFTER")
            .bind(("id", id.clone()))
            .bind(("hash_pass", hash_pass))
            .await?;
        result
            .take::<Option<Account>>(0)?
            .ok_or_else(|| RepoError::NotFound(format!("Account {} not found", id)))
    }

    /// Hard delete an account
    pub async fn delete(&self, id: &str) -> RepoResult<bool> {
        let thing = Self::parse_id(id)?;
        self.find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Account {} not found", id)))?;
        self.base
            .db()
            .query("DELETE $thing")
            .bind(("thing", thing))
            .await?;
        Ok(true)
    }

    // =========================================================================
    // Billing mutations: each is a single-document UPDATE carrying its
    // billing-history append
    // =========================================================================

    fn history_entry(account: &Account, notes: &str) -> BillingEntry {
        BillingEntry {
            date: time::now_millis(),
            plan: account.plan,
            status: account.payment_status,
            due_date: account.due_date,
            amount: None,
            notes: Some(notes.to_string()),
        }
    }

    /// Set payment status. The cycle-lock predicate is checked by the caller.
    pub async fn set_payment_status(
        &self,
        account: &Account,
        status: PaymentStatus,
        now: i64,
    ) -> RepoResult<Account> {
        let id = account
            .id
            .clone()
            .ok_or_else(|| RepoError::Validation("Account has no id".to_string()))?;

        let mut entry = Self::history_entry(account, "payment status changed");
        entry.status = status;

        let set_last = status == PaymentStatus::Paid;
        let mut result = self
            .base
            .db()
            .query(
                r#"UPDATE $id SET
                    payment_status = $status,
                    last_payment = IF $set_last THEN $now ELSE last_payment END,
                    billing_history += $entry
                RETURN AFTER"#,
            )
            .bind(("id", id.clone()))
            .bind(("status", status))
            .bind(("set_last", set_last))
            .bind(("now", now))
            .bind(("entry", entry))
            .await?;

        result
            .take::<Option<Account>>(0)?
            .ok_or_else(|| RepoError::NotFound(format!("Account {} not found", id)))
    }

    /// Set the due date; always allowed
    pub async fn set_due_date(&self, account: &Account, due_date: i64) -> RepoResult<Account> {
        let id = account
            .id
            .clone()
            .ok_or_else(|| RepoError::Validation("Account has no id".to_string()))?;

        let mut entry = Self::history_entry(account, "due date changed");
        entry.due_date = Some(due_date);

        let mut result = self
            .base
            .db()
            .query(
                r#"UPDATE $id SET
                    due_date = $due_date,
                    billing_history += $entry
                RETURN AFTER"#,
            )
            .bind(("id", id.clone()))
            .bind(("due_date", due_date))
            .bind(("entry", entry))
            .await?;

        result
            .take::<Option<Account>>(0)?
            .ok_or_else(|| RepoError::NotFound(format!("Account {} not found", id)))
    }

    /// Change the plan and record the charged amount; forces paid status
    pub async fn change_plan(
        &self,
        account: &Account,
        plan: Plan,
        amount: rust_decimal::Decimal,
        now: i64,
    ) -> RepoResult<Account> {
        let id = account
            .id
            .clone()
            .ok_or_else(|| RepoError::Validation("Account has no id".to_string()))?;

        let entry = BillingEntry {
            date: now,
            plan,
            status: PaymentStatus::Paid,
            due_date: account.due_date,
            amount: Some(amount),
            notes: Some("plan changed".to_string()),
        };

        let mut result = self
            .base
            .db()
            .query(
                r#"UPDATE $id SET
                    plan = $plan,
                    payment_status = 'paid',
                    last_payment = $now,
                    billing_history += $entry
                RETURN AFTER"#,
            )
            .bind(("id", id.clone()))
            .bind(("plan", plan))
            .bind(("now", now))
            .bind(("entry", entry))
            .await?;

        result
            .take::<Option<Account>>(0)?
            .ok_or_else(|| RepoError::NotFound(format!("Account {} not found", id)))
    }

    /// Toggle the active flag. A history entry is recorded so activation
    /// changes show up in the same ledger as every other billing mutation.
    pub async fn set_active(&self, account: &Account, active: bool) -> RepoResult<Account> {
        let id = account
            .id
            .clone()
            .ok_or_else(|| RepoError::Validation("Account has no id".to_string()))?;

        let entry = Self::history_entry(
            account,
            if active { "account activated" } else { "account deactivated" },
        );

        let mut result = self
            .base
            .db()
            .query(
                r#"UPDATE $id SET
                    is_active = $active,
                    billing_history += $entry
                RETURN AFTER"#,
            )
            .bind(("id", id.clone()))
            .bind(("active", active))
            .bind(("entry", entry))
            .await?;

        result
            .take::<Option<Account>>(0)?
            .ok_or_else(|| RepoError::NotFound(format!("Account {} not found", id)))
    }

    // =========================================================================
    // Public slug resolution
    // =========================================================================

    /// Exact match on the persisted slug field (owners only)
    async fn find_by_slug(&self, slug: &str) -> RepoResult<Option<Account>> {
        let slug_owned = slug.to_string();
        let mut result = self
            .base
            .db()
            .query("SELECT * FROM account WHERE slug = $slug LIMIT 1")
            .bind(("slug", slug_owned))
            .await?;
        let accounts: Vec<Account> = result.take(0)?;
        Ok(accounts.into_iter().next())
    }

    /// Resolve a human-typed or QR-embedded slug to exactly one restaurant.
    ///
    /// Three tiers, first hit wins:
    /// 1. exact match on the persisted slug field
    /// 2. loose token match (hyphen/space/punctuation flexibility)
    /// 3. alphanumeric-only reduction over all owner accounts
    ///
    /// Slugs were added after names were free text, so tiers 2 and 3 catch
    /// historical names that do not normalize cleanly. A tier-3 reduction
    /// matching more than one restaurant is rejected as ambiguous.
    pub async fn resolve_slug(&self, query: &str) -> RepoResult<Account> {
        // Tier 1: exact slug
        if let Some(account) = self.find_by_slug(query).await? {
            if account.role == Role::Owner {
                return Ok(account);
            }
        }

        let owners = self.find_owners().await?;

        // Tier 2: loose token match against name or stored slug
        let query_tokens = slug::tokens(query);
        if !query_tokens.is_empty() {
            for account in &owners {
                if slug::tokens(&account.restaurant_name) == query_tokens
                    || slug::tokens(&account.slug) == query_tokens
                {
                    return Ok(account.clone());
                }
            }
        }

        // Tier 3: alphanumeric-only reduction, full scan
        let key = slug::alnum_key(query);
        if key.is_empty() {
            return Err(RepoError::NotFound(format!("Restaurant '{}'", query)));
        }
        let matches: Vec<&Account> = owners
            .iter()
            .filter(|a| {
                slug::alnum_key(&a.restaurant_name) == key || slug::alnum_key(&a.slug) == key
            })
            .collect();

        match matches.len() {
            0 => Err(RepoError::NotFound(format!("Restaurant '{}'", query))),
            1 => Ok(matches[0].clone()),
            _ => Err(RepoError::Ambiguous(format!(
                "Slug '{}' matches {} restaurants",
                query,
                matches.len()
            ))),
        }
    }
}
