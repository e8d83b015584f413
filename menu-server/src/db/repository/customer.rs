//! Customer Repository

use super::{BaseRepository, RepoError, RepoResult};
use crate::db::models::{AccountId, Customer, CustomerCreate, CustomerUpdate};
use crate::utils::time;
use surrealdb::engine::local::Db;
use surrealdb::{RecordId, Surreal};

#[derive(Clone)]
pub struct CustomerRepository {
    base: BaseRepository,
}

impl CustomerRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    fn parse_id(id: &str) -> RepoResult<RecordId> {
        id.parse()
            .map_err(|_| RepoError::Validation(format!("Invalid ID: {}", id)))
    }

    /// All customers of one tenant
    pub async fn find_all(&self, account: &AccountId) -> RepoResult<Vec<Customer>> {
        let customers: Vec<Customer> = self
            .base
            .db()
            .query("SELECT * FROM customer WHERE account = $account ORDER BY name")
            .bind(("account", account.clone()))
            .await?
            .take(0)?;
        Ok(customers)
    }

    /// Customers of one tenant that have an email (newsletter audience)
    pub async fn find_with_email(&self, account: &AccountId) -> RepoResult<Vec<Customer>> {
        let customers: Vec<Customer> = self
            .base
            .db()
            .query("SELECT * FROM customer WHERE account = $account AND email != NONE")
            .bind(("account", account.clone()))
            .await?
            .take(0)?;
        Ok(customers)
    }

    /// Find one customer, scoped to the tenant
    pub async fn find_by_id(&self, account: &AccountId, id: &str) -> RepoResult<Option<Customer>> {
        let thing = Self::parse_id(id)?;
        let customer: Option<Customer> = self.base.db().select(thing).await?;
        Ok(customer.filter(|c| c.account == *account))
    }

    /// Create a customer record
    pub async fn create(&self, account: &AccountId, data: CustomerCreate) -> RepoResult<Customer> {
        let mut result = self
            .base
            .db()
            .query(
                r#"CREATE customer SET
                    account = $account,
                    name = $name,
                    email = $email,
                    phone = $phone,
                    visits = 0,
                    created_at = $now
                RETURN AFTER"#,
            )
            .bind(("account", account.clone()))
            .bind(("name", data.name))
            .bind(("email", data.email))
            .bind(("phone", data.phone))
            .bind(("now", time::now_millis()))
            .await?;

        let created: Option<Customer> = result.take(0)?;
        created.ok_or_else(|| RepoError::Database("Failed to create customer".to_string()))
    }

    /// Update a customer record
    pub async fn update(
        &self,
        account: &AccountId,
        id: &str,
        data: CustomerUpdate,
    ) -> RepoResult<Customer> {
        let thing = Self::parse_id(id)?;
        self.find_by_id(account, id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Customer {} not found", id)))?;

        let mut result = self
            .base
            .db()
            .query(
                r#"UPDATE $thing SET
                    name = $name OR name,
                    email = IF $has_email THEN $email ELSE email END,
                    phone = IF $has_phone THEN $phone ELSE phone END
                RETURN AFTER"#,
            )
            .bind(("thing", thing))
            .bind(("name", data.name))
            .bind(("has_email", data.email.is_some()))
            .bind(("email", data.email))
            .bind(("has_phone", data.phone.is_some()))
            .bind(("phone", data.phone))
            .await?;

        result
            .take::<Option<Customer>>(0)?
            .ok_or_else(|| RepoError::NotFound(format!("Customer {} not found", id)))
    }

    /// Delete a customer record
    pub async fn delete(&self, account: &AccountId, id: &str) -> RepoResult<bool> {
        let thing = Self::parse_id(id)?;
        self.find_by_id(account, id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Customer {} not found", id)))?;
        self.base
            .db()
            .query("DELETE $thing")
            .bind(("thing", thing))
            .await?;
        Ok(true)
    }
}
