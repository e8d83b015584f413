//! Dining Table Repository
//!
//! One table number per tenant; the duplicate check here is backstopped by
//! the compound unique index on (account, number).

use super::{BaseRepository, RepoError, RepoResult};
use crate::db::models::{AccountId, DiningTable};
use crate::utils::time;
use surrealdb::engine::local::Db;
use surrealdb::{RecordId, Surreal};

#[derive(Clone)]
pub struct DiningTableRepository {
    base: BaseRepository,
}

impl DiningTableRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    fn parse_id(id: &str) -> RepoResult<RecordId> {
        id.parse()
            .map_err(|_| RepoError::Validation(format!("Invalid ID: {}", id)))
    }

    /// All tables of one tenant, by number
    pub async fn find_all(&self, account: &AccountId) -> RepoResult<Vec<DiningTable>> {
        let tables: Vec<DiningTable> = self
            .base
            .db()
            .query("SELECT * FROM dining_table WHERE account = $account ORDER BY number")
            .bind(("account", account.clone()))
            .await?
            .take(0)?;
        Ok(tables)
    }

    /// Find one table, scoped to the tenant
    pub async fn find_by_id(
        &self,
        account: &AccountId,
        id: &str,
    ) -> RepoResult<Option<DiningTable>> {
        let thing = Self::parse_id(id)?;
        let table: Option<DiningTable> = self.base.db().select(thing).await?;
        Ok(table.filter(|t| t.account == *account))
    }

    /// Find by tenant and table number
    pub async fn find_by_number(
        &self,
        account: &AccountId,
        number: i32,
    ) -> RepoResult<Option<DiningTable>> {
        let mut result = self
            .base
            .db()
            .query("SELECT * FROM dining_table WHERE account = $account AND number = $number LIMIT 1")
            .bind(("account", account.clone()))
            .bind(("number", number))
            .await?;
        let tables: Vec<DiningTable> = result.take(0)?;
        Ok(tables.into_iter().next())
    }

    /// Create a table with its pre-rendered QR target and image path
    pub async fn create(
        &self,
        account: &AccountId,
        number: i32,
        capacity: i32,
        qr_url: String,
        qr_image: String,
    ) -> RepoResult<DiningTable> {
        if self.find_by_number(account, number).await?.is_some() {
            return Err(RepoError::Duplicate(format!(
                "Table {} already exists",
                number
            )));
        }

        let mut result = self
            .base
            .db()
            .query(
                r#"CREATE dining_table SET
                    account = $account,
                    number = $number,
                    capacity = $capacity,
                    qr_url = $qr_url,
                    qr_image = $qr_image,
                    created_at = $now
                RETURN AFTER"#,
            )
            .bind(("account", account.clone()))
            .bind(("number", number))
            .bind(("capacity", capacity))
            .bind(("qr_url", qr_url))
            .bind(("qr_image", qr_image))
            .bind(("now", time::now_millis()))
            .await?;

        let created: Option<DiningTable> = result.take(0)?;
        created.ok_or_else(|| RepoError::Database("Failed to create table".to_string()))
    }

    /// Update table capacity (the QR code is not regenerated)
    pub async fn update_capacity(
        &self,
        account: &AccountId,
        id: &str,
        capacity: i32,
    ) -> RepoResult<DiningTable> {
        let thing = Self::parse_id(id)?;
        self.find_by_id(account, id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Table {} not found", id)))?;

        let mut result = self
            .base
            .db()
            .query("UPDATE $thing SET capacity = $capacity RETURN AFTER")
            .bind(("thing", thing))
            .bind(("capacity", capacity))
            .await?;

        result
            .take::<Option<DiningTable>>(0)?
            .ok_or_else(|| RepoError::NotFound(format!("Table {} not found", id)))
    }

    /// Delete a table
    pub async fn delete(&self, account: &AccountId, id: &str) -> RepoResult<bool> {
        let thing = Self::parse_id(id)?;
        self.find_by_id(account, id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Table {} not found", id)))?;
        self.base
            .db()
            .query("DELETE $thing")
            .bind(("thing", thing))
            .await?;
        Ok(true)
    }
}
