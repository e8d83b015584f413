//! Expense Repository

use super::{BaseRepository, RepoError, RepoResult};
use crate::db::models::{AccountId, Expense, ExpenseCreate, ExpenseUpdate};
use crate::utils::time;
use rust_decimal::Decimal;
use surrealdb::engine::local::Db;
use surrealdb::{RecordId, Surreal};

#[derive(Clone)]
pub struct ExpenseRepository {
    base: BaseRepository,
}

impl ExpenseRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    fn parse_id(id: &str) -> RepoResult<RecordId> {
        id.parse()
            .map_err(|_| RepoError::Validation(format!("Invalid ID: {}", id)))
    }

    /// All expenses of one tenant, newest first
    pub async fn find_all(&self, account: &AccountId) -> RepoResult<Vec<Expense>> {
        let expenses: Vec<Expense> = self
            .base
            .db()
            .query("SELECT * FROM expense WHERE account = $account ORDER BY date DESC")
            .bind(("account", account.clone()))
            .await?
            .take(0)?;
        Ok(expenses)
    }

    /// Find one expense, scoped to the tenant
    pub async fn find_by_id(&self, account: &AccountId, id: &str) -> RepoResult<Option<Expense>> {
        let thing = Self::parse_id(id)?;
        let expense: Option<Expense> = self.base.db().select(thing).await?;
        Ok(expense.filter(|e| e.account == *account))
    }

    /// Create an expense entry
    pub async fn create(&self, account: &AccountId, data: ExpenseCreate) -> RepoResult<Expense> {
        if data.amount <= Decimal::ZERO {
            return Err(RepoError::Validation(
                "Amount must be greater than zero".to_string(),
            ));
        }
        let mut result = self
            .base
            .db()
            .query(
                r#"CREATE expense SET
                    account = $account,
                    title = $title,
                    amount = $amount,
                    category = $category,
                    date = $date,
                    notes = $notes
                RETURN AFTER"#,
            )
            .bind(("account", account.clone()))
            .bind(("title", data.title))
            .bind(("amount", data.amount))
            .bind(("category", data.category))
            .bind(("date", data.date.unwrap_or_else(time::now_millis)))
            .bind(("notes", data.notes))
            .await?;

        let created: Option<Expense> = result.take(0)?;
        created.ok_or_else(|| RepoError::Database("Failed to create expense".to_string()))
    }

    /// Update an expense entry
    pub async fn update(
        &self,
        account: &AccountId,
        id: &str,
        data: ExpenseUpdate,
    ) -> RepoResult<Expense> {
        if let Some(amount) = data.amount
            && amount <= Decimal::ZERO
        {
            return Err(RepoError::Validation(
                "Amount must be greater than zero".to_string(),
            ));
        }
        let thing = Self::parse_id(id)?;
        self.find_by_id(account, id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Expense {} not found", id)))?;

        let mut result = self
            .base
            .db()
            .query(
                r#"UPDATE $thing SET
                    title = $title OR title,
                    amount = $amount OR amount,
                    category = $category OR category,
                    date = $date OR date,
                    notes = IF $has_notes THEN $notes ELSE notes END
                RETURN AFTER"#,
            )
            .bind(("thing", thing))
            .bind(("title", data.title))
            .bind(("amount", data.amount))
            .bind(("category", data.category))
            .bind(("date", data.date))
            .bind(("has_notes", data.notes.is_some()))
            .bind(("notes", data.notes))
            .await?;

        result
            .take::<Option<Expense>>(0)?
            .ok_or_else(|| RepoError::NotFound(format!("Expense {} not found", id)))
    }

    /// Delete an expense entry
    pub async fn delete(&self, account: &AccountId, id: &str) -> RepoResult<bool> {
        let thing = Self::parse_id(id)?;
        self.find_by_id(account, id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Expense {} not found", id)))?;
        self.base
            .db()
            .query("DELETE $thing")
            .bind(("thing", thing))
            .await?;
        Ok(true)
    }
}
