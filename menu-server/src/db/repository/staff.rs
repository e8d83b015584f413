//! Staff Repository

use super::{BaseRepository, RepoError, RepoResult};
use crate::db::models::{AccountId, Staff, StaffCreate, StaffUpdate};
use crate::utils::time;
use surrealdb::engine::local::Db;
use surrealdb::{RecordId, Surreal};

#[derive(Clone)]
pub struct StaffRepository {
    base: BaseRepository,
}

impl StaffRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    fn parse_id(id: &str) -> RepoResult<RecordId> {
        id.parse()
            .map_err(|_| RepoError::Validation(format!("Invalid ID: {}", id)))
    }

    /// All staff of one tenant
    pub async fn find_all(&self, account: &AccountId) -> RepoResult<Vec<Staff>> {
        let staff: Vec<Staff> = self
            .base
            .db()
            .query("SELECT * FROM staff WHERE account = $account ORDER BY name")
            .bind(("account", account.clone()))
            .await?
            .take(0)?;
        Ok(staff)
    }

    /// Find one staff member, scoped to the tenant
    pub async fn find_by_id(&self, account: &AccountId, id: &str) -> RepoResult<Option<Staff>> {
        let thing = Self::parse_id(id)?;
        let staff: Option<Staff> = self.base.db().select(thing).await?;
        Ok(staff.filter(|s| s.account == *account))
    }

    /// Create a staff member
    pub async fn create(&self, account: &AccountId, data: StaffCreate) -> RepoResult<Staff> {
        let mut result = self
            .base
            .db()
            .query(
                r#"CREATE staff SET
                    account = $account,
                    name = $name,
                    position = $position,
                    phone = $phone,
                    email = $email,
                    salary = $salary,
                    is_active = true,
                    created_at = $now
                RETURN AFTER"#,
            )
            .bind(("account", account.clone()))
            .bind(("name", data.name))
            .bind(("position", data.position))
            .bind(("phone", data.phone))
            .bind(("email", data.email))
            .bind(("salary", data.salary))
            .bind(("now", time::now_millis()))
            .await?;

        let created: Option<Staff> = result.take(0)?;
        created.ok_or_else(|| RepoError::Database("Failed to create staff member".to_string()))
    }

    /// Update a staff member
    pub async fn update(
        &self,
        account: &AccountId,
        id: &str,
        data: StaffUpdate,
    ) -> RepoResult<Staff> {
        let thing = Self::parse_id(id)?;
        self.find_by_id(account, id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Staff {} not found", id)))?;

        let mut result = self
            .base
            .db()
            .query(
                r#"UPDATE $thing SET
                    name = $name OR name,
                    position = $position OR position,
                    phone = IF $has_phone THEN $phone ELSE phone END,
                    email = IF $has_email THEN $email ELSE email END,
                    salary = IF $has_salary THEN $salary ELSE salary END,
                    is_active = IF $has_is_active THEN $is_active ELSE is_active END
                RETURN AFTER"#,
            )
            .bind(("thing", thing))
            .bind(("name", data.name))
            .bind(("position", data.position))
            .bind(("has_phone", data.phone.is_some()))
            .bind(("phone", data.phone))
            .bind(("has_email", data.email.is_some()))
            .bind(("email", data.email))
            .bind(("has_salary", data.salary.is_some()))
            .bind(("salary", data.salary))
            .bind(("has_is_active", data.is_active.is_some()))
            .bind(("is_active", data.is_active))
            .await?;

        result
            .take::<Option<Staff>>(0)?
            .ok_or_else(|| RepoError::NotFound(format!("Staff {} not found", id)))
    }

    /// Delete a staff member
    pub async fn delete(&self, account: &AccountId, id: &str) -> RepoResult<bool> {
        let thing = Self::parse_id(id)?;
        self.find_by_id(account, id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Staff {} not found", id)))?;
        self.base
            .db()
            .query("DELETE $thing")
            .bind(("thing", thing))
            .await?;
        Ok(true)
    }
}
