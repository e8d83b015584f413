//! Database Module
//!
//! Embedded SurrealDB storage. The store enforces the uniqueness
//! invariants (account email, account slug, table number per tenant)
//! through indexes defined once at startup.

pub mod models;
pub mod repository;

use shared::error::AppError;
use surrealdb::engine::local::{Db, RocksDb};
use surrealdb::Surreal;

/// Database service — owns the embedded SurrealDB handle
#[derive(Clone)]
pub struct DbService {
    pub db: Surreal<Db>,
}

impl DbService {
    /// Open (or create) the embedded database at `db_path`
    pub async fn new(db_path: &str) -> Result<Self, AppError> {
        let db = Surreal::new::<RocksDb>(db_path)
            .await
            .map_err(|e| AppError::database(format!("Failed to open database: {e}")))?;
        Self::with_db(db).await
    }

    /// Wrap an already-connected local engine (tests use the in-memory engine)
    pub async fn with_db(db: Surreal<Db>) -> Result<Self, AppError> {
        db.use_ns("menu")
            .use_db("menu")
            .await
            .map_err(|e| AppError::database(format!("Failed to select namespace: {e}")))?;

        let service = Self { db };
        service.ensure_schema().await?;
        tracing::info!("Database ready (embedded SurrealDB)");
        Ok(service)
    }

    /// Define the indexes backing the store-enforced invariants.
    ///
    /// Idempotent: safe to run on every startup.
    async fn ensure_schema(&self) -> Result<(), AppError> {
        self.db
            .query(
                r#"
                DEFINE INDEX IF NOT EXISTS uniq_account_email ON TABLE account FIELDS email UNIQUE;
                DEFINE INDEX IF NOT EXISTS uniq_account_slug ON TABLE account FIELDS slug UNIQUE;
                DEFINE INDEX IF NOT EXISTS uniq_table_number ON TABLE dining_table FIELDS account, number UNIQUE;
                DEFINE INDEX IF NOT EXISTS idx_menu_item_account ON TABLE menu_item FIELDS account;
                DEFINE INDEX IF NOT EXISTS idx_menu_item_scope ON TABLE menu_item FIELDS scope;
                DEFINE INDEX IF NOT EXISTS idx_order_account ON TABLE order FIELDS account;
                DEFINE INDEX IF NOT EXISTS idx_expense_account ON TABLE expense FIELDS account;
                "#,
            )
            .await
            .map_err(|e| AppError::database(format!("Failed to define schema: {e}")))?
            .check()
            .map_err(|e| AppError::database(format!("Schema definition rejected: {e}")))?;
        Ok(())
    }
}
