//! Repository Module
//!
//! Provides CRUD operations for the SurrealDB tables.

// Accounts & billing
pub mod account;

// Menu
pub mod menu;

// Operational entities
pub mod customer;
pub mod dining_table;
pub mod expense;
pub mod feedback;
pub mod order;
pub mod staff;

// Reporting
pub mod report;

// Re-exports
pub use account::AccountRepository;
pub use customer::CustomerRepository;
pub use dining_table::DiningTableRepository;
pub use expense::ExpenseRepository;
pub use feedback::FeedbackRepository;
pub use menu::{MenuRegistry, MenuRepository, MenuScope};
pub use order::OrderRepository;
pub use report::{ProfitReport, ReportPeriod, ReportRepository, TimelineBucket, build_timeline};
pub use staff::StaffRepository;

use shared::error::{AppError, ErrorCode};
use surrealdb::engine::local::Db;
use surrealdb::Surreal;
use thiserror::Error;

/// Repository error types
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Duplicate: {0}")]
    Duplicate(String),

    #[error("Ambiguous: {0}")]
    Ambiguous(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Validation error: {0}")]
    Validation(String),
}

impl From<surrealdb::Error> for RepoError {
    fn from(err: surrealdb::Error) -> Self {
        RepoError::Database(err.to_string())
    }
}

impl From<RepoError> for AppError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::NotFound(msg) => AppError::with_message(ErrorCode::NotFound, msg),
            RepoError::Duplicate(msg) => AppError::with_message(ErrorCode::AlreadyExists, msg),
            RepoError::Ambiguous(msg) => AppError::with_message(ErrorCode::SlugAmbiguous, msg),
            RepoError::Validation(msg) => AppError::with_message(ErrorCode::ValidationFailed, msg),
            RepoError::Database(msg) => AppError::database(msg),
        }
    }
}

/// Result type for repository operations
pub type RepoResult<T> = Result<T, RepoError>;

// =============================================================================
// ID Convention: "table:id" strings across the whole stack
// =============================================================================
//
// surrealdb::RecordId handles all IDs:
//   - parse: let id: RecordId = "account:abc".parse()?;
//   - table name: id.table()
//   - bare key: id.key().to_string()
//   - CRUD: db.select(id) / db.delete(id) take RecordId directly

/// Base repository with database reference
#[derive(Clone)]
pub struct BaseRepository {
    db: Surreal<Db>,
}

impl BaseRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self { db }
    }

    pub fn db(&self) -> &Surreal<Db> {
        &self.db
    }
}
