//! Shared types for the menu platform
//!
//! Error codes, the application error type and the unified API response
//! envelope used by the server and any future client crates.

pub mod error;

// Re-exports
pub use error::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode};
