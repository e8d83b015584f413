//! Expense Model

use super::serde_helpers;
use super::AccountId;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

/// Expense category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExpenseCategory {
    Ingredients,
    Salary,
    Rent,
    Utilities,
    Equipment,
    Other,
}

/// Expense ledger entry (tenant-scoped)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Expense {
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub id: Option<RecordId>,
    #[serde(with = "serde_helpers::record_id")]
    pub account: AccountId,
    pub title: String,
    pub amount: Decimal,
    pub category: ExpenseCategory,
    /// When the expense occurred (Unix millis)
    pub date: i64,
    #[serde(default)]
    pub notes: Option<String>,
}

/// Create expense payload
#[derive(Debug, Clone, Serialize, Deserialize, validator::Validate)]
pub struct ExpenseCreate {
    #[validate(length(min = 1))]
    pub title: String,
    pub amount: Decimal,
    pub category: ExpenseCategory,
    pub date: Option<i64>,
    pub notes: Option<String>,
}

/// Update expense payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExpenseUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<ExpenseCategory>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}
