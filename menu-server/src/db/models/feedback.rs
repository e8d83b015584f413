//! Feedback Model

use super::serde_helpers;
use super::AccountId;
use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

/// Customer feedback (tenant-scoped, submitted from the public landing page)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Feedback {
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub id: Option<RecordId>,
    #[serde(with = "serde_helpers::record_id")]
    pub account: AccountId,
    pub customer_name: String,
    #[serde(default)]
    pub email: Option<String>,
    /// 1..=5
    pub rating: i32,
    #[serde(default)]
    pub comment: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub created_at: i64,
}

/// Submit feedback payload
#[derive(Debug, Clone, Serialize, Deserialize, validator::Validate)]
pub struct FeedbackCreate {
    #[validate(length(min = 1))]
    pub customer_name: String,
    #[validate(email)]
    pub email: Option<String>,
    #[validate(range(min = 1, max = 5))]
    pub rating: i32,
    pub comment: Option<String>,
    pub image: Option<String>,
}
