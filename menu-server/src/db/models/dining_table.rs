//! Dining Table Model
//!
//! The table number is unique per tenant (compound index). The QR target
//! URL and image are embedded at creation time and not regenerated on
//! update.

use super::serde_helpers;
use super::AccountId;
use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

/// Dining table entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiningTable {
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub id: Option<RecordId>,
    #[serde(with = "serde_helpers::record_id")]
    pub account: AccountId,
    pub number: i32,
    #[serde(default)]
    pub capacity: i32,
    /// Public URL the QR code points at
    pub qr_url: String,
    /// Path of the rendered QR PNG under the public static dir
    pub qr_image: String,
    #[serde(default)]
    pub created_at: i64,
}

/// Create dining table payload
#[derive(Debug, Clone, Serialize, Deserialize, validator::Validate)]
pub struct DiningTableCreate {
    #[validate(range(min = 1))]
    pub number: i32,
    pub capacity: Option<i32>,
}

/// Update dining table payload
///
/// The number is immutable: the QR code embedded at creation encodes it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiningTableUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub capacity: Option<i32>,
}
