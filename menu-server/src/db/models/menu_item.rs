//! Menu Item Model
//!
//! All tenants share one `menu_item` table. Every record carries the owning
//! account reference (queries filter on it) plus the derived scope key of
//! the restaurant name at creation time.

use super::serde_helpers;
use super::AccountId;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

/// Menu category (closed enum)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MenuCategory {
    Starter,
    Main,
    Dessert,
    Beverage,
    Side,
    Special,
}

/// Sub-item of a combo menu item
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComboItem {
    pub name: String,
    pub quantity: i32,
}

/// Menu item entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MenuItem {
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub id: Option<RecordId>,
    #[serde(with = "serde_helpers::record_id")]
    pub account: AccountId,
    /// Scope key derived from the restaurant name ("menu_joe_s_cafe")
    pub scope: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub price: Decimal,
    pub category: MenuCategory,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(
        default = "default_true",
        deserialize_with = "serde_helpers::bool_true"
    )]
    pub is_available: bool,
    #[serde(default, deserialize_with = "serde_helpers::bool_false")]
    pub is_veg: bool,
    #[serde(default, deserialize_with = "serde_helpers::bool_false")]
    pub is_combo: bool,
    #[serde(default)]
    pub combo_items: Vec<ComboItem>,
    #[serde(default)]
    pub created_at: i64,
}

fn default_true() -> bool {
    true
}

/// Create menu item payload
#[derive(Debug, Clone, Serialize, Deserialize, validator::Validate)]
pub struct MenuItemCreate {
    #[validate(length(min = 1))]
    pub name: String,
    pub description: Option<String>,
    pub price: Decimal,
    pub category: MenuCategory,
    pub image: Option<String>,
    pub is_available: Option<bool>,
    pub is_veg: Option<bool>,
    pub is_combo: Option<bool>,
    pub combo_items: Option<Vec<ComboItem>>,
}

/// Update menu item payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MenuItemUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<MenuCategory>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_available: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_veg: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_combo: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub combo_items: Option<Vec<ComboItem>>,
}
