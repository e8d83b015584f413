//! Menu Repository and scope registry
//!
//! Menu items for every tenant live in one `menu_item` table; queries
//! filter on the owning account so renaming a restaurant never orphans its
//! menu. The scope registry keeps the per-tenant collection contract:
//! a deterministic key derived from the restaurant name, with one memoized
//! handle per key for the process lifetime.

use super::{BaseRepository, RepoError, RepoResult};
use crate::db::models::{AccountId, MenuItem, MenuItemCreate, MenuItemUpdate};
use crate::utils::{slug, time};
use dashmap::DashMap;
use rust_decimal::Decimal;
use std::sync::Arc;
use surrealdb::engine::local::Db;
use surrealdb::{RecordId, Surreal};

/// Handle for one tenant's menu scope
///
/// Identity is the derived key: names that normalize to the same key share
/// a handle, distinct keys never see each other's items.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuScope {
    key: String,
}

impl MenuScope {
    pub fn key(&self) -> &str {
        &self.key
    }
}

/// Process-lifetime registry of menu scope handles
///
/// Explicit and injectable (held on ServerState) so tests can reset it
/// between cases. Entries are memoized per derived key; the map only grows
/// by one entry per distinct key, so no further synchronization is needed
/// beyond the concurrent map itself.
#[derive(Debug, Default)]
pub struct MenuRegistry {
    scopes: DashMap<String, Arc<MenuScope>>,
}

impl MenuRegistry {
    pub fn new() -> Self {
        Self {
            scopes: DashMap::new(),
        }
    }

    /// Derive the scope key for `restaurant_name` and return the memoized
    /// handle, creating it on first use.
    pub fn scope_for(&self, restaurant_name: &str) -> Arc<MenuScope> {
        let key = slug::collection_key(restaurant_name);
        self.scopes
            .entry(key.clone())
            .or_insert_with(|| Arc::new(MenuScope { key }))
            .clone()
    }

    /// Number of distinct scopes seen by this process
    pub fn len(&self) -> usize {
        self.scopes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scopes.is_empty()
    }

    /// Drop all memoized handles (tests)
    pub fn reset(&self) {
        self.scopes.clear();
    }
}

#[derive(Clone)]
pub struct MenuRepository {
    base: BaseRepository,
}

impl MenuRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    fn parse_id(id: &str) -> RepoResult<RecordId> {
        id.parse()
            .map_err(|_| RepoError::Validation(format!("Invalid ID: {}", id)))
    }

    /// All items of one tenant
    pub async fn find_all(&self, account: &AccountId) -> RepoResult<Vec<MenuItem>> {
        let items: Vec<MenuItem> = self
            .base
            .db()
            .query("SELECT * FROM menu_item WHERE account = $account ORDER BY category, name")
            .bind(("account", account.clone()))
            .await?
            .take(0)?;
        Ok(items)
    }

    /// Available items of one tenant (public menu)
    pub async fn find_available(&self, account: &AccountId) -> RepoResult<Vec<MenuItem>> {
        let items: Vec<MenuItem> = self
            .base
            .db()
            .query(
                "SELECT * FROM menu_item WHERE account = $account AND is_available = true ORDER BY category, name",
            )
            .bind(("account", account.clone()))
            .await?
            .take(0)?;
        Ok(items)
    }

    /// Find one item, scoped to the tenant (cross-tenant ids resolve to None)
    pub async fn find_by_id(
        &self,
        account: &AccountId,
        id: &str,
    ) -> RepoResult<Option<MenuItem>> {
        let thing = Self::parse_id(id)?;
        let item: Option<MenuItem> = self.base.db().select(thing).await?;
        Ok(item.filter(|i| i.account == *account))
    }

    /// Create a menu item in the tenant's scope
    pub async fn create(
        &self,
        account: &AccountId,
        scope: &MenuScope,
        data: MenuItemCreate,
    ) -> RepoResult<MenuItem> {
        if data.price <= Decimal::ZERO {
            return Err(RepoError::Validation(
                "Price must be greater than zero".to_string(),
            ));
        }
        let mut result = self
            .base
            .db()
            .query(
                r#"CREATE menu_item SET
                    account = $account,
                    scope = $scope,
                    name = $name,
                    description = $description,
                    price = $price,
                    category = $category,
                    image = $image,
                    is_available = $is_available,
                    is_veg = $is_veg,
                    is_combo = $is_combo,
                    combo_items = $combo_items,
                    created_at = $now
                RETURN AFTER"#,
            )
            .bind(("account", account.clone()))
            .bind(("scope", scope.key().to_string()))
            .bind(("name", data.name))
            .bind(("description", data.description))
            .bind(("price", data.price))
            .bind(("category", data.category))
            .bind(("image", data.image))
            .bind(("is_available", data.is_available.unwrap_or(true)))
            .bind(("is_veg", data.is_veg.unwrap_or(false)))
            .bind(("is_combo", data.is_combo.unwrap_or(false)))
            .bind(("combo_items", data.combo_items.unwrap_or_default()))
            .bind(("now", time::now_millis()))
            .await?;

        let created: Option<MenuItem> = result.take(0)?;
        created.ok_or_else(|| RepoError::Database("Failed to create menu item".to_string()))
    }

    /// Update a menu item
    pub async fn update(
        &self,
        account: &AccountId,
        id: &str,
        data: MenuItemUpdate,
    ) -> RepoResult<MenuItem> {
        if let Some(price) = data.price
            && price <= Decimal::ZERO
        {
            return Err(RepoError::Validation(
                "Price must be greater than zero".to_string(),
            ));
        }
        let thing = Self::parse_id(id)?;
        self.find_by_id(account, id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Menu item {} not found", id)))?;

        let mut result = self
            .base
            .db()
            .query(
                r#"UPDATE $thing SET
                    name = $name OR name,
                    description = IF $has_description THEN $description ELSE description END,
                    price = $price OR price,
                    category = $category OR category,
                    image = IF $has_image THEN $image ELSE image END,
                    is_available = IF $has_is_available THEN $is_available ELSE is_available END,
                    is_veg = IF $has_is_veg THEN $is_veg ELSE is_veg END,
                    is_combo = IF $has_is_combo THEN $is_combo ELSE is_combo END,
                    combo_items = IF $has_combo_items THEN $combo_items ELSE combo_items END
                RETURN AFTER"#,
            )
            .bind(("thing", thing))
            .bind(("name", data.name))
            .bind(("has_description", data.description.is_some()))
            .bind(("description", data.description))
            .bind(("price", data.price))
            .bind(("category", data.category))
            .bind(("has_image", data.image.is_some()))
            .bind(("image", data.image))
            .bind(("has_is_available", data.is_available.is_some()))
            .bind(("is_available", data.is_available))
            .bind(("has_is_veg", data.is_veg.is_some()))
            .bind(("is_veg", data.is_veg))
            .bind(("has_is_combo", data.is_combo.is_some()))
            .bind(("is_combo", data.is_combo))
            .bind(("has_combo_items", data.combo_items.is_some()))
            .bind(("combo_items", data.combo_items))
            .await?;

        result
            .take::<Option<MenuItem>>(0)?
            .ok_or_else(|| RepoError::NotFound(format!("Menu item {} not found", id)))
    }

    /// Delete a menu item
    pub async fn delete(&self, account: &AccountId, id: &str) -> RepoResult<bool> {
        let thing = Self::parse_id(id)?;
        self.find_by_id(account, id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Menu item {} not found", id)))?;
        self.base
            .db()
            .query("DELETE $thing")
            .bind(("thing", thing))
            .await?;
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_memoizes_equivalent_names() {
        let registry = MenuRegistry::new();
        let a = registry.scope_for("Joe's Café");
        let b = registry.scope_for("Joe's  Cafe!");
        assert!(Arc::ptr_eq(&a, &b), "equivalent names must share a handle");
        assert_eq!(registry.len(), 1);
        assert_eq!(a.key(), "menu_joe_s_cafe");
    }

    #[test]
    fn test_registry_distinct_names_distinct_handles() {
        let registry = MenuRegistry::new();
        let a = registry.scope_for("Spice Route");
        let b = registry.scope_for("Golden Dragon");
        assert!(!Arc::ptr_eq(&a, &b));
        assert_ne!(a.key(), b.key());
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_registry_reset() {
        let registry = MenuRegistry::new();
        let first = registry.scope_for("Spice Route");
        registry.reset();
        assert!(registry.is_empty());
        let second = registry.scope_for("Spice Route");
        // Same derived key, fresh handle after reset
        assert_eq!(first.key(), second.key());
        assert!(!Arc::ptr_eq(&first, &second));
    }
}
