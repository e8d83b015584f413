//! One-shot repair of manager accounts missing their owner back-reference.
//!
//! Managers carry the restaurant display name of their owner; this scans
//! for unlinked managers and re-links them by matching that name against
//! the owner accounts. Managers whose restaurant no longer exists are
//! reported and left untouched.

use menu_server::Config;
use menu_server::db::DbService;
use menu_server::db::repository::AccountRepository;
use menu_server::setup_environment;
use menu_server::utils::slug;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    setup_environment().map_err(|e| anyhow::anyhow!("{e}"))?;

    let config = Config::from_env();
    config.ensure_work_dir_structure()?;

    let db_path = config.database_dir().join("menu.db");
    let db = DbService::new(&db_path.to_string_lossy()).await?;
    let accounts = AccountRepository::new(db.db.clone());

    let unlinked = accounts.find_unlinked_managers().await?;
    if unlinked.is_empty() {
        tracing::info!("No unlinked managers found");
        return Ok(());
    }
    tracing::info!(count = unlinked.len(), "Found unlinked managers");

    let owners = accounts.find_owners().await?;
    let mut repaired = 0usize;
    let mut orphaned = 0usize;

    for manager in &unlinked {
        let manager_id = match &manager.id {
            Some(id) => id.clone(),
            None => continue,
        };
        let key = slug::alnum_key(&manager.restaurant_name);

        let owner = owners
            .iter()
            .find(|o| slug::alnum_key(&o.restaurant_name) == key)
            .and_then(|o| o.id.clone());

        match owner {
            Some(owner_id) => {
                accounts.link_manager(&manager_id, &owner_id).await?;
                tracing::info!(
                    manager = %manager.email,
                    restaurant = %manager.restaurant_name,
                    "Re-linked manager"
                );
                repaired += 1;
            }
            None => {
                tracing::warn!(
                    manager = %manager.email,
                    restaurant = %manager.restaurant_name,
                    "No owner found for manager, skipping"
                );
                orphaned += 1;
            }
        }
    }

    tracing::info!(repaired, orphaned, "Manager repair finished");
    Ok(())
}
