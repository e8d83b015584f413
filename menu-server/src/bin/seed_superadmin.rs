//! One-shot bootstrap of the superadmin account.
//!
//! ```text
//! SUPERADMIN_EMAIL=admin@example.com SUPERADMIN_PASSWORD=... cargo run --bin seed_superadmin
//! ```
//!
//! Refuses to run when a superadmin already exists.

use anyhow::{Context, bail};
use menu_server::Config;
use menu_server::db::DbService;
use menu_server::db::repository::AccountRepository;
use menu_server::setup_environment;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    setup_environment().map_err(|e| anyhow::anyhow!("{e}"))?;

    let email =
        std::env::var("SUPERADMIN_EMAIL").context("SUPERADMIN_EMAIL must be set")?;
    let password =
        std::env::var("SUPERADMIN_PASSWORD").context("SUPERADMIN_PASSWORD must be set")?;
    if password.len() < 8 {
        bail!("SUPERADMIN_PASSWORD must be at least 8 characters");
    }

    let config = Config::from_env();
    config.ensure_work_dir_structure()?;

    let db_path = config.database_dir().join("menu.db");
    let db = DbService::new(&db_path.to_string_lossy()).await?;
    let accounts = AccountRepository::new(db.db.clone());

    if accounts.superadmin_exists().await? {
        tracing::warn!("A superadmin account already exists, nothing to do");
        return Ok(());
    }

    let account = accounts.create_superadmin(&email, &password).await?;
    tracing::info!(
        email = %account.email,
        id = %account.id.map(|t| t.to_string()).unwrap_or_default(),
        "Superadmin account created"
    );

    Ok(())
}
