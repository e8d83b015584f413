//! Menu Server - multi-tenant QR menu and ordering platform
//!
//! # Architecture overview
//!
//! - **Database** (`db`): embedded SurrealDB storage, models and repositories
//! - **Auth** (`auth`): JWT + Argon2, per-request subscription gating
//! - **Billing** (`billing`): payment cycle lock and the daily due-date sweep
//! - **Notifications** (`notify`): email outbox with retrying worker
//! - **Realtime** (`realtime`): socket.io push for order events
//! - **HTTP API** (`api`): RESTful interface for dashboards and QR clients
//!
//! # Module structure
//!
//! ```text
//! menu-server/src/
//! ├── core/          # config, state, server
//! ├── auth/          # JWT auth, subscription gate
//! ├── api/           # HTTP routes and handlers
//! ├── billing/       # cycle lock, daily sweep
//! ├── notify/        # mail templates, outbox
//! ├── realtime/      # socket.io push
//! ├── db/            # database layer
//! └── utils/         # slug, time, qr, logging
//! ```

pub mod api;
pub mod auth;
pub mod billing;
pub mod core;
pub mod db;
pub mod notify;
pub mod realtime;
pub mod utils;

// Re-export common types
pub use auth::{CurrentUser, JwtService};
pub use core::{Config, Server, ServerState, build_app, build_router};
pub use utils::{AppError, AppResult};

// Re-export logger functions
pub use utils::logger::{init_logger, init_logger_with_file};

/// Load .env and initialize logging
pub fn setup_environment() -> Result<(), Box<dyn std::error::Error>> {
    dotenv::dotenv().ok();

    let log_level = std::env::var("LOG_LEVEL").ok();
    let log_dir = std::env::var("LOG_DIR").ok();
    utils::logger::init_logger_with_file(log_level.as_deref(), log_dir.as_deref());

    Ok(())
}

pub fn print_banner() {
    println!(
        r#"
    __  ___
   /  |/  /__  ____  __  __
  / /|_/ / _ \/ __ \/ / / /
 / /  / /  __/ / / / /_/ /
/_/  /_/\___/_/ /_/\__,_/
   _____
  / ___/___  ______   _____  _____
  \__ \/ _ \/ ___/ | / / _ \/ ___/
 ___/ /  __/ /   | |/ /  __/ /
/____/\___/_/    |___/\___/_/
    "#
    );
}
