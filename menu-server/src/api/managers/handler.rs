//! Manager Account Handlers
//!
//! Owners add manager accounts for their restaurant. The manager account
//! and any staff record are independent writes; there is no cross-document
//! transaction tying them together.

use axum::{
    Extension, Json,
    extract::{Path, State},
};
use validator::Validate;

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::models::{Account, ManagerCreate, Role};
use crate::notify::templates;
use crate::utils::{AppError, AppResult};
use shared::error::ErrorCode;

fn require_owner(user: &CurrentUser) -> Result<(), AppError> {
    if user.role != Role::Owner {
        return Err(AppError::forbidden(
            "Only the restaurant owner can manage manager accounts",
        ));
    }
    Ok(())
}

/// GET /api/managers - manager accounts of the caller's restaurant
pub async fn list(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
) -> AppResult<Json<Vec<Account>>> {
    require_owner(&user)?;
    let tenant = user.tenant_id()?;
    let managers = state
        .accounts()
        .find_managers(tenant)
        .await
        .map_err(AppError::from)?;
    Ok(Json(managers))
}

/// POST /api/managers - add a manager account
pub async fn create(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
    Json(payload): Json<ManagerCreate>,
) -> AppResult<Json<Account>> {
    require_owner(&user)?;
    payload
        .validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let owner = state
        .accounts()
        .find_by_id(&user.id)
        .await
        .map_err(AppError::from)?
        .ok_or_else(|| AppError::not_found("Account"))?;

    let password = payload.password.clone();
    let hash_pass = Account::hash_password(&password)
        .map_err(|e| AppError::internal(format!("Failed to hash password: {}", e)))?;

    let manager = state
        .accounts()
        .create_manager(&owner, payload, hash_pass)
        .await
        .map_err(AppError::from)?;

    state.outbox().enqueue(templates::manager_welcome(
        &manager,
        &password,
        &state.config.client_base_url,
    ));

    Ok(Json(manager))
}

/// DELETE /api/managers/:id - remove a manager of this restaurant
pub async fn delete(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<String>,
) -> AppResult<Json<bool>> {
    require_owner(&user)?;
    let tenant = user.tenant_id()?;

    let manager = state
        .accounts()
        .find_by_id(&id)
        .await
        .map_err(AppError::from)?
        .filter(|a| a.role == Role::Manager && a.owner.as_ref() == Some(tenant))
        .ok_or_else(|| AppError::new(ErrorCode::ManagerNotFound))?;

    state
        .accounts()
        .delete(&id)
        .await
        .map_err(AppError::from)?;

    tracing::info!(
        target: "audit",
        manager = %manager.email,
        restaurant = %user.restaurant_name,
        "Manager account removed"
    );
    Ok(Json(true))
}
