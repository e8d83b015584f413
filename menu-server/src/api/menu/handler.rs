//! Menu API Handlers

use axum::{
    Extension, Json,
    extract::{Path, State},
};
use validator::Validate;

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::models::{MenuItem, MenuItemCreate, MenuItemUpdate};
use crate::utils::{AppError, AppResult};

/// GET /api/menu - all items of the caller's restaurant
pub async fn list(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
) -> AppResult<Json<Vec<MenuItem>>> {
    let tenant = user.tenant_id()?;
    let items = state.menu().find_all(tenant).await.map_err(AppError::from)?;
    Ok(Json(items))
}

/// GET /api/menu/:id
pub async fn get_by_id(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<String>,
) -> AppResult<Json<MenuItem>> {
    let tenant = user.tenant_id()?;
    let item = state
        .menu()
        .find_by_id(tenant, &id)
        .await
        .map_err(AppError::from)?
        .ok_or_else(|| AppError::not_found(format!("Menu item {}", id)))?;
    Ok(Json(item))
}

/// POST /api/menu - create an item in the restaurant's scope
pub async fn create(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
    Json(payload): Json<MenuItemCreate>,
) -> AppResult<Json<MenuItem>> {
    payload
        .validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let tenant = user.tenant_id()?;
    let scope = state.menu_registry.scope_for(&user.restaurant_name);
    let item = state
        .menu()
        .create(tenant, &scope, payload)
        .await
        .map_err(AppError::from)?;
    Ok(Json(item))
}

/// PUT /api/menu/:id
pub async fn update(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<String>,
    Json(payload): Json<MenuItemUpdate>,
) -> AppResult<Json<MenuItem>> {
    let tenant = user.tenant_id()?;
    let item = state
        .menu()
        .update(tenant, &id, payload)
        .await
        .map_err(AppError::from)?;
    Ok(Json(item))
}

/// DELETE /api/menu/:id
pub async fn delete(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<String>,
) -> AppResult<Json<bool>> {
    let tenant = user.tenant_id()?;
    state
        .menu()
        .delete(tenant, &id)
        .await
        .map_err(AppError::from)?;
    Ok(Json(true))
}
