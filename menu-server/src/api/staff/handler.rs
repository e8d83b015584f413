//! Staff API Handlers

use axum::{
    Extension, Json,
    extract::{Path, State},
};
use validator::Validate;

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::models::{Staff, StaffCreate, StaffUpdate};
use crate::utils::{AppError, AppResult};

/// GET /api/staff
pub async fn list(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
) -> AppResult<Json<Vec<Staff>>> {
    let tenant = user.tenant_id()?;
    let staff = state.staff().find_all(tenant).await.map_err(AppError::from)?;
    Ok(Json(staff))
}

/// GET /api/staff/:id
pub async fn get_by_id(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<String>,
) -> AppResult<Json<Staff>> {
    let tenant = user.tenant_id()?;
    let member = state
        .staff()
        .find_by_id(tenant, &id)
        .await
        .map_err(AppError::from)?
        .ok_or_else(|| AppError::not_found(format!("Staff {}", id)))?;
    Ok(Json(member))
}

/// POST /api/staff
pub async fn create(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
    Json(payload): Json<StaffCreate>,
) -> AppResult<Json<Staff>> {
    payload
        .validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let tenant = user.tenant_id()?;
    let member = state
        .staff()
        .create(tenant, payload)
        .await
        .map_err(AppError::from)?;
    Ok(Json(member))
}

/// PUT /api/staff/:id
pub async fn update(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<String>,
    Json(payload): Json<StaffUpdate>,
) -> AppResult<Json<Staff>> {
    let tenant = user.tenant_id()?;
    let member = state
        .staff()
        .update(tenant, &id, payload)
        .await
        .map_err(AppError::from)?;
    Ok(Json(member))
}

/// DELETE /api/staff/:id
pub async fn delete(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<String>,
) -> AppResult<Json<bool>> {
    let tenant = user.tenant_id()?;
    state
        .staff()
        .delete(tenant, &id)
        .await
        .map_err(AppError::from)?;
    Ok(Json(true))
}
