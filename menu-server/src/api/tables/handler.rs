//! Table API Handlers
//!
//! Creating a table renders its QR code once and stores the image under
//! the public static dir; updates never regenerate it.

use axum::{
    Extension, Json,
    extract::{Path, State},
};
use validator::Validate;

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::models::{DiningTable, DiningTableCreate, DiningTableUpdate};
use crate::utils::{AppError, AppResult, qr};
use shared::error::ErrorCode;

/// GET /api/tables
pub async fn list(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
) -> AppResult<Json<Vec<DiningTable>>> {
    let tenant = user.tenant_id()?;
    let tables = state
        .tables()
        .find_all(tenant)
        .await
        .map_err(AppError::from)?;
    Ok(Json(tables))
}

/// GET /api/tables/:id
pub async fn get_by_id(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<String>,
) -> AppResult<Json<DiningTable>> {
    let tenant = user.tenant_id()?;
    let table = state
        .tables()
        .find_by_id(tenant, &id)
        .await
        .map_err(AppError::from)?
        .ok_or_else(|| AppError::new(ErrorCode::TableNotFound))?;
    Ok(Json(table))
}

/// POST /api/tables - create a table and render its QR code
pub async fn create(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
    Json(payload): Json<DiningTableCreate>,
) -> AppResult<Json<DiningTable>> {
    payload
        .validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let tenant = user.tenant_id()?;

    let qr_url = format!(
        "{}?table={}",
        state.config.public_menu_url(&user.slug),
        payload.number
    );
    let png = qr::render_png(&qr_url)?;

    let filename = format!("{}-table-{}.png", user.slug, payload.number);
    let path = state.config.qr_dir().join(&filename);
    std::fs::write(&path, png).map_err(|e| {
        AppError::with_message(
            ErrorCode::FileStorageFailed,
            format!("Failed to store QR image: {e}"),
        )
    })?;

    let table = state
        .tables()
        .create(
            tenant,
            payload.number,
            payload.capacity.unwrap_or(2),
            qr_url,
            format!("/qr/{}", filename),
        )
        .await
        .map_err(AppError::from)?;
    Ok(Json(table))
}

/// PUT /api/tables/:id - update capacity only
pub async fn update(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<String>,
    Json(payload): Json<DiningTableUpdate>,
) -> AppResult<Json<DiningTable>> {
    let tenant = user.tenant_id()?;
    let capacity = payload
        .capacity
        .ok_or_else(|| AppError::validation("Nothing to update"))?;
    let table = state
        .tables()
        .update_capacity(tenant, &id, capacity)
        .await
        .map_err(AppError::from)?;
    Ok(Json(table))
}

/// DELETE /api/tables/:id
pub async fn delete(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<String>,
) -> AppResult<Json<bool>> {
    let tenant = user.tenant_id()?;
    state
        .tables()
        .delete(tenant, &id)
        .await
        .map_err(AppError::from)?;
    Ok(Json(true))
}
