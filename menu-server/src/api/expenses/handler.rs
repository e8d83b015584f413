//! Expense API Handlers

use axum::{
    Extension, Json,
    extract::{Path, State},
};
use validator::Validate;

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::models::{Expense, ExpenseCreate, ExpenseUpdate};
use crate::utils::{AppError, AppResult};

/// GET /api/expenses
pub async fn list(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
) -> AppResult<Json<Vec<Expense>>> {
    let tenant = user.tenant_id()?;
    let expenses = state
        .expenses()
        .find_all(tenant)
        .await
        .map_err(AppError::from)?;
    Ok(Json(expenses))
}

/// GET /api/expenses/:id
pub async fn get_by_id(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<String>,
) -> AppResult<Json<Expense>> {
    let tenant = user.tenant_id()?;
    let expense = state
        .expenses()
        .find_by_id(tenant, &id)
        .await
        .map_err(AppError::from)?
        .ok_or_else(|| AppError::not_found(format!("Expense {}", id)))?;
    Ok(Json(expense))
}

/// POST /api/expenses
pub async fn create(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
    Json(payload): Json<ExpenseCreate>,
) -> AppResult<Json<Expense>> {
    payload
        .validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let tenant = user.tenant_id()?;
    let expense = state
        .expenses()
        .create(tenant, payload)
        .await
        .map_err(AppError::from)?;
    Ok(Json(expense))
}

/// PUT /api/expenses/:id
pub async fn update(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<String>,
    Json(payload): Json<ExpenseUpdate>,
) -> AppResult<Json<Expense>> {
    let tenant = user.tenant_id()?;
    let expense = state
        .expenses()
        .update(tenant, &id, payload)
        .await
        .map_err(AppError::from)?;
    Ok(Json(expense))
}

/// DELETE /api/expenses/:id
pub async fn delete(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<String>,
) -> AppResult<Json<bool>> {
    let tenant = user.tenant_id()?;
    state
        .expenses()
        .delete(tenant, &id)
        .await
        .map_err(AppError::from)?;
    Ok(Json(true))
}
