//! Feedback API Handlers

use axum::{Extension, Json, extract::State};

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::models::Feedback;
use crate::utils::{AppError, AppResult};

/// GET /api/feedback - feedback inbox, newest first
pub async fn list(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
) -> AppResult<Json<Vec<Feedback>>> {
    let tenant = user.tenant_id()?;
    let feedback = state
        .feedback()
        .find_all(tenant)
        .await
        .map_err(AppError::from)?;
    Ok(Json(feedback))
}
