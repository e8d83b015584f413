//! Report API Handlers

use axum::{
    Extension, Json,
    extract::{Query, State},
};
use serde::Deserialize;

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::repository::{ProfitReport, ReportPeriod};
use crate::utils::{AppError, AppResult, time};

#[derive(Debug, Deserialize)]
pub struct ReportQuery {
    pub period: ReportPeriod,
}

/// GET /api/reports?period=weekly|monthly|yearly
///
/// Recomputed from raw orders and expenses on every request; the timeline
/// never reaches back before the account was created.
pub async fn profit_report(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
    Query(query): Query<ReportQuery>,
) -> AppResult<Json<ProfitReport>> {
    let tenant_id = user.tenant_id()?;
    let tenant = state
        .accounts()
        .find_by_record_id(tenant_id)
        .await
        .map_err(AppError::from)?
        .ok_or_else(|| AppError::not_found("Account"))?;

    let report = state
        .reports()
        .profit_report(&tenant, query.period, time::now_millis())
        .await
        .map_err(AppError::from)?;
    Ok(Json(report))
}
