//! Order API Handlers
//!
//! Orders are created on the public path; the dashboard lists them and
//! drives status transitions. Status changes are pushed to the tenant's
//! dashboard room fire-and-forget.

use axum::{
    Extension, Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::models::{Order, OrderPaymentUpdate, OrderStatus, OrderStatusUpdate};
use crate::utils::{AppError, AppResult};

#[derive(Debug, Deserialize)]
pub struct OrderListQuery {
    pub status: Option<OrderStatus>,
}

/// GET /api/orders?status= - tenant orders, newest first
pub async fn list(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
    Query(query): Query<OrderListQuery>,
) -> AppResult<Json<Vec<Order>>> {
    let tenant = user.tenant_id()?;
    let orders = match query.status {
        Some(status) => state.orders().find_by_status(tenant, status).await,
        None => state.orders().find_all(tenant).await,
    }
    .map_err(AppError::from)?;
    Ok(Json(orders))
}

/// GET /api/orders/:id
pub async fn get_by_id(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<String>,
) -> AppResult<Json<Order>> {
    let tenant = user.tenant_id()?;
    let order = state
        .orders()
        .find_by_id(tenant, &id)
        .await
        .map_err(AppError::from)?
        .ok_or_else(|| AppError::not_found(format!("Order {}", id)))?;
    Ok(Json(order))
}

/// PUT /api/orders/:id/status - drive the order through its lifecycle
pub async fn set_status(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<String>,
    Json(payload): Json<OrderStatusUpdate>,
) -> AppResult<Json<Order>> {
    let tenant = user.tenant_id()?;
    let order = state
        .orders()
        .set_status(tenant, &id, payload.status)
        .await
        .map_err(AppError::from)?;

    state
        .realtime
        .publish_order_status(&user.slug, &order)
        .await;

    Ok(Json(order))
}

/// PUT /api/orders/:id/payment - record payment against an order
pub async fn set_payment(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<String>,
    Json(payload): Json<OrderPaymentUpdate>,
) -> AppResult<Json<Order>> {
    let tenant = user.tenant_id()?;
    let order = state
        .orders()
        .set_payment(tenant, &id, payload.payment_status, payload.payment_method)
        .await
        .map_err(AppError::from)?;
    Ok(Json(order))
}
