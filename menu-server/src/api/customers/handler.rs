//! Customer API Handlers

use axum::{
    Extension, Json,
    extract::{Path, State},
};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::models::{Customer, CustomerCreate, CustomerUpdate};
use crate::notify::templates;
use crate::utils::{AppError, AppResult};

/// GET /api/customers
pub async fn list(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
) -> AppResult<Json<Vec<Customer>>> {
    let tenant = user.tenant_id()?;
    let customers = state
        .customers()
        .find_all(tenant)
        .await
        .map_err(AppError::from)?;
    Ok(Json(customers))
}

/// GET /api/customers/:id
pub async fn get_by_id(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<String>,
) -> AppResult<Json<Customer>> {
    let tenant = user.tenant_id()?;
    let customer = state
        .customers()
        .find_by_id(tenant, &id)
        .await
        .map_err(AppError::from)?
        .ok_or_else(|| AppError::not_found(format!("Customer {}", id)))?;
    Ok(Json(customer))
}

/// POST /api/customers
pub async fn create(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
    Json(payload): Json<CustomerCreate>,
) -> AppResult<Json<Customer>> {
    payload
        .validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let tenant = user.tenant_id()?;
    let customer = state
        .customers()
        .create(tenant, payload)
        .await
        .map_err(AppError::from)?;
    Ok(Json(customer))
}

/// PUT /api/customers/:id
pub async fn update(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<String>,
    Json(payload): Json<CustomerUpdate>,
) -> AppResult<Json<Customer>> {
    let tenant = user.tenant_id()?;
    let customer = state
        .customers()
        .update(tenant, &id, payload)
        .await
        .map_err(AppError::from)?;
    Ok(Json(customer))
}

/// DELETE /api/customers/:id
pub async fn delete(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<String>,
) -> AppResult<Json<bool>> {
    let tenant = user.tenant_id()?;
    state
        .customers()
        .delete(tenant, &id)
        .await
        .map_err(AppError::from)?;
    Ok(Json(true))
}

#[derive(Debug, Deserialize, Validate)]
pub struct NewsletterPayload {
    #[validate(length(min = 1))]
    pub subject: String,
    #[validate(length(min = 1))]
    pub body: String,
}

#[derive(Debug, Serialize)]
pub struct NewsletterResponse {
    pub queued: usize,
}

/// POST /api/customers/newsletter - queue a newsletter to every customer
/// with an email address
pub async fn send_newsletter(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
    Json(payload): Json<NewsletterPayload>,
) -> AppResult<Json<NewsletterResponse>> {
    payload
        .validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let tenant = user.tenant_id()?;
    let audience = state
        .customers()
        .find_with_email(tenant)
        .await
        .map_err(AppError::from)?;

    let mut queued = 0;
    for customer in &audience {
        if let Some(email) = &customer.email {
            state.outbox().enqueue(templates::newsletter(
                &user.restaurant_name,
                email,
                &payload.subject,
                &payload.body,
            ));
            queued += 1;
        }
    }

    tracing::info!(queued, restaurant = %user.restaurant_name, "Newsletter queued");
    Ok(Json(NewsletterResponse { queued }))
}
