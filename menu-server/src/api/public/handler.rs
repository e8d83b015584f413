//! Public API Handlers
//!
//! Anonymous customers reach these through the QR code. Every endpoint
//! resolves the slug to exactly one restaurant first; side effects (email,
//! realtime push) are queued fire-and-forget and never fail the request.

use axum::{
    Json,
    extract::{Path, State},
};
use serde::Serialize;
use validator::Validate;

use crate::core::ServerState;
use crate::db::models::{Account, Feedback, MenuItem, Order, OrderCreate, FeedbackCreate};
use crate::notify::templates;
use crate::utils::{AppError, AppResult};
use shared::error::ErrorCode;

/// Public restaurant card
#[derive(Debug, Serialize)]
pub struct PublicRestaurant {
    pub restaurant_name: String,
    pub slug: String,
}

async fn resolve(state: &ServerState, slug: &str) -> Result<Account, AppError> {
    state.accounts().resolve_slug(slug).await.map_err(|e| match e {
        crate::db::repository::RepoError::NotFound(_) => {
            AppError::new(ErrorCode::RestaurantNotFound)
        }
        other => AppError::from(other),
    })
}

/// GET /api/public/restaurant/:slug - landing page card
pub async fn restaurant_info(
    State(state): State<ServerState>,
    Path(slug): Path<String>,
) -> AppResult<Json<PublicRestaurant>> {
    let account = resolve(&state, &slug).await?;
    Ok(Json(PublicRestaurant {
        restaurant_name: account.restaurant_name,
        slug: account.slug,
    }))
}

/// GET /api/public/menu/:slug - available items only
pub async fn public_menu(
    State(state): State<ServerState>,
    Path(slug): Path<String>,
) -> AppResult<Json<Vec<MenuItem>>> {
    let account = resolve(&state, &slug).await?;
    // Touch the scope registry on the public read path as well, so the
    // handle exists before the first dashboard mutation
    let _scope = state.menu_registry.scope_for(&account.restaurant_name);

    let account_id = account
        .id
        .ok_or_else(|| AppError::internal("Resolved account has no id"))?;
    let items = state
        .menu()
        .find_available(&account_id)
        .await
        .map_err(AppError::from)?;
    Ok(Json(items))
}

/// POST /api/public/orders/:slug - anonymous order placement
pub async fn place_order(
    State(state): State<ServerState>,
    Path(slug): Path<String>,
    Json(payload): Json<OrderCreate>,
) -> AppResult<Json<Order>> {
    payload
        .validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let account = resolve(&state, &slug).await?;
    let account_id = account
        .id
        .clone()
        .ok_or_else(|| AppError::internal("Resolved account has no id"))?;

    let order = state
        .orders()
        .create(&account_id, &state.menu(), payload)
        .await
        .map_err(AppError::from)?;

    // Fire-and-forget dashboard push
    state.realtime.publish_new_order(&account.slug, &order).await;

    Ok(Json(order))
}

/// POST /api/public/feedback/:slug - feedback submission
///
/// The thank-you email is best effort: the feedback document is persisted
/// and the response succeeds even if the mail transport fails.
pub async fn submit_feedback(
    State(state): State<ServerState>,
    Path(slug): Path<String>,
    Json(payload): Json<FeedbackCreate>,
) -> AppResult<Json<Feedback>> {
    payload
        .validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let account = resolve(&state, &slug).await?;
    let account_id = account
        .id
        .clone()
        .ok_or_else(|| AppError::internal("Resolved account has no id"))?;

    let feedback = state
        .feedback()
        .create(&account_id, payload)
        .await
        .map_err(AppError::from)?;

    if let Some(email) = &feedback.email {
        state.outbox().enqueue(templates::feedback_thanks(
            &account.restaurant_name,
            email,
            &feedback.customer_name,
        ));
    }

    Ok(Json(feedback))
}
