//! Superadmin Console Handlers
//!
//! Restaurant lifecycle and billing mutations. Billing changes append to
//! the account's history ledger inside the same store update.

use axum::{
    Json,
    extract::{Path, State},
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::billing;
use crate::core::ServerState;
use crate::db::models::{Account, AccountUpdate, BillingEntry, OwnerCreate, PaymentStatus, Plan, Role};
use crate::notify::templates;
use crate::utils::{AppError, AppResult, time};
use shared::error::ErrorCode;

/// Temporary password length for credential resets
const TEMP_PASSWORD_LEN: usize = 16;

fn generate_temp_password() -> String {
    use rand::Rng;
    const CHARS: &[u8] =
        b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";
    let mut rng = rand::thread_rng();
    (0..TEMP_PASSWORD_LEN)
        .map(|_| CHARS[rng.gen_range(0..CHARS.len())] as char)
        .collect()
}

/// Load an owner account or fail with a restaurant-specific 404
async fn load_owner(state: &ServerState, id: &str) -> Result<Account, AppError> {
    let account = state
        .accounts()
        .find_by_id(id)
        .await
        .map_err(AppError::from)?
        .filter(|a| a.role == Role::Owner)
        .ok_or_else(|| AppError::new(ErrorCode::RestaurantNotFound))?;
    Ok(account)
}

/// GET /api/admin/restaurants - all restaurant owners
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<Account>>> {
    let owners = state.accounts().find_owners().await.map_err(AppError::from)?;
    Ok(Json(owners))
}

/// GET /api/admin/restaurants/:id
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<Account>> {
    Ok(Json(load_owner(&state, &id).await?))
}

/// POST /api/admin/restaurants - onboard a restaurant owner
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<OwnerCreate>,
) -> AppResult<Json<Account>> {
    payload
        .validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let password = payload.password.clone();
    let hash_pass = Account::hash_password(&password)
        .map_err(|e| AppError::internal(format!("Failed to hash password: {}", e)))?;

    let account = state
        .accounts()
        .create_owner(payload, hash_pass)
        .await
        .map_err(AppError::from)?;

    state.outbox().enqueue(templates::owner_welcome(
        &account,
        &password,
        &state.config.client_base_url,
    ));

    tracing::info!(
        target: "audit",
        restaurant = %account.restaurant_name,
        email = %account.email,
        "Restaurant owner created"
    );

    Ok(Json(account))
}

/// PUT /api/admin/restaurants/:id - update profile fields
///
/// A changed restaurant name re-derives the slug; re-saving the same name
/// leaves it untouched.
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<AccountUpdate>,
) -> AppResult<Json<Account>> {
    load_owner(&state, &id).await?;
    let updated = state
        .accounts()
        .update_profile(&id, payload)
        .await
        .map_err(AppError::from)?;
    Ok(Json(updated))
}

/// DELETE /api/admin/restaurants/:id
///
/// Removes the account document only; dependent tenant collections are not
/// cascaded.
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<bool>> {
    let account = load_owner(&state, &id).await?;
    state.accounts().delete(&id).await.map_err(AppError::from)?;

    tracing::info!(
        target: "audit",
        restaurant = %account.restaurant_name,
        "Restaurant deleted"
    );
    Ok(Json(true))
}

#[derive(Debug, Deserialize)]
pub struct PaymentStatusPayload {
    pub status: PaymentStatus,
}

/// PUT /api/admin/restaurants/:id/payment - toggle payment status
///
/// Rejected while the current paid cycle is still running (paid and due
/// date not yet passed) in both directions.
pub async fn set_payment_status(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<PaymentStatusPayload>,
) -> AppResult<Json<Account>> {
    let account = load_owner(&state, &id).await?;
    let now = time::now_millis();

    if billing::cycle_locked(&account, now) {
        return Err(AppError::cycle_locked());
    }

    let updated = state
        .accounts()
        .set_payment_status(&account, payload.status, now)
        .await
        .map_err(AppError::from)?;
    Ok(Json(updated))
}

#[derive(Debug, Deserialize)]
pub struct DueDatePayload {
    pub due_date: i64,
}

/// PUT /api/admin/restaurants/:id/due-date
pub async fn set_due_date(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<DueDatePayload>,
) -> AppResult<Json<Account>> {
    let account = load_owner(&state, &id).await?;

    let updated = state
        .accounts()
        .set_due_date(&account, payload.due_date)
        .await
        .map_err(AppError::from)?;

    state
        .outbox()
        .enqueue(templates::due_date_changed(&updated, payload.due_date));
    Ok(Json(updated))
}

#[derive(Debug, Deserialize)]
pub struct PlanChangePayload {
    pub plan: Plan,
    pub amount: Decimal,
}

/// PUT /api/admin/restaurants/:id/plan - change plan, record the amount
///
/// Forces the account to paid and stamps the payment time.
pub async fn change_plan(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<PlanChangePayload>,
) -> AppResult<Json<Account>> {
    if payload.amount < Decimal::ZERO {
        return Err(AppError::validation("Amount must not be negative"));
    }
    let account = load_owner(&state, &id).await?;

    let updated = state
        .accounts()
        .change_plan(&account, payload.plan, payload.amount, time::now_millis())
        .await
        .map_err(AppError::from)?;

    state.outbox().enqueue(templates::payment_confirmation(
        &updated,
        payload.plan,
        payload.amount,
    ));
    Ok(Json(updated))
}

#[derive(Debug, Deserialize)]
pub struct ActivePayload {
    pub is_active: bool,
}

/// PUT /api/admin/restaurants/:id/active - toggle the active flag
pub async fn set_active(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<ActivePayload>,
) -> AppResult<Json<Account>> {
    let account = load_owner(&state, &id).await?;
    let updated = state
        .accounts()
        .set_active(&account, payload.is_active)
        .await
        .map_err(AppError::from)?;
    Ok(Json(updated))
}

/// GET /api/admin/restaurants/:id/billing-history
pub async fn billing_history(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<Vec<BillingEntry>>> {
    let account = load_owner(&state, &id).await?;
    Ok(Json(account.billing_history))
}

#[derive(Debug, Serialize)]
pub struct CredentialsResetResponse {
    pub email_sent_to: String,
}

/// POST /api/admin/restaurants/:id/credentials/reset
///
/// Generates a temporary password, stores only its hash and emails it to
/// the owner. The plaintext never reaches the console response.
pub async fn reset_credentials(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<CredentialsResetResponse>> {
    let account = load_owner(&state, &id).await?;
    let account_id = account
        .id
        .clone()
        .ok_or_else(|| AppError::internal("Account has no id"))?;

    let temp_password = generate_temp_password();
    let hash_pass = Account::hash_password(&temp_password)
        .map_err(|e| AppError::internal(format!("Failed to hash password: {}", e)))?;

    state
        .accounts()
        .set_password_hash(&account_id, hash_pass)
        .await
        .map_err(AppError::from)?;

    state
        .outbox()
        .enqueue(templates::credentials_reset(&account, &temp_password));

    tracing::info!(
        target: "audit",
        restaurant = %account.restaurant_name,
        email = %account.email,
        "Owner credentials reset by superadmin"
    );

    Ok(Json(CredentialsResetResponse {
        email_sent_to: account.email,
    }))
}
