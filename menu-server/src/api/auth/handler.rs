//! Authentication Handlers
//!
//! Handles login and session info.

use std::time::Duration;

use axum::{Extension, Json, extract::State};
use serde::{Deserialize, Serialize};

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::models::{Account, PaymentStatus, Plan, Role};
use crate::utils::AppError;

/// Fixed delay for authentication to prevent timing attacks
const AUTH_FIXED_DELAY_MS: u64 = 500;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Account info returned to the dashboard
#[derive(Debug, Serialize)]
pub struct UserInfo {
    pub id: String,
    pub email: String,
    pub role: Role,
    pub restaurant_name: String,
    pub slug: String,
    pub plan: Plan,
    pub payment_status: PaymentStatus,
    pub due_date: Option<i64>,
    pub is_active: bool,
    pub created_at: i64,
}

impl From<&Account> for UserInfo {
    fn from(account: &Account) -> Self {
        Self {
            id: account.id.as_ref().map(|t| t.to_string()).unwrap_or_default(),
            email: account.email.clone(),
            role: account.role,
            restaurant_name: account.restaurant_name.clone(),
            slug: account.slug.clone(),
            plan: account.plan,
            payment_status: account.payment_status,
            due_date: account.due_date,
            is_active: account.is_active,
            created_at: account.created_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: UserInfo,
}

/// Login handler
///
/// Verifies credentials and returns a JWT session token. Unknown email and
/// wrong password produce the same error so account existence never leaks.
pub async fn login(
    State(state): State<ServerState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    let account = state
        .accounts()
        .find_by_email(&req.email)
        .await
        .map_err(AppError::from)?;

    // Fixed delay to prevent timing attacks (before checking the result)
    tokio::time::sleep(Duration::from_millis(AUTH_FIXED_DELAY_MS)).await;

    let account = match account {
        Some(account) => {
            if !account.is_active && account.role != Role::Superadmin {
                return Err(AppError::account_disabled());
            }

            let password_valid = account
                .verify_password(&req.password)
                .map_err(|e| AppError::internal(format!("Password verification failed: {}", e)))?;

            if !password_valid {
                tracing::warn!(email = %req.email, "Login failed - invalid credentials");
                return Err(AppError::invalid_credentials());
            }

            account
        }
        None => {
            tracing::warn!(email = %req.email, "Login failed - unknown email");
            return Err(AppError::invalid_credentials());
        }
    };

    let account_id = account
        .id
        .as_ref()
        .map(|t| t.to_string())
        .unwrap_or_default();

    let token = state
        .jwt_service()
        .generate_token(&account_id, &account.email, account.role)
        .map_err(|e| AppError::internal(format!("Failed to generate token: {}", e)))?;

    tracing::info!(
        account_id = %account_id,
        email = %account.email,
        role = account.role.as_str(),
        "Login successful"
    );

    Ok(Json(LoginResponse {
        user: UserInfo::from(&account),
        token,
    }))
}

/// Get current session info
///
/// Re-reads the account so the dashboard always sees live subscription
/// state, not the snapshot baked into the token.
pub async fn me(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
) -> Result<Json<UserInfo>, AppError> {
    let account = state
        .accounts()
        .find_by_id(&user.id)
        .await
        .map_err(AppError::from)?
        .ok_or_else(|| AppError::not_found("Account"))?;

    Ok(Json(UserInfo::from(&account)))
}
