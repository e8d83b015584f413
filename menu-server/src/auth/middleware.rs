//! Authentication middleware
//!
//! Validates the bearer token, re-reads the live account record from the
//! store (payment status and active flag are checked per request, not from
//! the token) and applies the subscription gate before the handler runs.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};

use crate::auth::{CurrentUser, JwtError, JwtService};
use crate::billing;
use crate::core::ServerState;
use crate::db::models::{Account, Role};
use crate::utils::time;
use shared::error::{AppError, ErrorCode};

/// Routes reachable without a token
fn is_public_api_route(path: &str) -> bool {
    path == "/api/auth/login" || path == "/api/health" || path.starts_with("/api/public/")
}

/// Authentication middleware
///
/// Extracts and validates the JWT from `Authorization: Bearer <token>`,
/// resolves it to the live account, runs the subscription gate and injects
/// [`CurrentUser`] into the request extensions.
///
/// Skipped for:
/// - `OPTIONS *` (CORS preflight)
/// - non-`/api/` paths (static files, socket.io)
/// - the public API routes (login, public menu/order/feedback, health)
pub async fn require_auth(
    State(state): State<ServerState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let path = req.uri().path();

    if req.method() == http::Method::OPTIONS {
        return Ok(next.run(req).await);
    }
    if !path.starts_with("/api/") {
        return Ok(next.run(req).await);
    }
    if is_public_api_route(path) {
        return Ok(next.run(req).await);
    }

    let jwt_service = state.jwt_service();
    let auth_header = req
        .headers()
        .get(http::header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok());

    let token = match auth_header {
        Some(header) => JwtService::extract_from_header(header)
            .ok_or_else(|| AppError::invalid_token("Invalid authorization header"))?,
        None => {
            tracing::warn!(uri = %req.uri(), "Request without authorization header");
            return Err(AppError::unauthorized());
        }
    };

    let claims = jwt_service.validate_token(token).map_err(|e| {
        tracing::warn!(uri = %req.uri(), error = %e, "Token validation failed");
        match e {
            JwtError::ExpiredToken => AppError::token_expired(),
            _ => AppError::invalid_token("Invalid token"),
        }
    })?;

    // Re-read the live account: tokens outlive deactivation and payment
    // changes, the store record does not
    let account = state
        .accounts()
        .find_by_id(&claims.sub)
        .await
        .map_err(AppError::from)?
        .ok_or_else(|| AppError::invalid_token("Account no longer exists"))?;

    let user = gate(&state, account).await?;
    req.extensions_mut().insert(user);
    Ok(next.run(req).await)
}

/// Subscription gate, evaluated per request for non-superadmin callers:
/// deactivated accounts and overdue unpaid subscriptions are blocked with
/// distinguishable errors. Managers gate on their owning restaurant.
async fn gate(state: &ServerState, account: Account) -> Result<CurrentUser, AppError> {
    let id = account
        .id
        .as_ref()
        .map(|t| t.to_string())
        .unwrap_or_default();

    if account.role == Role::Superadmin {
        return Ok(CurrentUser {
            id,
            email: account.email,
            role: Role::Superadmin,
            tenant: None,
            restaurant_name: String::new(),
            slug: String::new(),
        });
    }

    if !account.is_active {
        return Err(AppError::account_disabled());
    }

    // Resolve the tenant account carrying the subscription state
    let tenant = match account.role {
        Role::Owner => account.clone(),
        Role::Manager => {
            let owner_id = account
                .owner
                .clone()
                .ok_or_else(|| AppError::new(ErrorCode::ManagerUnlinked))?;
            let owner = state
                .accounts()
                .find_by_record_id(&owner_id)
                .await
                .map_err(AppError::from)?
                .ok_or_else(|| AppError::new(ErrorCode::ManagerUnlinked))?;
            if !owner.is_active {
                return Err(AppError::account_disabled());
            }
            owner
        }
        Role::Superadmin => unreachable!(),
    };

    if billing::overdue(&tenant, time::now_millis()) {
        return Err(AppError::subscription_overdue());
    }

    Ok(CurrentUser {
        id,
        email: account.email,
        role: account.role,
        tenant: tenant.id.clone(),
        restaurant_name: tenant.restaurant_name,
        slug: tenant.slug,
    })
}

/// Superadmin layer for the admin console routes
pub async fn require_superadmin(req: Request, next: Next) -> Result<Response, AppError> {
    let user = req
        .extensions()
        .get::<CurrentUser>()
        .ok_or(AppError::unauthorized())?;
    if !user.is_superadmin() {
        tracing::warn!(
            user_id = %user.id,
            email = %user.email,
            "Superadmin route accessed without superadmin role"
        );
        return Err(AppError::new(ErrorCode::SuperadminRequired));
    }
    Ok(next.run(req).await)
}
