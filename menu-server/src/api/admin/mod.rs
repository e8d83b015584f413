//! Superadmin console API module
//!
//! Restaurant lifecycle and the billing state machine. Every route
//! requires the superadmin role on top of the regular auth middleware.

mod handler;

use axum::{
    Router, middleware,
    routing::{get, post, put},
};

use crate::auth::require_superadmin;
use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest(
        "/api/admin/restaurants",
        restaurant_routes().layer(middleware::from_fn(require_superadmin)),
    )
}

fn restaurant_routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list).post(handler::create))
        .route(
            "/{id}",
            get(handler::get_by_id)
                .put(handler::update)
                .delete(handler::delete),
        )
        .route("/{id}/payment", put(handler::set_payment_status))
        .route("/{id}/due-date", put(handler::set_due_date))
        .route("/{id}/plan", put(handler::change_plan))
        .route("/{id}/active", put(handler::set_active))
        .route("/{id}/billing-history", get(handler::billing_history))
        .route("/{id}/credentials/reset", post(handler::reset_credentials))
}
