//! Public API module
//!
//! QR landing endpoints reachable without a token: restaurant info, the
//! public menu, order placement and feedback submission, all addressed by
//! slug.

mod handler;

use axum::{
    Router,
    routing::{get, post},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/public", public_routes())
}

fn public_routes() -> Router<ServerState> {
    Router::new()
        .route("/restaurant/{slug}", get(handler::restaurant_info))
        .route("/menu/{slug}", get(handler::public_menu))
        .route("/orders/{slug}", post(handler::place_order))
        .route("/feedback/{slug}", post(handler::submit_feedback))
}
