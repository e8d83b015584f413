//! Feedback API module
//!
//! Submission happens on the public path; the dashboard only reads.

mod handler;

use axum::{Router, routing::get};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/feedback", feedback_routes())
}

fn feedback_routes() -> Router<ServerState> {
    Router::new().route("/", get(handler::list))
}
