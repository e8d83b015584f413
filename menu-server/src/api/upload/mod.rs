//! Upload API module

mod handler;

use axum::{Router, extract::DefaultBodyLimit, routing::post};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/upload", upload_routes())
}

fn upload_routes() -> Router<ServerState> {
    Router::new()
        .route("/image", post(handler::upload_image))
        // Cap request bodies slightly above the per-file limit so the
        // multipart framing fits
        .layer(DefaultBodyLimit::max(handler::MAX_FILE_SIZE + 64 * 1024))
}
