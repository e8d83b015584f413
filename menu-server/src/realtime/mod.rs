//! Realtime push channel
//!
//! socket.io namespace `/rt`; dashboard clients join their restaurant's
//! room (the slug) and receive two server-to-client events. Publishing is
//! fire-and-forget: no delivery guarantee, no replay for disconnected
//! clients.

use serde::{Deserialize, Serialize};
use socketioxide::extract::{Data, SocketRef};
use socketioxide::layer::SocketIoLayer;
use socketioxide::SocketIo;

use crate::db::models::Order;

pub const EVENT_NEW_ORDER: &str = "new-order";
pub const EVENT_ORDER_STATUS: &str = "order-status-update";

const NAMESPACE: &str = "/rt";

#[derive(Debug, Deserialize)]
struct JoinPayload {
    slug: String,
}

async fn on_connect(socket: SocketRef) {
    socket.on("join", async |socket: SocketRef, Data::<JoinPayload>(payload)| {
        tracing::debug!(sid = %socket.id, slug = %payload.slug, "Dashboard client joined room");
        socket.join(payload.slug);
    });
}

/// Realtime publish service, held on ServerState
#[derive(Clone)]
pub struct RealtimeService {
    io: SocketIo,
}

impl RealtimeService {
    /// Create the service and the axum layer serving the socket.io endpoint
    pub fn new_layer() -> (Self, SocketIoLayer) {
        let (layer, io) = SocketIo::new_layer();
        io.ns(NAMESPACE, on_connect);
        (Self { io }, layer)
    }

    /// Publish a freshly placed order to the tenant's dashboard room
    pub async fn publish_new_order(&self, slug: &str, order: &Order) {
        self.emit(slug, EVENT_NEW_ORDER, order).await;
    }

    /// Publish an order status change to the tenant's dashboard room
    pub async fn publish_order_status(&self, slug: &str, order: &Order) {
        self.emit(slug, EVENT_ORDER_STATUS, order).await;
    }

    async fn emit<T: Serialize>(&self, room: &str, event: &str, data: &T) {
        let Some(ns) = self.io.of(NAMESPACE) else {
            return;
        };
        if let Err(e) = ns.to(room.to_string()).emit(event, data).await {
            // Fire and forget: a failed push is logged, never surfaced
            tracing::warn!(room, event, error = %e, "Realtime publish failed");
        }
    }
}
