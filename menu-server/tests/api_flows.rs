//! End-to-end flows through the public and dashboard APIs.

mod common;

use std::sync::Arc;

use async_trait::async_trait;
use http::StatusCode;
use serde_json::json;

use common::{create_owner, login, send, setup, setup_with_mailer, superadmin_token};
use menu_server::notify::{Email, Mailer};
use shared::error::AppError;

/// Owner onboarding -> login -> menu item -> public menu shows exactly it
#[tokio::test]
async fn owner_can_publish_a_menu() {
    let env = setup().await;
    let admin = superadmin_token(&env).await;
    let (_, slug) = create_owner(
        &env,
        &admin,
        "Spice Route",
        "owner@spice.test",
        "owner-pass-123",
    )
    .await;
    assert_eq!(slug, "spice-route");

    let owner = login(&env, "owner@spice.test", "owner-pass-123").await;

    let (status, item) = send(
        &env.app,
        "POST",
        "/api/menu",
        Some(&owner),
        Some(json!({
            "name": "Paneer Tikka",
            "description": "Chargrilled cottage cheese",
            "price": 12.5,
            "category": "starter",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "menu create failed: {item}");

    let (status, menu) = send(&env.app, "GET", "/api/public/menu/spice-route", None, None).await;
    assert_eq!(status, StatusCode::OK);
    let items = menu.as_array().expect("menu array");
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["name"], "Paneer Tikka");
    assert_eq!(items[0]["is_available"], true);
}

/// Slug resolution tolerates case, spacing and doubled hyphens
#[tokio::test]
async fn public_slug_resolution_is_forgiving() {
    let env = setup().await;
    let admin = superadmin_token(&env).await;
    create_owner(
        &env,
        &admin,
        "Spice Route",
        "owner@spice.test",
        "owner-pass-123",
    )
    .await;

    for variant in [
        "spice-route",
        "Spice%20Route",
        "spice--route",
    ] {
        let uri = format!("/api/public/restaurant/{variant}");
        let (status, body) = send(&env.app, "GET", &uri, None, None).await;
        assert_eq!(status, StatusCode::OK, "variant {variant} failed: {body}");
        assert_eq!(body["slug"], "spice-route", "variant {variant}");
    }

    let (status, _) = send(
        &env.app,
        "GET",
        "/api/public/restaurant/no-such-place",
        None,
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

/// Order line items are snapshots: menu edits never rewrite history
#[tokio::test]
async fn order_totals_are_immutable_snapshots() {
    let env = setup().await;
    let admin = superadmin_token(&env).await;
    create_owner(
        &env,
        &admin,
        "Spice Route",
        "owner@spice.test",
        "owner-pass-123",
    )
    .await;
    let owner = login(&env, "owner@spice.test", "owner-pass-123").await;

    let (_, item) = send(
        &env.app,
        "POST",
        "/api/menu",
        Some(&owner),
        Some(json!({"name": "Biryani", "price": 10.0, "category": "main"})),
    )
    .await;
    let item_id = item["id"].as_str().expect("item id").to_string();

    let (status, order) = send(
        &env.app,
        "POST",
        "/api/public/orders/spice-route",
        None,
        Some(json!({
            "table_number": 4,
            "customer_name": "Asha",
            "items": [{"item": item_id, "quantity": 2}],
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "order failed: {order}");
    assert_eq!(order["total"], 20.0);
    let order_id = order["id"].as_str().expect("order id").to_string();

    // Raise the menu price afterwards
    let uri = format!("/api/menu/{item_id}");
    let (status, _) = send(
        &env.app,
        "PUT",
        &uri,
        Some(&owner),
        Some(json!({"price": 99.0})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    // The stored order still carries the old price and total
    let uri = format!("/api/orders/{order_id}");
    let (status, stored) = send(&env.app, "GET", &uri, Some(&owner), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(stored["items"][0]["price"], 10.0);
    assert_eq!(stored["total"], 20.0);
}

/// The slug is a pure function of the name: renames re-derive it,
/// re-saving the same name keeps it
#[tokio::test]
async fn slug_follows_the_restaurant_name() {
    let env = setup().await;
    let admin = superadmin_token(&env).await;
    let (id, slug) = create_owner(
        &env,
        &admin,
        "Spice Route",
        "owner@spice.test",
        "owner-pass-123",
    )
    .await;
    assert_eq!(slug, "spice-route");

    // Re-saving the identical name must not change the slug
    let uri = format!("/api/admin/restaurants/{id}");
    let (status, body) = send(
        &env.app,
        "PUT",
        &uri,
        Some(&admin),
        Some(json!({"restaurant_name": "Spice Route"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["slug"], "spice-route");

    // A real rename re-derives it
    let (status, body) = send(
        &env.app,
        "PUT",
        &uri,
        Some(&admin),
        Some(json!({"restaurant_name": "Curry House"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["slug"], "curry-house");

    let (status, _) = send(
        &env.app,
        "GET",
        "/api/public/restaurant/curry-house",
        None,
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
}

/// Mail transport that always fails
struct BrokenMailer;

#[async_trait]
impl Mailer for BrokenMailer {
    async fn send(&self, _email: &Email) -> Result<(), AppError> {
        Err(AppError::internal("smtp exploded"))
    }
}

/// Feedback persists and the response succeeds even when every mail send
/// would fail
#[tokio::test]
async fn feedback_survives_mail_failure() {
    let env = setup_with_mailer(Arc::new(BrokenMailer)).await;
    let admin = superadmin_token(&env).await;
    create_owner(
        &env,
        &admin,
        "Spice Route",
        "owner@spice.test",
        "owner-pass-123",
    )
    .await;

    let (status, feedback) = send(
        &env.app,
        "POST",
        "/api/public/feedback/spice-route",
        None,
        Some(json!({
            "customer_name": "Asha",
            "email": "asha@example.com",
            "rating": 5,
            "comment": "Loved it",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "feedback failed: {feedback}");

    let owner = login(&env, "owner@spice.test", "owner-pass-123").await;
    let (status, inbox) = send(&env.app, "GET", "/api/feedback", Some(&owner), None).await;
    assert_eq!(status, StatusCode::OK);
    let entries = inbox.as_array().expect("feedback array");
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0]["rating"], 5);
}

/// Ratings outside 1..=5 are rejected up front
#[tokio::test]
async fn feedback_rating_is_validated() {
    let env = setup().await;
    let admin = superadmin_token(&env).await;
    create_owner(
        &env,
        &admin,
        "Spice Route",
        "owner@spice.test",
        "owner-pass-123",
    )
    .await;

    let (status, _) = send(
        &env.app,
        "POST",
        "/api/public/feedback/spice-route",
        None,
        Some(json!({"customer_name": "Asha", "rating": 6})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

/// Tenants never see each other's data, even with a valid foreign id
#[tokio::test]
async fn cross_tenant_ids_resolve_to_not_found() {
    let env = setup().await;
    let admin = superadmin_token(&env).await;
    create_owner(&env, &admin, "Spice Route", "a@spice.test", "owner-pass-123").await;
    create_owner(&env, &admin, "Golden Dragon", "b@dragon.test", "owner-pass-123").await;

    let owner_a = login(&env, "a@spice.test", "owner-pass-123").await;
    let owner_b = login(&env, "b@dragon.test", "owner-pass-123").await;

    let (_, item) = send(
        &env.app,
        "POST",
        "/api/menu",
        Some(&owner_a),
        Some(json!({"name": "Biryani", "price": 10.0, "category": "main"})),
    )
    .await;
    let item_id = item["id"].as_str().expect("item id");

    let uri = format!("/api/menu/{item_id}");
    let (status, _) = send(&env.app, "GET", &uri, Some(&owner_b), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

/// Managers operate on their owner's tenant but cannot manage managers
#[tokio::test]
async fn managers_act_for_their_restaurant() {
    let env = setup().await;
    let admin = superadmin_token(&env).await;
    create_owner(
        &env,
        &admin,
        "Spice Route",
        "owner@spice.test",
        "owner-pass-123",
    )
    .await;
    let owner = login(&env, "owner@spice.test", "owner-pass-123").await;

    let (status, manager) = send(
        &env.app,
        "POST",
        "/api/managers",
        Some(&owner),
        Some(json!({"email": "mgr@spice.test", "password": "manager-pass-1"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "manager create failed: {manager}");
    assert_eq!(manager["role"], "manager");
    assert_eq!(manager["restaurant_name"], "Spice Route");

    let (_, item) = send(
        &env.app,
        "POST",
        "/api/menu",
        Some(&owner),
        Some(json!({"name": "Biryani", "price": 10.0, "category": "main"})),
    )
    .await;
    assert!(item["id"].is_string());

    // The manager sees the owner's menu
    let mgr = login(&env, "mgr@spice.test", "manager-pass-1").await;
    let (status, menu) = send(&env.app, "GET", "/api/menu", Some(&mgr), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(menu.as_array().expect("menu array").len(), 1);

    // But cannot add further managers
    let (status, _) = send(
        &env.app,
        "POST",
        "/api/managers",
        Some(&mgr),
        Some(json!({"email": "other@spice.test", "password": "manager-pass-2"})),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

/// Duplicate table numbers are refused per tenant; the QR is rendered once
#[tokio::test]
async fn table_numbers_are_unique_per_tenant() {
    let env = setup().await;
    let admin = superadmin_token(&env).await;
    create_owner(
        &env,
        &admin,
        "Spice Route",
        "owner@spice.test",
        "owner-pass-123",
    )
    .await;
    let owner = login(&env, "owner@spice.test", "owner-pass-123").await;

    let (status, table) = send(
        &env.app,
        "POST",
        "/api/tables",
        Some(&owner),
        Some(json!({"number": 4, "capacity": 6})),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "table create failed: {table}");
    assert_eq!(table["qr_image"], "/qr/spice-route-table-4.png");
    assert!(
        table["qr_url"]
            .as_str()
            .expect("qr url")
            .contains("/m/spice-route?table=4")
    );

    let (status, _) = send(
        &env.app,
        "POST",
        "/api/tables",
        Some(&owner),
        Some(json!({"number": 4})),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
}

/// Unknown email and wrong password yield the same error
#[tokio::test]
async fn login_does_not_leak_account_existence() {
    let env = setup().await;
    let admin = superadmin_token(&env).await;
    create_owner(
        &env,
        &admin,
        "Spice Route",
        "owner@spice.test",
        "owner-pass-123",
    )
    .await;

    let (status_unknown, body_unknown) = send(
        &env.app,
        "POST",
        "/api/auth/login",
        None,
        Some(json!({"email": "ghost@nowhere.test", "password": "whatever"})),
    )
    .await;
    let (status_wrong, body_wrong) = send(
        &env.app,
        "POST",
        "/api/auth/login",
        None,
        Some(json!({"email": "owner@spice.test", "password": "wrong-password"})),
    )
    .await;

    assert_eq!(status_unknown, StatusCode::UNAUTHORIZED);
    assert_eq!(status_wrong, StatusCode::UNAUTHORIZED);
    assert_eq!(body_unknown["code"], body_wrong["code"]);
    assert_eq!(body_unknown["message"], body_wrong["message"]);
}

/// Requests without a token are rejected; public paths are not
#[tokio::test]
async fn protected_routes_require_a_token() {
    let env = setup().await;

    let (status, _) = send(&env.app, "GET", "/api/menu", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = send(&env.app, "GET", "/api/health", None, None).await;
    assert_eq!(status, StatusCode::OK);
}
