//! Billing state machine and subscription gating, end to end.

mod common;

use http::StatusCode;
use serde_json::json;

use common::{create_owner, login, send, setup, superadmin_token};

const DAY_MS: i64 = 86_400_000;

fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// Marking paid inside an active paid cycle is locked in both directions;
/// once the due date passes the toggle works again
#[tokio::test]
async fn payment_toggle_respects_the_cycle_lock() {
    let env = setup().await;
    let admin = superadmin_token(&env).await;
    let (id, _) = create_owner(
        &env,
        &admin,
        "Spice Route",
        "owner@spice.test",
        "owner-pass-123",
    )
    .await;

    // Due tomorrow, then mark paid: the cycle is now active
    let uri = format!("/api/admin/restaurants/{id}/due-date");
    let (status, _) = send(
        &env.app,
        "PUT",
        &uri,
        Some(&admin),
        Some(json!({"due_date": now_millis() + DAY_MS})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let uri = format!("/api/admin/restaurants/{id}/payment");
    let (status, account) = send(
        &env.app,
        "PUT",
        &uri,
        Some(&admin),
        Some(json!({"status": "paid"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "mark paid failed: {account}");
    assert_eq!(account["payment_status"], "paid");
    assert!(account["last_payment"].is_i64());

    // Attempting to mark unpaid today is rejected with the cycle-lock code
    let (status, body) = send(
        &env.app,
        "PUT",
        &uri,
        Some(&admin),
        Some(json!({"status": "unpaid"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 3004);

    // Move the due date into the past (always allowed); the lock releases
    let due_uri = format!("/api/admin/restaurants/{id}/due-date");
    let (status, _) = send(
        &env.app,
        "PUT",
        &due_uri,
        Some(&admin),
        Some(json!({"due_date": now_millis() - DAY_MS})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, account) = send(
        &env.app,
        "PUT",
        &uri,
        Some(&admin),
        Some(json!({"status": "unpaid"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "mark unpaid failed: {account}");
    assert_eq!(account["payment_status"], "unpaid");
}

/// Every billing mutation appends to the history ledger, including the
/// active-flag toggle
#[tokio::test]
async fn billing_mutations_append_to_the_ledger() {
    let env = setup().await;
    let admin = superadmin_token(&env).await;
    let (id, _) = create_owner(
        &env,
        &admin,
        "Spice Route",
        "owner@spice.test",
        "owner-pass-123",
    )
    .await;

    let (status, _) = send(
        &env.app,
        "PUT",
        &format!("/api/admin/restaurants/{id}/due-date"),
        Some(&admin),
        Some(json!({"due_date": now_millis() + 30 * DAY_MS})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, account) = send(
        &env.app,
        "PUT",
        &format!("/api/admin/restaurants/{id}/plan"),
        Some(&admin),
        Some(json!({"plan": "pro", "amount": 49.0})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(account["plan"], "pro");
    assert_eq!(account["payment_status"], "paid");

    let (status, _) = send(
        &env.app,
        "PUT",
        &format!("/api/admin/restaurants/{id}/active"),
        Some(&admin),
        Some(json!({"is_active": false})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, history) = send(
        &env.app,
        "GET",
        &format!("/api/admin/restaurants/{id}/billing-history"),
        Some(&admin),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let entries = history.as_array().expect("history array");
    // due-date change + plan change + deactivation
    assert_eq!(entries.len(), 3);
    assert_eq!(entries[1]["amount"], 49.0);
    assert_eq!(
        entries[2]["notes"].as_str().expect("notes"),
        "account deactivated"
    );
}

/// Deactivated tenants are blocked at the gate; reactivation restores access
#[tokio::test]
async fn deactivated_tenants_are_blocked() {
    let env = setup().await;
    let admin = superadmin_token(&env).await;
    let (id, _) = create_owner(
        &env,
        &admin,
        "Spice Route",
        "owner@spice.test",
        "owner-pass-123",
    )
    .await;
    let owner = login(&env, "owner@spice.test", "owner-pass-123").await;

    let (status, _) = send(&env.app, "GET", "/api/menu", Some(&owner), None).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = send(
        &env.app,
        "PUT",
        &format!("/api/admin/restaurants/{id}/active"),
        Some(&admin),
        Some(json!({"is_active": false})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send(&env.app, "GET", "/api/menu", Some(&owner), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["code"], 1005);

    let (status, _) = send(
        &env.app,
        "PUT",
        &format!("/api/admin/restaurants/{id}/active"),
        Some(&admin),
        Some(json!({"is_active": true})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = send(&env.app, "GET", "/api/menu", Some(&owner), None).await;
    assert_eq!(status, StatusCode::OK);
}

/// Unpaid tenants stay usable until the due date passes, then lock out
/// with the overdue code
#[tokio::test]
async fn overdue_subscriptions_are_locked_out() {
    let env = setup().await;
    let admin = superadmin_token(&env).await;
    let (id, _) = create_owner(
        &env,
        &admin,
        "Spice Route",
        "owner@spice.test",
        "owner-pass-123",
    )
    .await;
    let owner = login(&env, "owner@spice.test", "owner-pass-123").await;

    // Unpaid with a future due date: still allowed
    let (status, _) = send(
        &env.app,
        "PUT",
        &format!("/api/admin/restaurants/{id}/due-date"),
        Some(&admin),
        Some(json!({"due_date": now_millis() + DAY_MS})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = send(&env.app, "GET", "/api/menu", Some(&owner), None).await;
    assert_eq!(status, StatusCode::OK);

    // Due date in the past: locked out with the overdue code
    let (status, _) = send(
        &env.app,
        "PUT",
        &format!("/api/admin/restaurants/{id}/due-date"),
        Some(&admin),
        Some(json!({"due_date": now_millis() - DAY_MS})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send(&env.app, "GET", "/api/menu", Some(&owner), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["code"], 3005);

    // The public menu stays reachable for customers
    let (status, _) = send(&env.app, "GET", "/api/public/menu/spice-route", None, None).await;
    assert_eq!(status, StatusCode::OK);
}

/// The admin console is superadmin-only
#[tokio::test]
async fn admin_console_requires_superadmin() {
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

    let (status, body) = send(&env.app, "GET", "/api/admin/restaurants", Some(&owner), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["code"], 2003);
}

/// Credential reset stores a new hash and never returns the plaintext
#[tokio::test]
async fn credential_reset_is_opaque_to_the_console() {
    let env = setup().await;
    let admin = superadmin_token(&env).await;
    let (id, _) = create_owner(
        &env,
        &admin,
        "Spice Route",
        "owner@spice.test",
        "owner-pass-123",
    )
    .await;

    let (status, body) = send(
        &env.app,
        "POST",
        &format!("/api/admin/restaurants/{id}/credentials/reset"),
        Some(&admin),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["email_sent_to"], "owner@spice.test");
    assert!(body.get("password").is_none());
    assert!(body.get("temp_password").is_none());

    // The old password no longer works
    let (status, _) = send(
        &env.app,
        "POST",
        "/api/auth/login",
        None,
        Some(json!({"email": "owner@spice.test", "password": "owner-pass-123"})),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}
