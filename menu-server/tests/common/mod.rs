//! Shared test harness: in-memory database, oneshot requests against the
//! real router.

// Not every test binary uses every helper
#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use http::{Request, StatusCode, header};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use surrealdb::Surreal;
use surrealdb::engine::local::Mem;
use tempfile::TempDir;
use tower::ServiceExt;

use menu_server::auth::JwtConfig;
use menu_server::core::{Config, ServerState, build_app};
use menu_server::notify::Mailer;

/// Test environment: router + state + scratch dir guard
pub struct TestEnv {
    pub app: axum::Router,
    pub state: ServerState,
    _work_dir: TempDir,
}

pub async fn setup() -> TestEnv {
    setup_with_mailer(Arc::new(menu_server::notify::LogMailer)).await
}

pub async fn setup_with_mailer(mailer: Arc<dyn Mailer>) -> TestEnv {
    let work_dir = TempDir::new().expect("temp work dir");

    let config = Config {
        work_dir: work_dir.path().to_string_lossy().to_string(),
        http_port: 0,
        jwt: JwtConfig {
            secret: "integration-test-secret-key-32-bytes!!".to_string(),
            expiration_minutes: 60,
            issuer: "menu-server".to_string(),
            audience: "menu-dashboard".to_string(),
        },
        environment: "test".to_string(),
        client_base_url: "http://localhost:5173".to_string(),
        smtp: None,
    };
    config.ensure_work_dir_structure().expect("work dir layout");

    let db = Surreal::new::<Mem>(()).await.expect("in-memory database");
    let state = ServerState::with_db_and_mailer(config, db, mailer)
        .await
        .expect("server state");

    let app = build_app(&state);
    TestEnv {
        app,
        state,
        _work_dir: work_dir,
    }
}

/// Issue one request against the router and parse the JSON response
pub async fn send(
    app: &axum::Router,
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .expect("request"),
        None => builder.body(Body::empty()).expect("request"),
    };

    let response = app.clone().oneshot(request).await.expect("response");
    let status = response.status();
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body")
        .to_bytes();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, value)
}

/// Seed the superadmin and return a session token
pub async fn superadmin_token(env: &TestEnv) -> String {
    env.state
        .accounts()
        .create_superadmin("root@platform.test", "superadmin-pass")
        .await
        .expect("seed superadmin");
    login(env, "root@platform.test", "superadmin-pass").await
}

/// Login and return the token
pub async fn login(env: &TestEnv, email: &str, password: &str) -> String {
    let (status, body) = send(
        &env.app,
        "POST",
        "/api/auth/login",
        None,
        Some(json!({"email": email, "password": password})),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "login failed: {body}");
    body["token"].as_str().expect("token").to_string()
}

/// Create a restaurant owner through the admin console, returning
/// (account_id, slug)
pub async fn create_owner(
    env: &TestEnv,
    admin_token: &str,
    name: &str,
    email: &str,
    password: &str,
) -> (String, String) {
    let (status, body) = send(
        &env.app,
        "POST",
        "/api/admin/restaurants",
        Some(admin_token),
        Some(json!({
            "email": email,
            "password": password,
            "restaurant_name": name,
            "plan": "starter",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "owner creation failed: {body}");
    (
        body["id"].as_str().expect("owner id").to_string(),
        body["slug"].as_str().expect("owner slug").to_string(),
    )
}
