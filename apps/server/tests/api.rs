use std::time::Duration;

use axum::body::{to_bytes, Body};
use axum::http::{header, Method, Request, StatusCode};
use futures::StreamExt;
use tempfile::TempDir;
use tower::ServiceExt;

use goldfolio_server::api::app_router;
use goldfolio_server::build_state;
use goldfolio_server::config::Config;

async fn build_test_app() -> (axum::Router, TempDir) {
    let tmp = TempDir::new().unwrap();
    let config = Config {
        listen_addr: "127.0.0.1:0".parse().unwrap(),
        db_path: tmp.path().join("test.db").to_string_lossy().to_string(),
        static_dir: "public".to_string(),
        jwt_secret: vec![7u8; 32],
        token_ttl: Duration::from_secs(3600),
        // The broadcaster is never started in these tests, so this
        // endpoint is never contacted.
        price_feed_url: "http://127.0.0.1:9/price".to_string(),
        poll_interval: Duration::from_secs(10),
        enable_admin: false,
    };
    let state = build_state(&config).await.unwrap();
    (app_router(state, &config), tmp)
}

fn json_request(method: Method, uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn authed_json_request(
    method: Method,
    uri: &str,
    token: &str,
    body: Option<serde_json::Value>,
) -> Request<Body> {
    let builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::AUTHORIZATION, format!("Bearer {token}"));
    match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

async fn register_and_login(app: &axum::Router, email: &str) -> String {
    let response = app
        .clone()
        .oneshot(json_request(
            Method::POST,
            "/api/auth/register",
            serde_json::json!({
                "name": "Test User",
                "username": "testuser",
                "email": email,
                "password": "super-secret",
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = app
        .clone()
        .oneshot(json_request(
            Method::POST,
            "/api/auth/login",
            serde_json::json!({ "email": email, "password": "super-secret" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    json["accessToken"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn register_login_and_ledger_round_trip() {
    let (app, _tmp) = build_test_app().await;
    let token = register_and_login(&app, "trader@example.com").await;

    // Current identity resolves, with no credential material leaking out.
    let response = app
        .clone()
        .oneshot(authed_json_request(Method::GET, "/api/auth/me", &token, None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let me = body_json(response).await;
    assert_eq!(me["email"], "trader@example.com");
    assert!(me.get("passwordHash").is_none());

    // First purchase: 100 USD at 10 USD/oz.
    let response = app
        .clone()
        .oneshot(authed_json_request(
            Method::POST,
            "/api/invest",
            &token,
            Some(serde_json::json!({ "investmentAmount": 100, "pricePerOz": 10 })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let invested = body_json(response).await;
    assert_eq!(invested["id"].as_i64().unwrap(), 1);
    assert_eq!(invested["goldAmount"].as_f64().unwrap(), 10.0);
    assert_eq!(invested["investmentAmount"].as_f64().unwrap(), 100.0);

    // Second purchase: 50 USD at 20 USD/oz.
    let response = app
        .clone()
        .oneshot(authed_json_request(
            Method::POST,
            "/api/invest",
            &token,
            Some(serde_json::json!({ "investmentAmount": 50, "pricePerOz": 20 })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    // Summary is recomputed from the ledger rows.
    let response = app
        .clone()
        .oneshot(authed_json_request(
            Method::GET,
            "/api/portfolio",
            &token,
            None,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let portfolio = body_json(response).await;
    assert_eq!(portfolio["totalInvestedUSD"].as_f64().unwrap(), 150.0);
    assert_eq!(portfolio["totalGoldOz"].as_f64().unwrap(), 12.5);
    assert_eq!(portfolio["averagePrice"].as_f64().unwrap(), 12.0);

    // Raw history, newest first.
    let response = app
        .clone()
        .oneshot(authed_json_request(
            Method::GET,
            "/api/investments",
            &token,
            None,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let entries = body_json(response).await;
    let entries = entries.as_array().unwrap();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0]["id"].as_i64().unwrap(), 2);
    assert_eq!(entries[1]["id"].as_i64().unwrap(), 1);
}

#[tokio::test]
async fn protected_routes_require_a_token() {
    let (app, _tmp) = build_test_app().await;

    for uri in ["/api/portfolio", "/api/investments", "/api/auth/me"] {
        let response = app
            .clone()
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED, "{uri}");
    }
}

#[tokio::test]
async fn login_failures_are_one_generic_401() {
    let (app, _tmp) = build_test_app().await;
    register_and_login(&app, "known@example.com").await;

    for body in [
        serde_json::json!({ "email": "known@example.com", "password": "wrong" }),
        serde_json::json!({ "email": "unknown@example.com", "password": "whatever" }),
    ] {
        let response = app
            .clone()
            .oneshot(json_request(Method::POST, "/api/auth/login", body))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        let json = body_json(response).await;
        assert_eq!(json["message"], "Invalid email or password");
    }
}

#[tokio::test]
async fn duplicate_email_registration_conflicts() {
    let (app, _tmp) = build_test_app().await;
    register_and_login(&app, "dup@example.com").await;

    let response = app
        .clone()
        .oneshot(json_request(
            Method::POST,
            "/api/auth/register",
            serde_json::json!({
                "name": "Other User",
                "username": "other",
                "email": "dup@example.com",
                "password": "different",
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn malformed_registrations_are_rejected() {
    let (app, _tmp) = build_test_app().await;

    let response = app
        .clone()
        .oneshot(json_request(
            Method::POST,
            "/api/auth/register",
            serde_json::json!({
                "name": "Test User",
                "username": "testuser",
                "email": "not-an-email",
                "password": "super-secret",
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn invest_rejects_non_positive_amounts() {
    let (app, _tmp) = build_test_app().await;
    let token = register_and_login(&app, "cautious@example.com").await;

    for body in [
        serde_json::json!({ "investmentAmount": 0, "pricePerOz": 10 }),
        serde_json::json!({ "investmentAmount": -5, "pricePerOz": 10 }),
        serde_json::json!({ "investmentAmount": 100, "pricePerOz": 0 }),
        serde_json::json!({ "investmentAmount": 100, "pricePerOz": -1 }),
    ] {
        let response = app
            .clone()
            .oneshot(authed_json_request(
                Method::POST,
                "/api/invest",
                &token,
                Some(body.clone()),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{body}");
    }

    // Non-numeric and missing fields die at deserialization.
    for body in [
        serde_json::json!({ "investmentAmount": "abc", "pricePerOz": 10 }),
        serde_json::json!({ "pricePerOz": 10 }),
    ] {
        let response = app
            .clone()
            .oneshot(authed_json_request(
                Method::POST,
                "/api/invest",
                &token,
                Some(body.clone()),
            ))
            .await
            .unwrap();
        assert!(response.status().is_client_error(), "{body}");
    }

    // Nothing was persisted by any of the rejected writes.
    let response = app
        .clone()
        .oneshot(authed_json_request(
            Method::GET,
            "/api/investments",
            &token,
            None,
        ))
        .await
        .unwrap();
    let entries = body_json(response).await;
    assert_eq!(entries.as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn admin_routes_are_absent_unless_enabled() {
    let (app, _tmp) = build_test_app().await;
    let token = register_and_login(&app, "admin@example.com").await;

    let response = app
        .clone()
        .oneshot(authed_json_request(
            Method::GET,
            "/api/admin/accounts",
            &token,
            None,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn stream_opens_with_a_connected_comment() {
    let (app, _tmp) = build_test_app().await;

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/stream")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let content_type = response
        .headers()
        .get(header::CONTENT_TYPE)
        .unwrap()
        .to_str()
        .unwrap()
        .to_string();
    assert!(content_type.starts_with("text/event-stream"));

    let mut body = response.into_body().into_data_stream();
    let first = body.next().await.unwrap().unwrap();
    let text = String::from_utf8(first.to_vec()).unwrap();
    assert!(text.starts_with(':'), "unexpected first frame: {text}");
    assert!(text.contains("connected"));
}
