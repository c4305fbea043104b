//! In-process API tests.
//!
//! The router is driven directly with `tower::ServiceExt::oneshot` against a
//! test state whose pool connects lazily, so no test needs a live database:
//! trial generation never touches the store, and every auth rejection fires
//! before the extractor's user lookup.

use axum::body::{to_bytes, Body};
use axum::extract::FromRef;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use fitsphere::{app::build_app, auth::jwt::JwtKeys, state::AppState};
use serde_json::{json, Value};
use tower::ServiceExt;
use uuid::Uuid;

fn test_app() -> (Router, AppState) {
    let state = AppState::fake();
    (build_app(state.clone()), state)
}

async fn send(
    app: Router,
    method: &str,
    uri: &str,
    auth: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(auth) = auth {
        builder = builder.header(header::AUTHORIZATION, auth);
    }
    let request = match body {
        Some(v) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(v.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, value)
}

#[tokio::test]
async fn liveness_endpoint_answers() {
    let (app, _) = test_app();
    let (status, body) = send(app, "GET", "/api/test", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "API is working!");
}

#[tokio::test]
async fn trial_fills_defaults_and_derives_bmi() {
    let (app, _) = test_app();
    let (status, body) = send(
        app,
        "POST",
        "/api/ai/trial",
        None,
        Some(json!({"goal": "weight_loss", "age": 30, "weight": 70, "height": 175})),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    let data = &body["data"];
    assert_eq!(data["userInfo"]["bmi"], "22.9");
    assert_eq!(data["parameters"]["duration"], "4_weeks");
    assert_eq!(data["parameters"]["focusArea"], "full_body");
    assert_eq!(data["parameters"]["activityLevel"], "moderate");
    assert_eq!(data["parameters"]["gender"], "male");
    assert!(data["plan"]
        .as_str()
        .unwrap()
        .contains("MONDAY - Upper Body Strength"));
}

#[tokio::test]
async fn trial_is_never_persisted() {
    let (app, _) = test_app();
    let (status, body) = send(
        app,
        "POST",
        "/api/ai/trial",
        None,
        Some(json!({"goal": "muscle_gain", "age": 25, "weight": 80, "height": 180})),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert!(body["data"].get("id").is_none());
}

#[tokio::test]
async fn trial_rejects_missing_required_fields() {
    let (app, _) = test_app();
    let (status, body) = send(
        app,
        "POST",
        "/api/ai/trial",
        None,
        Some(json!({"goal": "weight_loss", "age": 30})),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert!(body["message"]
        .as_str()
        .unwrap()
        .contains("Missing required fields"));
}

#[tokio::test]
async fn trial_treats_empty_strings_as_absent() {
    let (app, _) = test_app();
    let (status, _) = send(
        app,
        "POST",
        "/api/ai/trial",
        None,
        Some(json!({"goal": "weight_loss", "age": "", "weight": 70, "height": 175})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn trial_accepts_numeric_strings() {
    let (app, _) = test_app();
    let (status, body) = send(
        app,
        "POST",
        "/api/ai/trial",
        None,
        Some(json!({"goal": "weight_loss", "age": "30", "weight": "70", "height": "175"})),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["userInfo"]["bmi"], "22.9");
    assert_eq!(body["data"]["parameters"]["age"], 30);
}

#[tokio::test]
async fn protein_target_varies_by_goal() {
    let (app, _) = test_app();
    let (_, gain) = send(
        app.clone(),
        "POST",
        "/api/ai/trial",
        None,
        Some(json!({"goal": "muscle_gain", "age": 25, "weight": 80, "height": 180})),
    )
    .await;
    assert!(gain["data"]["plan"]
        .as_str()
        .unwrap()
        .contains("Protein: 176g per day"));

    let (_, loss) = send(
        app,
        "POST",
        "/api/ai/trial",
        None,
        Some(json!({"goal": "weight_loss", "age": 25, "weight": 80, "height": 180})),
    )
    .await;
    assert!(loss["data"]["plan"]
        .as_str()
        .unwrap()
        .contains("Protein: 144g per day"));
}

#[tokio::test]
async fn repeated_trials_differ_only_in_timestamp() {
    let (app, _) = test_app();
    let payload = json!({"goal": "maintenance", "age": 40, "weight": 75, "height": 170});
    let (_, first) = send(app.clone(), "POST", "/api/ai/trial", None, Some(payload.clone())).await;
    let (_, second) = send(app, "POST", "/api/ai/trial", None, Some(payload)).await;

    let strip = |v: &Value| {
        v["data"]["plan"]
            .as_str()
            .unwrap()
            .lines()
            .filter(|l| !l.contains("Generated by FITSPHERE AI"))
            .collect::<Vec<_>>()
            .join("\n")
    };
    assert_eq!(strip(&first), strip(&second));
}

#[tokio::test]
async fn protected_routes_reject_missing_token() {
    let (app, _) = test_app();
    for (method, uri) in [
        ("GET", "/api/auth/profile"),
        ("PUT", "/api/auth/change-password"),
        ("DELETE", "/api/auth/account"),
        ("POST", "/api/ai/generate-plan"),
        ("POST", "/api/ai/diet-suggestion"),
        ("GET", "/api/ai/plans"),
    ] {
        let (status, body) = send(app.clone(), method, uri, None, None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED, "{method} {uri}");
        assert_eq!(body["success"], false, "{method} {uri}");
    }
}

#[tokio::test]
async fn protected_routes_reject_bad_tokens() {
    let (app, _) = test_app();

    let (status, _) = send(
        app.clone(),
        "GET",
        "/api/ai/plans",
        Some("Bearer not.a.token"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    // Signed with the wrong secret.
    let other = AppState::fake();
    let mut keys = JwtKeys::from_ref(&other);
    keys.encoding = jsonwebtoken::EncodingKey::from_secret(b"wrong-secret");
    let forged = keys.sign(Uuid::new_v4()).unwrap();
    let (status, _) = send(
        app,
        "GET",
        "/api/ai/plans",
        Some(&format!("Bearer {forged}")),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

