#![allow(dead_code)]

use std::sync::Arc;

use anyhow::{Context, Result};
use axum::body::{to_bytes, Body};
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use tutoring_api::app::{app, AppState};
use tutoring_api::store::memory::MemoryStore;
use tutoring_api::store::StudentDeletePolicy;

/// A full router over a fresh in-memory store, default delete policy.
pub fn test_app() -> Router {
    test_app_with_policy(StudentDeletePolicy::Orphan)
}

pub fn test_app_with_policy(policy: StudentDeletePolicy) -> Router {
    app(AppState::with_delete_policy(
        Arc::new(MemoryStore::new()),
        policy,
    ))
}

async fn send(app: &Router, request: Request<Body>) -> Result<(StatusCode, Value)> {
    let response = app.clone().oneshot(request).await?;
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await?;
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes)?
    };
    Ok((status, value))
}

pub async fn request(
    app: &Router,
    method: Method,
    path: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> Result<(StatusCode, Value)> {
    let mut builder = Request::builder().method(method).uri(path);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    let request = match body {
        Some(value) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(serde_json::to_vec(&value)?))?,
        None => builder.body(Body::empty())?,
    };
    send(app, request).await
}

pub async fn post_form(
    app: &Router,
    path: &str,
    fields: &[(&str, &str)],
) -> Result<(StatusCode, Value)> {
    let body = fields
        .iter()
        .map(|(k, v)| format!("{}={}", k, v))
        .collect::<Vec<_>>()
        .join("&");
    let request = Request::builder()
        .method(Method::POST)
        .uri(path)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body))?;
    send(app, request).await
}

pub async fn register(
    app: &Router,
    username: &str,
    email: &str,
    password: &str,
) -> Result<(StatusCode, Value)> {
    request(
        app,
        Method::POST,
        "/register/",
        None,
        Some(json!({ "username": username, "email": email, "password": password })),
    )
    .await
}

pub async fn login(app: &Router, username: &str, password: &str) -> Result<String> {
    let (status, body) = post_form(
        app,
        "/token/",
        &[("username", username), ("password", password)],
    )
    .await?;
    anyhow::ensure!(status == StatusCode::OK, "login failed: {} {}", status, body);
    body["access_token"]
        .as_str()
        .map(str::to_string)
        .context("missing access_token")
}

/// Register a tutor and return a usable bearer token for it.
pub async fn register_and_login(app: &Router, username: &str) -> Result<String> {
    let (status, body) = register(
        app,
        username,
        &format!("{}@example.com", username),
        "pw123",
    )
    .await?;
    anyhow::ensure!(
        status == StatusCode::OK,
        "registration failed: {} {}",
        status,
        body
    );
    login(app, username, "pw123").await
}

/// Create a student through the API and return its JSON representation.
pub async fn create_student(app: &Router, token: &str, name: &str) -> Result<Value> {
    let (status, body) = request(
        app,
        Method::POST,
        "/students/",
        Some(token),
        Some(json!({
            "name": name,
            "email": format!("{}@example.com", name.to_lowercase()),
            "age": 20
        })),
    )
    .await?;
    anyhow::ensure!(
        status == StatusCode::OK,
        "student creation failed: {} {}",
        status,
        body
    );
    Ok(body)
}

/// Log a session through the API and return its JSON representation.
pub async fn create_session(app: &Router, token: &str, student_id: &str) -> Result<Value> {
    let (status, body) = request(
        app,
        Method::POST,
        "/sessions/",
        Some(token),
        Some(json!({
            "student_id": student_id,
            "date": "2026-01-15T10:00:00Z",
            "duration": 60,
            "topic": "algebra"
        })),
    )
    .await?;
    anyhow::ensure!(
        status == StatusCode::OK,
        "session creation failed: {} {}",
        status,
        body
    );
    Ok(body)
}
