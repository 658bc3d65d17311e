//! Router assembly and shared application state.

use std::sync::Arc;

use axum::routing::{get, post, put};
use axum::{extract::State, response::Json, Router};
use serde_json::{json, Value};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::config;
use crate::handlers::{protected, public};
use crate::middleware::jwt_auth_middleware;
use crate::services::account_service::AccountService;
use crate::services::session_service::SessionService;
use crate::services::student_service::StudentService;
use crate::store::{StudentDeletePolicy, TutoringStore};

/// Injected per-request dependencies: the record store handle and the
/// configured student delete policy.
#[derive(Clone)]
pub struct AppState {
    store: Arc<dyn TutoringStore>,
    student_delete_policy: StudentDeletePolicy,
}

impl AppState {
    pub fn new(store: Arc<dyn TutoringStore>) -> Self {
        Self::with_delete_policy(store, config::config().store.student_delete_policy)
    }

    pub fn with_delete_policy(
        store: Arc<dyn TutoringStore>,
        student_delete_policy: StudentDeletePolicy,
    ) -> Self {
        Self {
            store,
            student_delete_policy,
        }
    }

    pub fn store(&self) -> &dyn TutoringStore {
        self.store.as_ref()
    }

    pub fn accounts(&self) -> AccountService<'_> {
        AccountService::new(self.store.as_ref())
    }

    pub fn students(&self) -> StudentService<'_> {
        StudentService::new(self.store.as_ref(), self.student_delete_policy)
    }

    pub fn sessions(&self) -> SessionService<'_> {
        SessionService::new(self.store.as_ref())
    }
}

pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .merge(auth_routes())
        .merge(student_routes())
        .merge(session_routes())
        .with_state(state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/register/", post(public::auth::register))
        .route("/token/", post(public::auth::token))
}

fn student_routes() -> Router<AppState> {
    use protected::students;

    Router::new()
        .route("/students/", post(students::create).get(students::list))
        .route(
            "/students/:id/",
            put(students::update).delete(students::remove),
        )
        .route_layer(axum::middleware::from_fn(jwt_auth_middleware))
        // Deliberately outside the auth layer; see handlers::public::listings
        .route("/students/unprotected/", get(public::listings::all_students))
}

fn session_routes() -> Router<AppState> {
    use protected::sessions;

    Router::new()
        .route("/sessions/", post(sessions::create).get(sessions::list))
        .route(
            "/sessions/:id/",
            put(sessions::update).delete(sessions::remove),
        )
        .route_layer(axum::middleware::from_fn(jwt_auth_middleware))
        .route("/sessions/unprotected", get(public::listings::all_sessions))
}

async fn root() -> Json<Value> {
    let version = env!("CARGO_PKG_VERSION");

    Json(json!({
        "name": "Tutoring API",
        "version": version,
        "endpoints": {
            "register": "POST /register/ (public)",
            "token": "POST /token/ (public, form)",
            "students": "/students/ (bearer), /students/unprotected/ (public)",
            "sessions": "/sessions/ (bearer), /sessions/unprotected (public)",
        }
    }))
}

async fn health(State(state): State<AppState>) -> impl axum::response::IntoResponse {
    let now = chrono::Utc::now();

    match state.store().health_check().await {
        Ok(()) => (
            axum::http::StatusCode::OK,
            Json(json!({
                "status": "ok",
                "timestamp": now,
                "store": "ok"
            })),
        ),
        Err(e) => (
            axum::http::StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({
                "status": "degraded",
                "timestamp": now,
                "store_error": e.to_string()
            })),
        ),
    }
}
