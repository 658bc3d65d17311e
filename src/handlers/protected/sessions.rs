//! Session endpoints, scoped through the authorization guard.

use axum::extract::{Extension, Path, State};
use axum::response::Json;
use serde_json::{json, Value};
use uuid::Uuid;

use crate::app::AppState;
use crate::auth::guard;
use crate::error::ApiError;
use crate::middleware::AuthUser;
use crate::services::session_service::SessionInput;
use crate::store::models::TutoringSession;

/// POST /sessions/ - log a session for one of the caller's students
pub async fn create(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Json(input): Json<SessionInput>,
) -> Result<Json<TutoringSession>, ApiError> {
    let tutor = guard::resolve_tutor(state.store(), &auth.username).await?;
    let session = state.sessions().create(&tutor, input).await?;
    Ok(Json(session))
}

/// GET /sessions/ - list the caller's sessions
pub async fn list(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
) -> Result<Json<Vec<TutoringSession>>, ApiError> {
    let tutor = guard::resolve_tutor(state.store(), &auth.username).await?;
    let sessions = state.sessions().list(&tutor).await?;
    Ok(Json(sessions))
}

/// PUT /sessions/{id}/ - update a session (owner only, same-tutor student)
pub async fn update(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Path(session_id): Path<Uuid>,
    Json(input): Json<SessionInput>,
) -> Result<Json<TutoringSession>, ApiError> {
    let tutor = guard::resolve_tutor(state.store(), &auth.username).await?;
    let session = state.sessions().update(&tutor, session_id, input).await?;
    Ok(Json(session))
}

/// DELETE /sessions/{id}/ - remove a session (owner only)
pub async fn remove(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Path(session_id): Path<Uuid>,
) -> Result<Json<Value>, ApiError> {
    let tutor = guard::resolve_tutor(state.store(), &auth.username).await?;
    state.sessions().delete(&tutor, session_id).await?;
    Ok(Json(json!({ "msg": "Session deleted successfully" })))
}
