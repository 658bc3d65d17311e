//! Unauthenticated full listings.
//!
//! These two endpoints bypass ownership scoping on purpose: the analytics
//! tooling consumes the whole data set without credentials. They are a
//! documented exception to the ownership rule, not an oversight; every
//! other read and every write stays tutor-scoped.

use axum::extract::State;
use axum::response::Json;

use crate::app::AppState;
use crate::error::ApiError;
use crate::store::models::{Student, TutoringSession};

/// GET /students/unprotected/ - every student, regardless of owner
pub async fn all_students(
    State(state): State<AppState>,
) -> Result<Json<Vec<Student>>, ApiError> {
    let students = state.students().list_all().await?;
    Ok(Json(students))
}

/// GET /sessions/unprotected - every session, regardless of owner
pub async fn all_sessions(
    State(state): State<AppState>,
) -> Result<Json<Vec<TutoringSession>>, ApiError> {
    let sessions = state.sessions().list_all().await?;
    Ok(Json(sessions))
}
