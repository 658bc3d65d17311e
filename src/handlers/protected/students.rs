//! Student endpoints, scoped through the authorization guard.

use axum::extract::{Extension, Path, State};
use axum::response::Json;
use serde_json::{json, Value};
use uuid::Uuid;

use crate::app::AppState;
use crate::auth::guard;
use crate::error::ApiError;
use crate::middleware::AuthUser;
use crate::services::student_service::StudentInput;
use crate::store::models::Student;

/// POST /students/ - create a student owned by the caller
pub async fn create(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Json(input): Json<StudentInput>,
) -> Result<Json<Student>, ApiError> {
    let tutor = guard::resolve_tutor(state.store(), &auth.username).await?;
    let student = state.students().create(&tutor, input).await?;
    Ok(Json(student))
}

/// GET /students/ - list the caller's students
pub async fn list(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
) -> Result<Json<Vec<Student>>, ApiError> {
    let tutor = guard::resolve_tutor(state.store(), &auth.username).await?;
    let students = state.students().list(&tutor).await?;
    Ok(Json(students))
}

/// PUT /students/{id}/ - replace a student's fields (owner only)
pub async fn update(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Path(student_id): Path<Uuid>,
    Json(input): Json<StudentInput>,
) -> Result<Json<Student>, ApiError> {
    let tutor = guard::resolve_tutor(state.store(), &auth.username).await?;
    let student = state.students().update(&tutor, student_id, input).await?;
    Ok(Json(student))
}

/// DELETE /students/{id}/ - remove a student (owner only)
pub async fn remove(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Path(student_id): Path<Uuid>,
) -> Result<Json<Value>, ApiError> {
    let tutor = guard::resolve_tutor(state.store(), &auth.username).await?;
    state.students().delete(&tutor, student_id).await?;
    Ok(Json(json!({ "msg": "Student deleted successfully" })))
}
