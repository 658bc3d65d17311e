//! Tutoring session log, scoped to the owning tutor. A session may only
//! ever reference a student of the same tutor.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use uuid::Uuid;

use super::{validate, ServiceError};
use crate::store::models::{NewSession, Tutor, TutoringSession};
use crate::store::TutoringStore;

const STUDENT_NOT_OWNED: &str = "Student not found or not assigned to the current tutor";
const MISSING_ON_UPDATE: &str = "Session not found or unauthorized to update";
const MISSING_ON_DELETE: &str = "Session not found or unauthorized to delete";

/// Client-supplied session fields. The tutor id always comes from the
/// authenticated caller; only the student reference is client-chosen.
#[derive(Debug, Deserialize)]
pub struct SessionInput {
    pub student_id: Uuid,
    pub date: DateTime<Utc>,
    #[serde(rename = "duration")]
    pub duration_minutes: i32,
    pub topic: String,
}

pub struct SessionService<'a> {
    store: &'a dyn TutoringStore,
}

impl<'a> SessionService<'a> {
    pub fn new(store: &'a dyn TutoringStore) -> Self {
        Self { store }
    }

    fn check(input: &SessionInput) -> Result<(), ServiceError> {
        if input.duration_minutes <= 0 {
            return Err(ServiceError::Validation(
                "Duration must be positive".to_string(),
            ));
        }
        validate::non_empty(&input.topic, "Topic")?;
        Ok(())
    }

    /// Verify that `student_id` names a student owned by `tutor_id`. Used
    /// both at creation and when an update re-points the session.
    async fn check_student_ownership(
        &self,
        tutor_id: Uuid,
        student_id: Uuid,
    ) -> Result<(), ServiceError> {
        match self.store.find_student(student_id).await? {
            Some(s) if s.tutor_id == tutor_id => Ok(()),
            _ => Err(ServiceError::NotFound(STUDENT_NOT_OWNED.to_string())),
        }
    }

    pub async fn create(
        &self,
        tutor: &Tutor,
        input: SessionInput,
    ) -> Result<TutoringSession, ServiceError> {
        Self::check(&input)?;
        self.check_student_ownership(tutor.id, input.student_id)
            .await?;

        let session = self
            .store
            .insert_session(NewSession {
                tutor_id: tutor.id,
                student_id: input.student_id,
                date: input.date,
                duration_minutes: input.duration_minutes,
                topic: input.topic,
            })
            .await?;
        Ok(session)
    }

    pub async fn list(&self, tutor: &Tutor) -> Result<Vec<TutoringSession>, ServiceError> {
        Ok(self.store.find_sessions_by_tutor(tutor.id).await?)
    }

    /// Unscoped listing across all tutors; see `StudentService::list_all`.
    pub async fn list_all(&self) -> Result<Vec<TutoringSession>, ServiceError> {
        Ok(self.store.all_sessions().await?)
    }

    pub async fn update(
        &self,
        tutor: &Tutor,
        session_id: Uuid,
        input: SessionInput,
    ) -> Result<TutoringSession, ServiceError> {
        Self::check(&input)?;

        let mut session = match self.store.find_session(session_id).await? {
            Some(s) if s.tutor_id == tutor.id => s,
            _ => return Err(ServiceError::NotFound(MISSING_ON_UPDATE.to_string())),
        };

        // The new student must belong to the tutor who owns the existing
        // session; a session can never be re-pointed across tutors.
        self.check_student_ownership(session.tutor_id, input.student_id)
            .await?;

        session.student_id = input.student_id;
        session.date = input.date;
        session.duration_minutes = input.duration_minutes;
        session.topic = input.topic;

        Ok(self.store.update_session(&session).await?)
    }

    pub async fn delete(&self, tutor: &Tutor, session_id: Uuid) -> Result<(), ServiceError> {
        match self.store.find_session(session_id).await? {
            Some(s) if s.tutor_id == tutor.id => {}
            _ => return Err(ServiceError::NotFound(MISSING_ON_DELETE.to_string())),
        }
        Ok(self.store.delete_session(session_id).await?)
    }
}
