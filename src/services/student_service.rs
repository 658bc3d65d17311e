//! Student roster operations, scoped to the owning tutor.

use serde::Deserialize;
use uuid::Uuid;

use super::{validate, ServiceError};
use crate::store::models::{NewStudent, Student, Tutor};
use crate::store::{StoreError, StudentDeletePolicy, TutoringStore};

// One message for "does not exist" and "owned by someone else", so a
// caller cannot probe for other tutors' student ids.
const MISSING_ON_UPDATE: &str = "Student not found or unauthorized to update";
const MISSING_ON_DELETE: &str = "Student not found or unauthorized to delete";
const HAS_SESSIONS: &str = "Student has recorded sessions";

/// Client-supplied student fields. There is deliberately no tutor id in
/// here: ownership always comes from the authenticated caller.
#[derive(Debug, Deserialize)]
pub struct StudentInput {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub age: Option<i32>,
}

pub struct StudentService<'a> {
    store: &'a dyn TutoringStore,
    delete_policy: StudentDeletePolicy,
}

impl<'a> StudentService<'a> {
    pub fn new(store: &'a dyn TutoringStore, delete_policy: StudentDeletePolicy) -> Self {
        Self {
            store,
            delete_policy,
        }
    }

    fn check(input: &StudentInput) -> Result<(), ServiceError> {
        validate::non_empty(&input.name, "Name")?;
        validate::email(&input.email)?;
        if let Some(age) = input.age {
            if age < 0 {
                return Err(ServiceError::Validation(
                    "Age must be non-negative".to_string(),
                ));
            }
        }
        Ok(())
    }

    pub async fn create(&self, tutor: &Tutor, input: StudentInput) -> Result<Student, ServiceError> {
        Self::check(&input)?;
        let student = self
            .store
            .insert_student(NewStudent {
                tutor_id: tutor.id,
                name: input.name,
                email: input.email,
                age: input.age,
            })
            .await?;
        Ok(student)
    }

    pub async fn list(&self, tutor: &Tutor) -> Result<Vec<Student>, ServiceError> {
        Ok(self.store.find_students_by_tutor(tutor.id).await?)
    }

    /// Unscoped listing across all tutors. Kept as a deliberate exception
    /// to ownership scoping for the analytics tooling; see DESIGN.md.
    pub async fn list_all(&self) -> Result<Vec<Student>, ServiceError> {
        Ok(self.store.all_students().await?)
    }

    pub async fn update(
        &self,
        tutor: &Tutor,
        student_id: Uuid,
        input: StudentInput,
    ) -> Result<Student, ServiceError> {
        Self::check(&input)?;

        let mut student = match self.store.find_student(student_id).await? {
            Some(s) if s.tutor_id == tutor.id => s,
            _ => return Err(ServiceError::NotFound(MISSING_ON_UPDATE.to_string())),
        };

        student.name = input.name;
        student.email = input.email;
        student.age = input.age;

        Ok(self.store.update_student(&student).await?)
    }

    pub async fn delete(&self, tutor: &Tutor, student_id: Uuid) -> Result<(), ServiceError> {
        match self.store.find_student(student_id).await? {
            Some(s) if s.tutor_id == tutor.id => {}
            _ => return Err(ServiceError::NotFound(MISSING_ON_DELETE.to_string())),
        }

        self.store
            .delete_student(student_id, self.delete_policy)
            .await
            .map_err(|e| match e {
                StoreError::Conflict(_) => ServiceError::Conflict(HAS_SESSIONS.to_string()),
                // Lost a race with a concurrent delete; same response either way
                StoreError::NotFound(_) => ServiceError::NotFound(MISSING_ON_DELETE.to_string()),
                other => other.into(),
            })
    }
}
