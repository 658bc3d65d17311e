//! In-memory implementation of the ownership graph. Backs the test suite
//! and local development without a database; behavior matches the
//! PostgreSQL store, including atomicity of the registration pair and the
//! student delete policies (every mutation runs under one write lock).

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::models::{Account, NewAccount, NewSession, NewStudent, Student, Tutor, TutoringSession};
use super::{StoreError, StudentDeletePolicy, TutoringStore};

#[derive(Default)]
struct Inner {
    accounts: Vec<Account>,
    tutors: Vec<Tutor>,
    students: Vec<Student>,
    sessions: Vec<TutoringSession>,
}

#[derive(Default)]
pub struct MemoryStore {
    inner: RwLock<Inner>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TutoringStore for MemoryStore {
    async fn find_account_by_username(
        &self,
        username: &str,
    ) -> Result<Option<Account>, StoreError> {
        let inner = self.inner.read().await;
        Ok(inner
            .accounts
            .iter()
            .find(|a| a.username == username)
            .cloned())
    }

    async fn credentials_in_use(&self, username: &str, email: &str) -> Result<bool, StoreError> {
        let inner = self.inner.read().await;
        Ok(inner
            .accounts
            .iter()
            .any(|a| a.username == username || a.email == email))
    }

    async fn create_account_with_tutor(
        &self,
        account: NewAccount,
    ) -> Result<(Account, Tutor), StoreError> {
        let mut inner = self.inner.write().await;
        if inner
            .accounts
            .iter()
            .any(|a| a.username == account.username || a.email == account.email)
        {
            return Err(StoreError::Conflict(
                "username or email already in use".to_string(),
            ));
        }

        let created = Account {
            id: Uuid::new_v4(),
            username: account.username,
            email: account.email,
            password_digest: account.password_digest,
        };
        let tutor = Tutor {
            id: Uuid::new_v4(),
            account_id: created.id,
            bio: account.bio,
        };
        inner.accounts.push(created.clone());
        inner.tutors.push(tutor.clone());
        Ok((created, tutor))
    }

    async fn find_tutor_by_account(&self, account_id: Uuid) -> Result<Option<Tutor>, StoreError> {
        let inner = self.inner.read().await;
        Ok(inner
            .tutors
            .iter()
            .find(|t| t.account_id == account_id)
            .cloned())
    }

    async fn insert_student(&self, student: NewStudent) -> Result<Student, StoreError> {
        let mut inner = self.inner.write().await;
        let created = Student {
            id: Uuid::new_v4(),
            tutor_id: student.tutor_id,
            name: student.name,
            email: student.email,
            age: student.age,
        };
        inner.students.push(created.clone());
        Ok(created)
    }

    async fn find_student(&self, id: Uuid) -> Result<Option<Student>, StoreError> {
        let inner = self.inner.read().await;
        Ok(inner.students.iter().find(|s| s.id == id).cloned())
    }

    async fn find_students_by_tutor(&self, tutor_id: Uuid) -> Result<Vec<Student>, StoreError> {
        let inner = self.inner.read().await;
        Ok(inner
            .students
            .iter()
            .filter(|s| s.tutor_id == tutor_id)
            .cloned()
            .collect())
    }

    async fn all_students(&self) -> Result<Vec<Student>, StoreError> {
        let inner = self.inner.read().await;
        Ok(inner.students.clone())
    }

    async fn update_student(&self, student: &Student) -> Result<Student, StoreError> {
        let mut inner = self.inner.write().await;
        let existing = inner
            .students
            .iter_mut()
            .find(|s| s.id == student.id)
            .ok_or_else(|| StoreError::NotFound("student".to_string()))?;
        existing.name = student.name.clone();
        existing.email = student.email.clone();
        existing.age = student.age;
        Ok(existing.clone())
    }

    async fn delete_student(
        &self,
        id: Uuid,
        policy: StudentDeletePolicy,
    ) -> Result<(), StoreError> {
        let mut inner = self.inner.write().await;
        if !inner.students.iter().any(|s| s.id == id) {
            return Err(StoreError::NotFound("student".to_string()));
        }

        match policy {
            StudentDeletePolicy::Restrict => {
                if inner.sessions.iter().any(|s| s.student_id == id) {
                    return Err(StoreError::Conflict(
                        "student has recorded sessions".to_string(),
                    ));
                }
            }
            StudentDeletePolicy::Cascade => {
                inner.sessions.retain(|s| s.student_id != id);
            }
            StudentDeletePolicy::Orphan => {}
        }

        inner.students.retain(|s| s.id != id);
        Ok(())
    }

    async fn insert_session(&self, session: NewSession) -> Result<TutoringSession, StoreError> {
        let mut inner = self.inner.write().await;
        let created = TutoringSession {
            id: Uuid::new_v4(),
            tutor_id: session.tutor_id,
            student_id: session.student_id,
            date: session.date,
            duration_minutes: session.duration_minutes,
            topic: session.topic,
        };
        inner.sessions.push(created.clone());
        Ok(created)
    }

    async fn find_session(&self, id: Uuid) -> Result<Option<TutoringSession>, StoreError> {
        let inner = self.inner.read().await;
        Ok(inner.sessions.iter().find(|s| s.id == id).cloned())
    }

    async fn find_sessions_by_tutor(
        &self,
        tutor_id: Uuid,
    ) -> Result<Vec<TutoringSession>, StoreError> {
        let inner = self.inner.read().await;
        Ok(inner
            .sessions
            .iter()
            .filter(|s| s.tutor_id == tutor_id)
            .cloned()
            .collect())
    }

    async fn all_sessions(&self) -> Result<Vec<TutoringSession>, StoreError> {
        let inner = self.inner.read().await;
        Ok(inner.sessions.clone())
    }

    async fn update_session(
        &self,
        session: &TutoringSession,
    ) -> Result<TutoringSession, StoreError> {
        let mut inner = self.inner.write().await;
        let existing = inner
            .sessions
            .iter_mut()
            .find(|s| s.id == session.id)
            .ok_or_else(|| StoreError::NotFound("session".to_string()))?;
        existing.student_id = session.student_id;
        existing.date = session.date;
        existing.duration_minutes = session.duration_minutes;
        existing.topic = session.topic.clone();
        Ok(existing.clone())
    }

    async fn delete_session(&self, id: Uuid) -> Result<(), StoreError> {
        let mut inner = self.inner.write().await;
        if !inner.sessions.iter().any(|s| s.id == id) {
            return Err(StoreError::NotFound("session".to_string()));
        }
        inner.sessions.retain(|s| s.id != id);
        Ok(())
    }

    async fn health_check(&self) -> Result<(), StoreError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    async fn store_with_student_and_session() -> (MemoryStore, Uuid, Uuid) {
        let store = MemoryStore::new();
        let (_, tutor) = store
            .create_account_with_tutor(NewAccount {
                username: "t1".to_string(),
                email: "t1@x.com".to_string(),
                password_digest: "digest".to_string(),
                bio: None,
            })
            .await
            .unwrap();
        let student = store
            .insert_student(NewStudent {
                tutor_id: tutor.id,
                name: "Bob".to_string(),
                email: "b@x.com".to_string(),
                age: Some(20),
            })
            .await
            .unwrap();
        let session = store
            .insert_session(NewSession {
                tutor_id: tutor.id,
                student_id: student.id,
                date: Utc::now(),
                duration_minutes: 60,
                topic: "algebra".to_string(),
            })
            .await
            .unwrap();
        (store, student.id, session.id)
    }

    #[tokio::test]
    async fn duplicate_registration_is_a_conflict() {
        let store = MemoryStore::new();
        let new = NewAccount {
            username: "alice".to_string(),
            email: "alice@x.com".to_string(),
            password_digest: "digest".to_string(),
            bio: None,
        };
        store.create_account_with_tutor(new.clone()).await.unwrap();
        assert!(matches!(
            store.create_account_with_tutor(new).await,
            Err(StoreError::Conflict(_))
        ));
        assert_eq!(store.all_students().await.unwrap().len(), 0);
    }

    #[tokio::test]
    async fn restrict_keeps_student_and_sessions() {
        let (store, student_id, session_id) = store_with_student_and_session().await;
        let err = store
            .delete_student(student_id, StudentDeletePolicy::Restrict)
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::Conflict(_)));
        assert!(store.find_student(student_id).await.unwrap().is_some());
        assert!(store.find_session(session_id).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn cascade_removes_sessions() {
        let (store, student_id, session_id) = store_with_student_and_session().await;
        store
            .delete_student(student_id, StudentDeletePolicy::Cascade)
            .await
            .unwrap();
        assert!(store.find_student(student_id).await.unwrap().is_none());
        assert!(store.find_session(session_id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn orphan_leaves_dangling_session() {
        let (store, student_id, session_id) = store_with_student_and_session().await;
        store
            .delete_student(student_id, StudentDeletePolicy::Orphan)
            .await
            .unwrap();
        assert!(store.find_student(student_id).await.unwrap().is_none());
        let orphaned = store.find_session(session_id).await.unwrap().unwrap();
        assert_eq!(orphaned.student_id, student_id);
    }
}
