pub mod memory;
pub mod models;
pub mod postgres;

use async_trait::async_trait;
use std::str::FromStr;
use thiserror::Error;
use uuid::Uuid;

use models::{Account, NewAccount, NewSession, NewStudent, Student, Tutor, TutoringSession};

/// Errors from the record store
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("conflict: {0}")]
    Conflict(String),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("connection: {0}")]
    Connection(String),

    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
}

/// Behavior when deleting a student that still has sessions pointing at it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StudentDeletePolicy {
    /// Refuse the delete while sessions reference the student
    Restrict,
    /// Delete the referencing sessions in the same transaction
    Cascade,
    /// Delete the student and leave sessions with a dangling student id
    Orphan,
}

impl FromStr for StudentDeletePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "restrict" => Ok(StudentDeletePolicy::Restrict),
            "cascade" => Ok(StudentDeletePolicy::Cascade),
            "orphan" => Ok(StudentDeletePolicy::Orphan),
            other => Err(format!("unknown student delete policy: {}", other)),
        }
    }
}

/// The ownership graph: accounts, tutors, students, and sessions, with
/// explicit queries for every cross-entity read. Implemented by the
/// PostgreSQL store and the in-memory store.
#[async_trait]
pub trait TutoringStore: Send + Sync {
    // Accounts and tutors
    async fn find_account_by_username(&self, username: &str)
        -> Result<Option<Account>, StoreError>;
    async fn credentials_in_use(&self, username: &str, email: &str) -> Result<bool, StoreError>;
    /// Inserts the account and its tutor profile as one atomic unit. A
    /// registered account is never visible without a tutor.
    async fn create_account_with_tutor(
        &self,
        account: NewAccount,
    ) -> Result<(Account, Tutor), StoreError>;
    async fn find_tutor_by_account(&self, account_id: Uuid) -> Result<Option<Tutor>, StoreError>;

    // Students
    async fn insert_student(&self, student: NewStudent) -> Result<Student, StoreError>;
    async fn find_student(&self, id: Uuid) -> Result<Option<Student>, StoreError>;
    async fn find_students_by_tutor(&self, tutor_id: Uuid) -> Result<Vec<Student>, StoreError>;
    async fn all_students(&self) -> Result<Vec<Student>, StoreError>;
    /// Persists name, email, and age. `tutor_id` is immutable and never
    /// written back.
    async fn update_student(&self, student: &Student) -> Result<Student, StoreError>;
    async fn delete_student(
        &self,
        id: Uuid,
        policy: StudentDeletePolicy,
    ) -> Result<(), StoreError>;

    // Sessions
    async fn insert_session(&self, session: NewSession) -> Result<TutoringSession, StoreError>;
    async fn find_session(&self, id: Uuid) -> Result<Option<TutoringSession>, StoreError>;
    async fn find_sessions_by_tutor(
        &self,
        tutor_id: Uuid,
    ) -> Result<Vec<TutoringSession>, StoreError>;
    async fn all_sessions(&self) -> Result<Vec<TutoringSession>, StoreError>;
    async fn update_session(
        &self,
        session: &TutoringSession,
    ) -> Result<TutoringSession, StoreError>;
    async fn delete_session(&self, id: Uuid) -> Result<(), StoreError>;

    async fn health_check(&self) -> Result<(), StoreError>;
}
