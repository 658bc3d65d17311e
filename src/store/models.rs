use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

/// Login credentials record. Deliberately not `Serialize`: the password
/// digest must never reach a response body.
#[derive(Debug, Clone, FromRow)]
pub struct Account {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub password_digest: String,
}

/// The owning principal for students and sessions, one per account.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Tutor {
    pub id: Uuid,
    pub account_id: Uuid,
    pub bio: Option<String>,
}

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Student {
    pub id: Uuid,
    pub tutor_id: Uuid,
    pub name: String,
    pub email: String,
    pub age: Option<i32>,
}

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct TutoringSession {
    pub id: Uuid,
    pub tutor_id: Uuid,
    pub student_id: Uuid,
    pub date: DateTime<Utc>,
    #[serde(rename = "duration")]
    pub duration_minutes: i32,
    pub topic: String,
}

#[derive(Debug, Clone)]
pub struct NewAccount {
    pub username: String,
    pub email: String,
    pub password_digest: String,
    pub bio: Option<String>,
}

#[derive(Debug, Clone)]
pub struct NewStudent {
    pub tutor_id: Uuid,
    pub name: String,
    pub email: String,
    pub age: Option<i32>,
}

#[derive(Debug, Clone)]
pub struct NewSession {
    pub tutor_id: Uuid,
    pub student_id: Uuid,
    pub date: DateTime<Utc>,
    pub duration_minutes: i32,
    pub topic: String,
}
