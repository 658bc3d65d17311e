//! PostgreSQL implementation of the ownership graph.

use async_trait::async_trait;
use sqlx::{postgres::PgPoolOptions, PgPool};
use tracing::info;
use uuid::Uuid;

use super::models::{Account, NewAccount, NewSession, NewStudent, Student, Tutor, TutoringSession};
use super::{StoreError, StudentDeletePolicy, TutoringStore};

pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn connect(url: &str, max_connections: u32) -> Result<Self, StoreError> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(url)
            .await
            .map_err(|e| StoreError::Connection(e.to_string()))?;
        info!("connected to database");
        Ok(Self::new(pool))
    }

    /// Creates the schema if it does not exist yet.
    ///
    /// `tutoring_sessions.student_id` carries no foreign key on purpose:
    /// the configured delete policy governs referential behavior, and the
    /// `orphan` policy must be able to leave dangling references.
    pub async fn migrate(&self) -> Result<(), StoreError> {
        let statements = [
            r#"
            CREATE TABLE IF NOT EXISTS accounts (
                id UUID PRIMARY KEY,
                username VARCHAR(100) NOT NULL UNIQUE,
                email VARCHAR(100) NOT NULL UNIQUE,
                password_digest TEXT NOT NULL
            )
            "#,
            r#"
            CREATE TABLE IF NOT EXISTS tutors (
                id UUID PRIMARY KEY,
                account_id UUID NOT NULL UNIQUE REFERENCES accounts(id),
                bio TEXT
            )
            "#,
            r#"
            CREATE TABLE IF NOT EXISTS students (
                id UUID PRIMARY KEY,
                tutor_id UUID NOT NULL REFERENCES tutors(id),
                name VARCHAR(100) NOT NULL,
                email VARCHAR(100) NOT NULL,
                age INTEGER
            )
            "#,
            r#"
            CREATE TABLE IF NOT EXISTS tutoring_sessions (
                id UUID PRIMARY KEY,
                tutor_id UUID NOT NULL REFERENCES tutors(id),
                student_id UUID NOT NULL,
                date TIMESTAMPTZ NOT NULL,
                duration_minutes INTEGER NOT NULL,
                topic VARCHAR(200) NOT NULL
            )
            "#,
        ];

        for statement in statements {
            sqlx::query(statement).execute(&self.pool).await?;
        }
        info!("schema ready");
        Ok(())
    }

    fn map_insert_err(err: sqlx::Error) -> StoreError {
        match &err {
            sqlx::Error::Database(db) if db.is_unique_violation() => {
                StoreError::Conflict("username or email already in use".to_string())
            }
            _ => StoreError::Sqlx(err),
        }
    }
}

#[async_trait]
impl TutoringStore for PgStore {
    async fn find_account_by_username(
        &self,
        username: &str,
    ) -> Result<Option<Account>, StoreError> {
        let account = sqlx::query_as::<_, Account>(
            "SELECT id, username, email, password_digest FROM accounts WHERE username = $1",
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;
        Ok(account)
    }

    async fn credentials_in_use(&self, username: &str, email: &str) -> Result<bool, StoreError> {
        let (count,): (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM accounts WHERE username = $1 OR email = $2",
        )
        .bind(username)
        .bind(email)
        .fetch_one(&self.pool)
        .await?;
        Ok(count > 0)
    }

    async fn create_account_with_tutor(
        &self,
        account: NewAccount,
    ) -> Result<(Account, Tutor), StoreError> {
        let mut tx = self.pool.begin().await?;

        let created = sqlx::query_as::<_, Account>(
            r#"
            INSERT INTO accounts (id, username, email, password_digest)
            VALUES ($1, $2, $3, $4)
            RETURNING id, username, email, password_digest
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&account.username)
        .bind(&account.email)
        .bind(&account.password_digest)
        .fetch_one(&mut *tx)
        .await
        .map_err(Self::map_insert_err)?;

        let tutor = sqlx::query_as::<_, Tutor>(
            r#"
            INSERT INTO tutors (id, account_id, bio)
            VALUES ($1, $2, $3)
            RETURNING id, account_id, bio
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(created.id)
        .bind(&account.bio)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok((created, tutor))
    }

    async fn find_tutor_by_account(&self, account_id: Uuid) -> Result<Option<Tutor>, StoreError> {
        let tutor = sqlx::query_as::<_, Tutor>(
            "SELECT id, account_id, bio FROM tutors WHERE account_id = $1",
        )
        .bind(account_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(tutor)
    }

    async fn insert_student(&self, student: NewStudent) -> Result<Student, StoreError> {
        let created = sqlx::query_as::<_, Student>(
            r#"
            INSERT INTO students (id, tutor_id, name, email, age)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, tutor_id, name, email, age
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(student.tutor_id)
        .bind(&student.name)
        .bind(&student.email)
        .bind(student.age)
        .fetch_one(&self.pool)
        .await?;
        Ok(created)
    }

    async fn find_student(&self, id: Uuid) -> Result<Option<Student>, StoreError> {
        let student = sqlx::query_as::<_, Student>(
            "SELECT id, tutor_id, name, email, age FROM students WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(student)
    }

    async fn find_students_by_tutor(&self, tutor_id: Uuid) -> Result<Vec<Student>, StoreError> {
        let students = sqlx::query_as::<_, Student>(
            "SELECT id, tutor_id, name, email, age FROM students WHERE tutor_id = $1",
        )
        .bind(tutor_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(students)
    }

    async fn all_students(&self) -> Result<Vec<Student>, StoreError> {
        let students =
            sqlx::query_as::<_, Student>("SELECT id, tutor_id, name, email, age FROM students")
                .fetch_all(&self.pool)
                .await?;
        Ok(students)
    }

    async fn update_student(&self, student: &Student) -> Result<Student, StoreError> {
        let updated = sqlx::query_as::<_, Student>(
            r#"
            UPDATE students SET name = $2, email = $3, age = $4
            WHERE id = $1
            RETURNING id, tutor_id, name, email, age
            "#,
        )
        .bind(student.id)
        .bind(&student.name)
        .bind(&student.email)
        .bind(student.age)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| StoreError::NotFound("student".to_string()))?;
        Ok(updated)
    }

    async fn delete_student(
        &self,
        id: Uuid,
        policy: StudentDeletePolicy,
    ) -> Result<(), StoreError> {
        let mut tx = self.pool.begin().await?;

        match policy {
            StudentDeletePolicy::Restrict => {
                let (count,): (i64,) = sqlx::query_as(
                    "SELECT COUNT(*) FROM tutoring_sessions WHERE student_id = $1",
                )
                .bind(id)
                .fetch_one(&mut *tx)
                .await?;
                if count > 0 {
                    return Err(StoreError::Conflict(
                        "student has recorded sessions".to_string(),
                    ));
                }
            }
            StudentDeletePolicy::Cascade => {
                sqlx::query("DELETE FROM tutoring_sessions WHERE student_id = $1")
                    .bind(id)
                    .execute(&mut *tx)
                    .await?;
            }
            StudentDeletePolicy::Orphan => {}
        }

        let result = sqlx::query("DELETE FROM students WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound("student".to_string()));
        }

        tx.commit().await?;
        Ok(())
    }

    async fn insert_session(&self, session: NewSession) -> Result<TutoringSession, StoreError> {
        let created = sqlx::query_as::<_, TutoringSession>(
            r#"
            INSERT INTO tutoring_sessions (id, tutor_id, student_id, date, duration_minutes, topic)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, tutor_id, student_id, date, duration_minutes, topic
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(session.tutor_id)
        .bind(session.student_id)
        .bind(session.date)
        .bind(session.duration_minutes)
        .bind(&session.topic)
        .fetch_one(&self.pool)
        .await?;
        Ok(created)
    }

    async fn find_session(&self, id: Uuid) -> Result<Option<TutoringSession>, StoreError> {
        let session = sqlx::query_as::<_, TutoringSession>(
            r#"
            SELECT id, tutor_id, student_id, date, duration_minutes, topic
            FROM tutoring_sessions WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(session)
    }

    async fn find_sessions_by_tutor(
        &self,
        tutor_id: Uuid,
    ) -> Result<Vec<TutoringSession>, StoreError> {
        let sessions = sqlx::query_as::<_, TutoringSession>(
            r#"
            SELECT id, tutor_id, student_id, date, duration_minutes, topic
            FROM tutoring_sessions WHERE tutor_id = $1
            "#,
        )
        .bind(tutor_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(sessions)
    }

    async fn all_sessions(&self) -> Result<Vec<TutoringSession>, StoreError> {
        let sessions = sqlx::query_as::<_, TutoringSession>(
            "SELECT id, tutor_id, student_id, date, duration_minutes, topic FROM tutoring_sessions",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(sessions)
    }

    async fn update_session(
        &self,
        session: &TutoringSession,
    ) -> Result<TutoringSession, StoreError> {
        let updated = sqlx::query_as::<_, TutoringSession>(
            r#"
            UPDATE tutoring_sessions
            SET student_id = $2, date = $3, duration_minutes = $4, topic = $5
            WHERE id = $1
            RETURNING id, tutor_id, student_id, date, duration_minutes, topic
            "#,
        )
        .bind(session.id)
        .bind(session.student_id)
        .bind(session.date)
        .bind(session.duration_minutes)
        .bind(&session.topic)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| StoreError::NotFound("session".to_string()))?;
        Ok(updated)
    }

    async fn delete_session(&self, id: Uuid) -> Result<(), StoreError> {
        let result = sqlx::query("DELETE FROM tutoring_sessions WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound("session".to_string()));
        }
        Ok(())
    }

    async fn health_check(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
