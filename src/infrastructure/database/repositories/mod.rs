//! Database repository implementations
//!
//! Per-aggregate SeaORM repositories + unified RepositoryProvider.

pub mod course_repository;
pub mod professor_repository;
pub mod publication_repository;
pub mod repository_provider;
pub mod user_repository;

pub use repository_provider::SeaOrmRepositoryProvider;

use sea_orm::{DbErr, SqlErr};

use crate::domain::DomainError;

/// Map a unique-constraint violation to `Conflict`, anything else to a
/// database error.
fn conflict_or_db(err: DbErr, message: &str) -> DomainError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => DomainError::Conflict(message.to_string()),
        _ => DomainError::Database(err),
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    //! Seed helpers for repository and router tests.

    use sea_orm::{ConnectionTrait, DatabaseConnection};

    async fn exec(db: &DatabaseConnection, sql: String) {
        db.execute_unprepared(&sql).await.unwrap();
    }

    pub async fn user(db: &DatabaseConnection, id: i32, student_id: &str, first: &str, last: &str) {
        exec(
            db,
            format!(
                "INSERT INTO users (id, student_id, first_names, last_names, email, password_hash, created_at) \
                 VALUES ({id}, '{student_id}', '{first}', '{last}', '{student_id}@example.com', 'x', '2024-01-01T00:00:00+00:00')"
            ),
        )
        .await;
    }

    pub async fn course(db: &DatabaseConnection, id: i32, code: &str, name: &str, area: &str, credits: i32) {
        exec(
            db,
            format!(
                "INSERT INTO courses (id, code, name, area, credits, created_at) \
                 VALUES ({id}, '{code}', '{name}', '{area}', {credits}, '2024-01-01T00:00:00+00:00')"
            ),
        )
        .await;
    }

    pub async fn professor(db: &DatabaseConnection, id: i32, first: &str, last: &str) {
        exec(
            db,
            format!(
                "INSERT INTO professors (id, first_names, last_names, created_at) \
                 VALUES ({id}, '{first}', '{last}', '2024-01-01T00:00:00+00:00')"
            ),
        )
        .await;
    }

    pub async fn offering(db: &DatabaseConnection, course_id: i32, professor_id: i32, year: i32, semester: i32) {
        exec(
            db,
            format!(
                "INSERT INTO course_offerings (course_id, professor_id, year, semester) \
                 VALUES ({course_id}, {professor_id}, {year}, {semester})"
            ),
        )
        .await;
    }

    /// `target` is `(course_id, professor_id)`; `minute` orders creation time.
    pub async fn publication(
        db: &DatabaseConnection,
        id: i32,
        user_id: i32,
        target: (Option<i32>, Option<i32>),
        kind: &str,
        minute: u32,
    ) {
        let sql_opt = |v: Option<i32>| v.map_or("NULL".to_string(), |v| v.to_string());
        exec(
            db,
            format!(
                "INSERT INTO publications (id, user_id, course_id, professor_id, kind, message, created_at) \
                 VALUES ({id}, {user_id}, {}, {}, '{kind}', 'message {id}', '2024-03-01T10:{minute:02}:00+00:00')",
                sql_opt(target.0),
                sql_opt(target.1),
            ),
        )
        .await;
    }
}
