//! Users repository for database operations

use sqlx::PgConnection;

use crate::{
    error::{AppError, AppResult},
    models::user::{User, UserRequest},
};

pub(crate) fn email_taken(email: &str) -> AppError {
    AppError::Conflict(format!("Ya existe un usuario con el correo electrónico: {}", email))
}

/// Map a unique violation on the email column to `Conflict`
fn map_email_conflict(e: sqlx::Error, email: &str) -> AppError {
    match e.as_database_error() {
        Some(db_err) if db_err.is_unique_violation() => email_taken(email),
        _ => AppError::Database(e),
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct UsersRepository;

impl UsersRepository {
    /// Get user by ID
    pub async fn find_by_id(&self, conn: &mut PgConnection, id: i64) -> AppResult<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id_usuario, nombre, correo_electronico FROM usuarios WHERE id_usuario = $1",
        )
        .bind(id)
        .fetch_optional(conn)
        .await?;
        Ok(user)
    }

    /// List all users
    pub async fn find_all(&self, conn: &mut PgConnection) -> AppResult<Vec<User>> {
        let users = sqlx::query_as::<_, User>(
            "SELECT id_usuario, nombre, correo_electronico FROM usuarios ORDER BY id_usuario",
        )
        .fetch_all(conn)
        .await?;
        Ok(users)
    }

    /// Check if an email is taken, optionally ignoring one user
    pub async fn email_exists(&self, conn: &mut PgConnection, email: &str, exclude_id: Option<i64>) -> AppResult<bool> {
        let exists: bool = sqlx::query_scalar(
            r#"
            SELECT EXISTS(
                SELECT 1 FROM usuarios
                WHERE correo_electronico = $1 AND ($2::BIGINT IS NULL OR id_usuario <> $2)
            )
            "#,
        )
        .bind(email)
        .bind(exclude_id)
        .fetch_one(conn)
        .await?;
        Ok(exists)
    }

    /// Insert a new user
    pub async fn insert(&self, conn: &mut PgConnection, user: &UserRequest) -> AppResult<User> {
        let created = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO usuarios (nombre, correo_electronico)
            VALUES ($1, $2)
            RETURNING id_usuario, nombre, correo_electronico
            "#,
        )
        .bind(&user.name)
        .bind(&user.email)
        .fetch_one(conn)
        .await
        .map_err(|e| map_email_conflict(e, &user.email))?;
        Ok(created)
    }

    /// Replace a user's fields, `None` when the row does not exist
    pub async fn update(&self, conn: &mut PgConnection, id: i64, user: &UserRequest) -> AppResult<Option<User>> {
        let updated = sqlx::query_as::<_, User>(
            r#"
            UPDATE usuarios SET nombre = $2, correo_electronico = $3
            WHERE id_usuario = $1
            RETURNING id_usuario, nombre, correo_electronico
            "#,
        )
        .bind(id)
        .bind(&user.name)
        .bind(&user.email)
        .fetch_optional(conn)
        .await
        .map_err(|e| map_email_conflict(e, &user.email))?;
        Ok(updated)
    }

    /// Delete a user (loans cascade), returns whether a row was removed
    pub async fn delete(&self, conn: &mut PgConnection, id: i64) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM usuarios WHERE id_usuario = $1")
            .bind(id)
            .execute(conn)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
