//! Authors repository for database operations

use sqlx::PgConnection;

use crate::{error::AppResult, models::author::Author};

#[derive(Clone, Copy, Debug, Default)]
pub struct AuthorsRepository;

impl AuthorsRepository {
    /// Get author by ID
    pub async fn find_by_id(&self, conn: &mut PgConnection, id: i64) -> AppResult<Option<Author>> {
        let author = sqlx::query_as::<_, Author>("SELECT id_autor, nombre FROM autores WHERE id_autor = $1")
            .bind(id)
            .fetch_optional(conn)
            .await?;
        Ok(author)
    }

    /// Get the first author (lowest id) with exactly this name
    pub async fn find_by_name(&self, conn: &mut PgConnection, name: &str) -> AppResult<Option<Author>> {
        let author = sqlx::query_as::<_, Author>(
            "SELECT id_autor, nombre FROM autores WHERE nombre = $1 ORDER BY id_autor LIMIT 1",
        )
        .bind(name)
        .fetch_optional(conn)
        .await?;
        Ok(author)
    }

    /// List all authors
    pub async fn find_all(&self, conn: &mut PgConnection) -> AppResult<Vec<Author>> {
        let authors = sqlx::query_as::<_, Author>("SELECT id_autor, nombre FROM autores ORDER BY id_autor")
            .fetch_all(conn)
            .await?;
        Ok(authors)
    }

    /// Insert a new author
    pub async fn insert(&self, conn: &mut PgConnection, name: &str) -> AppResult<Author> {
        let author = sqlx::query_as::<_, Author>(
            "INSERT INTO autores (nombre) VALUES ($1) RETURNING id_autor, nombre",
        )
        .bind(name)
        .fetch_one(conn)
        .await?;
        Ok(author)
    }

    /// Replace an author's fields, `None` when the row does not exist
    pub async fn update(&self, conn: &mut PgConnection, id: i64, name: &str) -> AppResult<Option<Author>> {
        let author = sqlx::query_as::<_, Author>(
            "UPDATE autores SET nombre = $2 WHERE id_autor = $1 RETURNING id_autor, nombre",
        )
        .bind(id)
        .bind(name)
        .fetch_optional(conn)
        .await?;
        Ok(author)
    }

    /// Delete an author (books cascade), returns whether a row was removed
    pub async fn delete(&self, conn: &mut PgConnection, id: i64) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM autores WHERE id_autor = $1")
            .bind(id)
            .execute(conn)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
