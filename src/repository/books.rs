//! Books repository for database operations

use sqlx::PgConnection;

use crate::{
    error::{AppError, AppResult},
    models::book::{Book, BookRequest, BookWithAuthor},
};

pub(crate) fn author_not_found(id: i64) -> AppError {
    AppError::BadRequest(format!("Autor no encontrado con ID: {}", id))
}

/// Map a foreign key violation on `id_autor` to `BadRequest`
fn map_missing_author(e: sqlx::Error, author_id: i64) -> AppError {
    match e.as_database_error() {
        Some(db_err) if db_err.is_foreign_key_violation() => author_not_found(author_id),
        _ => AppError::Database(e),
    }
}

/// Book columns joined with the author's name
const SELECT_WITH_AUTHOR: &str = r#"
    SELECT l.id_libro, l.titulo, l.id_autor, l.categoria, l.cantidad_disponible,
           a.nombre AS autor_nombre
    FROM libros l
    JOIN autores a ON a.id_autor = l.id_autor
"#;

#[derive(Clone, Copy, Debug, Default)]
pub struct BooksRepository;

impl BooksRepository {
    /// Get book with its author by ID
    pub async fn find_by_id(&self, conn: &mut PgConnection, id: i64) -> AppResult<Option<BookWithAuthor>> {
        let book = sqlx::query_as::<_, BookWithAuthor>(&format!("{} WHERE l.id_libro = $1", SELECT_WITH_AUTHOR))
            .bind(id)
            .fetch_optional(conn)
            .await?;
        Ok(book)
    }

    /// List all books
    pub async fn find_all(&self, conn: &mut PgConnection) -> AppResult<Vec<BookWithAuthor>> {
        let books = sqlx::query_as::<_, BookWithAuthor>(&format!("{} ORDER BY l.id_libro", SELECT_WITH_AUTHOR))
            .fetch_all(conn)
            .await?;
        Ok(books)
    }

    /// Books whose author's name matches exactly
    pub async fn find_by_author_name(&self, conn: &mut PgConnection, author_name: &str) -> AppResult<Vec<BookWithAuthor>> {
        let books = sqlx::query_as::<_, BookWithAuthor>(&format!(
            "{} WHERE a.nombre = $1 ORDER BY l.id_libro",
            SELECT_WITH_AUTHOR
        ))
        .bind(author_name)
        .fetch_all(conn)
        .await?;
        Ok(books)
    }

    /// Books whose category matches exactly
    pub async fn find_by_category(&self, conn: &mut PgConnection, category: &str) -> AppResult<Vec<BookWithAuthor>> {
        let books = sqlx::query_as::<_, BookWithAuthor>(&format!(
            "{} WHERE l.categoria = $1 ORDER BY l.id_libro",
            SELECT_WITH_AUTHOR
        ))
        .bind(category)
        .fetch_all(conn)
        .await?;
        Ok(books)
    }

    /// Insert a new book; the author must already exist
    pub async fn insert(&self, conn: &mut PgConnection, book: &BookRequest) -> AppResult<Book> {
        let created = sqlx::query_as::<_, Book>(
            r#"
            INSERT INTO libros (titulo, id_autor, categoria, cantidad_disponible)
            VALUES ($1, $2, $3, $4)
            RETURNING id_libro, titulo, id_autor, categoria, cantidad_disponible
            "#,
        )
        .bind(&book.title)
        .bind(book.author_id)
        .bind(&book.category)
        .bind(book.available_count)
        .fetch_one(conn)
        .await
        .map_err(|e| map_missing_author(e, book.author_id))?;
        Ok(created)
    }

    /// Replace every field of a book, `None` when the row does not exist
    pub async fn update(&self, conn: &mut PgConnection, id: i64, book: &BookRequest) -> AppResult<Option<Book>> {
        let updated = sqlx::query_as::<_, Book>(
            r#"
            UPDATE libros
            SET titulo = $2, id_autor = $3, categoria = $4, cantidad_disponible = $5
            WHERE id_libro = $1
            RETURNING id_libro, titulo, id_autor, categoria, cantidad_disponible
            "#,
        )
        .bind(id)
        .bind(&book.title)
        .bind(book.author_id)
        .bind(&book.category)
        .bind(book.available_count)
        .fetch_optional(conn)
        .await
        .map_err(|e| map_missing_author(e, book.author_id))?;
        Ok(updated)
    }

    /// Delete a book (loans cascade), returns whether a row was removed
    pub async fn delete(&self, conn: &mut PgConnection, id: i64) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM libros WHERE id_libro = $1")
            .bind(id)
            .execute(conn)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Take one copy off the shelf.
    ///
    /// Returns `false` when the book is missing or has no copy left; the
    /// conditional update keeps the count from going negative.
    pub async fn take_copy(&self, conn: &mut PgConnection, id: i64) -> AppResult<bool> {
        let result = sqlx::query(
            r#"
            UPDATE libros SET cantidad_disponible = cantidad_disponible - 1
            WHERE id_libro = $1 AND cantidad_disponible > 0
            "#,
        )
        .bind(id)
        .execute(conn)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Put back every copy still lent to a user, one per outstanding loan.
    ///
    /// Must run before the user's row is deleted, while the loans still exist.
    pub async fn return_copies_lent_to(&self, conn: &mut PgConnection, user_id: i64) -> AppResult<u64> {
        let result = sqlx::query(
            r#"
            UPDATE libros l
            SET cantidad_disponible = l.cantidad_disponible + lent.copies
            FROM (
                SELECT id_libro, COUNT(*)::INTEGER AS copies
                FROM prestamos
                WHERE id_usuario = $1 AND fecha_devolucion IS NULL
                GROUP BY id_libro
            ) lent
            WHERE l.id_libro = lent.id_libro
            "#,
        )
        .bind(user_id)
        .execute(conn)
        .await?;
        Ok(result.rows_affected())
    }

    /// Put one copy back on the shelf
    pub async fn return_copy(&self, conn: &mut PgConnection, id: i64) -> AppResult<()> {
        sqlx::query("UPDATE libros SET cantidad_disponible = cantidad_disponible + 1 WHERE id_libro = $1")
            .bind(id)
            .execute(conn)
            .await?;
        Ok(())
    }
}
